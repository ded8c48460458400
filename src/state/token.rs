//! Share tokens.
//!
//! A share token is a [`StoredState`] packed into a compact JSON object
//! (`{"p": [...], "c": ..., "w": ...}`) and base64-encoded with the URL-safe
//! alphabet, so it can sit in a query parameter without escaping.
//!
//! Decoding also accepts the standard alphabet, with or without padding, and
//! a `+` that a query parser turned into a space. Links built by older
//! clients with `btoa` keep working.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;

use super::stored::{blank_as_none, StoredState};

/// Why a share token could not be read.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token payload is not a team object")]
    Shape,
}

/// Wire form of a shared team.
#[derive(Debug, Deserialize)]
struct CompactTeam {
    #[serde(default)]
    p: Option<Vec<String>>,

    #[serde(default, deserialize_with = "blank_as_none")]
    c: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    w: Option<String>,
}

impl From<CompactTeam> for StoredState {
    fn from(compact: CompactTeam) -> Self {
        Self {
            selected_player_ids: compact.p.unwrap_or_default(),
            captain_id: compact.c,
            wicket_keeper_id: compact.w,
        }
    }
}

/// Encode a stored team as a URL-safe token.
pub fn encode_token(stored: &StoredState) -> String {
    let compact = serde_json::json!({
        "p": stored.selected_player_ids,
        "c": stored.captain_id,
        "w": stored.wicket_keeper_id,
    });
    URL_SAFE_NO_PAD.encode(compact.to_string())
}

/// Decode a token produced by [`encode_token`].
///
/// Callers treat any error as "no shared team".
pub fn decode_token(token: &str) -> Result<StoredState, TokenError> {
    let normalized: String = token
        .trim()
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' | ' ' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    let bytes = URL_SAFE_NO_PAD.decode(normalized)?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    if !value.is_object() {
        return Err(TokenError::Shape);
    }

    let compact: CompactTeam = serde_json::from_value(value)?;
    Ok(compact.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stored(ids: &[&str], captain: Option<&str>, keeper: Option<&str>) -> StoredState {
        StoredState {
            selected_player_ids: ids.iter().map(|s| s.to_string()).collect(),
            captain_id: captain.map(str::to_string),
            wicket_keeper_id: keeper.map(str::to_string),
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let state = stored(
            &["p1", "p2", "p3", "p4", "p5", "p6", "p7", "p8", "p9", "p10", "p11"],
            Some("p6"),
            Some("p2"),
        );
        assert_eq!(decode_token(&encode_token(&state)).unwrap(), state);

        let empty = StoredState::default();
        assert_eq!(decode_token(&encode_token(&empty)).unwrap(), empty);
    }

    #[test]
    fn test_token_is_url_safe() {
        let state = stored(&["v?>", "~~~", "ünï"], Some("v?>"), None);
        let token = encode_token(&state);

        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(decode_token(&token).unwrap(), state);
    }

    #[test]
    fn test_decode_standard_alphabet() {
        let padded = "eyJwIjpbInY/PiIsIn5+fiJdLCJjIjoidj8+IiwidyI6bnVsbH0=";
        assert_eq!(
            decode_token(padded).unwrap(),
            stored(&["v?>", "~~~"], Some("v?>"), None)
        );

        // `+` arrives as a space after form decoding
        let spaced = padded.replace('+', " ");
        assert_eq!(decode_token(&spaced).unwrap(), decode_token(padded).unwrap());
    }

    #[test]
    fn test_decode_lenient_fields() {
        let token = URL_SAFE_NO_PAD.encode(r#"{"c":"","w":"p1"}"#);
        assert_eq!(decode_token(&token).unwrap(), stored(&[], None, Some("p1")));

        let token = URL_SAFE_NO_PAD.encode(r#"{"p":null}"#);
        assert_eq!(decode_token(&token).unwrap(), StoredState::default());
    }

    #[test]
    fn test_decode_malformed() {
        assert!(matches!(decode_token("!!!not base64!!!"), Err(TokenError::Base64(_))));
        assert!(matches!(decode_token(""), Err(TokenError::Json(_))));
        assert!(matches!(
            decode_token(&URL_SAFE_NO_PAD.encode("{\"p\": [")),
            Err(TokenError::Json(_))
        ));
        assert!(matches!(
            decode_token(&URL_SAFE_NO_PAD.encode("[\"p1\"]")),
            Err(TokenError::Shape)
        ));
        assert!(matches!(
            decode_token(&URL_SAFE_NO_PAD.encode("{\"p\": \"p1\"}")),
            Err(TokenError::Json(_))
        ));
        assert!(matches!(
            decode_token(&URL_SAFE_NO_PAD.encode("{\"p\": [1, 2]}")),
            Err(TokenError::Json(_))
        ));
    }
}
