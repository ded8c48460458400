//! Share link helpers.
//!
//! Builds `?team=<token>` links and pulls the token back out of a page's
//! query string. Stripping the parameter gives the query to show once the
//! shared team has been picked up, so a reload does not offer it again.

/// Build a share link: `<base>?<param>=<token>`.
///
/// `base` is the page origin plus path, without a query.
pub fn share_url(base: &str, param: &str, token: &str) -> String {
    format!("{}?{}={}", base, param, token)
}

/// Percent-decode a query component. `+` decodes to a space.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .filter(|h| h.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|h| std::str::from_utf8(h).ok());
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(val) => {
                        out.push(val);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Split a query string into decoded key-value pairs.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let q = query.strip_prefix('?').unwrap_or(query);
    q.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let val = parts.next().unwrap_or("");
            (percent_decode(key), percent_decode(val))
        })
        .collect()
}

/// First value of `param` in `query`, decoded.
pub fn extract_param(query: &str, param: &str) -> Option<String> {
    parse_query(query)
        .into_iter()
        .find(|(k, _)| k == param)
        .map(|(_, v)| v)
}

/// `query` without any `param` entries, other pairs left as written.
///
/// Returns an empty string when nothing remains, otherwise a `?`-prefixed
/// query.
pub fn strip_param(query: &str, param: &str) -> String {
    let q = query.strip_prefix('?').unwrap_or(query);
    let kept: Vec<&str> = q
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or("");
            percent_decode(key) != param
        })
        .collect();

    if kept.is_empty() {
        String::new()
    } else {
        format!("?{}", kept.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_share_url() {
        assert_eq!(
            share_url("https://howzat.example/xi", "team", "eyJwIjpbXX0"),
            "https://howzat.example/xi?team=eyJwIjpbXX0"
        );
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("hello+world"), "hello world");
        assert_eq!(percent_decode("a%2Bb%3D"), "a+b=");
        assert_eq!(percent_decode("caf%C3%A9"), "café");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }

    #[test]
    fn test_extract_param() {
        let query = "?utm=x&team=abc%3D&team=second";
        assert_eq!(extract_param(query, "team").as_deref(), Some("abc="));
        assert_eq!(extract_param(query, "missing"), None);
        assert_eq!(extract_param("", "team"), None);
        assert_eq!(extract_param("team", "team").as_deref(), Some(""));
    }

    #[test]
    fn test_strip_param() {
        assert_eq!(strip_param("?team=abc", "team"), "");
        assert_eq!(strip_param("?a=1&team=abc&b=2", "team"), "?a=1&b=2");
        assert_eq!(strip_param("a=1", "team"), "?a=1");
        assert_eq!(strip_param("", "team"), "");
    }
}
