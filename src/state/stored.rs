//! Id-only projection of a team selection.
//!
//! `StoredState` is what gets written to the local storage slot and what a
//! share token carries. Player payloads never leave the roster: loading
//! resolves ids back against it, dropping any the roster no longer has.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::roster::Roster;
use super::selection::TeamSelection;

/// Serialized team: ordered player ids plus role ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub selected_player_ids: Vec<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub captain_id: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    pub wicket_keeper_id: Option<String>,
}

impl StoredState {
    pub fn is_empty(&self) -> bool {
        self.selected_player_ids.is_empty()
            && self.captain_id.is_none()
            && self.wicket_keeper_id.is_none()
    }

    /// Serialize for the storage slot.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the storage slot contents.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Treat a `null` id list like a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treat an empty role id like an unset one.
pub(crate) fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = Option::<String>::deserialize(deserializer)?;
    Ok(id.filter(|id| !id.is_empty()))
}

impl TeamSelection {
    /// Project to ids, preserving batting order.
    pub fn to_stored(&self) -> StoredState {
        StoredState {
            selected_player_ids: self.player_ids().map(str::to_string).collect(),
            captain_id: self.captain_id().map(str::to_string),
            wicket_keeper_id: self.wicket_keeper_id().map(str::to_string),
        }
    }

    /// Resolve stored ids against the roster.
    ///
    /// Unknown ids are dropped. A captain or wicket-keeper whose id did not
    /// survive resolution is cleared.
    pub fn from_stored(stored: &StoredState, roster: &Roster) -> Self {
        let players = stored
            .selected_player_ids
            .iter()
            .filter_map(|id| {
                let player = roster.get(id);
                if player.is_none() {
                    warn!(player_id = %id, "dropping id missing from roster");
                }
                player.cloned()
            })
            .collect();

        Self::from_parts(
            players,
            stored.captain_id.clone(),
            stored.wicket_keeper_id.clone(),
        )
    }
}
