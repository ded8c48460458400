//! Roster provider.
//!
//! The roster is the fixed catalogue of selectable players. It is loaded
//! once and only read afterwards; players are handed out as `Arc<Player>`
//! so a team can reference them without copying.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::player::Player;

/// Roster loading errors.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("invalid roster JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered, id-indexed player catalogue.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    /// Players in catalogue order
    players: Vec<Arc<Player>>,

    /// Player id to position in `players`
    index: HashMap<String, usize>,
}

impl Roster {
    /// Build a roster. If an id repeats, the first record wins lookups.
    pub fn new(players: Vec<Player>) -> Self {
        let players: Vec<Arc<Player>> = players.into_iter().map(Arc::new).collect();
        let mut index = HashMap::with_capacity(players.len());
        for (pos, player) in players.iter().enumerate() {
            index.entry(player.id.clone()).or_insert(pos);
        }
        Self { players, index }
    }

    /// Parse a JSON array of player records.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        let players: Vec<Player> = serde_json::from_str(json)?;
        Ok(Self::new(players))
    }

    /// Look up a player by id.
    pub fn get(&self, id: &str) -> Option<&Arc<Player>> {
        self.index.get(id).map(|&pos| &self.players[pos])
    }

    /// Check if a player id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All players in catalogue order.
    pub fn players(&self) -> impl Iterator<Item = &Arc<Player>> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::player::PlayerRole;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_by_id() {
        let roster = Roster::new(vec![
            Player::new("a", "Alpha", "India", PlayerRole::Batsman),
            Player::new("b", "Bravo", "India", PlayerRole::Bowler),
        ]);

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("b").unwrap().name, "Bravo");
        assert!(roster.get("z").is_none());
        assert!(roster.contains("a"));
    }

    #[test]
    fn test_preserves_catalogue_order() {
        let roster = Roster::new(vec![
            Player::new("c", "Charlie", "Australia", PlayerRole::Batsman),
            Player::new("a", "Alpha", "India", PlayerRole::Batsman),
        ]);
        let ids: Vec<&str> = roster.players().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_duplicate_id_first_wins() {
        let roster = Roster::new(vec![
            Player::new("a", "First", "India", PlayerRole::Batsman),
            Player::new("a", "Second", "India", PlayerRole::Batsman),
        ]);
        assert_eq!(roster.get("a").unwrap().name, "First");
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id":"p1","name":"One","country":"India","role":"Batsman","bowlingStyle":"none","stats":{"strikeRate":140.0}},
            {"id":"p2","name":"Two","country":"England","role":"Bowler","bowlingStyle":"Fast","stats":{"economy":6.1}}
        ]"#;
        let roster = Roster::from_json(json).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("p2").unwrap().stats.economy, Some(6.1));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            Roster::from_json("{\"not\":\"a list\"}"),
            Err(RosterError::Parse(_))
        ));
    }
}
