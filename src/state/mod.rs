//! State management module for Howzat XI.
//!
//! This module provides the core state types and the session controller:
//!
//! - `player` - Immutable roster records
//! - `roster` - The fixed player catalogue, indexed by id
//! - `selection` - Team selection state machine (who is picked, C and WK)
//! - `stored` - Id-only projection used for storage and sharing
//! - `token` - Share token encoding
//! - `link` - Share link building and query parsing
//! - `storage` - Local persistent slot
//! - `config` - Session configuration
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                              AppState                                 │
//! │                                                                       │
//! │   intent ──▶ TeamSelection::apply ──▶ new TeamSelection ──▶ TeamStore │
//! │                     │                                      (storage   │
//! │                     │ ids resolved against                  key)      │
//! │                     ▼                                                 │
//! │               ┌──────────┐                                            │
//! │               │  Roster  │◀── shared link ?team=<token>               │
//! │               └──────────┘        │                                   │
//! │                                   ▼                                   │
//! │                         shared TeamSelection (read-only)              │
//! │                          accept ──▶ replaces own team                 │
//! │                          dismiss ──▶ dropped                          │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use howzat_state::state::{AppState, MemoryStore, Roster, SelectionEvent, SessionConfig};
//!
//! let roster = Roster::from_json(ROSTER_JSON)?;
//! let mut app = AppState::new(roster, MemoryStore::new(), SessionConfig::default())?;
//!
//! app.toggle_player("p1");
//! app.dispatch(SelectionEvent::SetCaptain(Some("p1".into())))?;
//! let link = app.share_url("https://howzat.example/");
//! ```

pub mod config;
pub mod link;
pub mod player;
pub mod roster;
pub mod selection;
pub mod storage;
pub mod stored;
pub mod token;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

// Re-export commonly used types
pub use config::{ConfigError, SessionConfig, DEFAULT_SHARE_PARAM, DEFAULT_STORAGE_KEY};
pub use player::{BowlingStyle, Player, PlayerRole, PlayerStats};
pub use roster::{Roster, RosterError};
pub use selection::{Requirement, SelectionError, SelectionEvent, TeamSelection, TOTAL_PLAYERS};
pub use storage::{KeyValueStore, MemoryStore, StorageError, TeamStore};
pub use stored::StoredState;
pub use token::{decode_token, encode_token, TokenError};

/// A completed team, captured when the user submits.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Batting order
    pub players: Vec<Arc<Player>>,
    pub captain: Arc<Player>,
    pub wicket_keeper: Arc<Player>,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Convert to JSON for display.
    pub fn to_json(&self) -> serde_json::Value {
        let players: Vec<serde_json::Value> = self
            .players
            .iter()
            .enumerate()
            .map(|(pos, p)| {
                serde_json::json!({
                    "position": pos + 1,
                    "id": p.id,
                    "name": p.name,
                    "country": p.country,
                    "role": p.role.as_str()
                })
            })
            .collect();

        serde_json::json!({
            "players": players,
            "captainId": self.captain.id,
            "wicketKeeperId": self.wicket_keeper.id,
            "submittedAt": self.submitted_at.to_rfc3339()
        })
    }
}

/// Session controller.
///
/// Owns the user's team and threads it through every transition, mirroring
/// each change to storage. A team arriving through a share link is held
/// separately until the user accepts or dismisses it.
#[derive(Debug)]
pub struct AppState<S> {
    config: SessionConfig,
    roster: Roster,
    store: TeamStore<S>,
    team: TeamSelection,
    /// Team offered by a share link, display only
    shared: Option<TeamSelection>,
}

impl<S: KeyValueStore> AppState<S> {
    /// Start a session, restoring the saved team if there is one.
    pub fn new(roster: Roster, store: S, config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let store = TeamStore::new(store, config.storage_key.clone());
        let team = store.load(&roster);
        debug!(players = team.len(), "session started");
        Ok(Self {
            config,
            roster,
            store,
            team,
            shared: None,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn store(&self) -> &TeamStore<S> {
        &self.store
    }

    /// The user's own team.
    pub fn team(&self) -> &TeamSelection {
        &self.team
    }

    /// Apply an event to the user's team, saving it if anything changed.
    pub fn dispatch(&mut self, event: SelectionEvent) -> Result<(), SelectionError> {
        let next = match self.team.apply(event) {
            Ok(next) => next,
            Err(e) => {
                warn!("rejected selection change: {}", e);
                return Err(e);
            }
        };
        self.replace_team(next);
        Ok(())
    }

    /// Toggle a roster player by id. Unknown ids are ignored.
    pub fn toggle_player(&mut self, player_id: &str) {
        let Some(player) = self.roster.get(player_id).cloned() else {
            debug!(player_id, "ignoring toggle for unknown player");
            return;
        };
        self.replace_team(self.team.toggle_select(&player));
    }

    pub fn reset(&mut self) {
        self.replace_team(self.team.reset());
    }

    fn replace_team(&mut self, next: TeamSelection) {
        if next == self.team {
            return;
        }
        self.team = next;
        // Write failures are logged by the store; memory stays authoritative.
        let _ = self.store.save(&self.team);
    }

    /// Capture the team if it is complete.
    pub fn submit(&self) -> Option<Submission> {
        if !self.team.is_complete() {
            return None;
        }
        let submission = Submission {
            players: self.team.players().to_vec(),
            captain: Arc::clone(self.team.captain()?),
            wicket_keeper: Arc::clone(self.team.wicket_keeper()?),
            submitted_at: Utc::now(),
        };
        info!(captain = %submission.captain.id, "team submitted");
        Some(submission)
    }

    /// Token for the user's current team.
    pub fn share_token(&self) -> String {
        encode_token(&self.team.to_stored())
    }

    /// Share link for the user's current team.
    pub fn share_url(&self, base: &str) -> String {
        link::share_url(base, &self.config.share_param, &self.share_token())
    }

    /// Pick up a shared team from the page query string.
    ///
    /// When a team is offered, returns the query with the share parameter
    /// removed, for the host to put in the address bar. A missing or
    /// unreadable token, or one naming no known players, offers nothing and
    /// leaves the user's own team alone.
    pub fn load_shared(&mut self, query: &str) -> Option<String> {
        let token = link::extract_param(query, &self.config.share_param)?;

        let stored = match decode_token(&token) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("ignoring shared team link: {}", e);
                return None;
            }
        };

        let shared = TeamSelection::from_stored(&stored, &self.roster);
        if shared.is_empty() {
            debug!("shared team names no known players");
            return None;
        }

        info!(players = shared.len(), "shared team offered");
        self.shared = Some(shared);
        Some(link::strip_param(query, &self.config.share_param))
    }

    /// The team offered by a share link, if any.
    pub fn shared_team(&self) -> Option<&TeamSelection> {
        self.shared.as_ref()
    }

    /// Replace the user's team with the shared one. Returns false if none
    /// was offered.
    pub fn accept_shared(&mut self) -> bool {
        let Some(shared) = self.shared.take() else {
            return false;
        };
        self.replace_team(shared);
        true
    }

    pub fn dismiss_shared(&mut self) {
        self.shared = None;
    }
}
