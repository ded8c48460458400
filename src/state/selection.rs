//! Team selection state machine.
//!
//! Tracks the user's XI: which players are picked (in batting order), who
//! captains and who keeps wicket. Every transition takes the current value
//! and returns a new one, so the invariants below hold after each step:
//!
//! - at most [`TOTAL_PLAYERS`] players are selected
//! - no player id appears twice
//! - a captain or wicket-keeper id, when set, names a selected player
//!
//! One player may hold both roles.
//!
//! # Transitions
//!
//! ```text
//!                 toggle (not selected, room left)
//!   ┌───────────┐ ─────────────────────────────────▶ ┌────────────┐
//!   │  n picked │                                    │ n+1 picked │
//!   └───────────┘ ◀───────────────────────────────── └────────────┘
//!                 toggle (selected): drops C / WK roles it held
//!
//!   set_captain(id)        id == captain or None ──▶ captain cleared
//!                          id selected            ──▶ captain = id
//!                          otherwise              ──▶ unchanged
//!
//!   reorder(ids)           permutation            ──▶ new batting order
//!                          otherwise              ──▶ SelectionError
//!
//!   reset                  any                    ──▶ empty
//! ```
//!
//! Refused selections (team full, stale ids) are no-ops rather than errors;
//! the only rejected transition is a reorder that is not a permutation.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use super::player::Player;

/// Players in a complete XI.
pub const TOTAL_PLAYERS: usize = 11;

/// Selection transition events.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    /// Add the player if absent, remove if present
    ToggleSelect(Arc<Player>),
    /// Toggle the captaincy; `None` clears it
    SetCaptain(Option<String>),
    /// Toggle the wicket-keeper; `None` clears it
    SetWicketKeeper(Option<String>),
    /// New batting order as a permutation of the selected ids
    Reorder(Vec<String>),
    Reset,
}

/// Rejected selection transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("reorder expected {expected} ids, got {got}")]
    ReorderLength { expected: usize, got: usize },

    #[error("reorder names `{id}` which is not selected or appears twice")]
    ReorderUnknown { id: String },
}

/// What still stands between the selection and a complete team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Players { remaining: usize },
    Captain,
    WicketKeeper,
}

/// The user's team selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamSelection {
    /// Selected players in batting order
    players: Vec<Arc<Player>>,

    captain_id: Option<String>,

    wicket_keeper_id: Option<String>,
}

impl TeamSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from already-resolved parts.
    ///
    /// Duplicates and anything past [`TOTAL_PLAYERS`] are dropped, and a role
    /// id that does not name a kept player is cleared.
    pub(crate) fn from_parts(
        players: Vec<Arc<Player>>,
        captain_id: Option<String>,
        wicket_keeper_id: Option<String>,
    ) -> Self {
        let mut kept: Vec<Arc<Player>> = Vec::with_capacity(TOTAL_PLAYERS);
        for player in players {
            if kept.len() >= TOTAL_PLAYERS {
                debug!(player_id = %player.id, "dropping player beyond full team");
                continue;
            }
            if kept.iter().any(|p| p.id == player.id) {
                debug!(player_id = %player.id, "dropping duplicate player");
                continue;
            }
            kept.push(player);
        }

        let mut selection = Self {
            players: kept,
            captain_id: None,
            wicket_keeper_id: None,
        };
        selection.captain_id = captain_id.filter(|id| selection.is_selected(id));
        selection.wicket_keeper_id = wicket_keeper_id.filter(|id| selection.is_selected(id));
        selection
    }

    /// Apply an event, returning the new selection or an error.
    pub fn apply(&self, event: SelectionEvent) -> Result<Self, SelectionError> {
        match event {
            SelectionEvent::ToggleSelect(player) => Ok(self.toggle_select(&player)),
            SelectionEvent::SetCaptain(id) => Ok(self.set_captain(id.as_deref())),
            SelectionEvent::SetWicketKeeper(id) => Ok(self.set_wicket_keeper(id.as_deref())),
            SelectionEvent::Reorder(ids) => self.reorder(&ids),
            SelectionEvent::Reset => Ok(self.reset()),
        }
    }

    /// Apply an event in place, returning error if invalid.
    pub fn apply_mut(&mut self, event: SelectionEvent) -> Result<(), SelectionError> {
        *self = self.apply(event)?;
        Ok(())
    }

    /// Select the player, or deselect if already selected.
    ///
    /// Deselecting clears any role the player held. Selecting into a full
    /// team leaves the selection unchanged.
    pub fn toggle_select(&self, player: &Arc<Player>) -> Self {
        let mut next = self.clone();

        if self.is_selected(&player.id) {
            next.players.retain(|p| p.id != player.id);
            if next.captain_id.as_deref() == Some(player.id.as_str()) {
                next.captain_id = None;
            }
            if next.wicket_keeper_id.as_deref() == Some(player.id.as_str()) {
                next.wicket_keeper_id = None;
            }
        } else if self.is_full() {
            debug!(player_id = %player.id, "team full, ignoring selection");
        } else {
            next.players.push(Arc::clone(player));
        }

        next
    }

    /// Toggle the captaincy.
    ///
    /// `None` or the current captain's id clears it. An id that is not
    /// selected leaves the captain unchanged.
    pub fn set_captain(&self, player_id: Option<&str>) -> Self {
        let mut next = self.clone();
        next.captain_id = self.toggle_role(self.captain_id.as_deref(), player_id, "captain");
        next
    }

    /// Toggle the wicket-keeper. Same rules as [`set_captain`](Self::set_captain).
    pub fn set_wicket_keeper(&self, player_id: Option<&str>) -> Self {
        let mut next = self.clone();
        next.wicket_keeper_id =
            self.toggle_role(self.wicket_keeper_id.as_deref(), player_id, "wicket-keeper");
        next
    }

    fn toggle_role(
        &self,
        current: Option<&str>,
        requested: Option<&str>,
        role: &'static str,
    ) -> Option<String> {
        match requested {
            None => None,
            Some(id) if current == Some(id) => None,
            Some(id) if self.is_selected(id) => Some(id.to_string()),
            Some(id) => {
                debug!(player_id = %id, role, "ignoring role for unselected player");
                current.map(str::to_string)
            }
        }
    }

    /// Replace the batting order.
    ///
    /// `ids` must be a permutation of the selected ids; otherwise the
    /// current order is kept and an error returned.
    pub fn reorder<S: AsRef<str>>(&self, ids: &[S]) -> Result<Self, SelectionError> {
        if ids.len() != self.players.len() {
            return Err(SelectionError::ReorderLength {
                expected: self.players.len(),
                got: ids.len(),
            });
        }

        let mut by_id: HashMap<&str, &Arc<Player>> =
            self.players.iter().map(|p| (p.id.as_str(), p)).collect();

        let mut players = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.as_ref();
            let player = by_id
                .remove(id)
                .ok_or_else(|| SelectionError::ReorderUnknown { id: id.to_string() })?;
            players.push(Arc::clone(player));
        }

        Ok(Self {
            players,
            captain_id: self.captain_id.clone(),
            wicket_keeper_id: self.wicket_keeper_id.clone(),
        })
    }

    /// Clear everything.
    pub fn reset(&self) -> Self {
        Self::new()
    }

    // Queries

    /// Selected players in batting order.
    pub fn players(&self) -> &[Arc<Player>] {
        &self.players
    }

    /// Selected ids in batting order.
    pub fn player_ids(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.players.iter().map(|p| p.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= TOTAL_PLAYERS
    }

    pub fn remaining_slots(&self) -> usize {
        TOTAL_PLAYERS.saturating_sub(self.players.len())
    }

    pub fn is_selected(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    /// Check if selecting this player would add them.
    pub fn can_select(&self, player_id: &str) -> bool {
        !self.is_full() && !self.is_selected(player_id)
    }

    /// 1-based batting position.
    pub fn batting_position(&self, player_id: &str) -> Option<usize> {
        self.players
            .iter()
            .position(|p| p.id == player_id)
            .map(|pos| pos + 1)
    }

    pub fn captain_id(&self) -> Option<&str> {
        self.captain_id.as_deref()
    }

    pub fn wicket_keeper_id(&self) -> Option<&str> {
        self.wicket_keeper_id.as_deref()
    }

    pub fn captain(&self) -> Option<&Arc<Player>> {
        self.find(self.captain_id.as_deref()?)
    }

    pub fn wicket_keeper(&self) -> Option<&Arc<Player>> {
        self.find(self.wicket_keeper_id.as_deref()?)
    }

    pub fn is_captain(&self, player_id: &str) -> bool {
        self.captain_id.as_deref() == Some(player_id)
    }

    pub fn is_wicket_keeper(&self, player_id: &str) -> bool {
        self.wicket_keeper_id.as_deref() == Some(player_id)
    }

    /// Selected players holding neither role, in batting order.
    pub fn rest_of_squad(&self) -> impl Iterator<Item = &Arc<Player>> + '_ {
        self.players
            .iter()
            .filter(|p| !self.is_captain(&p.id) && !self.is_wicket_keeper(&p.id))
    }

    /// A full XI with both a captain and a wicket-keeper.
    pub fn is_complete(&self) -> bool {
        self.players.len() == TOTAL_PLAYERS
            && self.captain_id.is_some()
            && self.wicket_keeper_id.is_some()
    }

    /// The next thing the user has to pick, or `None` once complete.
    pub fn next_requirement(&self) -> Option<Requirement> {
        if self.players.len() < TOTAL_PLAYERS {
            Some(Requirement::Players {
                remaining: self.remaining_slots(),
            })
        } else if self.captain_id.is_none() {
            Some(Requirement::Captain)
        } else if self.wicket_keeper_id.is_none() {
            Some(Requirement::WicketKeeper)
        } else {
            None
        }
    }

    fn find(&self, player_id: &str) -> Option<&Arc<Player>> {
        self.players.iter().find(|p| p.id == player_id)
    }
}
