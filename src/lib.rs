//! Howzat XI State Library
//!
//! This crate provides state management for picking a fantasy cricket XI.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Team Selection State Machine** - Up to eleven players in batting order,
//!   plus a captain and a wicket-keeper, with every transition checked
//!   against the team rules.
//!
//! - **Roster** - The fixed player catalogue that selections resolve against.
//!
//! - **Persistence** - The team saved under one local storage key, restored
//!   on start, written after every change.
//!
//! - **Sharing** - Compact URL-safe tokens carrying a team, and the session
//!   logic that keeps a shared team apart from the user's own.
//!
//! # Design Principles
//!
//! 1. **Transitions are pure** - Each one takes the current team and returns
//!    a new one. Refused changes (full team, unknown captain) are no-ops.
//!
//! 2. **Ids, not payloads** - Storage and links carry player ids only; they
//!    are resolved against the roster on load and stale ids are dropped.
//!
//! 3. **Persistence is best-effort** - Storage and decode failures are logged
//!    and treated as "nothing saved" or "nothing shared".
//!
//! 4. **No rendering** - This crate is pure state, no DOM or browser APIs.
//!
//! # Example
//!
//! ```rust
//! use howzat_state::state::{
//!     AppState, MemoryStore, Player, PlayerRole, Roster, SelectionEvent, SessionConfig,
//! };
//!
//! let roster = Roster::new(
//!     (1..=11)
//!         .map(|n| Player::new(format!("p{}", n), format!("Player {}", n), "India", PlayerRole::Batsman))
//!         .collect(),
//! );
//! let mut app = AppState::new(roster, MemoryStore::new(), SessionConfig::default()).unwrap();
//!
//! for n in 1..=11 {
//!     app.toggle_player(&format!("p{}", n));
//! }
//! app.dispatch(SelectionEvent::SetCaptain(Some("p1".to_string()))).unwrap();
//! app.dispatch(SelectionEvent::SetWicketKeeper(Some("p7".to_string()))).unwrap();
//! assert!(app.team().is_complete());
//!
//! // Share the team and pick it up in another session
//! let url = app.share_url("https://howzat.example/");
//! let query = url.split_once('?').map(|(_, q)| q).unwrap();
//!
//! let roster = app.roster().clone();
//! let mut friend = AppState::new(roster, MemoryStore::new(), SessionConfig::default()).unwrap();
//! assert_eq!(friend.load_shared(query), Some(String::new()));
//! assert!(friend.accept_shared());
//! assert_eq!(friend.team(), app.team());
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
