//! Belief-state tracking for Pokemon Showdown battles.
//!
//! This crate turns decoded battle events into what one player can know about the
//! battle: its own team exactly, the opponent's team as sets of still-possible
//! species, items and abilities that narrow as the battle reveals them.
//!
//! # Overview
//!
//! `psbot-battle` sits between `psbot-protocol` (wire format) and the client driver:
//!
//! ```text
//! psbot-protocol (wire format, events, dispatch)
//!        │
//!        ▼
//! psbot-battle (belief state + legal choices + encoding) ← THIS CRATE
//!        │
//!        └─> psbot-client (drives an agent from tracked state)
//! ```
//!
//! # Main Types
//!
//! - [`Dex`] - Injected static reference data ([`StaticDex`] loads it from JSON)
//! - [`PossibilityClass`] - Narrowing set of candidates for an unobserved fact
//! - [`BattleState`] - Both teams, the field, and the battle outcome
//! - [`Choice`] - A decision in `/choose` form
//!
//! # Example Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use psbot_battle::{BattleState, StaticDex, encode};
//! use psbot_protocol::parse_event_line;
//!
//! let dex = StaticDex::from_json(&std::fs::read_to_string("dex.json")?)?;
//! let mut battle = BattleState::new(Arc::new(dex));
//!
//! let run: Vec<_> = lines.iter().filter_map(|l| parse_event_line(l)).collect();
//! battle.apply_run(&run)?;
//!
//! let features = encode(&battle);
//! let choices = battle.legal_choices();
//! ```

pub mod dex;
pub mod encode;
pub mod error;
pub mod possibility;
pub mod tracking;
pub mod types;

pub use dex::{Dex, DexCounts, StaticDex};
pub use encode::{Encode, encode, encoded_length};
pub use error::{DexError, TrackerError};
pub use possibility::{AbilityId, ItemId, MoveId, PossibilityClass, SpeciesId};
pub use tracking::{BattleState, Choice, InvalidChoice, tracker_registry};

pub use psbot_protocol::{Player, Stat};
