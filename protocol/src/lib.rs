//! Wire-level types for the Pokemon Showdown battle protocol.
//!
//! A server frame is decoded into [`ServerMessage`]s: standalone messages (`challstr`,
//! `request`, `updateuser`, ...) and runs of [`BattleEvent`]s. Event runs are handed to an
//! [`EventRegistry`], which fans each event out to its subscribers in arrival order.
//!
//! ```text
//! raw frame ──parse_server_frame──> ServerFrame
//!                                     ├─ ServerMessage::Request(BattleRequest)
//!                                     └─ ServerMessage::BattleProgress(Vec<BattleEvent>)
//!                                                 │
//!                                                 ▼
//!                                     EventRegistry::dispatch_run
//! ```

use thiserror::Error;

pub mod client;
pub mod dispatch;
pub mod server;

pub use client::{ClientCommand, ClientMessage};
pub use dispatch::EventRegistry;
pub use server::{
    ActivePokemon, BattleEvent, BattleInit, BattleRequest, Cause, ChallengeState, EventKind,
    GameType, MoveSlot, Player, PokemonDetails, PokemonId, PokemonStatus, RoomType,
    ServerFrame, ServerMessage, SideInfo, SidePokemon, Stat, Status, parse_event_line,
    parse_server_frame,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Empty message")]
    EmptyMessage,

    #[error("Malformed {context} payload: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ParseError {
    /// Whether this error must abort decoding of the whole frame.
    ///
    /// Only structurally invalid JSON payloads are fatal; everything else is
    /// treated as protocol noise and the offending line is skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::Json { .. })
    }
}
