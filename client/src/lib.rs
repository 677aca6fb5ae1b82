//! Per-battle driver for Pokemon Showdown agents.
//!
//! A [`BattleDriver`] owns the belief state of one battle room. Each incoming frame is
//! decoded, its event runs are applied through the tracker's dispatch registry, and when
//! the server asks for a decision the encoded state and legal choices are handed to a
//! [`BattleAgent`]. The driver returns the outgoing `/choose` (and `/leave`) commands;
//! moving frames over a connection is left to the embedding application.

mod agent;
mod config;
mod driver;
mod error;

pub use agent::{BattleAgent, FirstLegal};
pub use config::DriverConfig;
pub use driver::BattleDriver;
pub use error::DriverError;

pub use psbot_battle::{Choice, Dex, StaticDex};
pub use psbot_protocol::{ClientCommand, ClientMessage, ServerFrame, ServerMessage};
