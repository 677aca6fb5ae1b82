//! Belief-state tracking from battle events and requests

mod battle;
mod choices;
mod request;
mod updater;


pub use battle::{BattleState, player_to_index};
pub use choices::{Choice, InvalidChoice};
pub use updater::tracker_registry;
