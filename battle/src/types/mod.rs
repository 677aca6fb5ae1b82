//! Belief-state entities

mod conditions;
mod field;
mod moves;
mod pokemon;
mod pokemon_type;
mod stats;
mod status;
mod team;
mod volatile;

pub use conditions::{SideCondition, Weather};
pub use field::{RoomStatus, WeatherState};
pub use moves::{Move, Moveset};
pub use pokemon::{Hp, Pokemon};
pub use pokemon_type::Type;
pub use stats::StatStages;
pub use status::VolatileName;
pub use team::{SelfSwitch, Team, TeamStatus};
pub use volatile::VolatileStatus;
