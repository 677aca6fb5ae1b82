//! Battle events, one variant per battle protocol tag the tracker understands

use super::battle::{Player, PokemonDetails, PokemonId, PokemonStatus, Stat, Status};
use super::cause::Cause;

/// A single decoded battle line
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    /// |-ability|POKEMON|ABILITY
    Ability {
        id: PokemonId,
        ability: String,
        cause: Option<Cause>,
    },
    /// |-endability|POKEMON
    EndAbility { id: PokemonId },
    /// |-activate|POKEMON|EFFECT|ARGS...
    Activate {
        id: PokemonId,
        effect: String,
        args: Vec<String>,
        cause: Option<Cause>,
    },
    /// |-start|POKEMON|EFFECT|ARGS...
    Start {
        id: PokemonId,
        effect: String,
        args: Vec<String>,
        cause: Option<Cause>,
    },
    /// |-end|POKEMON|EFFECT
    End {
        id: PokemonId,
        effect: String,
        cause: Option<Cause>,
    },
    /// |-boost| and |-unboost| (negative amount)
    Boost { id: PokemonId, stat: Stat, amount: i8 },
    /// |-setboost|POKEMON|STAT|AMOUNT
    SetBoost { id: PokemonId, stat: Stat, amount: i8 },
    /// |-clearboost|POKEMON
    ClearBoost { id: PokemonId },
    /// |-clearallboost
    ClearAllBoost,
    /// |cant|POKEMON|REASON|MOVE
    Cant {
        id: PokemonId,
        reason: String,
        move_name: Option<String>,
    },
    /// |-curestatus|POKEMON|STATUS
    CureStatus { id: PokemonId, status: Option<Status> },
    /// |-cureteam|POKEMON
    CureTeam { id: PokemonId },
    /// |-damage|POKEMON|HP STATUS
    Damage {
        id: PokemonId,
        status: Option<PokemonStatus>,
        cause: Option<Cause>,
    },
    /// |-heal|POKEMON|HP STATUS
    Heal {
        id: PokemonId,
        status: Option<PokemonStatus>,
        cause: Option<Cause>,
    },
    /// |-sethp|POKEMON|HP
    SetHp {
        id: PokemonId,
        status: Option<PokemonStatus>,
    },
    /// |faint|POKEMON
    Faint { id: PokemonId },
    /// |-fieldstart|CONDITION
    FieldStart { effect: String, cause: Option<Cause> },
    /// |-fieldend|CONDITION
    FieldEnd { effect: String },
    /// |move|POKEMON|MOVE|TARGET
    Move {
        id: PokemonId,
        move_name: String,
        target: Option<PokemonId>,
        cause: Option<Cause>,
    },
    /// |-mustrecharge|POKEMON
    MustRecharge { id: PokemonId },
    /// |-prepare|POKEMON|MOVE|TARGET
    Prepare {
        id: PokemonId,
        move_name: String,
        target: Option<PokemonId>,
    },
    /// |-sidestart|SIDE|CONDITION
    SideStart { side: Player, condition: String },
    /// |-sideend|SIDE|CONDITION
    SideEnd { side: Player, condition: String },
    /// |-singleturn|POKEMON|EFFECT
    SingleTurn { id: PokemonId, effect: String },
    /// |-status|POKEMON|STATUS
    Status {
        id: PokemonId,
        status: Status,
        cause: Option<Cause>,
    },
    /// |switch| and |drag|
    Switch {
        id: PokemonId,
        details: PokemonDetails,
        status: Option<PokemonStatus>,
        drag: bool,
    },
    /// |detailschange| and |-formechange|
    DetailsChange {
        id: PokemonId,
        details: PokemonDetails,
        status: Option<PokemonStatus>,
    },
    /// |-item|POKEMON|ITEM
    Item {
        id: PokemonId,
        item: String,
        cause: Option<Cause>,
    },
    /// |-enditem|POKEMON|ITEM
    EndItem {
        id: PokemonId,
        item: String,
        cause: Option<Cause>,
    },
    /// |tie
    Tie,
    /// |turn|NUMBER
    Turn(u32),
    /// |upkeep
    Upkeep,
    /// |-weather|WEATHER
    Weather {
        weather: String,
        upkeep: bool,
        cause: Option<Cause>,
    },
    /// |win|USER
    Win(String),
}

/// Fieldless discriminant of [`BattleEvent`], used as the subscription key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ability,
    EndAbility,
    Activate,
    Start,
    End,
    Boost,
    SetBoost,
    ClearBoost,
    ClearAllBoost,
    Cant,
    CureStatus,
    CureTeam,
    Damage,
    Heal,
    SetHp,
    Faint,
    FieldStart,
    FieldEnd,
    Move,
    MustRecharge,
    Prepare,
    SideStart,
    SideEnd,
    SingleTurn,
    Status,
    Switch,
    DetailsChange,
    Item,
    EndItem,
    Tie,
    Turn,
    Upkeep,
    Weather,
    Win,
}

impl BattleEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            BattleEvent::Ability { .. } => EventKind::Ability,
            BattleEvent::EndAbility { .. } => EventKind::EndAbility,
            BattleEvent::Activate { .. } => EventKind::Activate,
            BattleEvent::Start { .. } => EventKind::Start,
            BattleEvent::End { .. } => EventKind::End,
            BattleEvent::Boost { .. } => EventKind::Boost,
            BattleEvent::SetBoost { .. } => EventKind::SetBoost,
            BattleEvent::ClearBoost { .. } => EventKind::ClearBoost,
            BattleEvent::ClearAllBoost => EventKind::ClearAllBoost,
            BattleEvent::Cant { .. } => EventKind::Cant,
            BattleEvent::CureStatus { .. } => EventKind::CureStatus,
            BattleEvent::CureTeam { .. } => EventKind::CureTeam,
            BattleEvent::Damage { .. } => EventKind::Damage,
            BattleEvent::Heal { .. } => EventKind::Heal,
            BattleEvent::SetHp { .. } => EventKind::SetHp,
            BattleEvent::Faint { .. } => EventKind::Faint,
            BattleEvent::FieldStart { .. } => EventKind::FieldStart,
            BattleEvent::FieldEnd { .. } => EventKind::FieldEnd,
            BattleEvent::Move { .. } => EventKind::Move,
            BattleEvent::MustRecharge { .. } => EventKind::MustRecharge,
            BattleEvent::Prepare { .. } => EventKind::Prepare,
            BattleEvent::SideStart { .. } => EventKind::SideStart,
            BattleEvent::SideEnd { .. } => EventKind::SideEnd,
            BattleEvent::SingleTurn { .. } => EventKind::SingleTurn,
            BattleEvent::Status { .. } => EventKind::Status,
            BattleEvent::Switch { .. } => EventKind::Switch,
            BattleEvent::DetailsChange { .. } => EventKind::DetailsChange,
            BattleEvent::Item { .. } => EventKind::Item,
            BattleEvent::EndItem { .. } => EventKind::EndItem,
            BattleEvent::Tie => EventKind::Tie,
            BattleEvent::Turn(_) => EventKind::Turn,
            BattleEvent::Upkeep => EventKind::Upkeep,
            BattleEvent::Weather { .. } => EventKind::Weather,
            BattleEvent::Win(_) => EventKind::Win,
        }
    }

    /// The pokemon this event is about, if any
    pub fn subject(&self) -> Option<&PokemonId> {
        match self {
            BattleEvent::Ability { id, .. }
            | BattleEvent::EndAbility { id }
            | BattleEvent::Activate { id, .. }
            | BattleEvent::Start { id, .. }
            | BattleEvent::End { id, .. }
            | BattleEvent::Boost { id, .. }
            | BattleEvent::SetBoost { id, .. }
            | BattleEvent::ClearBoost { id }
            | BattleEvent::Cant { id, .. }
            | BattleEvent::CureStatus { id, .. }
            | BattleEvent::CureTeam { id }
            | BattleEvent::Damage { id, .. }
            | BattleEvent::Heal { id, .. }
            | BattleEvent::SetHp { id, .. }
            | BattleEvent::Faint { id }
            | BattleEvent::Move { id, .. }
            | BattleEvent::MustRecharge { id }
            | BattleEvent::Prepare { id, .. }
            | BattleEvent::SingleTurn { id, .. }
            | BattleEvent::Status { id, .. }
            | BattleEvent::Switch { id, .. }
            | BattleEvent::DetailsChange { id, .. }
            | BattleEvent::Item { id, .. }
            | BattleEvent::EndItem { id, .. } => Some(id),
            BattleEvent::ClearAllBoost
            | BattleEvent::FieldStart { .. }
            | BattleEvent::FieldEnd { .. }
            | BattleEvent::SideStart { .. }
            | BattleEvent::SideEnd { .. }
            | BattleEvent::Tie
            | BattleEvent::Turn(_)
            | BattleEvent::Upkeep
            | BattleEvent::Weather { .. }
            | BattleEvent::Win(_) => None,
        }
    }

    /// The cause annotation, if the variant carries one
    pub fn cause(&self) -> Option<&Cause> {
        match self {
            BattleEvent::Ability { cause, .. }
            | BattleEvent::Activate { cause, .. }
            | BattleEvent::Start { cause, .. }
            | BattleEvent::End { cause, .. }
            | BattleEvent::Damage { cause, .. }
            | BattleEvent::Heal { cause, .. }
            | BattleEvent::FieldStart { cause, .. }
            | BattleEvent::Move { cause, .. }
            | BattleEvent::Status { cause, .. }
            | BattleEvent::Item { cause, .. }
            | BattleEvent::EndItem { cause, .. }
            | BattleEvent::Weather { cause, .. } => cause.as_ref(),
            _ => None,
        }
    }
}
