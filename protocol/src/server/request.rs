//! Battle request types
//!
//! These types represent the JSON structure of |request| messages. The nested
//! `ident`, `details` and `condition` strings are re-parsed with the same grammar
//! as |switch| lines, so consumers never see the raw strings.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use super::battle::{Player, PokemonDetails, PokemonId, PokemonStatus};

/// Deserialize a protocol string through its `FromStr` grammar
fn protocol_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// `disabled` is either a bool or the name of the disabling effect
fn disabled_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Disabled {
        Flag(bool),
        Source(String),
    }

    Ok(match Disabled::deserialize(deserializer)? {
        Disabled::Flag(flag) => flag,
        Disabled::Source(source) => !source.is_empty(),
    })
}

/// A battle request asking the player to make a decision
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleRequest {
    /// Request ID for synchronization
    pub rqid: Option<u64>,

    /// Active pokemon and their available moves
    #[serde(default)]
    pub active: Option<Vec<ActivePokemon>>,

    /// Information about the player's side/team
    pub side: Option<SideInfo>,

    /// Which slots need to switch
    #[serde(default)]
    pub force_switch: Option<Vec<bool>>,

    /// Whether this is team preview
    #[serde(default)]
    pub team_preview: bool,

    /// Whether we're waiting for opponent
    #[serde(default)]
    pub wait: bool,
}

impl BattleRequest {
    /// Check if this request requires a decision
    pub fn needs_decision(&self) -> bool {
        !self.wait && !self.team_preview && (self.force_switch.is_some() || self.active.is_some())
    }

    /// Check if this is a force switch request
    pub fn is_force_switch(&self) -> bool {
        self.force_switch
            .as_ref()
            .map(|fs| fs.iter().any(|&b| b))
            .unwrap_or(false)
    }

    /// The first active slot, the only one in singles
    pub fn active_pokemon(&self) -> Option<&ActivePokemon> {
        self.active.as_ref().and_then(|active| active.first())
    }
}

/// Information about an active pokemon in battle
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePokemon {
    /// Available moves
    #[serde(default)]
    pub moves: Vec<MoveSlot>,

    /// Whether the pokemon is trapped
    #[serde(default)]
    pub trapped: bool,

    /// Whether an opposing pokemon could have a trapping ability
    ///
    /// Switching is still offered; the server only refuses it once chosen.
    #[serde(default)]
    pub maybe_trapped: bool,
}

/// A move slot on an active pokemon
///
/// PP fields are absent while the pokemon is locked into a move.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveSlot {
    /// Display name of the move
    #[serde(rename = "move")]
    pub name: String,

    /// Move ID (lowercase, no spaces)
    pub id: String,

    #[serde(default)]
    pub pp: Option<u32>,

    #[serde(default, rename = "maxpp")]
    pub max_pp: Option<u32>,

    #[serde(default)]
    pub target: Option<String>,

    #[serde(default, deserialize_with = "disabled_flag")]
    pub disabled: bool,
}

/// Information about the player's side
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideInfo {
    /// Player's display name
    pub name: String,

    /// Player ID (p1 or p2)
    #[serde(deserialize_with = "protocol_str")]
    pub id: Player,

    /// Pokemon on this side, in the server's slot order
    #[serde(default)]
    pub pokemon: Vec<SidePokemon>,
}

/// A pokemon on the player's side
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePokemon {
    #[serde(deserialize_with = "protocol_str")]
    pub ident: PokemonId,

    #[serde(deserialize_with = "protocol_str")]
    pub details: PokemonDetails,

    #[serde(deserialize_with = "protocol_str")]
    pub condition: PokemonStatus,

    /// Whether this pokemon is currently active
    #[serde(default)]
    pub active: bool,

    /// Known move ids
    #[serde(default)]
    pub moves: Vec<String>,

    #[serde(default)]
    pub base_ability: String,

    /// Current ability, when it differs from the base one
    #[serde(default)]
    pub ability: Option<String>,

    /// Held item id, empty when none
    #[serde(default)]
    pub item: String,
}

impl SidePokemon {
    pub fn is_fainted(&self) -> bool {
        self.condition.is_fainted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::battle::Status;

    const REQUEST: &str = r#"{
        "active": [{"moves": [
            {"move": "Thunderbolt", "id": "thunderbolt", "pp": 24, "maxpp": 24, "target": "normal", "disabled": false},
            {"move": "Protect", "id": "protect", "pp": 0, "maxpp": 16, "target": "self", "disabled": "Disable"}
        ], "trapped": true}],
        "side": {"name": "Alice", "id": "p1", "pokemon": [
            {"ident": "p1: Sparky", "details": "Pikachu, L50, M", "condition": "90/110 par", "active": true,
             "moves": ["thunderbolt", "protect"], "baseAbility": "static", "item": "lightball"},
            {"ident": "p1: Lax", "details": "Snorlax", "condition": "0 fnt", "active": false,
             "moves": ["bodyslam"], "baseAbility": "thickfat", "item": ""}
        ]},
        "rqid": 3
    }"#;

    #[test]
    fn test_deserialize_request() {
        let request: BattleRequest = serde_json::from_str(REQUEST).unwrap();
        assert_eq!(request.rqid, Some(3));
        assert!(request.needs_decision());

        let active = request.active_pokemon().unwrap();
        assert!(active.trapped);
        assert!(!active.maybe_trapped);
        assert_eq!(active.moves[0].pp, Some(24));
        assert!(active.moves[1].disabled);

        let side = request.side.unwrap();
        assert_eq!(side.id, Player::P1);
        let sparky = &side.pokemon[0];
        assert_eq!(sparky.ident.name, "Sparky");
        assert_eq!(sparky.ident.position, None);
        assert_eq!(sparky.details.level, 50);
        assert_eq!(sparky.condition.hp, 90);
        assert_eq!(sparky.condition.condition, Some(Status::Paralysis));
        assert!(side.pokemon[1].is_fainted());
    }

    #[test]
    fn test_deserialize_bad_ident() {
        let json = r#"{"side": {"name": "A", "id": "p1", "pokemon": [
            {"ident": "Sparky", "details": "Pikachu", "condition": "100/100"}
        ]}}"#;
        assert!(serde_json::from_str::<BattleRequest>(json).is_err());
    }

    #[test]
    fn test_wait_request_needs_no_decision() {
        let request: BattleRequest = serde_json::from_str(r#"{"wait": true, "rqid": 9}"#).unwrap();
        assert!(!request.needs_decision());
    }

    #[test]
    fn test_deserialize_maybe_trapped() {
        let json = r#"{"active": [{"moves": [], "maybeTrapped": true}], "rqid": 4}"#;
        let request: BattleRequest = serde_json::from_str(json).unwrap();
        let active = request.active_pokemon().unwrap();
        assert!(active.maybe_trapped);
        assert!(!active.trapped);
    }
}
