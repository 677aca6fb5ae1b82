//! Static reference data lookup
//!
//! The tracker never owns game data: a [`Dex`] is injected into the battle state and
//! consulted whenever an identifier arrives from the server. Lookups of unknown
//! identifiers fail loudly with a [`DexError`], because an id the server sent but the
//! dex lacks means the tracker can no longer mirror server state.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::DexError;
use crate::types::Type;

/// Normalize a display name to a protocol id ("Choice Scarf" -> "choicescarf")
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Move ids in requests may carry a variant suffix ("hiddenpowerfire60", "return102")
pub fn canonical_move_id(name: &str) -> String {
    let id = to_id(name);
    if id.starts_with("hiddenpower") {
        return "hiddenpower".to_string();
    }
    id.trim_end_matches(|c: char| c.is_ascii_digit()).to_string()
}

/// Per-category sizes of the dex, used to size feature vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DexCounts {
    pub species: usize,
    pub moves: usize,
    pub items: usize,
    pub abilities: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesData {
    pub name: String,
    #[serde(skip)]
    pub uid: usize,
    pub types: Vec<Type>,
    #[serde(default)]
    pub base_stats: BaseStats,
    /// Ability names this species may have
    pub abilities: Vec<String>,
}

impl SpeciesData {
    pub fn has_type(&self, ty: Type) -> bool {
        self.types.contains(&ty)
    }
}

/// Who a move is aimed at, using the server's target vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveTarget {
    Normal,
    #[serde(rename = "self")]
    User,
    AdjacentAlly,
    AdjacentAllyOrSelf,
    AdjacentFoe,
    All,
    AllAdjacent,
    AllAdjacentFoes,
    Allies,
    AllySide,
    AllyTeam,
    Any,
    FoeSide,
    RandomNormal,
    Scripted,
}

impl MoveTarget {
    /// Whether the move is aimed at an opposing pokemon
    pub fn targets_foe(&self) -> bool {
        matches!(
            self,
            MoveTarget::Normal
                | MoveTarget::AdjacentFoe
                | MoveTarget::AllAdjacent
                | MoveTarget::AllAdjacentFoes
                | MoveTarget::Any
                | MoveTarget::RandomNormal
        )
    }
}

/// Side-effect tags the tracker cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveTag {
    /// Locks the user in for several turns (Outrage)
    LockedMove,
    /// Switches the user out after use (U-turn)
    SelfSwitch,
    /// Passes volatile status to the replacement (Baton Pass)
    CopyVolatile,
    /// Charges on the first turn (Solar Beam)
    TwoTurn,
    /// Protect-like
    Stall,
    /// User must recharge next turn (Hyper Beam)
    Recharge,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoveData {
    pub name: String,
    #[serde(skip)]
    pub uid: usize,
    /// Maximum PP
    pub pp: u32,
    pub target: MoveTarget,
    #[serde(default)]
    pub tags: Vec<MoveTag>,
}

impl MoveData {
    pub fn has_tag(&self, tag: MoveTag) -> bool {
        self.tags.contains(&tag)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemData {
    pub name: String,
    #[serde(skip)]
    pub uid: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AbilityData {
    pub name: String,
    #[serde(skip)]
    pub uid: usize,
}

/// Read-only game data keyed by protocol id
pub trait Dex: Send + Sync {
    fn species(&self, id: &str) -> Option<&SpeciesData>;
    fn move_data(&self, id: &str) -> Option<&MoveData>;
    fn item(&self, id: &str) -> Option<&ItemData>;
    fn ability(&self, id: &str) -> Option<&AbilityData>;
    fn species_by_uid(&self, uid: usize) -> Option<&SpeciesData>;
    fn move_by_uid(&self, uid: usize) -> Option<&MoveData>;
    fn counts(&self) -> DexCounts;

    fn lookup_species(&self, name: &str) -> Result<&SpeciesData, DexError> {
        self.species(&to_id(name))
            .ok_or_else(|| DexError::UnknownSpecies(name.to_string()))
    }

    fn lookup_move(&self, name: &str) -> Result<&MoveData, DexError> {
        self.move_data(&canonical_move_id(name))
            .ok_or_else(|| DexError::UnknownMove(name.to_string()))
    }

    fn lookup_item(&self, name: &str) -> Result<&ItemData, DexError> {
        self.item(&to_id(name))
            .ok_or_else(|| DexError::UnknownItem(name.to_string()))
    }

    fn lookup_ability(&self, name: &str) -> Result<&AbilityData, DexError> {
        self.ability(&to_id(name))
            .ok_or_else(|| DexError::UnknownAbility(name.to_string()))
    }
}

#[derive(Deserialize)]
struct DexFile {
    species: Vec<SpeciesData>,
    moves: Vec<MoveData>,
    #[serde(default)]
    items: Vec<ItemData>,
    abilities: Vec<AbilityData>,
}

/// In-memory [`Dex`] loaded from a JSON document
///
/// Uids are assigned by position. The item table always contains "none" so that a
/// consumed or missing item is representable.
#[derive(Debug, Clone)]
pub struct StaticDex {
    species: Vec<SpeciesData>,
    moves: Vec<MoveData>,
    items: Vec<ItemData>,
    abilities: Vec<AbilityData>,
    species_index: HashMap<String, usize>,
    move_index: HashMap<String, usize>,
    item_index: HashMap<String, usize>,
    ability_index: HashMap<String, usize>,
}

fn index_by_id<T>(records: &[T], name: impl Fn(&T) -> &str) -> HashMap<String, usize> {
    records
        .iter()
        .enumerate()
        .map(|(uid, record)| (to_id(name(record)), uid))
        .collect()
}

impl StaticDex {
    pub fn new(
        mut species: Vec<SpeciesData>,
        mut moves: Vec<MoveData>,
        mut items: Vec<ItemData>,
        mut abilities: Vec<AbilityData>,
    ) -> Self {
        if !items.iter().any(|item| to_id(&item.name) == "none") {
            items.insert(
                0,
                ItemData {
                    name: "None".to_string(),
                    uid: 0,
                },
            );
        }

        species.iter_mut().enumerate().for_each(|(uid, s)| s.uid = uid);
        moves.iter_mut().enumerate().for_each(|(uid, m)| m.uid = uid);
        items.iter_mut().enumerate().for_each(|(uid, i)| i.uid = uid);
        abilities.iter_mut().enumerate().for_each(|(uid, a)| a.uid = uid);

        Self {
            species_index: index_by_id(&species, |s| s.name.as_str()),
            move_index: index_by_id(&moves, |m| m.name.as_str()),
            item_index: index_by_id(&items, |i| i.name.as_str()),
            ability_index: index_by_id(&abilities, |a| a.name.as_str()),
            species,
            moves,
            items,
            abilities,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DexError> {
        let file: DexFile = serde_json::from_str(json)?;
        Ok(Self::new(file.species, file.moves, file.items, file.abilities))
    }
}

impl Dex for StaticDex {
    fn species(&self, id: &str) -> Option<&SpeciesData> {
        self.species_index.get(id).map(|&uid| &self.species[uid])
    }

    fn move_data(&self, id: &str) -> Option<&MoveData> {
        self.move_index.get(id).map(|&uid| &self.moves[uid])
    }

    fn item(&self, id: &str) -> Option<&ItemData> {
        self.item_index.get(id).map(|&uid| &self.items[uid])
    }

    fn ability(&self, id: &str) -> Option<&AbilityData> {
        self.ability_index.get(id).map(|&uid| &self.abilities[uid])
    }

    fn species_by_uid(&self, uid: usize) -> Option<&SpeciesData> {
        self.species.get(uid)
    }

    fn move_by_uid(&self, uid: usize) -> Option<&MoveData> {
        self.moves.get(uid)
    }

    fn counts(&self) -> DexCounts {
        DexCounts {
            species: self.species.len(),
            moves: self.moves.len(),
            items: self.items.len(),
            abilities: self.abilities.len(),
        }
    }
}

/// Small dex covering the species and moves used throughout the tests
#[cfg(any(test, feature = "test-fixtures"))]
pub fn fixture() -> StaticDex {
    match StaticDex::from_json(include_str!("../testdata/dex.json")) {
        Ok(dex) => dex,
        Err(e) => panic!("fixture dex is malformed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_id() {
        assert_eq!(to_id("Choice Scarf"), "choicescarf");
        assert_eq!(to_id("U-turn"), "uturn");
        assert_eq!(to_id("Farfetch’d"), "farfetchd");
    }

    #[test]
    fn test_canonical_move_id() {
        assert_eq!(canonical_move_id("hiddenpowerfire60"), "hiddenpower");
        assert_eq!(canonical_move_id("return102"), "return");
        assert_eq!(canonical_move_id("Thunderbolt"), "thunderbolt");
    }

    #[test]
    fn test_fixture_counts() {
        let dex = fixture();
        let counts = dex.counts();
        assert_eq!(counts.species, 18);
        assert_eq!(counts.moves, 30);
        assert_eq!(counts.items, 7);
        assert_eq!(counts.abilities, 30);
    }

    #[test]
    fn test_none_item_inserted_first() {
        let dex = fixture();
        assert_eq!(dex.lookup_item("none").unwrap().uid, 0);
        assert_eq!(dex.lookup_item("Leftovers").unwrap().uid, 1);
    }

    #[test]
    fn test_lookup_move() {
        let dex = fixture();
        let outrage = dex.lookup_move("Outrage").unwrap();
        assert_eq!(outrage.pp, 16);
        assert!(outrage.has_tag(MoveTag::LockedMove));
        assert_eq!(dex.lookup_move("uturn").unwrap().target, MoveTarget::Normal);
        assert_eq!(dex.lookup_move("Baton Pass").unwrap().target, MoveTarget::User);
    }

    #[test]
    fn test_unknown_ids_fail() {
        let dex = fixture();
        assert!(matches!(dex.lookup_species("Missingno"), Err(DexError::UnknownSpecies(_))));
        assert!(matches!(dex.lookup_move("Splash"), Err(DexError::UnknownMove(_))));
        assert!(matches!(dex.lookup_item("Oran Berry"), Err(DexError::UnknownItem(_))));
        assert!(matches!(dex.lookup_ability("Huge Power"), Err(DexError::UnknownAbility(_))));
    }

    #[test]
    fn test_species_types() {
        let dex = fixture();
        let magnezone = dex.lookup_species("Magnezone").unwrap();
        assert!(magnezone.has_type(Type::Steel));
        assert_eq!(magnezone.base_stats.spa, 130);
    }
}
