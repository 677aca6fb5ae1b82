//! Pokemon belief state

use psbot_protocol::{PokemonDetails, PokemonStatus, Status};

use crate::dex::{Dex, DexCounts, SpeciesData};
use crate::error::DexError;
use crate::possibility::{AbilityId, ItemId, PossibilityClass, SpeciesId};

use super::moves::Moveset;
use super::pokemon_type::Type;
use super::volatile::VolatileStatus;

/// Hit points, exact for our side and out of 100 for the opponent's
///
/// `current` never exceeds `max`; a Pokemon is fainted exactly when `current` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hp {
    current: u32,
    max: u32,
}

impl Default for Hp {
    fn default() -> Self {
        Self {
            current: 100,
            max: 100,
        }
    }
}

impl Hp {
    pub fn new(current: u32, max: u32) -> Self {
        let mut hp = Self::default();
        hp.set(current, max);
        hp
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Update from a server reading. A zero max ("0 fnt") keeps the known max.
    pub fn set(&mut self, current: u32, max: u32) {
        if max > 0 {
            self.max = max;
        }
        self.current = current.min(self.max);
    }

    pub fn faint(&mut self) {
        self.current = 0;
    }

    pub fn fainted(&self) -> bool {
        self.current == 0
    }
}

/// What the tracker believes about one team slot
#[derive(Debug, Clone, PartialEq)]
pub struct Pokemon {
    /// Name used in protocol idents; empty until revealed
    pub nickname: String,
    pub revealed: bool,

    pub species: PossibilityClass<SpeciesId>,
    /// Types of the revealed species
    pub types: Vec<Type>,
    pub level: u8,
    pub gender: Option<char>,

    pub item: PossibilityClass<ItemId>,
    pub base_ability: PossibilityClass<AbilityId>,
    /// Ability temporarily replacing the base one (Trace, Mummy)
    ///
    /// Always definite: every event that sets it names the ability in effect, so no
    /// candidate set is needed. Cleared on switch-out.
    pub override_ability: Option<AbilityId>,

    pub hp: Hp,
    /// Major status, kept across switches
    pub status: Option<Status>,
    pub moves: Moveset,
    pub volatile: VolatileStatus,
}

impl Pokemon {
    /// A slot nothing is known about yet
    pub fn unrevealed(counts: &DexCounts) -> Self {
        Self {
            nickname: String::new(),
            revealed: false,
            species: PossibilityClass::full(counts.species),
            types: Vec::new(),
            level: 100,
            gender: None,
            item: PossibilityClass::full(counts.items),
            base_ability: PossibilityClass::full(counts.abilities),
            override_ability: None,
            hp: Hp::default(),
            status: None,
            moves: Moveset::new(),
            volatile: VolatileStatus::new(),
        }
    }

    /// Fix species, level and gender from a details string
    pub fn reveal(&mut self, dex: &dyn Dex, nickname: &str, details: &PokemonDetails) -> Result<(), DexError> {
        let data = dex.lookup_species(&details.species)?;
        self.nickname = nickname.to_string();
        self.revealed = true;
        self.level = details.level;
        self.gender = details.gender;
        self.set_species(dex, data)
    }

    /// Pin the species and restrict the base ability to what it can have
    pub fn set_species(&mut self, dex: &dyn Dex, data: &SpeciesData) -> Result<(), DexError> {
        self.species.assign(SpeciesId(data.uid));
        self.types = data.types.clone();

        let mut allowed = Vec::with_capacity(data.abilities.len());
        for name in &data.abilities {
            allowed.push(AbilityId(dex.lookup_ability(name)?.uid));
        }
        if self.base_ability.narrow_to(allowed).is_err() {
            tracing::warn!(
                pokemon = %self.nickname,
                species = %data.name,
                "Known ability does not fit species, keeping it"
            );
        }
        Ok(())
    }

    /// Record an ability seen on the field
    pub fn reveal_ability(&mut self, ability: AbilityId) {
        if self.override_ability.is_some() {
            self.override_ability = Some(ability);
            return;
        }
        if !self.base_ability.is_possible(ability) {
            tracing::warn!(
                pokemon = %self.nickname,
                ability = ability.0,
                "Revealed ability was ruled out earlier, trusting the server"
            );
        }
        self.base_ability.assign(ability);
    }

    /// The ability currently in effect, if known
    pub fn effective_ability(&self) -> Option<AbilityId> {
        if self.volatile.ability_suppressed {
            return None;
        }
        self.override_ability.or_else(|| self.base_ability.definite())
    }

    /// Apply an HP/status reading
    pub fn set_condition(&mut self, condition: &PokemonStatus) {
        self.hp.set(condition.hp, condition.hp_max);
        self.status = condition.condition;
    }

    pub fn faint(&mut self) {
        self.hp.faint();
        self.status = None;
    }

    pub fn is_fainted(&self) -> bool {
        self.hp.fainted()
    }

    pub fn has_type(&self, ty: Type) -> bool {
        self.types.contains(&ty)
    }

    /// Whether ground-based effects (Arena Trap, Spikes) reach this Pokemon
    pub fn is_grounded(&self, dex: &dyn Dex, gravity: bool) -> bool {
        if gravity || self.volatile.ingrain {
            return true;
        }
        if let Some(iron_ball) = dex.item("ironball")
            && self.item.definite() == Some(ItemId(iron_ball.uid))
        {
            return true;
        }
        if self.volatile.magnet_rise || (self.has_type(Type::Flying) && !self.volatile.roost) {
            return false;
        }
        if let Some(levitate) = dex.ability("levitate")
            && self.effective_ability() == Some(AbilityId(levitate.uid))
        {
            return false;
        }
        true
    }

    /// Clear what does not survive leaving the field
    pub fn switch_out(&mut self) {
        self.volatile.clear();
        self.override_ability = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::fixture;

    fn create_test_pokemon(species: &str) -> (crate::dex::StaticDex, Pokemon) {
        let dex = fixture();
        let mut pokemon = Pokemon::unrevealed(&dex.counts());
        let details = PokemonDetails::parse(species);
        pokemon.reveal(&dex, species, &details).unwrap();
        (dex, pokemon)
    }

    #[test]
    fn test_hp_clamps_to_max() {
        let mut hp = Hp::new(250, 200);
        assert_eq!(hp.current(), 200);
        hp.set(0, 0);
        assert_eq!((hp.current(), hp.max()), (0, 200));
        assert!(hp.fainted());
    }

    #[test]
    fn test_unrevealed_is_uniform() {
        let dex = fixture();
        let pokemon = Pokemon::unrevealed(&dex.counts());
        assert!(!pokemon.revealed);
        assert!(!pokemon.is_fainted());
        assert_eq!(pokemon.species.len(), dex.counts().species);
        assert_eq!(pokemon.item.len(), dex.counts().items);
    }

    #[test]
    fn test_reveal_narrows_ability() {
        let (dex, pokemon) = create_test_pokemon("Dugtrio, L82, F");
        assert_eq!(pokemon.level, 82);
        assert_eq!(pokemon.gender, Some('F'));
        assert_eq!(pokemon.base_ability.len(), 2);
        assert!(pokemon.base_ability.is_possible(AbilityId(dex.lookup_ability("Arena Trap").unwrap().uid)));
        assert_eq!(pokemon.effective_ability(), None);
    }

    #[test]
    fn test_single_ability_species_is_definite() {
        let (dex, pokemon) = create_test_pokemon("Dusclops");
        let pressure = AbilityId(dex.lookup_ability("Pressure").unwrap().uid);
        assert_eq!(pokemon.effective_ability(), Some(pressure));
    }

    #[test]
    fn test_override_ability() {
        let (dex, mut pokemon) = create_test_pokemon("Gardevoir");
        let trace = AbilityId(dex.lookup_ability("Trace").unwrap().uid);
        let pressure = AbilityId(dex.lookup_ability("Pressure").unwrap().uid);
        pokemon.base_ability.assign(trace);
        pokemon.override_ability = Some(pressure);
        assert_eq!(pokemon.effective_ability(), Some(pressure));

        pokemon.switch_out();
        assert_eq!(pokemon.effective_ability(), Some(trace));
    }

    #[test]
    fn test_grounded() {
        let (dex, mut skarmory) = create_test_pokemon("Skarmory");
        assert!(!skarmory.is_grounded(&dex, false));
        assert!(skarmory.is_grounded(&dex, true));
        skarmory.volatile.roost = true;
        assert!(skarmory.is_grounded(&dex, false));

        let (dex, mut gengar) = create_test_pokemon("Gengar");
        assert!(!gengar.is_grounded(&dex, false));
        gengar.item.assign(ItemId(dex.lookup_item("Iron Ball").unwrap().uid));
        assert!(gengar.is_grounded(&dex, false));

        let (dex, mut magnezone) = create_test_pokemon("Magnezone");
        assert!(magnezone.is_grounded(&dex, false));
        magnezone.volatile.magnet_rise = true;
        assert!(!magnezone.is_grounded(&dex, false));
    }

    #[test]
    fn test_faint_keeps_slot() {
        let (_, mut pokemon) = create_test_pokemon("Pikachu");
        pokemon.set_condition(&"35/100 par".parse().unwrap());
        assert_eq!(pokemon.status, Some(Status::Paralysis));
        pokemon.faint();
        assert!(pokemon.is_fainted());
        assert!(pokemon.revealed);
        assert_eq!(pokemon.status, None);
    }
}
