//! One player's team

use crate::dex::DexCounts;

use super::conditions::SideCondition;
use super::pokemon::Pokemon;

/// Pending forced switch after a move like U-turn or Baton Pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfSwitch {
    Plain,
    /// Boosts and disabled moves pass to the replacement
    CopyVolatile,
}

/// Team-wide conditions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamStatus {
    pub self_switch: Option<SelfSwitch>,
    /// Layers, 0..=3
    pub spikes: u8,
    pub stealth_rock: bool,
    /// Layers, 0..=2
    pub toxic_spikes: u8,
    /// Turns until a pending Wish lands, 0 when none
    pub wish: u8,
    pub reflect: bool,
    pub light_screen: bool,
}

impl TeamStatus {
    pub fn side_start(&mut self, condition: SideCondition) {
        match condition {
            SideCondition::Spikes => {
                self.spikes = (self.spikes + 1).min(condition.max_layers());
            }
            SideCondition::ToxicSpikes => {
                self.toxic_spikes = (self.toxic_spikes + 1).min(condition.max_layers());
            }
            SideCondition::StealthRock => self.stealth_rock = true,
            SideCondition::Reflect => self.reflect = true,
            SideCondition::LightScreen => self.light_screen = true,
        }
    }

    pub fn side_end(&mut self, condition: SideCondition) {
        match condition {
            SideCondition::Spikes => self.spikes = 0,
            SideCondition::ToxicSpikes => self.toxic_spikes = 0,
            SideCondition::StealthRock => self.stealth_rock = false,
            SideCondition::Reflect => self.reflect = false,
            SideCondition::LightScreen => self.light_screen = false,
        }
    }

    /// End-of-turn bookkeeping
    pub fn upkeep(&mut self) {
        self.self_switch = None;
        self.wish = self.wish.saturating_sub(1);
    }
}

/// A team of exactly `size` slots; slot 0 is the active Pokemon
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    size: usize,
    counts: DexCounts,
    pokemon: Vec<Pokemon>,
    pub status: TeamStatus,
}

impl Team {
    pub const MAX_SIZE: usize = 6;

    /// Full-size team of unrevealed slots
    pub fn new(counts: DexCounts) -> Self {
        let mut team = Self {
            size: 0,
            counts,
            pokemon: Vec::new(),
            status: TeamStatus::default(),
        };
        team.set_size(Self::MAX_SIZE);
        team
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Change the team size, wiping every slot. Clamped to 1..=6.
    pub fn set_size(&mut self, size: usize) {
        let size = size.clamp(1, Self::MAX_SIZE);
        self.size = size;
        self.pokemon = (0..size).map(|_| Pokemon::unrevealed(&self.counts)).collect();
        self.status = TeamStatus::default();
    }

    pub fn pokemon(&self) -> &[Pokemon] {
        &self.pokemon
    }

    pub fn get(&self, slot: usize) -> Option<&Pokemon> {
        self.pokemon.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Pokemon> {
        self.pokemon.get_mut(slot)
    }

    pub fn active(&self) -> Option<&Pokemon> {
        self.pokemon.first().filter(|p| p.revealed)
    }

    pub fn active_mut(&mut self) -> Option<&mut Pokemon> {
        self.pokemon.first_mut().filter(|p| p.revealed)
    }

    /// Slot of a revealed Pokemon by nickname
    pub fn find(&self, nickname: &str) -> Option<usize> {
        self.pokemon
            .iter()
            .position(|p| p.revealed && p.nickname == nickname)
    }

    /// Slot holding `nickname`, or the first unrevealed slot for a newcomer
    pub fn slot_for(&self, nickname: &str) -> Option<usize> {
        self.find(nickname)
            .or_else(|| self.pokemon.iter().position(|p| !p.revealed))
    }

    /// Move `slot` into the active position
    pub fn bring_to_front(&mut self, slot: usize) {
        if slot < self.pokemon.len() {
            self.pokemon.swap(0, slot);
        }
    }

    /// Reorder slots so that `order[i]` ends up in slot `i`. Indices not in `order` keep
    /// their relative order after the listed ones.
    pub fn reorder(&mut self, order: &[usize]) {
        let mut taken: Vec<Option<Pokemon>> = self.pokemon.drain(..).map(Some).collect();
        let mut reordered = Vec::with_capacity(taken.len());
        for &index in order {
            if let Some(pokemon) = taken.get_mut(index).and_then(Option::take) {
                reordered.push(pokemon);
            }
        }
        reordered.extend(taken.into_iter().flatten());
        self.pokemon = reordered;
    }

    /// Benched slots that could be switched in
    pub fn switch_targets(&self) -> impl Iterator<Item = usize> + '_ {
        self.pokemon
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, p)| p.revealed && !p.is_fainted())
            .map(|(slot, _)| slot)
    }

    /// Clear the major status of every Pokemon (Heal Bell)
    pub fn cure_all(&mut self) {
        self.pokemon.iter_mut().for_each(|p| p.status = None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::{Dex, fixture};
    use psbot_protocol::PokemonDetails;

    fn revealed_team(names: &[&str]) -> Team {
        let dex = fixture();
        let mut team = Team::new(dex.counts());
        team.set_size(names.len());
        for (slot, name) in names.iter().enumerate() {
            let details = PokemonDetails::parse(name);
            team.get_mut(slot).unwrap().reveal(&dex, name, &details).unwrap();
        }
        team
    }

    #[test]
    fn test_new_team_has_six_unrevealed_slots() {
        let team = Team::new(fixture().counts());
        assert_eq!(team.size(), 6);
        assert_eq!(team.pokemon().len(), 6);
        assert!(team.active().is_none());
    }

    #[test]
    fn test_set_size_resets_slots() {
        let mut team = revealed_team(&["Pikachu", "Snorlax"]);
        team.set_size(3);
        assert_eq!(team.pokemon().len(), 3);
        assert!(team.pokemon().iter().all(|p| !p.revealed));

        team.set_size(0);
        assert_eq!(team.size(), 1);
        assert_eq!(team.pokemon().len(), 1);
    }

    #[test]
    fn test_slot_for_newcomer() {
        let dex = fixture();
        let mut team = Team::new(dex.counts());
        assert_eq!(team.slot_for("Sparky"), Some(0));

        let details = PokemonDetails::parse("Pikachu");
        team.get_mut(0).unwrap().reveal(&dex, "Sparky", &details).unwrap();
        assert_eq!(team.slot_for("Sparky"), Some(0));
        assert_eq!(team.slot_for("Lax"), Some(1));
    }

    #[test]
    fn test_bring_to_front_keeps_size() {
        let mut team = revealed_team(&["Pikachu", "Snorlax", "Gyarados"]);
        team.bring_to_front(2);
        assert_eq!(team.get(0).unwrap().nickname, "Gyarados");
        assert_eq!(team.get(2).unwrap().nickname, "Pikachu");
        assert_eq!(team.pokemon().len(), team.size());
    }

    #[test]
    fn test_reorder() {
        let mut team = revealed_team(&["Pikachu", "Snorlax", "Gyarados"]);
        team.reorder(&[2, 0]);
        let names: Vec<_> = team.pokemon().iter().map(|p| p.nickname.as_str()).collect();
        assert_eq!(names, vec!["Gyarados", "Pikachu", "Snorlax"]);
    }

    #[test]
    fn test_switch_targets_skip_fainted() {
        let mut team = revealed_team(&["Pikachu", "Snorlax", "Gyarados"]);
        team.get_mut(2).unwrap().faint();
        assert_eq!(team.switch_targets().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_hazard_layers_cap() {
        let mut status = TeamStatus::default();
        for _ in 0..5 {
            status.side_start(SideCondition::Spikes);
            status.side_start(SideCondition::ToxicSpikes);
        }
        assert_eq!(status.spikes, 3);
        assert_eq!(status.toxic_spikes, 2);
        status.side_end(SideCondition::Spikes);
        assert_eq!(status.spikes, 0);
    }

    #[test]
    fn test_upkeep_ticks_wish() {
        let mut status = TeamStatus {
            wish: 2,
            self_switch: Some(SelfSwitch::Plain),
            ..Default::default()
        };
        status.upkeep();
        assert_eq!(status.wish, 1);
        assert_eq!(status.self_switch, None);
        status.upkeep();
        status.upkeep();
        assert_eq!(status.wish, 0);
    }
}
