//! BattleState - the belief state of one battle

use std::fmt;
use std::sync::Arc;

use psbot_protocol::{BattleInit, Player, PokemonId};

use crate::dex::{Dex, DexCounts};
use crate::error::TrackerError;
use crate::types::{Pokemon, RoomStatus, Team};

/// Everything the tracker believes about one battle
///
/// Both teams always hold exactly their announced number of slots. Our own side is
/// learned from the first request; until then P1 is assumed.
#[derive(Clone)]
pub struct BattleState {
    pub(crate) dex: Arc<dyn Dex>,

    /// Which player we are, once a request has told us
    perspective: Option<Player>,

    /// Indexed by [`player_to_index`]
    pub(crate) teams: [Team; 2],

    pub room: RoomStatus,

    /// Current turn number (0 = not started)
    pub turn: u32,

    // === Outcome ===
    pub ended: bool,
    pub winner: Option<String>,
    pub tie: bool,
}

impl BattleState {
    pub fn new(dex: Arc<dyn Dex>) -> Self {
        let counts = dex.counts();
        Self {
            dex,
            perspective: None,
            teams: [Team::new(counts), Team::new(counts)],
            room: RoomStatus::new(),
            turn: 0,
            ended: false,
            winner: None,
            tie: false,
        }
    }

    pub fn dex(&self) -> &dyn Dex {
        self.dex.as_ref()
    }

    pub fn counts(&self) -> DexCounts {
        self.dex.counts()
    }

    pub fn set_perspective(&mut self, player: Player) {
        self.perspective = Some(player);
    }

    pub fn perspective(&self) -> Option<Player> {
        self.perspective
    }

    /// Our side, defaulting to P1 before the first request
    pub fn me_player(&self) -> Player {
        self.perspective.unwrap_or(Player::P1)
    }

    pub fn team(&self, player: Player) -> &Team {
        &self.teams[player_to_index(player)]
    }

    pub fn team_mut(&mut self, player: Player) -> &mut Team {
        &mut self.teams[player_to_index(player)]
    }

    pub fn me(&self) -> &Team {
        self.team(self.me_player())
    }

    pub fn me_mut(&mut self) -> &mut Team {
        let player = self.me_player();
        self.team_mut(player)
    }

    pub fn opponent(&self) -> &Team {
        self.team(self.me_player().opponent())
    }

    pub fn opponent_mut(&mut self) -> &mut Team {
        let player = self.me_player().opponent();
        self.team_mut(player)
    }

    /// Take team sizes from the battle header
    pub fn apply_init(&mut self, init: &BattleInit) {
        for player in [Player::P1, Player::P2] {
            if let Some(size) = init.team_size(player) {
                let team = self.team_mut(player);
                if team.size() != size as usize {
                    team.set_size(size as usize);
                }
            }
        }
    }

    /// Slot of the revealed Pokemon an event names
    pub fn slot_of(&self, id: &PokemonId) -> Result<usize, TrackerError> {
        self.team(id.player)
            .find(&id.name)
            .ok_or_else(|| TrackerError::UnknownPokemon(id.clone()))
    }

    pub fn pokemon(&self, id: &PokemonId) -> Result<&Pokemon, TrackerError> {
        let slot = self.slot_of(id)?;
        self.team(id.player)
            .get(slot)
            .ok_or_else(|| TrackerError::UnknownPokemon(id.clone()))
    }

    pub fn pokemon_mut(&mut self, id: &PokemonId) -> Result<&mut Pokemon, TrackerError> {
        let slot = self.slot_of(id)?;
        self.team_mut(id.player)
            .get_mut(slot)
            .ok_or_else(|| TrackerError::UnknownPokemon(id.clone()))
    }

    /// Active Pokemon of the side opposing `player`
    pub fn opposing_active(&self, player: Player) -> Option<&Pokemon> {
        self.team(player.opponent()).active()
    }

    pub fn opposing_active_mut(&mut self, player: Player) -> Option<&mut Pokemon> {
        self.team_mut(player.opponent()).active_mut()
    }
}

impl fmt::Debug for BattleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BattleState")
            .field("perspective", &self.perspective)
            .field("teams", &self.teams)
            .field("room", &self.room)
            .field("turn", &self.turn)
            .field("ended", &self.ended)
            .field("winner", &self.winner)
            .field("tie", &self.tie)
            .finish_non_exhaustive()
    }
}

/// Convert a Player to an array index
pub fn player_to_index(player: Player) -> usize {
    match player {
        Player::P1 => 0,
        Player::P2 => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::fixture;
    use psbot_protocol::PokemonDetails;

    fn create_test_battle() -> BattleState {
        BattleState::new(Arc::new(fixture()))
    }

    #[test]
    fn test_player_to_index() {
        assert_eq!(player_to_index(Player::P1), 0);
        assert_eq!(player_to_index(Player::P2), 1);
    }

    #[test]
    fn test_default_perspective_is_p1() {
        let mut battle = create_test_battle();
        assert_eq!(battle.perspective(), None);
        assert_eq!(battle.me_player(), Player::P1);

        battle.set_perspective(Player::P2);
        assert_eq!(battle.me_player(), Player::P2);
        assert!(std::ptr::eq(battle.opponent(), battle.team(Player::P1)));
    }

    #[test]
    fn test_apply_init_sets_team_sizes() {
        let mut battle = create_test_battle();
        let mut init = BattleInit::default();
        init.apply_line(&["", "teamsize", "p1", "3"]).unwrap();
        init.apply_line(&["", "teamsize", "p2", "2"]).unwrap();
        battle.apply_init(&init);

        assert_eq!(battle.team(Player::P1).size(), 3);
        assert_eq!(battle.team(Player::P1).pokemon().len(), 3);
        assert_eq!(battle.team(Player::P2).size(), 2);
    }

    #[test]
    fn test_lookup_unrevealed_pokemon_fails() {
        let mut battle = create_test_battle();
        let id = PokemonId::parse("p2a: Sparky").unwrap();
        assert!(matches!(battle.pokemon(&id), Err(TrackerError::UnknownPokemon(_))));

        let dex = fixture();
        battle
            .team_mut(Player::P2)
            .get_mut(0)
            .unwrap()
            .reveal(&dex, "Sparky", &PokemonDetails::parse("Pikachu"))
            .unwrap();
        assert_eq!(battle.pokemon(&id).unwrap().nickname, "Sparky");
    }
}
