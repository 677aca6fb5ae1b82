//! Per-Pokemon state that is wiped on switch-out

use crate::possibility::MoveId;

use super::stats::StatStages;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolatileStatus {
    pub boosts: StatStages,

    /// Indexed by move slot
    pub disabled: [bool; 4],
    pub disable_turns: [u32; 4],

    pub confused: bool,
    pub confusion_turns: u32,

    /// Locked into repeating a move (Outrage)
    pub locked_move: bool,
    /// Slot of the last move used, for locked-move choices
    pub last_used_move: Option<usize>,

    pub must_recharge: bool,

    /// Used a stall move this turn
    pub stalling: bool,
    /// Consecutive stall moves
    pub stall_turns: u32,

    pub ingrain: bool,
    pub magnet_rise: bool,
    pub embargo: bool,
    pub roost: bool,

    /// Move being charged, if any
    pub two_turn: Option<MoveId>,

    pub ability_suppressed: bool,
    /// Truant will skip the next turn
    pub truant: bool,

    pub substitute: bool,
    pub leech_seed: bool,

    /// Trapped by a known effect (Mean Look, partial trap)
    pub trapped: bool,
}

impl VolatileStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset on switch-out
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Take the passable subset of `outgoing` (copy-volatile switch)
    pub fn copy_passable_from(&mut self, outgoing: &VolatileStatus) {
        self.boosts = outgoing.boosts;
        self.disabled = outgoing.disabled;
    }

    /// Locked, charging or recharging: the move is chosen for us
    pub fn is_committed(&self) -> bool {
        self.locked_move || self.two_turn.is_some() || self.must_recharge
    }

    pub fn disable(&mut self, slot: usize) {
        if let Some(flag) = self.disabled.get_mut(slot) {
            *flag = true;
            self.disable_turns[slot] = 1;
        }
    }

    pub fn enable_all(&mut self) {
        self.disabled = [false; 4];
        self.disable_turns = [0; 4];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psbot_protocol::Stat;

    #[test]
    fn test_clear_resets_everything() {
        let mut volatile = VolatileStatus::new();
        volatile.boosts.boost(Stat::Atk, 2);
        volatile.confused = true;
        volatile.locked_move = true;
        volatile.disable(1);
        volatile.clear();
        assert_eq!(volatile, VolatileStatus::default());
    }

    #[test]
    fn test_copy_passable_subset() {
        let mut outgoing = VolatileStatus::new();
        outgoing.boosts.boost(Stat::Spe, 2);
        outgoing.disable(3);
        outgoing.confused = true;
        outgoing.substitute = true;

        let mut incoming = VolatileStatus::new();
        incoming.copy_passable_from(&outgoing);
        assert_eq!(incoming.boosts.spe, 2);
        assert_eq!(incoming.disabled, [false, false, false, true]);
        assert!(!incoming.confused);
        assert!(!incoming.substitute);
        assert_eq!(incoming.disable_turns, [0; 4]);
    }

    #[test]
    fn test_disable_out_of_range_is_ignored() {
        let mut volatile = VolatileStatus::new();
        volatile.disable(7);
        assert_eq!(volatile.disabled, [false; 4]);
    }

    #[test]
    fn test_is_committed() {
        let mut volatile = VolatileStatus::new();
        assert!(!volatile.is_committed());
        volatile.two_turn = Some(MoveId(3));
        assert!(volatile.is_committed());
    }
}
