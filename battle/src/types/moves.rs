//! Move slots

use crate::dex::{MoveData, MoveTag, MoveTarget};
use crate::possibility::MoveId;

/// A known move slot, bound to its dex record when revealed
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub id: MoveId,
    pub name: String,
    pub pp: u32,
    pub max_pp: u32,
    pub target: MoveTarget,
    pub tags: Vec<MoveTag>,
}

impl Move {
    /// Fresh slot at full PP
    pub fn from_data(data: &MoveData) -> Self {
        Self {
            id: MoveId(data.uid),
            name: data.name.clone(),
            pp: data.pp,
            max_pp: data.pp,
            target: data.target,
            tags: data.tags.clone(),
        }
    }

    pub fn has_tag(&self, tag: MoveTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Spend PP, saturating at zero
    pub fn use_pp(&mut self, cost: u32) {
        self.pp = self.pp.saturating_sub(cost);
    }
}

/// Up to four move slots; grows as moves are revealed and never shrinks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Moveset {
    slots: Vec<Move>,
}

impl Moveset {
    pub const MAX: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= Self::MAX
    }

    pub fn get(&self, slot: usize) -> Option<&Move> {
        self.slots.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Move> {
        self.slots.get_mut(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.slots.iter()
    }

    pub fn slot_of(&self, id: MoveId) -> Option<usize> {
        self.slots.iter().position(|m| m.id == id)
    }

    /// Slot index of `data`, revealing it into the next free slot if new.
    /// `None` once all four slots hold other moves.
    pub fn reveal(&mut self, data: &MoveData) -> Option<usize> {
        let id = MoveId(data.uid);
        if let Some(slot) = self.slot_of(id) {
            return Some(slot);
        }
        if self.is_full() {
            return None;
        }
        self.slots.push(Move::from_data(data));
        Some(self.slots.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dex::{Dex, fixture};

    #[test]
    fn test_reveal_is_idempotent() {
        let dex = fixture();
        let tackle = dex.lookup_move("Tackle").unwrap();
        let mut moves = Moveset::new();
        assert_eq!(moves.reveal(tackle), Some(0));
        assert_eq!(moves.reveal(tackle), Some(0));
        assert_eq!(moves.len(), 1);
        assert_eq!(moves.get(0).unwrap().pp, 56);
    }

    #[test]
    fn test_moveset_caps_at_four() {
        let dex = fixture();
        let mut moves = Moveset::new();
        for name in ["Tackle", "Thunderbolt", "Body Slam", "Protect"] {
            assert!(moves.reveal(dex.lookup_move(name).unwrap()).is_some());
        }
        assert!(moves.is_full());
        assert_eq!(moves.reveal(dex.lookup_move("Earthquake").unwrap()), None);
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn test_use_pp_saturates() {
        let dex = fixture();
        let mut struggle = Move::from_data(dex.lookup_move("Struggle").unwrap());
        struggle.use_pp(2);
        assert_eq!(struggle.pp, 0);
        assert_eq!(struggle.max_pp, 1);
    }
}
