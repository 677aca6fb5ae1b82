//! Belief tracking over a finite identifier space

use std::fmt;
use std::marker::PhantomData;

use thiserror::Error;

/// A narrowing step would leave no candidate
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no candidate left")]
pub struct NoCandidates;

/// A dense identifier usable as a [`PossibilityClass`] candidate
pub trait Candidate: Copy + Eq {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

macro_rules! candidate_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl Candidate for $name {
            fn from_index(index: usize) -> Self {
                $name(index)
            }

            fn index(self) -> usize {
                self.0
            }
        }
    };
}

candidate_id!(
    /// Dex uid of a species
    SpeciesId
);
candidate_id!(
    /// Dex uid of a move
    MoveId
);
candidate_id!(
    /// Dex uid of an item
    ItemId
);
candidate_id!(
    /// Dex uid of an ability
    AbilityId
);

/// The set of values a hidden fact may still take
///
/// Backed by a bitset plus a running count, so membership tests and single
/// eliminations are O(1). A value is definite once exactly one candidate remains.
#[derive(Clone, PartialEq, Eq)]
pub struct PossibilityClass<T> {
    bits: Vec<u64>,
    universe: usize,
    remaining: usize,
    _marker: PhantomData<T>,
}

impl<T: Candidate> PossibilityClass<T> {
    /// Every value in `0..universe` is possible
    pub fn full(universe: usize) -> Self {
        let mut bits = vec![u64::MAX; universe.div_ceil(64)];
        if universe % 64 != 0
            && let Some(last) = bits.last_mut()
        {
            *last = (1u64 << (universe % 64)) - 1;
        }
        Self {
            bits,
            universe,
            remaining: universe,
            _marker: PhantomData,
        }
    }

    /// Only `value` is possible
    pub fn definite_of(universe: usize, value: T) -> Self {
        let mut class = Self::full(universe);
        class.assign(value);
        class
    }

    pub fn universe(&self) -> usize {
        self.universe
    }

    /// Number of remaining candidates
    pub fn len(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    pub fn is_possible(&self, value: T) -> bool {
        let index = value.index();
        index < self.universe && self.bits[index / 64] & (1 << (index % 64)) != 0
    }

    /// The value, once it is the only candidate left
    pub fn definite(&self) -> Option<T> {
        if self.remaining != 1 {
            return None;
        }
        self.possible().next()
    }

    pub fn is_definite(&self) -> bool {
        self.remaining == 1
    }

    /// Rule out one candidate. Returns whether anything changed.
    pub fn eliminate(&mut self, value: T) -> Result<bool, NoCandidates> {
        if !self.is_possible(value) {
            return Ok(false);
        }
        if self.remaining == 1 {
            return Err(NoCandidates);
        }
        let index = value.index();
        self.bits[index / 64] &= !(1 << (index % 64));
        self.remaining -= 1;
        Ok(true)
    }

    /// Keep only candidates that are also in `values`
    ///
    /// Leaves the class untouched and fails if the intersection is empty.
    pub fn narrow_to(&mut self, values: impl IntoIterator<Item = T>) -> Result<(), NoCandidates> {
        let mut keep = vec![0u64; self.bits.len()];
        for value in values {
            if self.is_possible(value) {
                let index = value.index();
                keep[index / 64] |= 1 << (index % 64);
            }
        }

        let remaining = keep.iter().map(|w| w.count_ones() as usize).sum();
        if remaining == 0 {
            return Err(NoCandidates);
        }
        self.bits = keep;
        self.remaining = remaining;
        Ok(())
    }

    /// Replace the candidate set with exactly `value`
    pub fn assign(&mut self, value: T) {
        self.bits.iter_mut().for_each(|w| *w = 0);
        let index = value.index();
        if index < self.universe {
            self.bits[index / 64] |= 1 << (index % 64);
            self.remaining = 1;
        } else {
            self.remaining = 0;
        }
    }

    /// Forget everything learned so far
    pub fn reset(&mut self) {
        *self = Self::full(self.universe);
    }

    /// Remaining candidates in ascending order
    pub fn possible(&self) -> impl Iterator<Item = T> + '_ {
        self.bits.iter().enumerate().flat_map(|(word_index, &word)| {
            (0..64)
                .filter(move |bit| word & (1 << bit) != 0)
                .map(move |bit| T::from_index(word_index * 64 + bit))
        })
    }

    /// Probability vector of length `universe`, uniform over the remaining candidates
    pub fn encode_into(&self, out: &mut Vec<f64>) {
        let start = out.len();
        out.resize(start + self.universe, 0.0);
        if self.remaining == 0 {
            return;
        }
        let weight = 1.0 / self.remaining as f64;
        for value in self.possible() {
            out[start + value.index()] = weight;
        }
    }
}

impl<T: Candidate + fmt::Debug> fmt::Debug for PossibilityClass<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.remaining == self.universe {
            return write!(f, "PossibilityClass(any of {})", self.universe);
        }
        f.debug_set().entries(self.possible()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_class() {
        let class: PossibilityClass<ItemId> = PossibilityClass::full(70);
        assert_eq!(class.len(), 70);
        assert!(class.is_possible(ItemId(69)));
        assert!(!class.is_possible(ItemId(70)));
        assert_eq!(class.definite(), None);
        assert_eq!(class.possible().count(), 70);
    }

    #[test]
    fn test_eliminate_until_definite() {
        let mut class: PossibilityClass<AbilityId> = PossibilityClass::full(3);
        assert_eq!(class.eliminate(AbilityId(0)), Ok(true));
        assert_eq!(class.eliminate(AbilityId(0)), Ok(false));
        assert_eq!(class.definite(), None);
        assert_eq!(class.eliminate(AbilityId(2)), Ok(true));
        assert_eq!(class.definite(), Some(AbilityId(1)));
        assert_eq!(class.eliminate(AbilityId(1)), Err(NoCandidates));
        assert_eq!(class.definite(), Some(AbilityId(1)));
    }

    #[test]
    fn test_narrow_to() {
        let mut class: PossibilityClass<AbilityId> = PossibilityClass::full(100);
        class.narrow_to([AbilityId(7), AbilityId(65), AbilityId(99)]).unwrap();
        assert_eq!(class.len(), 3);
        class.narrow_to([AbilityId(65), AbilityId(3)]).unwrap();
        assert_eq!(class.definite(), Some(AbilityId(65)));
    }

    #[test]
    fn test_narrow_to_empty_leaves_class_untouched() {
        let mut class: PossibilityClass<AbilityId> = PossibilityClass::full(10);
        class.narrow_to([AbilityId(1), AbilityId(2)]).unwrap();
        assert_eq!(class.narrow_to([AbilityId(5)]), Err(NoCandidates));
        assert_eq!(class.possible().collect::<Vec<_>>(), vec![AbilityId(1), AbilityId(2)]);
    }

    #[test]
    fn test_assign_overrides() {
        let mut class = PossibilityClass::definite_of(5, ItemId(1));
        class.assign(ItemId(4));
        assert_eq!(class.definite(), Some(ItemId(4)));
        class.reset();
        assert_eq!(class.len(), 5);
    }

    #[test]
    fn test_encode_uniform() {
        let mut class: PossibilityClass<SpeciesId> = PossibilityClass::full(4);
        let mut out = vec![9.0];
        class.encode_into(&mut out);
        assert_eq!(out, vec![9.0, 0.25, 0.25, 0.25, 0.25]);

        class.narrow_to([SpeciesId(1), SpeciesId(3)]).unwrap();
        let mut out = Vec::new();
        class.encode_into(&mut out);
        assert_eq!(out, vec![0.0, 0.5, 0.0, 0.5]);

        class.assign(SpeciesId(3));
        let mut out = Vec::new();
        class.encode_into(&mut out);
        assert_eq!(out, vec![0.0, 0.0, 0.0, 1.0]);
    }
}
