//! Stat boost stages

use psbot_protocol::Stat;

/// Boost stages for every stat, each clamped to -6..=+6
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatStages {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl StatStages {
    pub const MIN: i8 = -6;
    pub const MAX: i8 = 6;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
        }
    }

    /// Set a stage, clamped to the legal range
    pub fn set(&mut self, stat: Stat, value: i8) {
        let clamped = value.clamp(Self::MIN, Self::MAX);
        let slot = match stat {
            Stat::Atk => &mut self.atk,
            Stat::Def => &mut self.def,
            Stat::Spa => &mut self.spa,
            Stat::Spd => &mut self.spd,
            Stat::Spe => &mut self.spe,
            Stat::Accuracy => &mut self.accuracy,
            Stat::Evasion => &mut self.evasion,
        };
        *slot = clamped;
    }

    /// Apply a (possibly negative) boost, returns the change actually applied
    pub fn boost(&mut self, stat: Stat, amount: i8) -> i8 {
        let current = self.get(stat);
        let new_value = current.saturating_add(amount).clamp(Self::MIN, Self::MAX);
        self.set(stat, new_value);
        new_value - current
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }

    /// Stages in encoding order
    pub fn as_array(&self) -> [i8; 7] {
        [
            self.atk,
            self.def,
            self.spa,
            self.spd,
            self.spe,
            self.accuracy,
            self.evasion,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clamps_to_bounds() {
        let mut stages = StatStages::new();
        stages.set(Stat::Atk, 10);
        assert_eq!(stages.atk, 6);

        stages.set(Stat::Def, -10);
        assert_eq!(stages.def, -6);
    }

    #[test]
    fn test_boost() {
        let mut stages = StatStages::new();
        assert_eq!(stages.boost(Stat::Atk, 2), 2);
        assert_eq!(stages.atk, 2);

        stages.atk = 5;
        assert_eq!(stages.boost(Stat::Atk, 3), 1);
        assert_eq!(stages.atk, 6);
        assert_eq!(stages.boost(Stat::Atk, 1), 0);
    }

    #[test]
    fn test_negative_boost() {
        let mut stages = StatStages::new();
        stages.def = -5;
        assert_eq!(stages.boost(Stat::Def, -3), -1);
        assert_eq!(stages.def, -6);
        assert_eq!(stages.boost(Stat::Spe, i8::MIN), -6);
    }

    #[test]
    fn test_clear() {
        let mut stages = StatStages {
            atk: 3,
            def: -2,
            spa: 1,
            spd: -1,
            spe: 6,
            accuracy: 2,
            evasion: -3,
        };
        assert_eq!(stages.as_array(), [3, -2, 1, -1, 6, 2, -3]);
        stages.clear();
        assert!(stages.is_clear());
    }
}
