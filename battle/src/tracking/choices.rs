//! Legal decisions for our side

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::battle::BattleState;

/// A decision as sent in `/choose`, with 1-based slot numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    /// Use the move in slot 1-4
    Move(u8),
    /// Switch to the team slot 2-6
    Switch(u8),
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Move(slot) => write!(f, "move {}", slot),
            Choice::Switch(slot) => write!(f, "switch {}", slot),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid choice: {0}")]
pub struct InvalidChoice(String);

impl FromStr for Choice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidChoice(s.to_string());
        let (kind, slot) = s.trim().split_once(' ').ok_or_else(invalid)?;
        let slot: u8 = slot.parse().map_err(|_| invalid())?;
        match kind {
            "move" if (1..=4).contains(&slot) => Ok(Choice::Move(slot)),
            "switch" if (1..=6).contains(&slot) => Ok(Choice::Switch(slot)),
            _ => Err(invalid()),
        }
    }
}

impl BattleState {
    /// Every choice the server would accept from our side right now
    pub fn legal_choices(&self) -> Vec<Choice> {
        let team = self.me();
        let switches: Vec<Choice> = team
            .switch_targets()
            .map(|slot| Choice::Switch(slot as u8 + 1))
            .collect();

        let Some(active) = team.active() else {
            return switches;
        };
        if active.is_fainted() || team.status.self_switch.is_some() {
            return switches;
        }

        let state = &active.volatile;
        if state.must_recharge {
            return vec![Choice::Move(1)];
        }
        if let Some(charging) = state.two_turn {
            let slot = active.moves.slot_of(charging).unwrap_or(0);
            return vec![Choice::Move(slot as u8 + 1)];
        }
        if state.locked_move {
            let slot = state.last_used_move.unwrap_or(0);
            return vec![Choice::Move(slot as u8 + 1)];
        }

        let mut choices: Vec<Choice> = active
            .moves
            .iter()
            .enumerate()
            .filter(|(slot, m)| m.pp > 0 && !state.disabled[*slot])
            .map(|(slot, _)| Choice::Move(slot as u8 + 1))
            .collect();
        if choices.is_empty() {
            // Struggle
            choices.push(Choice::Move(1));
        }
        if !state.trapped {
            choices.extend(switches);
        }
        choices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_display() {
        assert_eq!(Choice::Move(1).to_string(), "move 1");
        assert_eq!(Choice::Switch(2).to_string(), "switch 2");
    }

    #[test]
    fn test_choice_from_str() {
        assert_eq!("move 4".parse::<Choice>(), Ok(Choice::Move(4)));
        assert_eq!("switch 6".parse::<Choice>(), Ok(Choice::Switch(6)));
        assert!("move 5".parse::<Choice>().is_err());
        assert!("switch".parse::<Choice>().is_err());
        assert!("team 123".parse::<Choice>().is_err());
    }
}
