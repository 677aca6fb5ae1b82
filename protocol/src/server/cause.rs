//! Cause annotations carried in bracketed suffixes of battle lines

use super::battle::PokemonId;

/// Why a battle event happened, when it was not normal game flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cause {
    /// `[from] ability: NAME` with an optional `[of] POKEMON`
    Ability { name: String, of: Option<PokemonId> },
    /// `[from] item: NAME`, with `[of] POKEMON` when the holder is not the subject (Rocky Helmet)
    Item { name: String, of: Option<PokemonId> },
    /// `[fatigue]`, the end of a locked move's rampage
    Fatigue,
    /// `[from]lockedmove`, a move repeated or released without a fresh choice
    LockedMove,
    /// `[from]move: NAME`, the event came from another move (Metronome calling a move, Trick swapping items)
    Move(String),
}

/// Parse the cause suffixes starting at `start`
///
/// Unrecognized suffixes (`[from] Leech Seed`, `[silent]`, `[still]`, ...) are ignored.
pub fn parse_cause(parts: &[&str], start: usize) -> Option<Cause> {
    let mut from = None;
    let mut of = None;
    let mut fatigue = false;

    for part in parts.iter().skip(start) {
        if let Some(source) = part.strip_prefix("[from]") {
            from = Some(source.trim_start());
        } else if let Some(pokemon) = part.strip_prefix("[of] ") {
            of = PokemonId::parse(pokemon);
        } else if *part == "[fatigue]" {
            fatigue = true;
        }
    }

    if fatigue {
        return Some(Cause::Fatigue);
    }

    let source = from?;
    if let Some(name) = source.strip_prefix("ability: ") {
        Some(Cause::Ability {
            name: name.to_string(),
            of,
        })
    } else if let Some(name) = source.strip_prefix("item: ") {
        Some(Cause::Item {
            name: name.to_string(),
            of,
        })
    } else if let Some(name) = source.strip_prefix("move: ") {
        Some(Cause::Move(name.to_string()))
    } else if source == "lockedmove" {
        Some(Cause::LockedMove)
    } else {
        tracing::debug!(source, "ignoring unrecognized cause");
        None
    }
}
