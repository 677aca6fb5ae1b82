//! Shared types for battle protocol messages

use std::fmt;
use std::str::FromStr;

use crate::ParseError;

/// Player in a battle (p1 or p2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(Player::P1),
            "p2" => Some(Player::P2),
            _ => None,
        }
    }

    /// Parse the owner prefix of a side or pokemon reference ("p1: Alice", "p2a: Pikachu")
    pub fn from_prefix(s: &str) -> Option<Self> {
        if s.starts_with("p1") {
            Some(Player::P1)
        } else if s.starts_with("p2") {
            Some(Player::P2)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::P1 => "p1",
            Player::P2 => "p2",
        }
    }

    pub fn opponent(&self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Player {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Player::parse(s).ok_or_else(|| ParseError::InvalidFormat(format!("unknown player: {}", s)))
    }
}

/// Pokemon identifier in the form "POSITION: NAME" (e.g., "p1a: Pikachu")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PokemonId {
    /// Player who owns this pokemon
    pub player: Player,
    /// Position letter (a for the active slot in singles, None when the id omits it)
    pub position: Option<char>,
    /// Pokemon's nickname
    pub name: String,
}

impl PokemonId {
    /// Parse a pokemon ID string like "p1a: Pikachu" or "p1: Pikachu"
    pub fn parse(s: &str) -> Option<Self> {
        let (pos_part, name) = s.split_once(": ")?;

        let player = Player::from_prefix(pos_part)?;
        let mut rest = pos_part[2..].chars();
        let position = rest.next();
        if rest.next().is_some() {
            return None;
        }

        Some(PokemonId {
            player,
            position,
            name: name.to_string(),
        })
    }
}

impl fmt::Display for PokemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{}{}: {}", self.player, pos, self.name),
            None => write!(f, "{}: {}", self.player, self.name),
        }
    }
}

impl FromStr for PokemonId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PokemonId::parse(s)
            .ok_or_else(|| ParseError::InvalidFormat(format!("invalid pokemon id: {}", s)))
    }
}

/// Pokemon details string (species, shiny, gender, level)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonDetails {
    pub species: String,
    pub shiny: bool,
    /// 'M' or 'F'; None for genderless
    pub gender: Option<char>,
    pub level: u8,
}

impl Default for PokemonDetails {
    fn default() -> Self {
        Self {
            species: String::new(),
            shiny: false,
            gender: None,
            level: 100,
        }
    }
}

impl PokemonDetails {
    /// Parse a details string like "Pikachu, L50, M, shiny"
    ///
    /// Unrecognized fields (tera types, forme markers) are ignored.
    pub fn parse(s: &str) -> Self {
        let mut details = PokemonDetails::default();
        let mut parts = s.split(", ");

        if let Some(species) = parts.next() {
            details.species = species.to_string();
        }

        for part in parts {
            if let Some(level) = part.strip_prefix('L').and_then(|l| l.parse().ok()) {
                details.level = level;
            } else if part == "M" {
                details.gender = Some('M');
            } else if part == "F" {
                details.gender = Some('F');
            } else if part == "shiny" {
                details.shiny = true;
            }
        }

        details
    }
}

impl fmt::Display for PokemonDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.species)?;
        if self.level != 100 {
            write!(f, ", L{}", self.level)?;
        }
        if let Some(gender) = self.gender {
            write!(f, ", {}", gender)?;
        }
        if self.shiny {
            f.write_str(", shiny")?;
        }
        Ok(())
    }
}

impl FromStr for PokemonDetails {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::MissingField("species".to_string()));
        }
        Ok(PokemonDetails::parse(s))
    }
}

/// Non-volatile status conditions (persist through switching)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Burn,
    Freeze,
    Paralysis,
    Poison,
    Toxic,
    Sleep,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Burn,
        Status::Freeze,
        Status::Paralysis,
        Status::Poison,
        Status::Toxic,
        Status::Sleep,
    ];

    /// Parse from protocol string ("brn", "frz", "par", "psn", "tox", "slp")
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "brn" => Some(Status::Burn),
            "frz" => Some(Status::Freeze),
            "par" => Some(Status::Paralysis),
            "psn" => Some(Status::Poison),
            "tox" => Some(Status::Toxic),
            "slp" => Some(Status::Sleep),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Burn => "brn",
            Status::Freeze => "frz",
            Status::Paralysis => "par",
            Status::Poison => "psn",
            Status::Toxic => "tox",
            Status::Sleep => "slp",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HP and status condition (e.g., "100/100", "50/100 slp", "0 fnt")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PokemonStatus {
    pub hp: u32,
    pub hp_max: u32,
    pub condition: Option<Status>,
}

impl PokemonStatus {
    /// Parse an HP status string like "100/100", "50/100 slp", or "0 fnt"
    pub fn parse(s: &str) -> Option<Self> {
        if s == "0 fnt" {
            return Some(PokemonStatus {
                hp: 0,
                hp_max: 0,
                condition: None,
            });
        }

        let (hp_part, status_part) = match s.split_once(' ') {
            Some((hp, status)) => (hp, Some(status)),
            None => (s, None),
        };
        let (hp, hp_max) = hp_part.split_once('/')?;

        Some(PokemonStatus {
            hp: hp.parse().ok()?,
            hp_max: hp_max.parse().ok()?,
            condition: status_part.and_then(Status::parse),
        })
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }
}

impl fmt::Display for PokemonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hp == 0 && self.hp_max == 0 {
            return f.write_str("0 fnt");
        }
        write!(f, "{}/{}", self.hp, self.hp_max)?;
        if let Some(status) = self.condition {
            write!(f, " {}", status)?;
        }
        Ok(())
    }
}

impl FromStr for PokemonStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PokemonStatus::parse(s)
            .ok_or_else(|| ParseError::InvalidFormat(format!("invalid condition: {}", s)))
    }
}

/// Game type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameType {
    Singles,
    Doubles,
    Triples,
    Multi,
    FreeForAll,
}

impl GameType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "singles" => Some(GameType::Singles),
            "doubles" => Some(GameType::Doubles),
            "triples" => Some(GameType::Triples),
            "multi" => Some(GameType::Multi),
            "freeforall" => Some(GameType::FreeForAll),
            _ => None,
        }
    }
}

/// Stat abbreviation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl Stat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spa" => Some(Stat::Spa),
            "spd" => Some(Stat::Spd),
            "spe" => Some(Stat::Spe),
            "accuracy" => Some(Stat::Accuracy),
            "evasion" => Some(Stat::Evasion),
            _ => None,
        }
    }
}

/// Helper to parse a PokemonId from message parts
pub fn parse_pokemon(parts: &[&str], index: usize) -> Result<PokemonId, anyhow::Error> {
    parts
        .get(index)
        .and_then(|s| PokemonId::parse(s))
        .ok_or_else(|| ParseError::MissingField("pokemon".to_string()).into())
}

/// Helper to parse PokemonDetails from message parts
pub fn parse_details(parts: &[&str], index: usize) -> Result<PokemonDetails, anyhow::Error> {
    parts
        .get(index)
        .filter(|s| !s.is_empty())
        .map(|s| PokemonDetails::parse(s))
        .ok_or_else(|| ParseError::MissingField("details".to_string()).into())
}

/// Helper to parse PokemonStatus from message parts
pub fn parse_hp_status(parts: &[&str], index: usize) -> Option<PokemonStatus> {
    parts.get(index).and_then(|s| PokemonStatus::parse(s))
}

/// Helper to parse the owning player of a side reference ("p1: Alice")
pub fn parse_side(parts: &[&str], index: usize) -> Result<Player, anyhow::Error> {
    parts
        .get(index)
        .and_then(|s| Player::from_prefix(s))
        .ok_or_else(|| ParseError::MissingField("side".to_string()).into())
}

/// Helper to read a positional argument, treating an empty field as absent
pub fn arg<'a>(parts: &[&'a str], index: usize) -> Option<&'a str> {
    parts.get(index).copied().filter(|s| !s.is_empty() && !s.starts_with('['))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pokemon_id() {
        let id = PokemonId::parse("p1a: Pikachu").unwrap();
        assert_eq!(id.player, Player::P1);
        assert_eq!(id.position, Some('a'));
        assert_eq!(id.name, "Pikachu");
        assert_eq!(id.to_string(), "p1a: Pikachu");
    }

    #[test]
    fn test_parse_pokemon_id_without_position() {
        let id = PokemonId::parse("p2: Mr. Mime: Jr").unwrap();
        assert_eq!(id.player, Player::P2);
        assert_eq!(id.position, None);
        assert_eq!(id.name, "Mr. Mime: Jr");
    }

    #[test]
    fn test_parse_pokemon_id_invalid() {
        assert!(PokemonId::parse("p3a: Pikachu").is_none());
        assert!(PokemonId::parse("p1ab: Pikachu").is_none());
        assert!(PokemonId::parse("Pikachu").is_none());
    }

    #[test]
    fn test_parse_details() {
        let details = PokemonDetails::parse("Pikachu, L50, M, shiny");
        assert_eq!(details.species, "Pikachu");
        assert_eq!(details.level, 50);
        assert_eq!(details.gender, Some('M'));
        assert!(details.shiny);
    }

    #[test]
    fn test_parse_details_defaults() {
        let details = PokemonDetails::parse("Magnezone");
        assert_eq!(details.level, 100);
        assert_eq!(details.gender, None);
        assert!(!details.shiny);
    }

    #[test]
    fn test_details_display_reparses() {
        let details = PokemonDetails::parse("p1a: Pikachu, L50, M");
        let reparsed = PokemonDetails::parse(&details.to_string());
        assert_eq!(
            (reparsed.species.as_str(), reparsed.level, reparsed.gender),
            ("p1a: Pikachu", 50, Some('M'))
        );
        assert_eq!(reparsed, details);
    }

    #[test]
    fn test_parse_hp_status() {
        let status = PokemonStatus::parse("50/100 slp").unwrap();
        assert_eq!(status.hp, 50);
        assert_eq!(status.hp_max, 100);
        assert_eq!(status.condition, Some(Status::Sleep));

        let healthy = PokemonStatus::parse("100/100").unwrap();
        assert_eq!(healthy.condition, None);
    }

    #[test]
    fn test_parse_hp_status_fainted() {
        let status = PokemonStatus::parse("0 fnt").unwrap();
        assert_eq!(status.hp, 0);
        assert_eq!(status.hp_max, 0);
        assert_eq!(status.condition, None);
        assert!(status.is_fainted());
        assert_eq!(status.to_string(), "0 fnt");
    }

    #[test]
    fn test_parse_hp_status_invalid() {
        assert!(PokemonStatus::parse("").is_none());
        assert!(PokemonStatus::parse("abc/100").is_none());
    }
}
