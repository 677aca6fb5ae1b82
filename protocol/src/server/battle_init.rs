//! Battle initialization message parsers
//!
//! These messages are sent at the start of a battle to set up the game state.
//! They are folded into a single [`BattleInit`] together with the event run that
//! follows `|start`.

use super::battle::{GameType, Player};
use super::event::BattleEvent;
use anyhow::Result;

/// Tags that belong to the battle initialization block
pub const INIT_TAGS: &[&str] = &[
    "player", "teamsize", "gametype", "gen", "tier", "rated", "rule", "start",
];

/// A player announced by |player|
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInfo {
    pub player: Player,
    pub username: String,
    pub avatar: String,
    pub rating: Option<u32>,
}

/// Everything announced between |init|battle and the first turn
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BattleInit {
    pub players: Vec<PlayerInfo>,
    pub team_sizes: Vec<(Player, u8)>,
    pub game_type: Option<GameType>,
    pub generation: Option<u8>,
    pub tier: Option<String>,
    pub rated: bool,
    pub rules: Vec<String>,
    pub started: bool,
    /// The event run that follows |start (initial switch-ins, abilities, turn 1)
    pub events: Vec<BattleEvent>,
}

impl BattleInit {
    pub fn team_size(&self, player: Player) -> Option<u8> {
        self.team_sizes
            .iter()
            .find(|(p, _)| *p == player)
            .map(|(_, size)| *size)
    }

    pub fn username(&self, player: Player) -> Option<&str> {
        self.players
            .iter()
            .find(|info| info.player == player)
            .map(|info| info.username.as_str())
    }

    /// Fold one initialization line into this block
    pub fn apply_line(&mut self, parts: &[&str]) -> Result<()> {
        match parts.get(1).copied().unwrap_or("") {
            "player" => self.players.push(parse_player(parts)?),
            "teamsize" => self.team_sizes.push(parse_teamsize(parts)?),
            "gametype" => self.game_type = Some(parse_gametype(parts)?),
            "gen" => self.generation = Some(parse_gen(parts)?),
            "tier" => self.tier = Some(parts.get(2).unwrap_or(&"").to_string()),
            "rated" => self.rated = true,
            "rule" => self.rules.push(parts.get(2).unwrap_or(&"").to_string()),
            "start" => self.started = true,
            other => anyhow::bail!("Not an init tag: {}", other),
        }
        Ok(())
    }
}

/// Parse |player|PLAYER|USERNAME|AVATAR|RATING
fn parse_player(parts: &[&str]) -> Result<PlayerInfo> {
    let player = parts
        .get(2)
        .and_then(|s| Player::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing player"))?;

    let username = parts.get(3).unwrap_or(&"").to_string();
    let avatar = parts.get(4).unwrap_or(&"").to_string();
    let rating = parts.get(5).and_then(|s| s.parse().ok());

    Ok(PlayerInfo {
        player,
        username,
        avatar,
        rating,
    })
}

/// Parse |teamsize|PLAYER|NUMBER
fn parse_teamsize(parts: &[&str]) -> Result<(Player, u8)> {
    let player = parts
        .get(2)
        .and_then(|s| Player::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing player"))?;

    let size: u8 = parts
        .get(3)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| anyhow::anyhow!("Missing team size"))?;
    if !(1..=6).contains(&size) {
        anyhow::bail!("Team size out of range: {}", size);
    }

    Ok((player, size))
}

/// Parse |gametype|GAMETYPE
fn parse_gametype(parts: &[&str]) -> Result<GameType> {
    parts
        .get(2)
        .and_then(|s| GameType::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing game type"))
}

/// Parse |gen|GENNUM
fn parse_gen(parts: &[&str]) -> Result<u8> {
    parts
        .get(2)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| anyhow::anyhow!("Missing generation"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_init_lines() {
        let mut init = BattleInit::default();
        for line in [
            "|player|p1|Alice|60|1500",
            "|player|p2|Bob|1|",
            "|teamsize|p1|6",
            "|teamsize|p2|3",
            "|gametype|singles",
            "|gen|4",
            "|tier|[Gen 4] OU",
            "|rule|Sleep Clause Mod: Limit one foe put to sleep",
            "|start",
        ] {
            let parts: Vec<&str> = line.split('|').collect();
            init.apply_line(&parts).unwrap();
        }

        assert_eq!(init.username(Player::P1), Some("Alice"));
        assert_eq!(init.players[0].rating, Some(1500));
        assert_eq!(init.team_size(Player::P2), Some(3));
        assert_eq!(init.game_type, Some(GameType::Singles));
        assert_eq!(init.generation, Some(4));
        assert_eq!(init.rules.len(), 1);
        assert!(init.started);
    }

    #[test]
    fn test_teamsize_out_of_range() {
        let mut init = BattleInit::default();
        let parts: Vec<&str> = "|teamsize|p1|7".split('|').collect();
        assert!(init.apply_line(&parts).is_err());
    }
}
