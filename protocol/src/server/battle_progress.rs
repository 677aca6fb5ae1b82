//! Battle progress message parsers
//!
//! These messages track the flow and state of a battle.

use super::event::BattleEvent;
use super::request::BattleRequest;
use crate::ParseError;
use anyhow::Result;

/// Parse |request|REQUEST (JSON)
pub fn parse_request(parts: &[&str]) -> Result<BattleRequest, ParseError> {
    // JSON can contain | characters
    let json_str = parts.get(2..).map(|rest| rest.join("|")).unwrap_or_default();
    if json_str.is_empty() {
        return Err(ParseError::MissingField("request json".to_string()));
    }

    serde_json::from_str(&json_str).map_err(|source| ParseError::Json {
        context: "request",
        source,
    })
}

/// Parse |upkeep
pub fn parse_upkeep(_parts: &[&str]) -> Result<BattleEvent> {
    Ok(BattleEvent::Upkeep)
}

/// Parse |turn|NUMBER
pub fn parse_turn(parts: &[&str]) -> Result<BattleEvent> {
    let turn = parts
        .get(2)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| anyhow::anyhow!("Missing turn number"))?;

    Ok(BattleEvent::Turn(turn))
}

/// Parse |win|USER
pub fn parse_win(parts: &[&str]) -> Result<BattleEvent> {
    let user = parts.get(2).unwrap_or(&"").to_string();
    Ok(BattleEvent::Win(user))
}

/// Parse |tie
pub fn parse_tie(_parts: &[&str]) -> Result<BattleEvent> {
    Ok(BattleEvent::Tie)
}
