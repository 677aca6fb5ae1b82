//! Standalone (non-battle) message parsers

use std::collections::HashMap;

use serde::Deserialize;

use super::ServerMessage;
use crate::ParseError;

/// Room type announced by |init|
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    Chat,
    Battle,
}

/// Pending challenges, from |updatechallenges|JSON
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeState {
    /// Challenger username to format id
    #[serde(default)]
    pub challenges_from: HashMap<String, String>,

    #[serde(default)]
    pub challenge_to: Option<OutgoingChallenge>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutgoingChallenge {
    pub to: String,
    pub format: String,
}

pub fn parse_challstr(parts: &[&str]) -> Result<ServerMessage, ParseError> {
    if parts.len() < 3 {
        return Err(ParseError::MissingField("challstr value".to_string()));
    }

    // CHALLSTR can contain | characters, so join everything after parts[1]
    let challstr = parts[2..].join("|");
    if challstr.is_empty() {
        return Err(ParseError::InvalidFormat("challstr cannot be empty".to_string()));
    }

    Ok(ServerMessage::Challstr(challstr))
}

/// Parse |updateuser|USER|NAMED|AVATAR|SETTINGS
pub fn parse_updateuser(parts: &[&str]) -> Result<ServerMessage, ParseError> {
    if parts.len() < 4 {
        return Err(ParseError::MissingField("updateuser fields".to_string()));
    }

    // USER carries a rank symbol prefix and an optional "@!" away suffix
    let raw = parts[2];
    let username = raw
        .strip_suffix("@!")
        .unwrap_or(raw)
        .trim_start_matches([' ', '+', '%', '@', '*', '#', '&', '~', '^'])
        .to_string();
    if username.is_empty() {
        return Err(ParseError::InvalidFormat("invalid user format".to_string()));
    }

    let named = parts[3] == "1";
    let avatar = parts.get(4).unwrap_or(&"").to_string();

    Ok(ServerMessage::UpdateUser {
        username,
        named,
        avatar,
    })
}

pub fn parse_updatechallenges(parts: &[&str]) -> Result<ServerMessage, ParseError> {
    if parts.len() < 3 {
        return Err(ParseError::MissingField("updatechallenges json".to_string()));
    }

    // JSON can contain | characters
    let json_str = parts[2..].join("|");
    let state: ChallengeState = serde_json::from_str(&json_str).map_err(|source| ParseError::Json {
        context: "updatechallenges",
        source,
    })?;

    Ok(ServerMessage::UpdateChallenges(state))
}

pub fn parse_init(parts: &[&str]) -> Result<ServerMessage, ParseError> {
    if parts.len() < 3 {
        return Err(ParseError::MissingField("init fields".to_string()));
    }

    let room_type = match parts[2] {
        "chat" => RoomType::Chat,
        "battle" => RoomType::Battle,
        other => return Err(ParseError::InvalidFormat(format!("unknown room type: {}", other))),
    };

    Ok(ServerMessage::Init(room_type))
}

pub fn parse_error(parts: &[&str]) -> Result<ServerMessage, ParseError> {
    Ok(ServerMessage::Error(
        parts.get(2..).map(|rest| rest.join("|")).unwrap_or_default(),
    ))
}

pub fn parse_deinit(_parts: &[&str]) -> Result<ServerMessage, ParseError> {
    Ok(ServerMessage::Deinit)
}
