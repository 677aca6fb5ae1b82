mod battle;
mod battle_init;
mod battle_major;
mod battle_minor;
mod battle_progress;
mod cause;
mod event;
mod global;
mod request;
mod tests;

pub use battle::{GameType, Player, PokemonDetails, PokemonId, PokemonStatus, Stat, Status};
pub use battle_init::{BattleInit, PlayerInfo};
pub use cause::Cause;
pub use event::{BattleEvent, EventKind};
pub use global::{ChallengeState, OutgoingChallenge, RoomType};
pub use request::{ActivePokemon, BattleRequest, MoveSlot, SideInfo, SidePokemon};

use crate::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Challstr(String),
    Deinit,
    Error(String),
    Init(RoomType),
    Request(BattleRequest),
    UpdateChallenges(ChallengeState),
    UpdateUser {
        username: String,
        named: bool,
        avatar: String,
    },
    /// Initialization block plus the event run that follows |start
    BattleInit(BattleInit),
    /// A run of battle events, in arrival order
    BattleProgress(Vec<BattleEvent>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerFrame {
    pub room_id: Option<String>,
    pub messages: Vec<ServerMessage>,
}

/// Accumulates event runs while a frame is being decoded
#[derive(Default)]
struct RunBuilder {
    init: Option<BattleInit>,
    events: Vec<BattleEvent>,
}

impl RunBuilder {
    fn flush(&mut self, messages: &mut Vec<ServerMessage>) {
        if let Some(init) = self.init.as_mut()
            && init.started
            && !self.events.is_empty()
        {
            init.events.append(&mut self.events);
            if let Some(init) = self.init.take() {
                messages.push(ServerMessage::BattleInit(init));
            }
            return;
        }

        if !self.events.is_empty() {
            messages.push(ServerMessage::BattleProgress(std::mem::take(&mut self.events)));
        }
    }

    fn finish(mut self, messages: &mut Vec<ServerMessage>) {
        self.flush(messages);
        if let Some(init) = self.init {
            messages.push(ServerMessage::BattleInit(init));
        }
    }
}

/// Parse a complete frame into structured messages
///
/// Unknown tags and malformed battle lines are skipped. Only a structurally invalid
/// JSON payload in |request| or |updatechallenges| fails the whole frame.
pub fn parse_server_frame(frame: &str) -> Result<ServerFrame, ParseError> {
    let mut lines = frame.lines();
    let mut room_id = None;

    // Check if first line is >ROOMID
    if let Some(first_line) = lines.clone().next()
        && let Some(room) = first_line.strip_prefix('>')
    {
        room_id = Some(room.trim().to_string());
        lines.next();
    }

    let mut messages = Vec::new();
    let mut run = RunBuilder::default();

    for line in lines {
        let line = line.trim_end_matches('\r');

        // Blank lines ("" or a lone "|") separate event runs
        if line.is_empty() || line == "|" {
            run.flush(&mut messages);
            continue;
        }

        if !line.starts_with('|') {
            tracing::debug!(line, "skipping raw text line");
            continue;
        }

        let parts: Vec<&str> = line.split('|').collect();
        let tag = parts[1];

        if let Some(parsed) = parse_major_message(tag, &parts) {
            run.flush(&mut messages);
            match parsed {
                Ok(message) => messages.push(message),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => tracing::debug!(tag, error = %e, "skipping malformed message"),
            }
            continue;
        }

        if battle_init::INIT_TAGS.contains(&tag) {
            let init = run.init.get_or_insert_with(BattleInit::default);
            if let Err(e) = init.apply_line(&parts) {
                tracing::debug!(tag, error = %e, "skipping malformed init line");
            }
            continue;
        }

        match parse_battle_event(tag, &parts) {
            Some(Ok(event)) => {
                let ends_run = matches!(event, BattleEvent::Turn(_));
                run.events.push(event);
                if ends_run {
                    run.flush(&mut messages);
                }
            }
            Some(Err(e)) => tracing::debug!(tag, error = %e, "skipping malformed battle line"),
            None => tracing::trace!(tag, "skipping unhandled tag"),
        }
    }

    run.finish(&mut messages);

    Ok(ServerFrame { room_id, messages })
}

/// Parse a single battle line, returning None for noise
pub fn parse_event_line(line: &str) -> Option<BattleEvent> {
    let parts: Vec<&str> = line.trim().split('|').collect();
    let tag = parts.get(1)?;
    parse_battle_event(tag, &parts)?.ok()
}

fn parse_major_message(tag: &str, parts: &[&str]) -> Option<Result<ServerMessage, ParseError>> {
    let parsed = match tag {
        "challstr" => global::parse_challstr(parts),
        "deinit" => global::parse_deinit(parts),
        "error" => global::parse_error(parts),
        "init" => global::parse_init(parts),
        "request" => battle_progress::parse_request(parts).map(ServerMessage::Request),
        "updatechallenges" => global::parse_updatechallenges(parts),
        "updateuser" => global::parse_updateuser(parts),
        _ => return None,
    };
    Some(parsed)
}

fn parse_battle_event(tag: &str, parts: &[&str]) -> Option<anyhow::Result<BattleEvent>> {
    let parsed = match tag {
        "move" => battle_major::parse_move(parts),
        "switch" => battle_major::parse_switch(parts),
        "drag" => battle_major::parse_drag(parts),
        "detailschange" => battle_major::parse_detailschange(parts),
        "-formechange" => battle_major::parse_formechange(parts),
        "cant" => battle_major::parse_cant(parts),
        "faint" => battle_major::parse_faint(parts),

        "-ability" => battle_minor::parse_ability(parts),
        "-endability" => battle_minor::parse_endability(parts),
        "-activate" => battle_minor::parse_activate(parts),
        "-start" => battle_minor::parse_start(parts),
        "-end" => battle_minor::parse_end(parts),
        "-boost" => battle_minor::parse_boost(parts),
        "-unboost" => battle_minor::parse_unboost(parts),
        "-setboost" => battle_minor::parse_setboost(parts),
        "-clearboost" => battle_minor::parse_clearboost(parts),
        "-clearallboost" => battle_minor::parse_clearallboost(parts),
        "-curestatus" => battle_minor::parse_curestatus(parts),
        "-cureteam" => battle_minor::parse_cureteam(parts),
        "-damage" => battle_minor::parse_damage(parts),
        "-heal" => battle_minor::parse_heal(parts),
        "-sethp" => battle_minor::parse_sethp(parts),
        "-status" => battle_minor::parse_status(parts),
        "-fieldstart" => battle_minor::parse_fieldstart(parts),
        "-fieldend" => battle_minor::parse_fieldend(parts),
        "-mustrecharge" => battle_minor::parse_mustrecharge(parts),
        "-prepare" => battle_minor::parse_prepare(parts),
        "-sidestart" => battle_minor::parse_sidestart(parts),
        "-sideend" => battle_minor::parse_sideend(parts),
        "-singleturn" => battle_minor::parse_singleturn(parts),
        "-item" => battle_minor::parse_item(parts),
        "-enditem" => battle_minor::parse_enditem(parts),
        "-weather" => battle_minor::parse_weather(parts),

        "upkeep" => battle_progress::parse_upkeep(parts),
        "turn" => battle_progress::parse_turn(parts),
        "win" => battle_progress::parse_win(parts),
        "tie" => battle_progress::parse_tie(parts),
        _ => return None,
    };
    Some(parsed)
}
