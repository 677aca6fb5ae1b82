//! Sequencing one battle: decode, track, decide, answer

use std::sync::Arc;

use anyhow::{Context, Result};
use psbot_battle::{BattleState, Choice, Dex, TrackerError, encode, tracker_registry};
use psbot_protocol::{
    BattleEvent, BattleRequest, ClientCommand, ClientMessage, EventRegistry, ServerMessage,
    parse_server_frame,
};

use crate::agent::BattleAgent;
use crate::config::DriverConfig;
use crate::error::DriverError;

const SWITCH_REFUSED: &str = "[Unavailable choice] Can't switch";

/// Drives a single battle room.
///
/// Frames are handled strictly one at a time. A `|request|` is held until the event
/// run that follows it has been applied, since the server sends the request for a
/// decision before the log of the turn that leads to it.
pub struct BattleDriver<A> {
    room: String,
    state: BattleState,
    registry: EventRegistry<BattleState, TrackerError>,
    agent: A,
    config: DriverConfig,
    pending: Option<BattleRequest>,
    /// The server rejected our last choice and will resend the request
    rejected: bool,
    finished: bool,
}

impl<A: BattleAgent> BattleDriver<A> {
    pub fn new(room: impl Into<String>, dex: Arc<dyn Dex>, agent: A, config: DriverConfig) -> Self {
        let room = room.into();
        let mut registry = tracker_registry();
        if config.log_events {
            let tag = room.clone();
            registry.on_any(move |_, event, _, index| {
                tracing::debug!(room = %tag, index, ?event, "applied");
                Ok(())
            });
        }

        Self {
            room,
            state: BattleState::new(dex),
            registry,
            agent,
            config,
            pending: None,
            rejected: false,
            finished: false,
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Whether the battle has a result
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Process one server frame, returning the messages to send back
    pub async fn handle_frame(&mut self, buffer: &str) -> Result<Vec<ClientMessage>> {
        let frame = parse_server_frame(buffer).context("Failed to decode server frame")?;
        if let Some(room) = &frame.room_id
            && *room != self.room
        {
            tracing::debug!(room = %self.room, other = %room, "Ignoring frame for another room");
            return Ok(Vec::new());
        }

        let mut ready = None;
        for message in frame.messages {
            match message {
                ServerMessage::Request(request) if self.rejected => {
                    // Answers the same decision, no run comes before it
                    self.rejected = false;
                    self.pending = None;
                    ready = Some(request);
                }
                ServerMessage::Request(request) => {
                    if self.pending.replace(request).is_some() {
                        tracing::debug!(room = %self.room, "Superseding unanswered request");
                    }
                }
                ServerMessage::BattleInit(init) => {
                    self.state.apply_init(&init);
                    self.apply(&init.events)?;
                    ready = self.pending.take().or(ready);
                }
                ServerMessage::BattleProgress(events) => {
                    self.apply(&events)?;
                    ready = self.pending.take().or(ready);
                }
                ServerMessage::Error(message) if message.starts_with(SWITCH_REFUSED) => {
                    tracing::info!(room = %self.room, %message, "Switch refused");
                    self.state.handle_switch_refused();
                    self.rejected = true;
                }
                ServerMessage::Error(message) => {
                    tracing::warn!(room = %self.room, %message, "Server error");
                }
                ServerMessage::Deinit => self.finished = true,
                other => tracing::trace!(room = %self.room, ?other, "Ignoring message"),
            }
        }

        let mut outgoing = Vec::new();
        if let Some(request) = ready
            && let Some(choice) = self.respond(&request).await?
        {
            outgoing.push(ClientMessage::new(
                Some(self.room.clone()),
                ClientCommand::Choose {
                    choice: choice.to_string(),
                    rqid: request.rqid,
                },
            ));
        }

        if self.state.ended && !self.finished {
            self.finished = true;
            tracing::info!(
                room = %self.room,
                winner = ?self.state.winner,
                tie = self.state.tie,
                "Battle finished"
            );
            if self.config.leave_on_finish {
                outgoing.push(ClientMessage::new(None, ClientCommand::LeaveRoom(self.room.clone())));
            }
        }
        Ok(outgoing)
    }

    fn apply(&mut self, events: &[BattleEvent]) -> Result<()> {
        self.registry
            .dispatch_run(&mut self.state, events)
            .with_context(|| format!("Tracker out of sync in {}", self.room))
    }

    /// Sync a request and, if it asks for one, get a decision from the agent
    async fn respond(&mut self, request: &BattleRequest) -> Result<Option<Choice>> {
        self.state
            .handle_request(request)
            .with_context(|| format!("Failed to sync request in {}", self.room))?;
        if !request.needs_decision() || self.state.ended {
            return Ok(None);
        }

        let choices = self.state.legal_choices();
        if choices.is_empty() {
            tracing::warn!(room = %self.room, rqid = ?request.rqid, "Request needs a decision but nothing is legal");
            return Ok(None);
        }
        let features = encode(&self.state);

        let timeout = self.config.decision_timeout;
        let decision = self.agent.decide(&features, &choices);
        let choice = match timeout {
            Some(limit) => tokio::time::timeout(limit, decision)
                .await
                .map_err(|_| DriverError::DecisionTimeout(limit))?,
            None => decision.await,
        }
        .context("Agent failed to decide")?;

        if !choices.contains(&choice) {
            return Err(DriverError::IllegalChoice {
                choice,
                legal: choices,
            }
            .into());
        }
        tracing::debug!(room = %self.room, %choice, options = choices.len(), "Decided");
        Ok(Some(choice))
    }
}
