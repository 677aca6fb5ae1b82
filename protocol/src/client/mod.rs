/// Commands that clients can send to server
#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    /// /choose CHOICE|RQID
    Choose { choice: String, rqid: Option<u64> },

    /// /leave ROOMID
    LeaveRoom(String),

    /// Raw command for catch-all
    Raw(String),
}

impl ClientCommand {
    /// Serialize command to protocol format
    pub fn to_protocol_string(&self) -> String {
        match self {
            Self::Choose { choice, rqid } => match rqid {
                Some(rqid) => format!("/choose {}|{}", choice, rqid),
                None => format!("/choose {}", choice),
            },
            Self::LeaveRoom(room) => format!("/leave {}", room),
            Self::Raw(command) => command.clone(),
        }
    }
}

/// Client message with optional room context
#[derive(Debug, Clone, PartialEq)]
pub struct ClientMessage {
    pub room_id: Option<String>,
    pub command: ClientCommand,
}

impl ClientMessage {
    pub fn new(room_id: Option<String>, command: ClientCommand) -> Self {
        Self { room_id, command }
    }

    /// Serialize to wire format: ROOMID|TEXT or |TEXT
    pub fn to_wire_format(&self) -> String {
        let text = self.command.to_protocol_string();
        match &self.room_id {
            Some(room) => format!("{}|{}", room, text),
            None => format!("|{}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_wire_format() {
        let message = ClientMessage::new(
            Some("battle-gen4ou-1".to_string()),
            ClientCommand::Choose {
                choice: "move 1".to_string(),
                rqid: Some(7),
            },
        );
        assert_eq!(message.to_wire_format(), "battle-gen4ou-1|/choose move 1|7");
    }

    #[test]
    fn test_leave_wire_format() {
        let message = ClientMessage::new(None, ClientCommand::LeaveRoom("battle-gen4ou-1".into()));
        assert_eq!(message.to_wire_format(), "|/leave battle-gen4ou-1");
    }
}
