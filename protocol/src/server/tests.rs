#[cfg(test)]
mod tests {
    use crate::{BattleEvent, Player, RoomType, ServerMessage, parse_event_line, parse_server_frame};

    #[test]
    fn test_parse_challstr() {
        let frame = parse_server_frame("|challstr|4|1234abc").unwrap();

        assert_eq!(frame.room_id, None);
        assert_eq!(frame.messages, vec![ServerMessage::Challstr("4|1234abc".into())]);
    }

    #[test]
    fn test_parse_challstr_invalid_is_skipped() {
        let frame = parse_server_frame("|challstr|").unwrap();
        assert!(frame.messages.is_empty());
    }

    #[test]
    fn test_parse_unknown_is_skipped() {
        let frame = parse_server_frame("|someunknown|data\n|-crit|p1a: Pikachu").unwrap();
        assert!(frame.messages.is_empty());
    }

    #[test]
    fn test_parse_empty() {
        let frame = parse_server_frame("").unwrap();
        assert!(frame.messages.is_empty());
    }

    #[test]
    fn test_room_prefix() {
        let frame = parse_server_frame(">battle-gen4ou-1\n|init|battle").unwrap();
        assert_eq!(frame.room_id.as_deref(), Some("battle-gen4ou-1"));
        assert_eq!(frame.messages, vec![ServerMessage::Init(RoomType::Battle)]);
    }

    #[test]
    fn test_battle_init_collects_first_run() {
        let frame = parse_server_frame(
            ">battle-gen4ou-1\n\
             |init|battle\n\
             |title|Alice vs. Bob\n\
             |j|☆Alice\n\
             |player|p1|Alice|1|\n\
             |player|p2|Bob|2|\n\
             |teamsize|p1|2\n\
             |teamsize|p2|2\n\
             |gametype|singles\n\
             |gen|4\n\
             |start\n\
             |switch|p1a: Sparky|Pikachu, L50, M|100/100\n\
             |switch|p2a: Snorlax|Snorlax|100/100\n\
             |turn|1",
        )
        .unwrap();

        assert_eq!(frame.messages.len(), 2);
        assert_eq!(frame.messages[0], ServerMessage::Init(RoomType::Battle));
        match &frame.messages[1] {
            ServerMessage::BattleInit(init) => {
                assert_eq!(init.team_size(Player::P1), Some(2));
                assert_eq!(init.username(Player::P2), Some("Bob"));
                assert_eq!(init.events.len(), 3);
                assert_eq!(init.events[2], BattleEvent::Turn(1));
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_runs_split_on_blank_line_and_turn() {
        let frame = parse_server_frame(
            ">battle-gen4ou-1\n\
             |\n\
             |t:|1700000000\n\
             |move|p1a: Sparky|Thunderbolt|p2a: Gyarados\n\
             |-damage|p2a: Gyarados|10/100\n\
             |\n\
             |upkeep\n\
             |turn|5\n\
             |move|p2a: Gyarados|Waterfall|p1a: Sparky",
        )
        .unwrap();

        let runs: Vec<&Vec<BattleEvent>> = frame
            .messages
            .iter()
            .map(|m| match m {
                ServerMessage::BattleProgress(events) => events,
                other => panic!("unexpected message: {:?}", other),
            })
            .collect();

        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].len(), 2);
        assert_eq!(runs[1], &vec![BattleEvent::Upkeep, BattleEvent::Turn(5)]);
        assert_eq!(runs[2].len(), 1);
    }

    #[test]
    fn test_malformed_battle_line_does_not_end_run() {
        let frame = parse_server_frame(
            "|move|p1a: Sparky|Thunderbolt|p2a: Gyarados\n\
             |-boost|p1a: Sparky|atk\n\
             |-damage|p2a: Gyarados|10/100",
        )
        .unwrap();

        match &frame.messages[..] {
            [ServerMessage::BattleProgress(events)] => assert_eq!(events.len(), 2),
            other => panic!("unexpected messages: {:?}", other),
        }
    }

    #[test]
    fn test_request_before_run() {
        let frame = parse_server_frame(
            ">battle-gen4ou-1\n\
             |request|{\"wait\":true,\"rqid\":4}",
        )
        .unwrap();

        match &frame.messages[..] {
            [ServerMessage::Request(request)] => {
                assert!(request.wait);
                assert_eq!(request.rqid, Some(4));
            }
            other => panic!("unexpected messages: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_request_is_fatal() {
        let result = parse_server_frame(">battle-gen4ou-1\n|request|{\"wait\":");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_event_line() {
        let event = parse_event_line("|faint|p2a: Gyarados").unwrap();
        assert!(matches!(event, BattleEvent::Faint { .. }));
        assert!(parse_event_line("|-hint|Some hint").is_none());
        assert!(parse_event_line("").is_none());
    }
}
