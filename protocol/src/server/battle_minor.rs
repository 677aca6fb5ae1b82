//! Minor battle action message parsers
//!
//! These are secondary effects in battle: damage, stat changes, status, etc.
//! In the official client, they're usually displayed in smaller font.

use super::battle::{PokemonId, Stat, Status, arg, parse_hp_status, parse_pokemon, parse_side};
use super::cause::parse_cause;
use super::event::BattleEvent;
use anyhow::Result;

fn parse_stat_amount(parts: &[&str]) -> Result<(Stat, i8)> {
    let stat = parts
        .get(3)
        .and_then(|s| Stat::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing stat"))?;
    let amount = parts
        .get(4)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| anyhow::anyhow!("Missing amount"))?;
    Ok((stat, amount))
}

fn extra_args(parts: &[&str], start: usize) -> Vec<String> {
    parts
        .iter()
        .skip(start)
        .filter(|s| !s.is_empty() && !s.starts_with('['))
        .map(|s| s.to_string())
        .collect()
}

fn required<'a>(parts: &[&'a str], index: usize, field: &str) -> Result<&'a str> {
    arg(parts, index).ok_or_else(|| anyhow::anyhow!("Missing {}", field))
}

/// Parse |-ability|POKEMON|ABILITY
pub fn parse_ability(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let ability = required(parts, 3, "ability")?.to_string();
    let cause = parse_cause(parts, 4);

    Ok(BattleEvent::Ability { id, ability, cause })
}

/// Parse |-endability|POKEMON
pub fn parse_endability(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    Ok(BattleEvent::EndAbility { id })
}

/// Parse |-activate|POKEMON|EFFECT
pub fn parse_activate(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let effect = required(parts, 3, "effect")?.to_string();
    let args = extra_args(parts, 4);
    let cause = parse_cause(parts, 4);

    Ok(BattleEvent::Activate {
        id,
        effect,
        args,
        cause,
    })
}

/// Parse |-start|POKEMON|EFFECT
pub fn parse_start(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let effect = required(parts, 3, "effect")?.to_string();
    let args = extra_args(parts, 4);
    let cause = parse_cause(parts, 4);

    Ok(BattleEvent::Start {
        id,
        effect,
        args,
        cause,
    })
}

/// Parse |-end|POKEMON|EFFECT
pub fn parse_end(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let effect = required(parts, 3, "effect")?.to_string();
    let cause = parse_cause(parts, 4);

    Ok(BattleEvent::End { id, effect, cause })
}

/// Parse |-boost|POKEMON|STAT|AMOUNT
pub fn parse_boost(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let (stat, amount) = parse_stat_amount(parts)?;

    Ok(BattleEvent::Boost { id, stat, amount })
}

/// Parse |-unboost|POKEMON|STAT|AMOUNT
pub fn parse_unboost(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let (stat, amount) = parse_stat_amount(parts)?;

    Ok(BattleEvent::Boost {
        id,
        stat,
        amount: -amount,
    })
}

/// Parse |-setboost|POKEMON|STAT|AMOUNT
pub fn parse_setboost(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let (stat, amount) = parse_stat_amount(parts)?;

    Ok(BattleEvent::SetBoost { id, stat, amount })
}

/// Parse |-clearboost|POKEMON
pub fn parse_clearboost(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    Ok(BattleEvent::ClearBoost { id })
}

/// Parse |-clearallboost
pub fn parse_clearallboost(_parts: &[&str]) -> Result<BattleEvent> {
    Ok(BattleEvent::ClearAllBoost)
}

/// Parse |-curestatus|POKEMON|STATUS
pub fn parse_curestatus(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let status = parts.get(3).and_then(|s| Status::parse(s));

    Ok(BattleEvent::CureStatus { id, status })
}

/// Parse |-cureteam|POKEMON
pub fn parse_cureteam(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    Ok(BattleEvent::CureTeam { id })
}

/// Parse |-damage|POKEMON|HP STATUS
pub fn parse_damage(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let status = parse_hp_status(parts, 3);
    let cause = parse_cause(parts, 4);

    Ok(BattleEvent::Damage { id, status, cause })
}

/// Parse |-heal|POKEMON|HP STATUS
pub fn parse_heal(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let status = parse_hp_status(parts, 3);
    let cause = parse_cause(parts, 4);

    Ok(BattleEvent::Heal { id, status, cause })
}

/// Parse |-sethp|POKEMON|HP
pub fn parse_sethp(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let status = parse_hp_status(parts, 3);

    Ok(BattleEvent::SetHp { id, status })
}

/// Parse |-status|POKEMON|STATUS
pub fn parse_status(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let status = parts
        .get(3)
        .and_then(|s| Status::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing status"))?;
    let cause = parse_cause(parts, 4);

    Ok(BattleEvent::Status { id, status, cause })
}

/// Parse |-fieldstart|CONDITION
pub fn parse_fieldstart(parts: &[&str]) -> Result<BattleEvent> {
    let effect = required(parts, 2, "condition")?.to_string();
    let cause = parse_cause(parts, 3);

    Ok(BattleEvent::FieldStart { effect, cause })
}

/// Parse |-fieldend|CONDITION
pub fn parse_fieldend(parts: &[&str]) -> Result<BattleEvent> {
    let effect = required(parts, 2, "condition")?.to_string();
    Ok(BattleEvent::FieldEnd { effect })
}

/// Parse |-mustrecharge|POKEMON
pub fn parse_mustrecharge(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    Ok(BattleEvent::MustRecharge { id })
}

/// Parse |-prepare|POKEMON|MOVE|TARGET
pub fn parse_prepare(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let move_name = required(parts, 3, "move name")?.to_string();
    let target = parts.get(4).and_then(|s| PokemonId::parse(s));

    Ok(BattleEvent::Prepare {
        id,
        move_name,
        target,
    })
}

/// Parse |-sidestart|SIDE|CONDITION
pub fn parse_sidestart(parts: &[&str]) -> Result<BattleEvent> {
    let side = parse_side(parts, 2)?;
    let condition = required(parts, 3, "condition")?.to_string();

    Ok(BattleEvent::SideStart { side, condition })
}

/// Parse |-sideend|SIDE|CONDITION
pub fn parse_sideend(parts: &[&str]) -> Result<BattleEvent> {
    let side = parse_side(parts, 2)?;
    let condition = required(parts, 3, "condition")?.to_string();

    Ok(BattleEvent::SideEnd { side, condition })
}

/// Parse |-singleturn|POKEMON|EFFECT
pub fn parse_singleturn(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let effect = required(parts, 3, "effect")?.to_string();

    Ok(BattleEvent::SingleTurn { id, effect })
}

/// Parse |-item|POKEMON|ITEM
pub fn parse_item(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let item = required(parts, 3, "item")?.to_string();
    let cause = parse_cause(parts, 4);

    Ok(BattleEvent::Item { id, item, cause })
}

/// Parse |-enditem|POKEMON|ITEM
pub fn parse_enditem(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let item = required(parts, 3, "item")?.to_string();
    let cause = parse_cause(parts, 4);

    Ok(BattleEvent::EndItem { id, item, cause })
}

/// Parse |-weather|WEATHER with optional [upkeep] and cause
pub fn parse_weather(parts: &[&str]) -> Result<BattleEvent> {
    let weather = required(parts, 2, "weather")?.to_string();
    let upkeep = parts.iter().skip(3).any(|s| *s == "[upkeep]");
    let cause = parse_cause(parts, 3);

    Ok(BattleEvent::Weather {
        weather,
        upkeep,
        cause,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::battle::Player;
    use crate::server::cause::Cause;

    fn split(line: &str) -> Vec<&str> {
        line.split('|').collect()
    }

    #[test]
    fn test_parse_unboost_negates() {
        let event = parse_unboost(&split("|-unboost|p2a: Gyarados|atk|1")).unwrap();
        assert!(matches!(
            event,
            BattleEvent::Boost {
                stat: Stat::Atk,
                amount: -1,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_boost_missing_amount() {
        assert!(parse_boost(&split("|-boost|p2a: Gyarados|atk")).is_err());
    }

    #[test]
    fn test_parse_start_with_args() {
        let event = parse_start(&split("|-start|p2a: Gengar|Disable|Shadow Ball")).unwrap();
        match event {
            BattleEvent::Start { effect, args, .. } => {
                assert_eq!(effect, "Disable");
                assert_eq!(args, vec!["Shadow Ball".to_string()]);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_parse_damage_with_item_cause() {
        let event =
            parse_damage(&split("|-damage|p1a: Garchomp|90/100|[from] item: Life Orb")).unwrap();
        match event {
            BattleEvent::Damage { status, cause, .. } => {
                assert_eq!(status.unwrap().hp, 90);
                assert_eq!(
                    cause,
                    Some(Cause::Item {
                        name: "Life Orb".to_string(),
                        of: None,
                    })
                );
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_parse_weather_upkeep() {
        let event = parse_weather(&split("|-weather|RainDance|[upkeep]")).unwrap();
        assert!(matches!(event, BattleEvent::Weather { upkeep: true, cause: None, .. }));
    }

    #[test]
    fn test_parse_weather_from_ability() {
        let event =
            parse_weather(&split("|-weather|Sandstorm|[from] ability: Sand Stream|[of] p2a: Tyranitar"))
                .unwrap();
        match event {
            BattleEvent::Weather {
                weather,
                upkeep,
                cause: Some(Cause::Ability { name, of }),
            } => {
                assert_eq!(weather, "Sandstorm");
                assert!(!upkeep);
                assert_eq!(name, "Sand Stream");
                assert_eq!(of.unwrap().name, "Tyranitar");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_parse_sidestart() {
        let event = parse_sidestart(&split("|-sidestart|p2: Bob|move: Stealth Rock")).unwrap();
        match event {
            BattleEvent::SideStart { side, condition } => {
                assert_eq!(side, Player::P2);
                assert_eq!(condition, "move: Stealth Rock");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_parse_status_unknown() {
        assert!(parse_status(&split("|-status|p1a: Pikachu|xyz")).is_err());
    }
}
