//! Major battle action message parsers
//!
//! These are the primary actions in battle: moves, switches, faints, etc.

use super::battle::{PokemonDetails, PokemonId, arg, parse_details, parse_hp_status, parse_pokemon};
use super::cause::parse_cause;
use super::event::BattleEvent;
use anyhow::Result;

/// Parse |move|POKEMON|MOVE|TARGET with optional tags
pub fn parse_move(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let move_name = arg(parts, 3)
        .ok_or_else(|| anyhow::anyhow!("Missing move name"))?
        .to_string();
    let target = parts.get(4).and_then(|s| PokemonId::parse(s));
    let cause = parse_cause(parts, 4);

    Ok(BattleEvent::Move {
        id,
        move_name,
        target,
        cause,
    })
}

/// Parse |switch|POKEMON|DETAILS|HP STATUS
pub fn parse_switch(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let details = parse_details(parts, 3)?;
    let status = parse_hp_status(parts, 4);

    Ok(BattleEvent::Switch {
        id,
        details,
        status,
        drag: false,
    })
}

/// Parse |drag|POKEMON|DETAILS|HP STATUS
pub fn parse_drag(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let details = parse_details(parts, 3)?;
    let status = parse_hp_status(parts, 4);

    Ok(BattleEvent::Switch {
        id,
        details,
        status,
        drag: true,
    })
}

/// Parse |detailschange|POKEMON|DETAILS|HP STATUS
pub fn parse_detailschange(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let details = parse_details(parts, 3)?;
    let status = parse_hp_status(parts, 4);

    Ok(BattleEvent::DetailsChange {
        id,
        details,
        status,
    })
}

/// Parse |-formechange|POKEMON|SPECIES|HP STATUS
pub fn parse_formechange(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let species = arg(parts, 3).ok_or_else(|| anyhow::anyhow!("Missing species"))?;
    let status = parse_hp_status(parts, 4);

    Ok(BattleEvent::DetailsChange {
        id,
        details: PokemonDetails {
            species: species.to_string(),
            ..PokemonDetails::default()
        },
        status,
    })
}

/// Parse |cant|POKEMON|REASON or |cant|POKEMON|REASON|MOVE
pub fn parse_cant(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    let reason = parts.get(3).unwrap_or(&"").to_string();
    let move_name = arg(parts, 4).map(|s| s.to_string());

    Ok(BattleEvent::Cant {
        id,
        reason,
        move_name,
    })
}

/// Parse |faint|POKEMON
pub fn parse_faint(parts: &[&str]) -> Result<BattleEvent> {
    let id = parse_pokemon(parts, 2)?;
    Ok(BattleEvent::Faint { id })
}
