//! Syncing our own side from `|request|` payloads

use std::sync::Arc;

use psbot_protocol::{ActivePokemon, BattleRequest, SidePokemon};

use super::battle::BattleState;
use crate::dex::{Dex, to_id};
use crate::error::{DexError, TrackerError};
use crate::possibility::{AbilityId, ItemId, MoveId};
use crate::types::{Pokemon, Type};

/// Ability families that can keep the opposing Pokemon in, and whom they affect
const ARENA_TRAP: &[&str] = &["arenatrap"];
const MAGNET_PULL: &[&str] = &["magnetpull"];
const SHADOW_TAG: &[&str] = &["shadowtag"];

/// Request move ids that are not real move slots
const PSEUDO_MOVES: &[&str] = &["struggle", "recharge"];

impl BattleState {
    /// Sync our side with the server's view of it
    ///
    /// The request is authoritative for everything it states: team order, species,
    /// abilities, items, known moves, HP and status of every own Pokemon.
    pub fn handle_request(&mut self, request: &BattleRequest) -> Result<(), TrackerError> {
        let Some(side) = &request.side else {
            return Ok(());
        };
        self.set_perspective(side.id);

        let dex = Arc::clone(&self.dex);
        let team = self.team_mut(side.id);
        if team.size() != side.pokemon.len() {
            team.set_size(side.pokemon.len());
        }

        let mut order: Vec<usize> = Vec::with_capacity(side.pokemon.len());
        for info in &side.pokemon {
            let slot = team.find(&info.ident.name).or_else(|| {
                (0..team.size()).find(|&slot| {
                    !order.contains(&slot) && team.get(slot).is_some_and(|p| !p.revealed)
                })
            });
            match slot {
                Some(slot) => order.push(slot),
                None => return Err(TrackerError::TeamFull(info.ident.clone())),
            }
        }
        team.reorder(&order);

        for (slot, info) in side.pokemon.iter().enumerate() {
            if let Some(pokemon) = team.get_mut(slot) {
                sync_pokemon(dex.as_ref(), pokemon, info)?;
            }
        }

        if let Some(active) = request.active_pokemon() {
            if let Some(pokemon) = team.get_mut(0) {
                sync_active_moves(dex.as_ref(), pokemon, active)?;
            }
            // `maybeTrapped` only says a foe could trap us, so it is no evidence
            if active.trapped {
                self.infer_trapping();
            }
            if let Some(pokemon) = self.me_mut().get_mut(0) {
                pokemon.volatile.trapped = active.trapped;
            }
        }
        Ok(())
    }

    /// The server refused our switch (`[Unavailable choice] Can't switch`)
    ///
    /// Sent when we tried to leave while only maybe-trapped, so the refusal is the
    /// first confirmation that something is holding us in.
    pub fn handle_switch_refused(&mut self) {
        self.infer_trapping();
        if let Some(pokemon) = self.me_mut().get_mut(0) {
            pokemon.volatile.trapped = true;
        }
    }

    /// Narrow the opposing ability after an unexplained "cannot switch"
    fn infer_trapping(&mut self) {
        let dex = Arc::clone(&self.dex);
        let gravity = self.room.gravity;
        let Some(mine) = self.me().get(0) else {
            return;
        };
        if mine.volatile.is_committed() || mine.volatile.trapped {
            return;
        }

        let grounded = mine.is_grounded(dex.as_ref(), gravity);
        let steel = mine.has_type(Type::Steel);
        let shadow_tag = dex.ability("shadowtag").map(|a| AbilityId(a.uid));
        let has_shadow_tag = shadow_tag.is_some() && mine.effective_ability() == shadow_tag;

        let mut allowed = Vec::new();
        let mut ruled_out = Vec::new();
        for (family, possible) in [
            (ARENA_TRAP, grounded),
            (MAGNET_PULL, steel),
            (SHADOW_TAG, !has_shadow_tag),
        ] {
            let ids = family
                .iter()
                .filter_map(|name| dex.ability(name))
                .map(|a| AbilityId(a.uid));
            if possible {
                allowed.extend(ids);
            } else {
                ruled_out.extend(ids);
            }
        }

        let Some(foe) = self.opponent_mut().active_mut() else {
            tracing::warn!("Trapped with no opposing Pokemon on the field");
            return;
        };
        if foe.base_ability.narrow_to(allowed).is_ok() {
            tracing::debug!(pokemon = %foe.nickname, abilities = ?foe.base_ability, "Narrowed trapping ability");
            return;
        }

        tracing::warn!(
            pokemon = %foe.nickname,
            grounded,
            steel,
            "Trapped, but no trapping ability fits the opposing Pokemon"
        );
        for ability in ruled_out {
            if foe.base_ability.eliminate(ability).is_err() {
                break;
            }
        }
    }
}

fn sync_pokemon(dex: &dyn Dex, pokemon: &mut Pokemon, info: &SidePokemon) -> Result<(), DexError> {
    if !pokemon.revealed {
        pokemon.reveal(dex, &info.ident.name, &info.details)?;
    } else if pokemon.species.definite().map(|s| s.0)
        != Some(dex.lookup_species(&info.details.species)?.uid)
    {
        let data = dex.lookup_species(&info.details.species)?;
        pokemon.set_species(dex, data)?;
    }
    pokemon.level = info.details.level;
    pokemon.gender = info.details.gender;

    if !info.base_ability.is_empty() {
        let base = AbilityId(dex.lookup_ability(&info.base_ability)?.uid);
        pokemon.base_ability.assign(base);
        pokemon.override_ability = match &info.ability {
            Some(current) if to_id(current) != to_id(&info.base_ability) => {
                Some(AbilityId(dex.lookup_ability(current)?.uid))
            }
            _ => None,
        };
    }

    let item = if info.item.is_empty() { "none" } else { info.item.as_str() };
    pokemon.item.assign(ItemId(dex.lookup_item(item)?.uid));

    for move_id in &info.moves {
        if PSEUDO_MOVES.contains(&to_id(move_id).as_str()) {
            continue;
        }
        let data = dex.lookup_move(move_id)?;
        if pokemon.moves.reveal(data).is_none() {
            tracing::warn!(pokemon = %info.ident, move_id, "Moveset full, not recording move");
        }
    }

    pokemon.set_condition(&info.condition);
    Ok(())
}

fn sync_active_moves(dex: &dyn Dex, pokemon: &mut Pokemon, active: &ActivePokemon) -> Result<(), DexError> {
    for slot_info in &active.moves {
        if PSEUDO_MOVES.contains(&to_id(&slot_info.id).as_str()) {
            continue;
        }
        let id = MoveId(dex.lookup_move(&slot_info.id)?.uid);
        let Some(slot) = pokemon.moves.slot_of(id) else {
            continue;
        };
        if let Some(slot_move) = pokemon.moves.get_mut(slot) {
            if let Some(pp) = slot_info.pp {
                slot_move.pp = pp;
            }
            if let Some(max_pp) = slot_info.max_pp {
                slot_move.max_pp = max_pp;
            }
        }
        if let Some(disabled) = pokemon.volatile.disabled.get_mut(slot) {
            *disabled = slot_info.disabled;
        }
    }
    Ok(())
}
