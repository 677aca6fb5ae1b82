//! Applying battle events to the belief state

use std::sync::Arc;

use psbot_protocol::{BattleEvent, Cause, EventRegistry, PokemonDetails, PokemonId, PokemonStatus};

use super::battle::BattleState;
use crate::dex::{MoveData, MoveTag, to_id};
use crate::error::TrackerError;
use crate::possibility::{AbilityId, ItemId, MoveId};
use crate::types::{SelfSwitch, SideCondition, VolatileName, Weather};

/// Abilities that copy another Pokemon's ability onto their holder
const COPYING_ABILITIES: &[&str] = &["trace", "receiver", "powerofalchemy"];

/// Moves that call a move from the user's own moveset
const OWN_MOVESET_CALLERS: &[&str] = &["sleeptalk"];

/// Registry wired to feed every event into a [`BattleState`], with a trace listener in front
pub fn tracker_registry() -> EventRegistry<BattleState, TrackerError> {
    let mut registry = EventRegistry::new();
    registry
        .on_any(|_, event, _, index| {
            tracing::trace!(index, ?event, "battle event");
            Ok(())
        })
        .on_any(|state: &mut BattleState, _, run, index| state.apply(run, index));
    registry
}

impl BattleState {
    /// Apply a whole run in arrival order, stopping at the first fatal error
    pub fn apply_run(&mut self, run: &[BattleEvent]) -> Result<(), TrackerError> {
        for index in 0..run.len() {
            self.apply(run, index)?;
        }
        Ok(())
    }

    /// Apply `run[index]`. Earlier events of the run are available for attribution.
    pub fn apply(&mut self, run: &[BattleEvent], index: usize) -> Result<(), TrackerError> {
        let Some(event) = run.get(index) else {
            return Ok(());
        };

        match event {
            // === Abilities and items ===
            BattleEvent::Ability { id, ability, cause } => {
                self.handle_ability(id, ability, cause.as_ref())
            }

            BattleEvent::EndAbility { id } => {
                self.pokemon_mut(id)?.volatile.ability_suppressed = true;
                Ok(())
            }

            BattleEvent::Item { id, item, cause } => {
                self.reveal_cause(id, cause.as_ref())?;
                let item = ItemId(self.dex.lookup_item(item)?.uid);
                self.pokemon_mut(id)?.item.assign(item);
                Ok(())
            }

            BattleEvent::EndItem { id, item, .. } => {
                self.dex.lookup_item(item)?;
                let none = ItemId(self.dex.lookup_item("none")?.uid);
                self.pokemon_mut(id)?.item.assign(none);
                Ok(())
            }

            // === Volatile status ===
            BattleEvent::Activate {
                id,
                effect,
                args,
                cause,
            } => self.handle_activate(id, effect, args, cause.as_ref()),

            BattleEvent::Start {
                id,
                effect,
                args,
                cause,
            } => self.handle_start(id, effect, args, cause.as_ref()),

            BattleEvent::End { id, effect, cause } => self.handle_end(id, effect, cause.as_ref()),

            BattleEvent::SingleTurn { id, effect } => {
                let pokemon = self.pokemon_mut(id)?;
                match VolatileName::from_protocol(effect) {
                    VolatileName::Roost => pokemon.volatile.roost = true,
                    VolatileName::Stall | VolatileName::Endure | VolatileName::MatBlock => {
                        pokemon.volatile.stalling = true;
                    }
                    other => tracing::debug!(pokemon = %id, effect = ?other, "Ignoring single-turn effect"),
                }
                Ok(())
            }

            BattleEvent::MustRecharge { id } => {
                self.pokemon_mut(id)?.volatile.must_recharge = true;
                Ok(())
            }

            // === Boosts ===
            BattleEvent::Boost { id, stat, amount } => {
                self.pokemon_mut(id)?.volatile.boosts.boost(*stat, *amount);
                Ok(())
            }

            BattleEvent::SetBoost { id, stat, amount } => {
                self.pokemon_mut(id)?.volatile.boosts.set(*stat, *amount);
                Ok(())
            }

            BattleEvent::ClearBoost { id } => {
                self.pokemon_mut(id)?.volatile.boosts.clear();
                Ok(())
            }

            BattleEvent::ClearAllBoost => {
                for team in &mut self.teams {
                    if let Some(active) = team.active_mut() {
                        active.volatile.boosts.clear();
                    }
                }
                Ok(())
            }

            // === Moves ===
            BattleEvent::Move {
                id,
                move_name,
                target,
                cause,
            } => self.handle_move(id, move_name, target.as_ref(), cause.as_ref()),

            BattleEvent::Prepare { id, move_name, .. } => {
                let dex = Arc::clone(&self.dex);
                let data = dex.lookup_move(move_name)?;
                let pokemon = self.pokemon_mut(id)?;
                if pokemon.moves.reveal(data).is_none() {
                    tracing::warn!(pokemon = %id, move_name, "Moveset full, not recording charged move");
                }
                pokemon.volatile.two_turn = Some(MoveId(data.uid));
                Ok(())
            }

            BattleEvent::Cant {
                id,
                reason,
                move_name,
            } => self.handle_cant(id, reason, move_name.as_deref()),

            // === HP and status ===
            BattleEvent::Damage { id, status, cause } => {
                self.reveal_cause(id, cause.as_ref())?;
                self.set_condition(id, status.as_ref())
            }

            BattleEvent::Heal { id, status, cause } => {
                // Absorbing abilities heal their holder, `[of]` is the attacker
                if let Some(Cause::Ability { name, .. }) = cause {
                    let ability = AbilityId(self.dex.lookup_ability(name)?.uid);
                    self.pokemon_mut(id)?.reveal_ability(ability);
                } else {
                    self.reveal_cause(id, cause.as_ref())?;
                }
                self.set_condition(id, status.as_ref())
            }

            BattleEvent::SetHp { id, status } => self.set_condition(id, status.as_ref()),

            BattleEvent::Faint { id } => {
                self.pokemon_mut(id)?.faint();
                Ok(())
            }

            BattleEvent::Status { id, status, cause } => {
                self.reveal_cause(id, cause.as_ref())?;
                self.pokemon_mut(id)?.status = Some(*status);
                Ok(())
            }

            BattleEvent::CureStatus { id, .. } => {
                // Bench cures (Natural Cure, Aromatherapy) may name a slot we never saw
                match self.pokemon_mut(id) {
                    Ok(pokemon) => pokemon.status = None,
                    Err(_) => tracing::debug!(pokemon = %id, "Cure for unrevealed Pokemon"),
                }
                Ok(())
            }

            BattleEvent::CureTeam { id } => {
                self.team_mut(id.player).cure_all();
                Ok(())
            }

            // === Switching ===
            BattleEvent::Switch {
                id,
                details,
                status,
                drag,
            } => self.handle_switch(id, details, status.as_ref(), *drag),

            BattleEvent::DetailsChange { id, details, status } => {
                let dex = Arc::clone(&self.dex);
                let data = dex.lookup_species(&details.species)?;
                let pokemon = self.pokemon_mut(id)?;
                pokemon.set_species(dex.as_ref(), data)?;
                if let Some(condition) = status {
                    pokemon.set_condition(condition);
                }
                Ok(())
            }

            // === Field ===
            BattleEvent::SideStart { side, condition } => {
                match SideCondition::from_protocol(condition) {
                    Some(cond) => self.team_mut(*side).status.side_start(cond),
                    None => tracing::debug!(%side, condition, "Ignoring side condition"),
                }
                Ok(())
            }

            BattleEvent::SideEnd { side, condition } => {
                match SideCondition::from_protocol(condition) {
                    Some(cond) => self.team_mut(*side).status.side_end(cond),
                    None => tracing::debug!(%side, condition, "Ignoring side condition"),
                }
                Ok(())
            }

            BattleEvent::FieldStart { effect, cause } => {
                if let Some(Cause::Ability { of: Some(holder), .. }) = cause {
                    self.reveal_cause(holder, cause.as_ref())?;
                }
                if !self.room.apply_field_start(effect) {
                    tracing::debug!(effect, "Ignoring field effect");
                }
                Ok(())
            }

            BattleEvent::FieldEnd { effect } => {
                if !self.room.apply_field_end(effect) {
                    tracing::debug!(effect, "Ignoring field effect");
                }
                Ok(())
            }

            BattleEvent::Weather {
                weather,
                upkeep,
                cause,
            } => self.handle_weather(run, index, weather, *upkeep, cause.as_ref()),

            // === Turn flow ===
            BattleEvent::Upkeep => {
                for team in &mut self.teams {
                    team.status.upkeep();
                    if let Some(active) = team.active_mut() {
                        active.volatile.stalling = false;
                        active.volatile.roost = false;
                    }
                }
                Ok(())
            }

            BattleEvent::Turn(turn) => {
                self.turn = *turn;
                Ok(())
            }

            BattleEvent::Win(winner) => {
                self.ended = true;
                self.winner = Some(winner.clone());
                Ok(())
            }

            BattleEvent::Tie => {
                self.ended = true;
                self.tie = true;
                Ok(())
            }
        }
    }

    /// Record what a cause reveals about its source
    fn reveal_cause(&mut self, subject: &PokemonId, cause: Option<&Cause>) -> Result<(), TrackerError> {
        match cause {
            Some(Cause::Item { name, of }) => {
                let item = ItemId(self.dex.lookup_item(name)?.uid);
                let holder = of.as_ref().unwrap_or(subject);
                self.pokemon_mut(holder)?.item.assign(item);
            }
            Some(Cause::Ability { name, of }) => {
                let ability = AbilityId(self.dex.lookup_ability(name)?.uid);
                let holder = of.as_ref().unwrap_or(subject);
                self.pokemon_mut(holder)?.reveal_ability(ability);
            }
            Some(Cause::Fatigue | Cause::LockedMove | Cause::Move(_)) | None => {}
        }
        Ok(())
    }

    fn set_condition(&mut self, id: &PokemonId, status: Option<&PokemonStatus>) -> Result<(), TrackerError> {
        let pokemon = self.pokemon_mut(id)?;
        if let Some(condition) = status {
            pokemon.set_condition(condition);
        }
        Ok(())
    }

    fn handle_ability(&mut self, id: &PokemonId, ability: &str, cause: Option<&Cause>) -> Result<(), TrackerError> {
        let revealed = AbilityId(self.dex.lookup_ability(ability)?.uid);

        let Some(Cause::Ability { name, of }) = cause else {
            self.pokemon_mut(id)?.reveal_ability(revealed);
            return Ok(());
        };
        let other = of.as_ref().filter(|other| *other != id);
        if other.is_none() && to_id(name) == to_id(ability) {
            self.pokemon_mut(id)?.reveal_ability(revealed);
            return Ok(());
        }

        let source = AbilityId(self.dex.lookup_ability(name)?.uid);
        let copies = COPYING_ABILITIES.contains(&to_id(name).as_str());

        match other {
            Some(target) if !copies => {
                // Another Pokemon's ability replaced ours (Mummy)
                self.pokemon_mut(target)?.reveal_ability(source);
                self.pokemon_mut(id)?.override_ability = Some(revealed);
            }
            _ => {
                // Base ability is the copier, the copied one is now in effect
                let pokemon = self.pokemon_mut(id)?;
                pokemon.override_ability = None;
                pokemon.reveal_ability(source);
                pokemon.override_ability = Some(revealed);
                if let Some(target) = other {
                    self.pokemon_mut(target)?.reveal_ability(revealed);
                }
            }
        }
        Ok(())
    }

    fn handle_activate(
        &mut self,
        id: &PokemonId,
        effect: &str,
        args: &[String],
        cause: Option<&Cause>,
    ) -> Result<(), TrackerError> {
        self.reveal_cause(id, cause)?;

        if let Some(ability) = effect.strip_prefix("ability: ") {
            let ability = AbilityId(self.dex.lookup_ability(ability)?.uid);
            self.pokemon_mut(id)?.reveal_ability(ability);
            return Ok(());
        }
        if let Some(item) = effect.strip_prefix("item: ") {
            let item = ItemId(self.dex.lookup_item(item)?.uid);
            self.pokemon_mut(id)?.item.assign(item);
            return Ok(());
        }

        let volatile = VolatileName::from_protocol(effect);
        if volatile.blocks_moves() {
            // A stalling defender stopped the attacker; its rampage is over
            if let Some(attacker) = self.opposing_active_mut(id.player) {
                attacker.volatile.locked_move = false;
            }
            return Ok(());
        }

        let pokemon = self.pokemon_mut(id)?;
        match volatile {
            VolatileName::Confusion => pokemon.volatile.confusion_turns += 1,
            VolatileName::Disable => {
                let volatile = &mut pokemon.volatile;
                for (turns, disabled) in volatile.disable_turns.iter_mut().zip(volatile.disabled) {
                    if disabled {
                        *turns += 1;
                    }
                }
            }
            VolatileName::Trapped => pokemon.volatile.trapped = true,
            VolatileName::Substitute => {
                tracing::trace!(pokemon = %id, ?args, "Substitute took the hit");
            }
            other => tracing::debug!(pokemon = %id, effect = ?other, "Ignoring activation"),
        }
        Ok(())
    }

    fn handle_start(
        &mut self,
        id: &PokemonId,
        effect: &str,
        args: &[String],
        cause: Option<&Cause>,
    ) -> Result<(), TrackerError> {
        self.reveal_cause(id, cause)?;

        let volatile = VolatileName::from_protocol(effect);
        if volatile == VolatileName::Disable {
            let Some(move_name) = args.first() else {
                tracing::debug!(pokemon = %id, "Disable without a move name");
                return Ok(());
            };
            let dex = Arc::clone(&self.dex);
            let data = dex.lookup_move(move_name)?;
            let pokemon = self.pokemon_mut(id)?;
            match pokemon.moves.reveal(data) {
                Some(slot) => pokemon.volatile.disable(slot),
                None => tracing::warn!(pokemon = %id, move_name, "Moveset full, cannot disable"),
            }
            return Ok(());
        }

        let pokemon = self.pokemon_mut(id)?;
        let state = &mut pokemon.volatile;
        match volatile {
            VolatileName::Confusion => {
                state.confused = true;
                state.confusion_turns = 1;
                if matches!(cause, Some(Cause::Fatigue)) {
                    state.locked_move = false;
                }
            }
            VolatileName::Substitute => state.substitute = true,
            VolatileName::LeechSeed => state.leech_seed = true,
            VolatileName::Ingrain => state.ingrain = true,
            VolatileName::MagnetRise => state.magnet_rise = true,
            VolatileName::Embargo => state.embargo = true,
            VolatileName::Trapped => state.trapped = true,
            VolatileName::MustRecharge => state.must_recharge = true,
            VolatileName::Other(name) => {
                tracing::debug!(pokemon = %id, effect = %name, "Ignoring unknown volatile");
            }
            other => tracing::debug!(pokemon = %id, effect = ?other, "Ignoring volatile start"),
        }
        Ok(())
    }

    fn handle_end(&mut self, id: &PokemonId, effect: &str, cause: Option<&Cause>) -> Result<(), TrackerError> {
        self.reveal_cause(id, cause)?;

        let pokemon = self.pokemon_mut(id)?;
        let state = &mut pokemon.volatile;
        match VolatileName::from_protocol(effect) {
            VolatileName::Confusion => {
                state.confused = false;
                state.confusion_turns = 0;
            }
            VolatileName::Disable => state.enable_all(),
            VolatileName::Substitute => state.substitute = false,
            VolatileName::LeechSeed => state.leech_seed = false,
            VolatileName::Ingrain => state.ingrain = false,
            VolatileName::MagnetRise => state.magnet_rise = false,
            VolatileName::Embargo => state.embargo = false,
            VolatileName::Trapped => state.trapped = false,
            VolatileName::Stall | VolatileName::Endure => {
                state.stalling = false;
                state.stall_turns = 0;
            }
            VolatileName::Other(name) => {
                tracing::debug!(pokemon = %id, effect = %name, "Ignoring unknown volatile");
            }
            other => tracing::debug!(pokemon = %id, effect = ?other, "Ignoring volatile end"),
        }
        Ok(())
    }

    fn handle_cant(&mut self, id: &PokemonId, reason: &str, move_name: Option<&str>) -> Result<(), TrackerError> {
        let dex = Arc::clone(&self.dex);
        let revealed_ability = match reason.strip_prefix("ability: ") {
            Some(name) => Some(AbilityId(dex.lookup_ability(name)?.uid)),
            None => None,
        };
        let truant = dex.ability("truant").map(|a| AbilityId(a.uid));
        let move_data = match move_name {
            Some(name) => Some(dex.lookup_move(name)?),
            None => None,
        };

        let pokemon = self.pokemon_mut(id)?;
        if reason == "recharge" {
            pokemon.volatile.must_recharge = false;
        }
        if let Some(ability) = revealed_ability {
            pokemon.reveal_ability(ability);
            if Some(ability) == truant {
                pokemon.volatile.truant = false;
            }
        }
        if let Some(data) = move_data
            && pokemon.moves.reveal(data).is_none()
        {
            tracing::warn!(pokemon = %id, move_name = %data.name, "Moveset full, not recording move");
        }

        pokemon.volatile.locked_move = false;
        pokemon.volatile.two_turn = None;
        Ok(())
    }

    /// PP a move costs: nothing when the move repeats on its own, double into Pressure
    fn pp_cost(&self, user: &PokemonId, target: Option<&PokemonId>, data: &MoveData, locked: bool) -> u32 {
        if locked {
            return 0;
        }
        let Some(target) = target else {
            return 1;
        };
        if target.player == user.player || !data.target.targets_foe() {
            return 1;
        }
        let pressure = self.dex.ability("pressure").map(|a| AbilityId(a.uid));
        match (self.opposing_active(user.player), pressure) {
            (Some(foe), Some(pressure)) if foe.effective_ability() == Some(pressure) => 2,
            _ => 1,
        }
    }

    fn handle_move(
        &mut self,
        id: &PokemonId,
        move_name: &str,
        target: Option<&PokemonId>,
        cause: Option<&Cause>,
    ) -> Result<(), TrackerError> {
        if to_id(move_name) == "struggle" {
            self.pokemon_mut(id)?.volatile.stall_turns = 0;
            return Ok(());
        }

        let dex = Arc::clone(&self.dex);
        let data = dex.lookup_move(move_name)?;
        let locked = matches!(cause, Some(Cause::LockedMove));
        let cost = self.pp_cost(id, target, data, locked);
        let truant = dex.ability("truant").map(|a| AbilityId(a.uid));

        let pokemon = self.pokemon_mut(id)?;
        match cause {
            Some(Cause::Move(caller)) => {
                // The caller paid the PP, the called move only belongs to us if drawn from our moveset
                if OWN_MOVESET_CALLERS.contains(&to_id(caller).as_str())
                    && pokemon.moves.reveal(data).is_none()
                {
                    tracing::warn!(pokemon = %id, move_name, "Moveset full, not recording called move");
                }
            }
            _ => match pokemon.moves.reveal(data) {
                Some(slot) => {
                    if let Some(slot_move) = pokemon.moves.get_mut(slot) {
                        slot_move.use_pp(cost);
                    }
                    pokemon.volatile.last_used_move = Some(slot);
                }
                None => tracing::warn!(pokemon = %id, move_name, "Moveset full, not recording move"),
            },
        }

        let state = &mut pokemon.volatile;
        if locked {
            state.two_turn = None;
        }
        if data.has_tag(MoveTag::LockedMove) {
            state.locked_move = true;
        }
        if data.has_tag(MoveTag::Stall) {
            state.stalling = true;
            state.stall_turns += 1;
        } else {
            state.stall_turns = 0;
        }
        if to_id(&data.name) == "roost" {
            state.roost = true;
        }
        if truant.is_some() && pokemon.effective_ability() == truant {
            pokemon.volatile.truant = true;
        }

        let team = self.team_mut(id.player);
        if data.has_tag(MoveTag::SelfSwitch) {
            team.status.self_switch = Some(if data.has_tag(MoveTag::CopyVolatile) {
                SelfSwitch::CopyVolatile
            } else {
                SelfSwitch::Plain
            });
        }
        if to_id(&data.name) == "wish" {
            team.status.wish = 2;
        }
        Ok(())
    }

    fn handle_switch(
        &mut self,
        id: &PokemonId,
        details: &PokemonDetails,
        status: Option<&PokemonStatus>,
        drag: bool,
    ) -> Result<(), TrackerError> {
        let dex = Arc::clone(&self.dex);
        let team = self.team_mut(id.player);

        let pending = if drag { None } else { team.status.self_switch.take() };
        let outgoing = team.active().map(|p| p.volatile.clone());
        if let Some(active) = team.active_mut() {
            active.switch_out();
        }

        let slot = team
            .slot_for(&id.name)
            .ok_or_else(|| TrackerError::TeamFull(id.clone()))?;
        let pokemon = team
            .get_mut(slot)
            .ok_or_else(|| TrackerError::TeamFull(id.clone()))?;
        if !pokemon.revealed {
            pokemon.reveal(dex.as_ref(), &id.name, details)?;
        }
        if let Some(condition) = status {
            pokemon.set_condition(condition);
        }
        if pending == Some(SelfSwitch::CopyVolatile)
            && let Some(outgoing) = &outgoing
        {
            pokemon.volatile.copy_passable_from(outgoing);
        }

        team.bring_to_front(slot);
        Ok(())
    }

    fn handle_weather(
        &mut self,
        run: &[BattleEvent],
        index: usize,
        weather: &str,
        upkeep: bool,
        cause: Option<&Cause>,
    ) -> Result<(), TrackerError> {
        let Some(kind) = Weather::from_protocol(weather) else {
            if to_id(weather) != "none" {
                tracing::debug!(weather, "Unknown weather, clearing");
            }
            self.room.weather.clear();
            return Ok(());
        };

        if upkeep {
            self.room.weather.tick();
            return Ok(());
        }

        match cause {
            Some(Cause::Ability { name, of }) => {
                let source = of.clone();
                if let Some(holder) = &source {
                    let ability = AbilityId(self.dex.lookup_ability(name)?.uid);
                    self.pokemon_mut(holder)?.reveal_ability(ability);
                } else {
                    tracing::warn!(weather = %kind, ability = %name, "Weather ability without a holder");
                }
                self.room.weather.start(kind, source, true);
            }
            _ => {
                let source = previous_move_user(run, index);
                if source.is_none() {
                    tracing::warn!(weather = %kind, "Could not attribute weather to a source");
                }
                self.room.weather.start(kind, source, false);
            }
        }
        Ok(())
    }
}

/// User of the move event immediately preceding `index`, if that event is a move
fn previous_move_user(run: &[BattleEvent], index: usize) -> Option<PokemonId> {
    match index.checked_sub(1).and_then(|i| run.get(i)) {
        Some(BattleEvent::Move { id, .. }) => Some(id.clone()),
        _ => None,
    }
}
