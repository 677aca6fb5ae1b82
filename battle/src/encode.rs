//! Fixed-length numeric encoding of the belief state
//!
//! Every entity writes a block whose length depends only on [`DexCounts`], so the
//! agent sees the same shape whether a fact is resolved or not. Unresolved
//! possibility classes encode as uniform probabilities over their candidates.

use psbot_protocol::Status;

use crate::dex::DexCounts;
use crate::tracking::BattleState;
use crate::types::{
    Move, Pokemon, RoomStatus, SelfSwitch, StatStages, Team, TeamStatus, VolatileStatus, Weather,
};

/// An entity with a fixed-shape encoding
pub trait Encode {
    /// Number of values `encode_into` appends
    fn encoded_len(counts: &DexCounts) -> usize;

    fn encode_into(&self, counts: &DexCounts, out: &mut Vec<f64>);
}

/// Length of [`encode`]'s output for a dex of this shape
pub fn encoded_length(counts: &DexCounts) -> usize {
    BattleState::encoded_len(counts)
}

/// Encode the whole battle, own side first
pub fn encode(state: &BattleState) -> Vec<f64> {
    let counts = state.counts();
    let mut out = Vec::with_capacity(encoded_length(&counts));
    state.encode_into(&counts, &mut out);
    out
}

fn flag(out: &mut Vec<f64>, value: bool) {
    out.push(if value { 1.0 } else { 0.0 });
}

/// `len` values, with a 1 at `hot` when it is in range
fn one_hot(out: &mut Vec<f64>, len: usize, hot: Option<usize>) {
    let start = out.len();
    out.resize(start + len, 0.0);
    if let Some(index) = hot.filter(|&i| i < len) {
        out[start + index] = 1.0;
    }
}

fn zeros(out: &mut Vec<f64>, len: usize) {
    out.resize(out.len() + len, 0.0);
}

const STAT_STAGES: usize = 7;
const MOVE_SLOTS: usize = 4;
const GENDERS: usize = 2;

impl Encode for StatStages {
    fn encoded_len(_: &DexCounts) -> usize {
        STAT_STAGES
    }

    fn encode_into(&self, _: &DexCounts, out: &mut Vec<f64>) {
        out.extend(self.as_array().iter().map(|&stage| f64::from(stage)));
    }
}

impl Encode for VolatileStatus {
    fn encoded_len(counts: &DexCounts) -> usize {
        // disabled + disable turns, then the scalar fields and the charging one-hot
        STAT_STAGES + 2 * MOVE_SLOTS + 17 + counts.moves
    }

    fn encode_into(&self, counts: &DexCounts, out: &mut Vec<f64>) {
        self.boosts.encode_into(counts, out);
        for disabled in self.disabled {
            flag(out, disabled);
        }
        out.extend(self.disable_turns.iter().map(|&turns| f64::from(turns)));

        flag(out, self.confused);
        out.push(f64::from(self.confusion_turns));
        flag(out, self.locked_move);
        flag(out, self.must_recharge);
        flag(out, self.stalling);
        out.push(f64::from(self.stall_turns));
        flag(out, self.ingrain);
        flag(out, self.magnet_rise);
        flag(out, self.embargo);
        flag(out, self.roost);
        flag(out, self.two_turn.is_some());
        one_hot(out, counts.moves, self.two_turn.map(|m| m.0));
        flag(out, self.ability_suppressed);
        flag(out, self.truant);
        flag(out, self.substitute);
        flag(out, self.leech_seed);
        flag(out, self.trapped);
        out.push(self.last_used_move.map_or(0.0, |slot| slot as f64 + 1.0));
    }
}

impl Encode for Move {
    fn encoded_len(counts: &DexCounts) -> usize {
        counts.moves + 2
    }

    fn encode_into(&self, counts: &DexCounts, out: &mut Vec<f64>) {
        one_hot(out, counts.moves, Some(self.id.0));
        out.push(f64::from(self.pp));
        out.push(f64::from(self.max_pp));
    }
}

impl Encode for Pokemon {
    fn encoded_len(counts: &DexCounts) -> usize {
        counts.species
            + counts.items
            + 2 * counts.abilities
            + 1
            + GENDERS
            + 2
            + Status::ALL.len()
            + MOVE_SLOTS * Move::encoded_len(counts)
            + VolatileStatus::encoded_len(counts)
    }

    fn encode_into(&self, counts: &DexCounts, out: &mut Vec<f64>) {
        self.species.encode_into(out);
        self.item.encode_into(out);
        self.base_ability.encode_into(out);
        one_hot(out, counts.abilities, self.override_ability.map(|a| a.0));

        out.push(f64::from(self.level));
        flag(out, self.gender == Some('M'));
        flag(out, self.gender == Some('F'));
        out.push(f64::from(self.hp.current()));
        out.push(f64::from(self.hp.max()));
        let status = self
            .status
            .and_then(|s| Status::ALL.iter().position(|&candidate| candidate == s));
        one_hot(out, Status::ALL.len(), status);

        for slot in 0..MOVE_SLOTS {
            match self.moves.get(slot) {
                Some(slot_move) => slot_move.encode_into(counts, out),
                None => zeros(out, Move::encoded_len(counts)),
            }
        }
        self.volatile.encode_into(counts, out);
    }
}

impl Encode for TeamStatus {
    fn encoded_len(_: &DexCounts) -> usize {
        8
    }

    fn encode_into(&self, _: &DexCounts, out: &mut Vec<f64>) {
        flag(out, self.self_switch == Some(SelfSwitch::Plain));
        flag(out, self.self_switch == Some(SelfSwitch::CopyVolatile));
        out.push(f64::from(self.spikes));
        flag(out, self.stealth_rock);
        out.push(f64::from(self.toxic_spikes));
        out.push(f64::from(self.wish));
        flag(out, self.reflect);
        flag(out, self.light_screen);
    }
}

impl Encode for Team {
    fn encoded_len(counts: &DexCounts) -> usize {
        TeamStatus::encoded_len(counts) + Team::MAX_SIZE * Pokemon::encoded_len(counts)
    }

    fn encode_into(&self, counts: &DexCounts, out: &mut Vec<f64>) {
        self.status.encode_into(counts, out);
        for slot in 0..Team::MAX_SIZE {
            match self.get(slot) {
                Some(pokemon) => pokemon.encode_into(counts, out),
                None => zeros(out, Pokemon::encoded_len(counts)),
            }
        }
    }
}

impl Encode for RoomStatus {
    fn encoded_len(_: &DexCounts) -> usize {
        2 + Weather::ALL.len() + 2
    }

    fn encode_into(&self, _: &DexCounts, out: &mut Vec<f64>) {
        flag(out, self.gravity);
        flag(out, self.trick_room);
        one_hot(out, Weather::ALL.len(), self.weather.kind.map(Weather::index));
        out.push(f64::from(self.weather.turns));
        flag(out, self.weather.from_ability);
    }
}

impl Encode for BattleState {
    fn encoded_len(counts: &DexCounts) -> usize {
        RoomStatus::encoded_len(counts) + 2 * Team::encoded_len(counts)
    }

    fn encode_into(&self, counts: &DexCounts, out: &mut Vec<f64>) {
        self.room.encode_into(counts, out);
        self.me().encode_into(counts, out);
        self.opponent().encode_into(counts, out);
    }
}
