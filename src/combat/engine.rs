//! Single-turn attack resolution: attack choice, miss roll and mitigation.
//!
//! Draw order per turn is fixed: the special-trigger draw always happens, and
//! the miss draw follows only when the chosen attack deals damage.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::combat::characters::{AttackKind, Character, DamagePacket};
use crate::combat::error::CombatError;
use crate::combat::rng::DecisionSource;
use crate::combat::stats::{MagicResistancePolicy, StatVector};

pub const DEFAULT_STALL_TURN_LIMIT: u32 = 1_000;

/// Match-wide tunables. Every field has a default so partial rule files load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatRules {
    pub magic_resistance: MagicResistancePolicy,
    /// Hard cap on turns per round. Unlimited unless set.
    pub max_turns_per_round: Option<u32>,
    /// Consecutive turns without damage landing before a round is abandoned.
    pub stall_turn_limit: u32,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            magic_resistance: MagicResistancePolicy::default(),
            max_turns_per_round: None,
            stall_turn_limit: DEFAULT_STALL_TURN_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Yours,
    Opponent,
}

impl Side {
    pub const fn other(self) -> Self {
        match self {
            Self::Yours => Self::Opponent,
            Self::Opponent => Self::Yours,
        }
    }
}

/// What happened in one turn. `description` is the line written to the match log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub attacker_side: Side,
    pub attacker: String,
    pub defender: String,
    pub attack: AttackKind,
    /// `None` when no miss roll happened (zero-damage attack).
    pub missed: Option<bool>,
    pub damage_dealt: f64,
    pub self_heal: f64,
    pub attacker_hp: f64,
    pub defender_hp: f64,
    pub description: String,
}

/// Percentage chance (0-100 for sane stats) that the defender avoids the hit.
pub fn calculate_miss_chance(damage: &DamagePacket, defender: &StatVector) -> f64 {
    if damage.physical > 0.0 {
        defender.armor / 10.0
    } else if damage.magic > 0.0 {
        defender.magic_resistance / 10.0
    } else {
        0.0
    }
}

/// Damage after armor and magic resistance, as a positive amount.
pub fn mitigated_damage(damage: &DamagePacket, defender: &StatVector) -> f64 {
    let mut dealt = 0.0;
    if damage.physical > 0.0 {
        dealt += damage.physical * (1.0 - defender.armor / 100.0);
    }
    if damage.magic > 0.0 {
        dealt += damage.magic * (1.0 - defender.magic_resistance / 100.0);
    }
    dealt
}

/// Stat delta a defender receives from `damage`: only `current_hp` moves.
pub fn calculate_damage_taken(damage: &DamagePacket, defender: &StatVector) -> StatVector {
    StatVector::hp_change(-mitigated_damage(damage, defender))
}

/// Resolve one attack. `your_turn` picks `yours` as attacker, else `opponents`.
///
/// Neither character is replaced here; a defender left at 0 HP is handled by
/// the round on its next step.
pub fn play_turn(
    yours: &mut Character,
    opponents: &mut Character,
    your_turn: bool,
    decisions: &mut dyn DecisionSource,
) -> Result<TurnRecord, CombatError> {
    let (attacker_side, attacker, defender) = if your_turn {
        (Side::Yours, yours, opponents)
    } else {
        (Side::Opponent, opponents, yours)
    };

    let special_chance = attacker.effective_stats().special_trigger_chance;
    let outcome = if decisions.draw(special_chance) {
        attacker.special_attack()
    } else {
        attacker.basic_attack()
    };
    outcome.validate(attacker.name())?;

    let mut missed = None;
    let mut damage_dealt = 0.0;
    let mut self_heal = 0.0;

    if outcome.damage.is_zero() {
        let before = attacker.effective_stats().current_hp;
        attacker.apply_delta(&outcome.self_delta);
        self_heal = attacker.effective_stats().current_hp - before;
    } else {
        let miss_chance = calculate_miss_chance(&outcome.damage, defender.effective_stats());
        let is_missed = decisions.draw(miss_chance);
        missed = Some(is_missed);
        if !is_missed {
            let delta = calculate_damage_taken(&outcome.damage, defender.effective_stats());
            damage_dealt = -delta.current_hp;
            defender.apply_delta(&delta);
        }
    }

    trace!(
        attacker = attacker.name(),
        defender = defender.name(),
        attack = ?outcome.kind,
        ?missed,
        damage_dealt,
        defender_hp = defender.effective_stats().current_hp,
        "turn resolved"
    );

    Ok(TurnRecord {
        attacker_side,
        attacker: attacker.name().to_string(),
        defender: defender.name().to_string(),
        attack: outcome.kind,
        missed,
        damage_dealt,
        self_heal,
        attacker_hp: attacker.effective_stats().current_hp,
        defender_hp: defender.effective_stats().current_hp,
        description: outcome.description,
    })
}
