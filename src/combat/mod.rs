pub mod characters;
pub mod engine;
pub mod error;
pub mod export_csv;
pub mod items;
pub mod matchup;
pub mod rng;
pub mod round;
pub mod stats;

pub use characters::{
    AttackKind, AttackOutcome, BasicAttackProfile, Character, CharacterKind, DamagePacket,
    ALL_CHARACTER_KINDS, MAX_ITEMS,
};
pub use engine::{
    calculate_damage_taken, calculate_miss_chance, mitigated_damage, play_turn, CombatRules,
    Side, TurnRecord, DEFAULT_STALL_TURN_LIMIT,
};
pub use error::CombatError;
pub use export_csv::{export_events_csv, write_events_csv};
pub use items::{Item, ItemKind, ALL_ITEM_KINDS};
pub use matchup::{play_match, MatchReport, RoundPairing};
pub use rng::{DecisionSource, Rng, ScriptedDecisions, SeededDecisions, DEFAULT_SEED};
pub use round::{play_round, RoundReport, Roster};
pub use stats::{MagicResistancePolicy, StatVector, MAX_SPECIAL_TRIGGER_CHANCE};
