use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CombatError {
    #[error("{character} already holds {capacity} items; cannot equip {item}")]
    CapacityExceeded {
        character: &'static str,
        item: &'static str,
        capacity: usize,
    },

    #[error("malformed attack from {attacker}: {reason}")]
    MalformedAttack {
        attacker: &'static str,
        reason: String,
    },
}
