//! Seven-field stat vector shared by characters and items.
//!
//! Values are immutable: every change goes through [StatVector::combine] (or
//! [StatVector::combine_with]) which adds field by field and applies the clamps
//! below. The same rule merges item contributions and applies battle damage.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MAX_SPECIAL_TRIGGER_CHANCE: f64 = 100.0;

/// Whether `magic_resistance` may go negative after a combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagicResistancePolicy {
    #[default]
    Unclamped,
    FloorAtZero,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatVector {
    pub current_hp: f64,
    pub total_hp: f64,
    pub armor: f64,
    pub magic_resistance: f64,
    pub physical_power: f64,
    pub magic_power: f64,
    pub special_trigger_chance: f64,
}

impl StatVector {
    /// Stats for a freshly loaded entry: `hp` fills both current and total HP.
    pub fn with_hp(hp: f64) -> Self {
        Self {
            current_hp: hp,
            total_hp: hp,
            ..Self::default()
        }
    }

    /// Delta that only touches `current_hp`.
    pub fn hp_change(amount: f64) -> Self {
        Self {
            current_hp: amount,
            ..Self::default()
        }
    }

    pub fn combine(&self, delta: &StatVector) -> StatVector {
        self.combine_with(delta, MagicResistancePolicy::default())
    }

    pub fn combine_with(&self, delta: &StatVector, policy: MagicResistancePolicy) -> StatVector {
        let total_hp = (self.total_hp + delta.total_hp).max(0.0);
        let current_hp = (self.current_hp + delta.current_hp).clamp(0.0, total_hp);
        let magic_resistance = self.magic_resistance + delta.magic_resistance;
        let magic_resistance = match policy {
            MagicResistancePolicy::Unclamped => magic_resistance,
            MagicResistancePolicy::FloorAtZero => magic_resistance.max(0.0),
        };

        StatVector {
            current_hp,
            total_hp,
            armor: (self.armor + delta.armor).max(0.0),
            magic_resistance,
            physical_power: self.physical_power + delta.physical_power,
            magic_power: self.magic_power + delta.magic_power,
            special_trigger_chance: (self.special_trigger_chance + delta.special_trigger_chance)
                .clamp(0.0, MAX_SPECIAL_TRIGGER_CHANCE),
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.current_hp <= 0.0
    }

    /// Labelled fields in display order.
    pub fn labelled(&self) -> [(&'static str, f64); 7] {
        [
            ("Current HP", self.current_hp),
            ("Total HP", self.total_hp),
            ("Armor", self.armor),
            ("Magic Resistance", self.magic_resistance),
            ("Physical Power", self.physical_power),
            ("Magic Power", self.magic_power),
            ("Special Trigger Chance", self.special_trigger_chance),
        ]
    }
}

impl fmt::Display for StatVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (label, value)) in self.labelled().iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{label}: {value:.1}")?;
        }
        Ok(())
    }
}
