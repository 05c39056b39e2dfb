//! On-disk roster schema shared by JSON and YAML roster files.

use serde::{Deserialize, Serialize};

use crate::combat::StatVector;

/// Numeric stats as written in roster files. `hp` fills current and total HP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub hp: f64,
    pub armor: f64,
    pub magic_resistance: f64,
    pub physical_power: f64,
    pub magic_power: f64,
    pub special_trigger_chance: f64,
}

impl StatBlock {
    pub fn to_stat_vector(self) -> StatVector {
        StatVector {
            current_hp: self.hp,
            total_hp: self.hp,
            armor: self.armor,
            magic_resistance: self.magic_resistance,
            physical_power: self.physical_power,
            magic_power: self.magic_power,
            special_trigger_chance: self.special_trigger_chance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSpec {
    pub name: String,
    #[serde(default)]
    pub stats: StatBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    #[serde(default)]
    pub stats: StatBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub character: CharacterSpec,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}
