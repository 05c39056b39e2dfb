use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::stats::StatVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    EnchantedSword,
    ShinyStaff,
    Pole,
    MagicCauldron,
    SolidRock,
}

pub const ALL_ITEM_KINDS: [ItemKind; 5] = [
    ItemKind::EnchantedSword,
    ItemKind::ShinyStaff,
    ItemKind::Pole,
    ItemKind::MagicCauldron,
    ItemKind::SolidRock,
];

impl ItemKind {
    /// Roster-file key, e.g. `enchanted_sword`.
    pub const fn key(self) -> &'static str {
        match self {
            Self::EnchantedSword => "enchanted_sword",
            Self::ShinyStaff => "shiny_staff",
            Self::Pole => "pole",
            Self::MagicCauldron => "magic_cauldron",
            Self::SolidRock => "solid_rock",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL_ITEM_KINDS.into_iter().find(|kind| kind.key() == key)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::EnchantedSword => "Enchanted Sword",
            Self::ShinyStaff => "Shiny Staff",
            Self::Pole => "A Pole",
            Self::MagicCauldron => "A magic cauldron",
            Self::SolidRock => "A solid rock",
        }
    }

    pub const fn passive_description(self) -> &'static str {
        match self {
            Self::EnchantedSword => {
                "Unique Passive: Lucky strike. Adds 5%(+25% of base Special Trigger Chance) to Special Trigger chance."
            }
            Self::ShinyStaff => {
                "Passive: Blessings of Echo. Adds 1(+50% of base Magic Power) to Magic Power."
            }
            Self::MagicCauldron => "Unique Passive: Potion of life. Adds 10(+30% of base HP) to HP",
            Self::Pole | Self::SolidRock => "",
        }
    }

    /// Unique passives do not stack across copies held by one character.
    pub const fn has_unique_passive(self) -> bool {
        matches!(self, Self::EnchantedSword | Self::MagicCauldron)
    }

    fn passive_delta(self, character_base: &StatVector) -> StatVector {
        match self {
            Self::EnchantedSword => StatVector {
                special_trigger_chance: 5.0 + 0.25 * character_base.special_trigger_chance,
                ..StatVector::default()
            },
            Self::ShinyStaff => StatVector {
                magic_power: 1.0 + 0.5 * character_base.magic_power,
                ..StatVector::default()
            },
            Self::MagicCauldron => {
                let hp = 10.0 + 0.3 * character_base.total_hp;
                StatVector {
                    current_hp: hp,
                    total_hp: hp,
                    ..StatVector::default()
                }
            }
            Self::Pole | Self::SolidRock => StatVector::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub base_stats: StatVector,
    pub passive_active: bool,
}

impl Item {
    pub fn new(kind: ItemKind, base_stats: StatVector) -> Self {
        Self {
            kind,
            base_stats,
            passive_active: true,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn passive_description(&self) -> &'static str {
        self.kind.passive_description()
    }

    pub fn has_unique_passive(&self) -> bool {
        self.kind.has_unique_passive()
    }

    /// Stat delta granted to a character with the given *base* stats.
    ///
    /// Item base stats always apply. Unique passives only apply while
    /// `passive_active`; stacking passives always apply.
    pub fn contribution(&self, character_base: &StatVector) -> StatVector {
        if self.has_unique_passive() && !self.passive_active {
            return self.base_stats;
        }
        self.base_stats
            .combine(&self.kind.passive_delta(character_base))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name())?;
        for (label, value) in self.base_stats.labelled() {
            if value > 0.0 {
                write!(f, "\n{label}: {value:.1}")?;
            }
        }
        if self.passive_active && !self.passive_description().is_empty() {
            write!(f, "\n{}", self.passive_description())?;
        }
        Ok(())
    }
}
