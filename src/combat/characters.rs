//! Playable characters: base stats, up to [MAX_ITEMS] items, and the attacks
//! each kind can make.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::error::CombatError;
use crate::combat::items::Item;
use crate::combat::stats::{MagicResistancePolicy, StatVector};

pub const MAX_ITEMS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterKind {
    Ninja,
    Mage,
    Warrior,
}

pub const ALL_CHARACTER_KINDS: [CharacterKind; 3] =
    [CharacterKind::Ninja, CharacterKind::Mage, CharacterKind::Warrior];

/// Flat base and physical-power ratio of a kind's basic attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicAttackProfile {
    pub name: &'static str,
    pub base: f64,
    pub physical_ratio: f64,
}

impl CharacterKind {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Ninja => "ninja",
            Self::Mage => "mage",
            Self::Warrior => "warrior",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL_CHARACTER_KINDS.into_iter().find(|kind| kind.key() == key)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ninja => "Ninja",
            Self::Mage => "Mage",
            Self::Warrior => "Warrior",
        }
    }

    pub const fn special_name(self) -> &'static str {
        match self {
            Self::Ninja => "A poisoned dagger shot",
            Self::Mage => "A lullaby to deep sleep",
            Self::Warrior => "A call to the shield hero",
        }
    }

    pub const fn basic_attack_profile(self) -> BasicAttackProfile {
        match self {
            Self::Ninja => BasicAttackProfile {
                name: "A quick shuriken toss",
                base: 8.0,
                physical_ratio: 0.3,
            },
            Self::Mage => BasicAttackProfile {
                name: "A staff bonk",
                base: 4.0,
                physical_ratio: 0.2,
            },
            Self::Warrior => BasicAttackProfile {
                name: "A sword slash",
                base: 10.0,
                physical_ratio: 0.4,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamagePacket {
    pub physical: f64,
    pub magic: f64,
}

impl DamagePacket {
    pub fn physical(amount: f64) -> Self {
        Self {
            physical: amount,
            magic: 0.0,
        }
    }

    pub fn magic(amount: f64) -> Self {
        Self {
            physical: 0.0,
            magic: amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.physical == 0.0 && self.magic == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Basic,
    Special,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    pub kind: AttackKind,
    pub damage: DamagePacket,
    pub self_delta: StatVector,
    pub description: String,
}

impl AttackOutcome {
    /// Rejects outcomes the resolver cannot act on.
    pub fn validate(&self, attacker: &'static str) -> Result<(), CombatError> {
        let malformed = |reason: &str| CombatError::MalformedAttack {
            attacker,
            reason: reason.to_string(),
        };
        if self.description.trim().is_empty() {
            return Err(malformed("missing description"));
        }
        let DamagePacket { physical, magic } = self.damage;
        if !physical.is_finite() || !magic.is_finite() {
            return Err(malformed("non-finite damage"));
        }
        if physical < 0.0 || magic < 0.0 {
            return Err(malformed("negative damage"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    kind: CharacterKind,
    base_stats: StatVector,
    items: Vec<Item>,
    effective_stats: StatVector,
    policy: MagicResistancePolicy,
}

impl Character {
    pub fn new(kind: CharacterKind, base_stats: StatVector) -> Self {
        Self {
            kind,
            base_stats,
            items: Vec::with_capacity(MAX_ITEMS),
            effective_stats: base_stats,
            policy: MagicResistancePolicy::default(),
        }
    }

    /// Sets the magic-resistance policy used by every later recomputation.
    pub fn with_policy(mut self, policy: MagicResistancePolicy) -> Self {
        self.policy = policy;
        self.recompute();
        self
    }

    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn special_attack_name(&self) -> String {
        format!("{}: {}", self.name(), self.kind.special_name())
    }

    pub fn base_stats(&self) -> &StatVector {
        &self.base_stats
    }

    pub fn effective_stats(&self) -> &StatVector {
        &self.effective_stats
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_defeated(&self) -> bool {
        self.effective_stats.is_defeated()
    }

    pub fn add_item(&mut self, mut item: Item) -> Result<(), CombatError> {
        if self.items.len() >= MAX_ITEMS {
            return Err(CombatError::CapacityExceeded {
                character: self.name(),
                item: item.name(),
                capacity: MAX_ITEMS,
            });
        }

        if item.has_unique_passive() && self.items.iter().any(|held| held.kind == item.kind) {
            item.passive_active = false;
        }

        self.items.push(item);
        self.recompute();
        Ok(())
    }

    /// Applies a combat delta (damage or heal) to the effective stats.
    pub fn apply_delta(&mut self, delta: &StatVector) {
        self.effective_stats = self.effective_stats.combine_with(delta, self.policy);
    }

    fn recompute(&mut self) {
        let base = self.base_stats;
        let policy = self.policy;
        self.effective_stats = self.items.iter().fold(base, |stats, item| {
            stats.combine_with(&item.contribution(&base), policy)
        });
    }

    pub fn basic_attack(&self) -> AttackOutcome {
        let profile = self.kind.basic_attack_profile();
        let physical = (profile.base
            + profile.physical_ratio * self.effective_stats.physical_power)
            .max(0.0);
        AttackOutcome {
            kind: AttackKind::Basic,
            damage: DamagePacket::physical(physical),
            self_delta: StatVector::default(),
            description: format!(
                "{}: {} ({physical:.1} physical damage)",
                self.name(),
                profile.name
            ),
        }
    }

    pub fn special_attack(&self) -> AttackOutcome {
        let stats = &self.effective_stats;
        match self.kind {
            CharacterKind::Ninja => {
                let physical =
                    (40.0 + 0.5 * stats.physical_power + 0.5 * stats.magic_power).max(0.0);
                AttackOutcome {
                    kind: AttackKind::Special,
                    damage: DamagePacket::physical(physical),
                    self_delta: StatVector::default(),
                    description: format!(
                        "{} ({physical:.1} physical damage)",
                        self.special_attack_name()
                    ),
                }
            }
            CharacterKind::Mage => {
                let magic = (1.0 + 1.25 * stats.magic_power).max(0.0);
                AttackOutcome {
                    kind: AttackKind::Special,
                    damage: DamagePacket::magic(magic),
                    self_delta: StatVector::default(),
                    description: format!(
                        "{} ({magic:.1} magic damage)",
                        self.special_attack_name()
                    ),
                }
            }
            CharacterKind::Warrior => {
                let heal = 50.0 + 0.75 * stats.physical_power + 3.0 * stats.magic_power;
                AttackOutcome {
                    kind: AttackKind::Special,
                    damage: DamagePacket::default(),
                    self_delta: StatVector {
                        current_hp: heal,
                        total_hp: heal,
                        ..StatVector::default()
                    },
                    description: format!("{} (heals {heal:.1} HP)", self.special_attack_name()),
                }
            }
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.effective_stats.to_string().replace('\n', "\n\t");
        write!(f, "{}: \n\t{stats}", self.name())?;
        if self.items.is_empty() {
            return Ok(());
        }
        write!(f, "\n\t  with items ")?;
        for (index, item) in self.items.iter().enumerate() {
            let item_text = item.to_string().replace('\n', "\n\t\t\t");
            write!(f, "\n\t\t{}: {item_text}", index + 1)?;
        }
        Ok(())
    }
}
