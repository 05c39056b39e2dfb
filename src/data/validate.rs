use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::combat::{CharacterKind, ItemKind, MAX_ITEMS, MAX_SPECIAL_TRIGGER_CHANCE};
use crate::data::loader::{read_roster_entries, LoadError};
use crate::data::roster_file::{RosterEntry, StatBlock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }
}

pub fn validate_roster_file(path: impl AsRef<Path>) -> Result<ValidationReport, LoadError> {
    let entries = read_roster_entries(path)?;
    Ok(validate_roster_entries(&entries))
}

pub fn validate_roster_entries(entries: &[RosterEntry]) -> ValidationReport {
    let mut report = ValidationReport::default();
    if entries.is_empty() {
        report.push(
            ValidationSeverity::Warning,
            "roster",
            "roster has no characters; its side cannot win a round",
        );
    }

    for (index, entry) in entries.iter().enumerate() {
        let context = format!("entry[{index}]");
        let character_name = &entry.character.name;
        if CharacterKind::from_key(character_name).is_none() {
            report.push(
                ValidationSeverity::Error,
                context.as_str(),
                format!("unknown character '{character_name}'"),
            );
        }
        check_stats(&mut report, &context, &entry.character.stats);
        if entry.character.stats.hp <= 0.0 {
            report.push(
                ValidationSeverity::Warning,
                context.as_str(),
                "character starts with no HP",
            );
        }

        if entry.items.len() > MAX_ITEMS {
            report.push(
                ValidationSeverity::Error,
                context.as_str(),
                format!(
                    "{} items listed; a character holds at most {MAX_ITEMS}",
                    entry.items.len()
                ),
            );
        }

        let mut unique_seen = HashSet::new();
        for (item_index, item) in entry.items.iter().enumerate() {
            let item_context = format!("{context}.items[{item_index}]");
            match ItemKind::from_key(&item.name) {
                None => report.push(
                    ValidationSeverity::Error,
                    item_context.as_str(),
                    format!("unknown item '{}'", item.name),
                ),
                Some(kind) if kind.has_unique_passive() && !unique_seen.insert(kind) => {
                    report.push(
                        ValidationSeverity::Info,
                        item_context.as_str(),
                        format!("duplicate {}: unique passive inactive on this copy", kind.name()),
                    );
                }
                Some(_) => {}
            }
            check_stats(&mut report, &item_context, &item.stats);
        }
    }

    report
}

fn check_stats(report: &mut ValidationReport, context: &str, stats: &StatBlock) {
    let fields = [
        ("hp", stats.hp),
        ("armor", stats.armor),
        ("magic_resistance", stats.magic_resistance),
        ("physical_power", stats.physical_power),
        ("magic_power", stats.magic_power),
        ("special_trigger_chance", stats.special_trigger_chance),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            report.push(ValidationSeverity::Error, context, format!("{name} is not finite"));
        } else if value < 0.0 {
            report.push(ValidationSeverity::Warning, context, format!("{name} is negative ({value})"));
        }
    }
    if stats.special_trigger_chance > MAX_SPECIAL_TRIGGER_CHANCE {
        report.push(
            ValidationSeverity::Warning,
            context,
            format!(
                "special_trigger_chance {} exceeds {MAX_SPECIAL_TRIGGER_CHANCE}",
                stats.special_trigger_chance
            ),
        );
    }
    if stats.armor >= 100.0 {
        report.push(
            ValidationSeverity::Warning,
            context,
            "armor of 100 or more negates all physical damage",
        );
    }
}
