//! Combat rules file: JSON overrides for [CombatRules]. Missing keys keep their defaults.
//!
//! ```json
//! { "magic_resistance": "floor_at_zero", "max_turns_per_round": 5000 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::combat::CombatRules;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rules file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn parse_rules(raw: &str) -> Result<CombatRules, serde_json::Error> {
    serde_json::from_str(raw)
}

pub fn load_rules(path: impl AsRef<Path>) -> Result<CombatRules, RulesError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| RulesError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rules = parse_rules(&raw).map_err(|source| RulesError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?rules, "rules loaded");
    Ok(rules)
}

/// Rules from `path` when given, otherwise the defaults.
pub fn load_rules_or_default(path: Option<&Path>) -> Result<CombatRules, RulesError> {
    match path {
        Some(path) => load_rules(path),
        None => Ok(CombatRules::default()),
    }
}
