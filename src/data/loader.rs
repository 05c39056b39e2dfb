//! Build rosters from roster files and pair roster directories for a match.
//!
//! `.json` files are parsed as JSON and `.yaml`/`.yml` files as YAML.
//! Directory listings are sorted by file name so a match is reproducible
//! across platforms.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::combat::{
    Character, CharacterKind, CombatError, CombatRules, Item, ItemKind, RoundPairing, Roster,
};
use crate::data::roster_file::RosterEntry;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster JSON '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse roster YAML '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported roster file '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),

    #[error("{roster}: entry {entry} names unknown character '{name}'")]
    UnknownCharacter {
        roster: String,
        entry: usize,
        name: String,
    },

    #[error("{roster}: entry {entry} names unknown item '{name}'")]
    UnknownItem {
        roster: String,
        entry: usize,
        name: String,
    },

    #[error("{roster}: entry {entry}: {source}")]
    Equip {
        roster: String,
        entry: usize,
        #[source]
        source: CombatError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RosterFormat {
    Json,
    Yaml,
}

fn roster_format(path: &Path) -> Option<RosterFormat> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "json" => Some(RosterFormat::Json),
        "yaml" | "yml" => Some(RosterFormat::Yaml),
        _ => None,
    }
}

fn roster_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse roster entries without building characters.
pub fn read_roster_entries(path: impl AsRef<Path>) -> Result<Vec<RosterEntry>, LoadError> {
    let path = path.as_ref();
    let format =
        roster_format(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    match format {
        RosterFormat::Json => serde_json::from_str(&raw).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
        RosterFormat::Yaml => serde_yaml::from_str(&raw).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Build characters in entry order. Any failure discards the whole roster.
pub fn build_roster(
    label: impl Into<String>,
    entries: &[RosterEntry],
    rules: &CombatRules,
) -> Result<Roster, LoadError> {
    let label = label.into();
    let mut characters = Vec::with_capacity(entries.len());

    for (entry_index, entry) in entries.iter().enumerate() {
        let kind = CharacterKind::from_key(&entry.character.name).ok_or_else(|| {
            LoadError::UnknownCharacter {
                roster: label.clone(),
                entry: entry_index,
                name: entry.character.name.clone(),
            }
        })?;
        let mut character = Character::new(kind, entry.character.stats.to_stat_vector())
            .with_policy(rules.magic_resistance);

        for item_spec in &entry.items {
            let item_kind =
                ItemKind::from_key(&item_spec.name).ok_or_else(|| LoadError::UnknownItem {
                    roster: label.clone(),
                    entry: entry_index,
                    name: item_spec.name.clone(),
                })?;
            character
                .add_item(Item::new(item_kind, item_spec.stats.to_stat_vector()))
                .map_err(|source| LoadError::Equip {
                    roster: label.clone(),
                    entry: entry_index,
                    source,
                })?;
        }
        characters.push(character);
    }

    debug!(roster = %label, characters = characters.len(), "roster built");
    Ok(Roster::new(label, characters))
}

pub fn read_roster(path: impl AsRef<Path>, rules: &CombatRules) -> Result<Roster, LoadError> {
    let path = path.as_ref();
    let entries = read_roster_entries(path)?;
    build_roster(roster_label(path), &entries, rules)
}

/// Roster files directly inside `dir`, sorted by file name.
pub fn roster_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, LoadError> {
    let dir = dir.as_ref();
    let read_error = |source| LoadError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && roster_format(&path).is_some() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

pub fn load_roster_dir(dir: impl AsRef<Path>, rules: &CombatRules) -> Result<Vec<Roster>, LoadError> {
    roster_files(dir)?
        .iter()
        .map(|path| read_roster(path, rules))
        .collect()
}

/// Pair the two directories' rosters by position. Unpaired files are skipped.
pub fn load_pairings(
    your_dir: impl AsRef<Path>,
    opponent_dir: impl AsRef<Path>,
    rules: &CombatRules,
) -> Result<Vec<RoundPairing>, LoadError> {
    let yours = load_roster_dir(your_dir.as_ref(), rules)?;
    let opponents = load_roster_dir(opponent_dir.as_ref(), rules)?;
    if yours.len() != opponents.len() {
        warn!(
            yours = yours.len(),
            opponents = opponents.len(),
            "roster directories differ in size; extra files are ignored"
        );
    }
    Ok(yours
        .into_iter()
        .zip(opponents)
        .map(|(yours, opponents)| RoundPairing::new(yours, opponents))
        .collect())
}
