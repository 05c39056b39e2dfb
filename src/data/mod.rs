pub mod loader;
pub mod roster_file;
pub mod rules;
pub mod validate;

pub use loader::{
    build_roster, load_pairings, load_roster_dir, read_roster, read_roster_entries, roster_files,
    LoadError,
};
pub use roster_file::{CharacterSpec, ItemSpec, RosterEntry, StatBlock};
pub use rules::{load_rules, load_rules_or_default, parse_rules, RulesError};
pub use validate::{
    validate_roster_entries, validate_roster_file, ValidationDiagnostic, ValidationReport,
    ValidationSeverity,
};
