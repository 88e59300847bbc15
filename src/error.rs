use std::path::PathBuf;
use thiserror::Error;

use crate::types::FlagKind;

#[derive(Debug, Error)]
pub enum FlagfigError {
    #[error("Unable to parse TOML: {source}")]
    Decode { source: toml::de::Error },

    #[error("Unable to map flag '{flag}' of kind {kind:?} from config value {value}")]
    UnsupportedKind {
        flag: String,
        kind: FlagKind,
        value: String,
    },

    #[error("Failed to set flag '{flag}' with value {value}: {reason}")]
    SetFailure {
        flag: String,
        value: String,
        reason: String,
    },

    #[error("Unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No configuration files specified; add candidates to the locator first")]
    NoCandidates,

    #[error("Executable '{name}' not found in PATH")]
    ExecutableNotFound { name: String },
}
