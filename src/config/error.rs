//! Configuration errors

use std::path::PathBuf;

/// Errors raised while resolving configuration at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("contact form link is configured but {0} is missing")]
    MissingFormField(&'static str),
    #[error("invalid contact form timeout {0:?}: expected a positive number of seconds")]
    InvalidTimeout(String),
    #[error("unsupported content store version {found} (expected {expected})")]
    UnsupportedStoreVersion { found: u32, expected: u32 },
    #[error("duplicate {kind} identifier {id:?} in content store")]
    DuplicateId { kind: &'static str, id: String },
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
