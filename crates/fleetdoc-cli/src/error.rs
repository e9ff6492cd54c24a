use std::path::PathBuf;

use fleetdoc_model::ModelError;
use thiserror::Error;

/// An input artifact is missing or malformed. Raised before any task is built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid document in {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}
