use std::fmt;

use serde::{Deserialize, Serialize};

/// Remote operation a task performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationKind {
    /// Create or update a document definition in a profile (one task per profile).
    SyncDocument,
    /// Execute a document on one instance (one task per profile × instance).
    RunCommand,
    /// List recent command invocations on one instance (one task per profile × instance).
    QueryCommandResults,
}

impl OperationKind {
    /// Returns a short symbolic identifier for the operation.
    ///
    /// Used for logging and report lines:
    /// - `"sync-document"`
    /// - `"run-command"`
    /// - `"query-command-results"`
    pub fn kind(&self) -> &'static str {
        match self {
            OperationKind::SyncDocument => "sync-document",
            OperationKind::RunCommand => "run-command",
            OperationKind::QueryCommandResults => "query-command-results",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}
