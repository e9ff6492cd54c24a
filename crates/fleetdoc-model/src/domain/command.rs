use serde::{Deserialize, Serialize};

use crate::CommandId;

/// Recent command invocation as reported by the service for one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandSummary {
    pub command_id: CommandId,
    /// Service-reported status (`Success`, `InProgress`, `Failed`, ...).
    pub status: String,
}

impl CommandSummary {
    pub fn new(command_id: impl Into<CommandId>, status: impl Into<String>) -> Self {
        Self {
            command_id: command_id.into(),
            status: status.into(),
        }
    }
}
