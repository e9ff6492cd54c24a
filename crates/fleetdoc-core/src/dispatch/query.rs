use fleetdoc_model::{CommandSummary, TargetInstance};
use tracing::{debug, instrument};

use crate::{client::DocumentServiceClient, error::ServiceError};

/// Default number of recent invocations listed per instance.
pub const DEFAULT_MAX_RESULTS: u32 = 5;

/// Largest page the service accepts for a command listing.
pub const MAX_RESULTS_LIMIT: u32 = 50;

/// Lists recent command invocations on one instance.
#[derive(Debug, Clone, Copy)]
pub struct CommandQuery {
    max_results: u32,
}

impl CommandQuery {
    pub fn new(max_results: u32) -> Self {
        Self { max_results }
    }

    #[instrument(level = "debug", skip(self, client), fields(instance = %target.id))]
    pub async fn recent(
        &self,
        client: &dyn DocumentServiceClient,
        target: &TargetInstance,
    ) -> Result<Vec<CommandSummary>, ServiceError> {
        let commands = client.list_commands(&target.id, self.max_results).await?;
        debug!(count = commands.len(), "commands listed");
        Ok(commands)
    }
}

impl Default for CommandQuery {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESULTS)
    }
}
