use fleetdoc_model::{CommandId, TargetInstance};
use tracing::{debug, instrument};

use crate::{client::DocumentServiceClient, error::ServiceError};

/// Sends one document execution request to one instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn comment(document: &str, target: &TargetInstance) -> String {
        format!("Executing {document} on {}", target.id)
    }

    #[instrument(level = "debug", skip(self, client), fields(instance = %target.id))]
    pub async fn dispatch(
        &self,
        client: &dyn DocumentServiceClient,
        target: &TargetInstance,
        document: &str,
    ) -> Result<CommandId, ServiceError> {
        let comment = Self::comment(document, target);
        let command_id = client.send_command(&target.id, document, &comment).await?;
        debug!(%command_id, "command accepted");
        Ok(command_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockService;

    #[tokio::test]
    async fn returns_remote_invocation_id() {
        let svc = MockService::new();
        let client = svc.client_for("dev");

        let id = CommandDispatcher::new()
            .dispatch(&client, &TargetInstance::new("i-1"), "Patch-Baseline")
            .await
            .unwrap();

        assert_eq!(id, "cmd-0");
        let sends = svc.calls_of("send");
        assert_eq!(sends.len(), 1);
        assert_eq!(
            sends[0].arg,
            "i-1:Patch-Baseline:Executing Patch-Baseline on i-1"
        );
    }

    #[tokio::test]
    async fn remote_error_is_returned_not_raised() {
        let svc = MockService::new().with_failing_instance("i-bad");
        let client = svc.client_for("dev");

        let err = CommandDispatcher::new()
            .dispatch(&client, &TargetInstance::new("i-bad"), "Patch-Baseline")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::RemoteOperationFailed { .. }));
    }
}
