use fleetdoc_model::{DocumentDefinition, LATEST_VERSION, TaskSuccess};
use tracing::{debug, instrument};

use crate::{client::DocumentServiceClient, error::ServiceError};

/// Outcome of the existence check that precedes every publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// The existence check reported the document missing.
    Absent,
    /// The existence check succeeded.
    Present,
}

/// Idempotent publish of a document into one profile.
///
/// Exactly one existence check, then at most one mutating call:
/// - `Present` → update of the latest version (`updated`);
/// - `Absent` → create of a command document (`created`);
/// - any other existence-check error is a failure, never treated as absence.
///
/// Resolutions of the same (profile, name) pair must not run concurrently; the
/// orchestrator guarantees this by issuing one publish task per profile entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentResolver;

impl DocumentResolver {
    pub fn new() -> Self {
        Self
    }

    /// Existence check only; every error other than not-found is returned as is.
    pub async fn probe(
        &self,
        client: &dyn DocumentServiceClient,
        name: &str,
    ) -> Result<DocumentState, ServiceError> {
        match client.describe_document(name).await {
            Ok(()) => Ok(DocumentState::Present),
            Err(ServiceError::NotFound(_)) => Ok(DocumentState::Absent),
            Err(e) => Err(e),
        }
    }

    /// Existence check followed by exactly one create or update.
    #[instrument(level = "debug", skip(self, client, document), fields(document = %document.name))]
    pub async fn resolve(
        &self,
        client: &dyn DocumentServiceClient,
        document: &DocumentDefinition,
    ) -> Result<TaskSuccess, ServiceError> {
        let state = self.probe(client, &document.name).await?;
        debug!(?state, "existence resolved");

        match state {
            DocumentState::Present => {
                client.update_document(document, LATEST_VERSION).await?;
                Ok(TaskSuccess::Updated {
                    document: document.name.clone(),
                })
            }
            DocumentState::Absent => {
                client.create_document(document).await?;
                Ok(TaskSuccess::Created {
                    document: document.name.clone(),
                })
            }
        }
    }
}
