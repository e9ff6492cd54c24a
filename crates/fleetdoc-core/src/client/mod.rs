//! Service seams of the engine.
//!
//! The engine never talks to a cloud SDK directly: it asks a [`ClientProvider`] for a
//! per-profile [`DocumentServiceClient`] and issues every remote call through it.

use std::sync::Arc;

use async_trait::async_trait;
use fleetdoc_model::{CommandId, CommandSummary, DocumentDefinition, Profile, TargetInstance};

use crate::error::ServiceError;

#[cfg(test)]
pub(crate) mod mock;

/// Remote document/command service scoped to one profile.
///
/// Every method is a suspension point of the calling task.
#[async_trait]
pub trait DocumentServiceClient: Send + Sync + 'static {
    /// Existence check. Returns [`ServiceError::NotFound`] when the document does not exist.
    async fn describe_document(&self, name: &str) -> Result<(), ServiceError>;

    /// Create a new command-type document with JSON content.
    async fn create_document(&self, document: &DocumentDefinition) -> Result<(), ServiceError>;

    /// Replace the content of an existing document at `version`.
    async fn update_document(
        &self,
        document: &DocumentDefinition,
        version: &str,
    ) -> Result<(), ServiceError>;

    /// Execute a document on one instance and return the invocation id.
    async fn send_command(
        &self,
        instance_id: &str,
        document: &str,
        comment: &str,
    ) -> Result<CommandId, ServiceError>;

    /// Most recent invocations on one instance, at most `max_results`.
    async fn list_commands(
        &self,
        instance_id: &str,
        max_results: u32,
    ) -> Result<Vec<CommandSummary>, ServiceError>;

    /// Every instance owned by the profile, with platform tags where known.
    async fn list_instances(&self) -> Result<Vec<TargetInstance>, ServiceError>;
}

/// Per-profile session resolution.
///
/// Called once per task; each task owns the client it gets back.
#[async_trait]
pub trait ClientProvider: Send + Sync + 'static {
    async fn client(
        &self,
        profile: &Profile,
    ) -> Result<Arc<dyn DocumentServiceClient>, ServiceError>;
}
