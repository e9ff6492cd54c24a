use thiserror::Error;

/// Errors returned by a [`crate::DocumentServiceClient`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The named document does not exist in the profile.
    ///
    /// Only the existence check reports this; it drives the create branch.
    #[error("document not found: {0}")]
    NotFound(String),

    /// Any other failure of a remote call. Terminal for the task, never retried.
    #[error("{operation} failed: {message}")]
    RemoteOperationFailed {
        operation: &'static str,
        message: String,
    },
}

impl ServiceError {
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        ServiceError::RemoteOperationFailed {
            operation,
            message: message.into(),
        }
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}

/// Errors that prevent a run from starting.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration unavailable: {0}")]
    ConfigurationUnavailable(String),
}
