use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid platform filter: {0} (expected: win|windows|lin|linux)")]
    InvalidPlatformFilter(String),
    #[error("document content must be a JSON object")]
    DocumentNotObject,
    #[error("document name is empty")]
    EmptyDocumentName,
}
