use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DocumentName, ModelError};

/// Command document to publish into every profile.
///
/// The content is opaque to the engine beyond being a JSON object.
/// There is no version field: updates always target the latest version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDefinition {
    pub name: DocumentName,
    pub content: Value,
}

impl DocumentDefinition {
    pub fn new(name: impl Into<DocumentName>, content: Value) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyDocumentName);
        }
        if !content.is_object() {
            return Err(ModelError::DocumentNotObject);
        }
        Ok(Self { name, content })
    }

    /// Content serialized the way the service expects it (compact JSON).
    pub fn content_json(&self) -> String {
        self.content.to_string()
    }
}
