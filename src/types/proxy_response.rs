use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::Document;

/// Successful response from the proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyResponse {
    /// The generated answer.
    pub model_output: String,

    /// Supporting documents; absent and `null` both mean none.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub documents: Vec<Document>,
}

impl ProxyResponse {
    /// Creates a response without documents.
    pub fn new(model_output: impl Into<String>) -> Self {
        Self {
            model_output: model_output.into(),
            documents: Vec::new(),
        }
    }

    /// Sets the documents.
    pub fn with_documents(mut self, documents: Vec<Document>) -> Self {
        self.documents = documents;
        self
    }

    /// Decode a reply body.
    pub fn from_slice(body: &[u8]) -> crate::Result<Self> {
        serde_json::from_slice(body).map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Document>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let documents: Option<Vec<Document>> = Option::deserialize(deserializer)?;
    Ok(documents.unwrap_or_default())
}
