use serde::{Deserialize, Serialize};

/// Body of a `POST /api/bayard-proxy` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRequest {
    /// The raw text the user submitted.
    pub input_text: String,
}

impl ProxyRequest {
    /// Creates a request for the given input.
    pub fn new(input_text: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
        }
    }
}
