//! JSON response envelope for generate requests.
//!
//! Mirrors the body web clients expect from a generate call: either a
//! data URL on success or an error message on failure, never both.

use serde::{Deserialize, Serialize};

use crate::ExportError;

/// Result of one generate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Whether rendering succeeded.
    pub success: bool,
    /// PNG data URL of the rendered canvas, present on success.
    pub image_base64: Option<String>,
    /// Human-readable failure reason, present on failure.
    pub error: Option<String>,
}

impl GenerateResponse {
    /// Successful response carrying `data_url`.
    #[must_use]
    pub const fn ok(data_url: String) -> Self {
        Self {
            success: true,
            image_base64: Some(data_url),
            error: None,
        }
    }

    /// Failed response carrying the error's display text.
    #[must_use]
    pub fn failure(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            image_base64: None,
            error: Some(error.to_string()),
        }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self)?)
    }
}
