//! fibspiral-export: Pure output serializers (sans-IO)
//!
//! Converts rendered canvases into deliverable forms: PNG bytes, a
//! `data:` URL, and the JSON response envelope returned to web clients.

pub mod png;
pub mod response;

pub use png::{DATA_URL_PREFIX, encode_png, to_data_url};
pub use response::GenerateResponse;

/// Errors raised while serializing output.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// PNG encoding failed.
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    /// JSON serialization failed.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}
