//! Errors from the JSON bridge.

/// Failure of a map-then-encode pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The mapper aborted on a hook error.
    #[error(transparent)]
    Map(#[from] structmap_core::Error),

    /// The result could not be encoded.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
