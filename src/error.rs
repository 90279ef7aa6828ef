//! Error types.
//!
//! Only [`InterpretError`] crosses the public entry points. [`ProcessError`]
//! describes internal faults; `interpret_with` logs it and replaces it with a
//! generic message so no internal state reaches the caller.

use thiserror::Error;

/// Errors returned by [`crate::interpret`] and friends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    /// No prompt text (empty or whitespace-only input).
    #[error("No workout string provided")]
    EmptyInput,

    /// Unexpected fault while segmenting, matching or extracting.
    #[error("Internal processing error")]
    Internal,
}

/// Internal faults of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// A catalog entry whose name is empty after normalization.
    #[error("catalog entry #{index} (id {id}) has an empty name")]
    MalformedCatalogEntry { index: usize, id: String },

    /// A fuzzy hit that could not be mapped back through the alias index.
    #[error("matched key '{key}' is missing from the alias index")]
    UnindexedMatch { key: String },
}

/// Errors from loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}
