//! Error types for the encoding pipeline

use thiserror::Error;

/// Result type alias for encode operations
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors surfaced by the encoding pipeline.
///
/// The first three variants are caller errors: the content (or the
/// requested symbol parameters) cannot produce a valid symbol. `Internal`
/// marks a stream whose length disagrees with the size tables, which is a
/// defect in the pipeline itself and never caused by content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Encoded content does not fit the largest defined symbol size, or a
    /// caller-fixed size
    #[error("content too long: needs {needed}, at most {available} available")]
    CapacityExceeded {
        /// Encoded length of the content (codewords or bits)
        needed: usize,
        /// Capacity of the largest (or the requested fixed) size
        available: usize,
    },

    /// Caller requested a symbol row count that is not in the size table
    #[error("no symbol size with {rows} rows")]
    InvalidFixedSize {
        /// The requested row count
        rows: usize,
    },

    /// Content cannot be represented in the selected mode's repertoire
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// A stage received a stream inconsistent with the size tables
    #[error("internal consistency fault: {0}")]
    Internal(String),
}
