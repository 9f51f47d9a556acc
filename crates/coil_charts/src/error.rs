use thiserror::Error;

/// Errors surfaced by data source construction and commands.
///
/// All of these indicate caller misuse and are raised synchronously, before
/// any partial mutation.
#[derive(Debug, Error)]
pub enum Error {
    /// No series factory form was configured on the builder.
    #[error("no series factory configured: set a series kind, a factory, or a series creator")]
    Configuration,

    /// Construction failed (empty category list, factory misbehavior).
    #[error("data source initialization failed: {reason}")]
    Initialization { reason: String },

    /// `animate_to_values` was called with the wrong number of values.
    #[error("value count mismatch: expected {expected}, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
}
