//! Error types for the linking stage.

use thiserror::Error;

/// Error type for linker operations.
///
/// Events that cannot be linked (ancient, unknown parent, inconsistent
/// parent claims) are not errors: they are reported through the returned
/// value. Errors only describe misuse of the linker by its callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkerError {
    /// The new event window is older than the current one.
    #[error("Event window regression: ancient threshold {new} is below the current threshold {current}")]
    WindowRegression { current: u64, new: u64 },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// The intake stage has stopped and no longer accepts input.
    #[error("Linker intake stage is closed")]
    IntakeClosed,
}

/// Result type alias for linker operations.
pub type LinkerResult<T> = Result<T, LinkerError>;
