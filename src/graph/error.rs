use thiserror::Error;

/// Errors raised by graph operations.
///
/// There is no not-found variant: querying a name the graph has never seen is a
/// normal, empty result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Malformed caller input (empty name, bad timestamp, unknown enum value).
    /// The graph is left untouched.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A writer panicked while holding the store lock.
    #[error("graph lock poisoned: {0}")]
    LockPoisoned(String),
}

impl GraphError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
