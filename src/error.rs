use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("invalid {kind} identifier: `{value}` must not be empty or blank")]
    InvalidIdentifier { kind: &'static str, value: String },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("listener failure: {0}")]
    Listener(String),
}

impl SyncError {
    /// Convenience constructor for listener implementations.
    #[must_use]
    pub fn listener(reason: impl Into<String>) -> Self {
        Self::Listener(reason.into())
    }
}
