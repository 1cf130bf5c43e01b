use crate::model::RecordId;
use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserInfoError {
    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("No entry at index {index} ({len} in the list)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Record failed validation: {0}")]
    Validation(ValidationErrors),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl UserInfoError {
    /// True for errors caused by a stale or mistyped handle or an invalid
    /// record: the session reports these and carries on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            UserInfoError::RecordNotFound(_)
                | UserInfoError::IndexOutOfRange { .. }
                | UserInfoError::InvalidIndex(_)
                | UserInfoError::Validation(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, UserInfoError>;
