use thiserror::Error;

use crate::{dao::storage::StorageError, state::RosterError};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The bot state could not be written; nothing retries this.
    #[error("failed to persist bot state")]
    Persistence(#[source] StorageError),
    /// Both seats are already taken.
    #[error("roster is full")]
    Capacity,
    /// Invalid input provided by the user.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Requested user was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Persistence(err)
    }
}

impl From<RosterError> for ServiceError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::Full => ServiceError::Capacity,
            RosterError::GoalOutOfRange { goal } => {
                ServiceError::InvalidInput(format!("weekly goal {goal} is out of range"))
            }
            RosterError::NotRegistered(user_id) => {
                ServiceError::NotFound(format!("user `{user_id}` is not registered"))
            }
            RosterError::Storage(source) => ServiceError::Persistence(source),
        }
    }
}

/// Startup failures caused by missing or unusable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("missing environment variable `{var}`; add it to the environment or the .env file")]
    MissingEnvVar { var: &'static str },
    /// The sample placeholder was left in place of a real value.
    #[error("environment variable `{var}` still holds the placeholder value; replace it with the real token")]
    PlaceholderToken { var: &'static str },
    /// The health server port is not a valid number.
    #[error("invalid port `{value}`")]
    InvalidPort { value: String },
}
