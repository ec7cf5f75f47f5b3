use thiserror::Error;

use crate::models::MemberValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Databasfel: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO-fel: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialiseringsfel: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Valideringsfel: {0}")]
    Validation(#[from] MemberValidationError),

    #[error("Hittades inte: {0}")]
    NotFound(String),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Medlem med givet ID saknas i databasen
    pub fn member_not_found(id: i64) -> Self {
        Self::NotFound(format!("familjemedlem med ID {}", id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
