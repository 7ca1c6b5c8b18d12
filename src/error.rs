//! Error type shared by every board operation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    /// The referenced idea does not exist.
    #[error("Idea not found")]
    IdeaNotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Lock poisoning or a failed blocking task.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
impl BoardError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::IdeaNotFound(_))
    }
}

pub type BoardResult<T> = Result<T, BoardError>;
