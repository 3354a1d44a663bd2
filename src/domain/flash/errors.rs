//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Errors returned by session store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No live session for this user.
    NotFound(UserId),
}

impl SessionError {
    pub fn not_found(user_id: UserId) -> Self {
        SessionError::NotFound(user_id)
    }
    pub fn is_not_found(&self) -> bool {
        matches!(self, SessionError::NotFound(_))
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(user_id) => {
                format!("No active flash session for user {}", user_id)
            }
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<SessionError> for DomainError {
    fn from(err: SessionError) -> Self {
        match &err {
            SessionError::NotFound(user_id) => DomainError::new(err.code(), err.message())
                .with_detail("user_id", user_id.to_string()),
        }
    }
}
