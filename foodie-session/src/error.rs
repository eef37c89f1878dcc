//! Session error types

use foodie_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The backend reports no signed-in user
    #[error("No active session: {0}")]
    NoSession(String),

    #[error("Failed to fetch current user: {0}")]
    Fetch(#[from] ClientError),
}

pub type SessionResult<T> = Result<T, SessionError>;
