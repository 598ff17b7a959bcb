//! Unified error type for every adapter and the HTTP layer.
//!
//! Client-caused variants are raised before any store access. Store failures
//! arrive as `Database` and are narrowed by [`Error::from_store`] where a more
//! specific meaning is known.

use sea_orm::DbErr;
use thiserror::Error;

/// Errors raised by the food ordering service
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed input
    #[error("Invalid request: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// A user with this email already exists
    #[error("Email already exists")]
    DuplicateEmail,

    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Well-formed zip code with no gazetteer entry
    #[error("Unknown zip code: {zip}")]
    UnknownZip {
        /// The zip code that could not be resolved
        zip: String,
    },

    /// Requested record does not exist
    #[error("Not found: {what}")]
    NotFound {
        /// Description of the missing record
        what: String,
    },

    /// Rating outside 1..=5 or review fields missing
    #[error("Invalid rating: {message}")]
    InvalidRating {
        /// Why the review was rejected
        message: String,
    },

    /// Order failed its preconditions
    #[error("Invalid order: {message}")]
    InvalidOrder {
        /// Why the order was rejected
        message: String,
    },

    /// Lines failed after the header was written; the write was undone
    #[error("Order could not be completed: {written} of {expected} lines written before failure")]
    PartialOrderFailure {
        /// Lines written before the failure
        written: usize,
        /// Lines submitted
        expected: usize,
    },

    /// Store unreachable or timed out; retryable
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// Diagnostic detail, never sent to clients
        message: String,
    },

    /// Any other store failure
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Invalid settings or seed data
    #[error("Configuration error: {message}")]
    Config {
        /// What was misconfigured
        message: String,
    },

    /// bcrypt failed to hash or verify
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Socket, file or task failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a validation error from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Classifies a store error, separating connection loss from other failures.
    #[must_use]
    pub fn from_store(err: DbErr) -> Self {
        match err {
            DbErr::ConnectionAcquire(e) => Self::StoreUnavailable {
                message: e.to_string(),
            },
            DbErr::Conn(e) => Self::StoreUnavailable {
                message: e.to_string(),
            },
            other => Self::Database(other),
        }
    }

    /// Whether the error was caused by the client rather than the server.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::DuplicateEmail
                | Self::InvalidCredentials
                | Self::UnknownZip { .. }
                | Self::NotFound { .. }
                | Self::InvalidRating { .. }
                | Self::InvalidOrder { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnAcquireErr;

    #[test]
    fn test_connection_errors_are_store_unavailable() {
        let err = Error::from_store(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert!(matches!(err, Error::StoreUnavailable { .. }));
    }

    #[test]
    fn test_other_store_errors_stay_database() {
        let err = Error::from_store(DbErr::RecordNotFound("orders".to_string()));
        assert!(matches!(err, Error::Database(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_client_errors() {
        assert!(Error::DuplicateEmail.is_client_error());
        assert!(Error::validation("zip missing").is_client_error());
        assert!(
            !Error::PartialOrderFailure {
                written: 1,
                expected: 2
            }
            .is_client_error()
        );
    }
}
