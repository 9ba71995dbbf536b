//! Error kinds reported by a security realm

use thiserror::Error;

/// Result type for realm operations
pub type Result<T> = std::result::Result<T, RealmError>;

/// Failures a realm reports back to its caller.
///
/// Every variant is returned synchronously to the caller; a realm never
/// retries or swallows one of these internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RealmError {
    /// No roster entry matches the requested username
    #[error("Unknown identity: {0}")]
    UnknownIdentity(String),

    /// No roster entry belongs to the requested group
    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    /// The identity exists but the supplied credential does not match.
    /// Carries the username, never the rejected credential.
    #[error("Bad credentials for: {0}")]
    BadCredentials(String),

    /// The backend is simulating an outage
    #[error("Backend currently unavailable")]
    BackendUnavailable,
}

impl RealmError {
    /// Whether the outcome says nothing about the identity.
    ///
    /// Callers must not cache a negative result for an indeterminate error.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, RealmError::BackendUnavailable)
    }

    /// Whether a hosting framework should report this as a failed login
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, RealmError::UnknownIdentity(_) | RealmError::BadCredentials(_))
    }
}
