//! Error types for social graph operations.

use thiserror::Error;

use crate::user::UserId;

/// Errors returned by the social graph engine.
///
/// All variants are deterministic validation outcomes; none are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SocialError {
    /// A user with this id is already registered.
    #[error("user {0} already exists")]
    UserAlreadyExists(UserId),

    /// No user with this id is registered.
    #[error("user {0} does not exist")]
    UserDoesNotExist(UserId),

    /// No directed follow path leads from `from` to `to`.
    #[error("users {from} and {to} are not connected")]
    UsersNotConnected { from: UserId, to: UserId },

    /// Self-follow was attempted while the policy forbids it.
    #[error("user {0} cannot follow themselves")]
    SelfFollowRejected(UserId),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SocialError {
    pub fn users_not_connected(from: UserId, to: UserId) -> Self {
        Self::UsersNotConnected { from, to }
    }

    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, SocialError>;
