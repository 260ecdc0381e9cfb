//! Authentication error vocabulary and the messages shown to users.

use std::fmt;
use thiserror::Error;

use crate::profile::ProfileError;

const GENERIC_MESSAGE: &str =
    "An error occured during authentication, please check your connection and try again";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthErrorCode {
    UserNotFound,
    WrongPassword,
    EmailAlreadyInUse,
    /// Any other code, kept verbatim for logs.
    Other(String),
}

impl AuthErrorCode {
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "auth/user-not-found" => Self::UserNotFound,
            "auth/wrong-password" => Self::WrongPassword,
            "auth/email-already-in-use" => Self::EmailAlreadyInUse,
            other => Self::Other(other.to_string()),
        }
    }

    /// Map an identity provider error string such as `EMAIL_EXISTS` or
    /// `WEAK_PASSWORD : Password should be at least 6 characters`.
    #[must_use]
    pub fn from_provider(message: &str) -> Self {
        let reason = message.split([' ', ':']).next().unwrap_or_default();
        match reason {
            "EMAIL_NOT_FOUND" => Self::UserNotFound,
            "INVALID_PASSWORD" => Self::WrongPassword,
            "EMAIL_EXISTS" => Self::EmailAlreadyInUse,
            other => Self::Other(format!("auth/{}", other.to_lowercase().replace('_', "-"))),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::UserNotFound => "auth/user-not-found",
            Self::WrongPassword => "auth/wrong-password",
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::Other(code) => code,
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::UserNotFound => "No user with the provided email address exists",
            Self::WrongPassword => "The password provided for this user is invalid",
            Self::EmailAlreadyInUse => "The provided email is already signed up, please log in",
            Self::Other(_) => GENERIC_MESSAGE,
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication rejected: {0}")]
    Rejected(AuthErrorCode),
    #[error("identity provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected identity provider response: {0}")]
    Response(String),
    #[error("failed to create user document: {0}")]
    UserDocument(#[from] ProfileError),
}

impl AuthError {
    #[must_use]
    pub fn code(&self) -> AuthErrorCode {
        match self {
            Self::Rejected(code) => code.clone(),
            Self::Transport(_) => AuthErrorCode::Other("auth/network-request-failed".to_string()),
            Self::Response(_) => AuthErrorCode::Other("auth/internal-error".to_string()),
            Self::UserDocument(_) => AuthErrorCode::Other("auth/user-document".to_string()),
        }
    }

    /// User-facing text for this error.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Rejected(code) => code.message(),
            _ => GENERIC_MESSAGE,
        }
    }
}
