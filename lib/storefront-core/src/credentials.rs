//! Session credential access.

use std::sync::Arc;

/// Read access to the current session.
///
/// Implementations are queried on every request and must not cache: a login
/// or logout between two calls has to be visible to the second one. Reads
/// never fail; unreadable data is reported as `None`.
pub trait CredentialProvider: Send + Sync {
    /// Bearer token of the logged-in user.
    fn token(&self) -> Option<String>;

    /// Identifier of the logged-in user.
    fn user_id(&self) -> Option<String>;
}

impl<P: CredentialProvider + ?Sized> CredentialProvider for Arc<P> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }

    fn user_id(&self) -> Option<String> {
        (**self).user_id()
    }
}

impl<P: CredentialProvider + ?Sized> CredentialProvider for &P {
    fn token(&self) -> Option<String> {
        (**self).token()
    }

    fn user_id(&self) -> Option<String> {
        (**self).user_id()
    }
}

/// Provider for anonymous clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn token(&self) -> Option<String> {
        None
    }

    fn user_id(&self) -> Option<String> {
        None
    }
}

/// Fixed credentials, handy for scripts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCredentials {
    token: Option<String>,
    user_id: Option<String>,
}

impl StaticCredentials {
    /// Credentials with both a token and a user id.
    #[must_use]
    pub fn new(token: impl Into<String>, user_id: impl ToString) -> Self {
        Self {
            token: Some(token.into()),
            user_id: Some(user_id.to_string()),
        }
    }

    /// Credentials with only a token.
    #[must_use]
    pub fn token_only(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user_id: None,
        }
    }

    /// Credentials with only a user id.
    #[must_use]
    pub fn user_only(user_id: impl ToString) -> Self {
        Self {
            token: None,
            user_id: Some(user_id.to_string()),
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}
