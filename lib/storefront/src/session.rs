//! Process-wide session storage.
//!
//! [`SessionStore`] holds what a login leaves behind: the bearer token and
//! the user object as a JSON string. The pipeline only reads it, through
//! [`CredentialProvider`]; login and logout flows write it.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use storefront_core::CredentialProvider;
use tracing::{debug, warn};

/// Raw session contents, as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// JSON-encoded user object; expected to carry an `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl SessionState {
    /// Extract the user id from the stored user JSON.
    ///
    /// Accepts numeric and string ids. Missing, empty or malformed data
    /// yields `None`.
    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        let raw = self.user.as_deref()?;
        match user_id_from(raw) {
            Ok(id) => id,
            Err(err) => {
                debug!(error = %err, "stored user is not valid JSON, no user id");
                None
            }
        }
    }

    fn token(&self) -> Option<String> {
        self.token.clone().filter(|token| !token.is_empty())
    }
}

fn user_id_from(raw: &str) -> Result<Option<String>, serde_json::Error> {
    let user: Value = serde_json::from_str(raw)?;
    Ok(match user.get("id") {
        Some(Value::Number(id)) => Some(id.to_string()),
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        _ => None,
    })
}

/// Error while saving or loading a session file.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SessionError {
    /// File could not be read or written.
    #[display("session file I/O error: {_0}")]
    Io(std::io::Error),
    /// File content is not a session.
    #[display("session file is malformed: {_0}")]
    Format(serde_json::Error),
}

/// Shared, cloneable session store.
///
/// Clones share the same state, so a store handed to an
/// [`ApiClient`](crate::ApiClient) sees later logins and logouts.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
}

impl SessionStore {
    /// Create an empty (logged-out) store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the given contents.
    #[must_use]
    pub fn from_state(state: SessionState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Record a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if `user` cannot be serialized.
    pub fn login<U: Serialize>(&self, token: impl Into<String>, user: &U) -> Result<(), SessionError> {
        let user = serde_json::to_string(user)?;
        self.set_raw(Some(token.into()), Some(user));
        debug!("session stored");
        Ok(())
    }

    /// Replace the raw contents, as they would be found in storage.
    ///
    /// A user that is not valid JSON is kept as is, logged once here, and
    /// requests go out without a user id.
    pub fn set_raw(&self, token: Option<String>, user: Option<String>) {
        if let Some(Err(err)) = user.as_deref().map(user_id_from) {
            warn!(error = %err, "stored user is not valid JSON, requests will carry no user id");
        }
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.token = token;
        state.user = user;
    }

    /// Forget the session.
    pub fn logout(&self) {
        self.set_raw(None, None);
        debug!("session cleared");
    }

    /// Copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns `true` if a token is stored.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Decode the stored user object.
    ///
    /// Returns `None` when no user is stored or it does not match `U`.
    #[must_use]
    pub fn user<U: serde::de::DeserializeOwned>(&self) -> Option<U> {
        let raw = self.snapshot().user?;
        serde_json::from_str(&raw).ok()
    }

    /// Write the session to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let json = serde_json::to_vec_pretty(&self.snapshot())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a session from a JSON file written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a session.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let bytes = std::fs::read(path)?;
        let state: SessionState = serde_json::from_slice(&bytes)?;
        Ok(Self::from_state(state))
    }
}

impl CredentialProvider for SessionStore {
    fn token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token()
    }

    fn user_id(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .user_id()
    }
}
