// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer token lifecycle: hydrate on start, set on login, clear on logout.

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use telconova_core::{DispatchError, KeyValueStore};
use tracing::{debug, info, warn};

/// Fixed key the token is persisted under.
pub const TOKEN_KEY: &str = "auth_token";

/// Holds the single bearer token attached to outgoing requests.
///
/// The in-memory copy is authoritative for request building; every change
/// is mirrored to the durable store so a restarted process resumes the
/// session. The token is never validated or refreshed here.
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
    token: RwLock<Option<SecretString>>,
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl TokenStore {
    /// Creates a token store, loading any token persisted by a previous run.
    ///
    /// A storage read failure is logged and treated as "no session" so a
    /// broken token file never prevents startup.
    pub fn hydrate(store: Arc<dyn KeyValueStore>) -> Self {
        let token = match store.get(TOKEN_KEY) {
            Ok(Some(value)) if !value.trim().is_empty() => {
                debug!("restored auth token from durable storage");
                Some(SecretString::from(value.trim().to_owned()))
            }
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "failed to read persisted auth token, starting unauthenticated");
                None
            }
        };

        Self {
            store,
            token: RwLock::new(token),
        }
    }

    /// Stores `token` in durable storage, then in memory.
    ///
    /// If persisting fails the in-memory session is left untouched.
    pub fn set_token(&self, token: &str) -> Result<(), DispatchError> {
        let token = token.trim();
        self.store.set(TOKEN_KEY, token)?;
        let mut slot = self
            .token
            .write()
            .map_err(|_| DispatchError::Internal("token lock poisoned".into()))?;
        *slot = Some(SecretString::from(token.to_owned()));
        info!("auth token stored");
        Ok(())
    }

    /// Removes the token from durable storage, then from memory.
    pub fn clear_token(&self) -> Result<(), DispatchError> {
        self.store.remove(TOKEN_KEY)?;
        let mut slot = self
            .token
            .write()
            .map_err(|_| DispatchError::Internal("token lock poisoned".into()))?;
        *slot = None;
        info!("auth token cleared");
        Ok(())
    }

    /// Current token, if a session is active.
    pub fn token(&self) -> Option<SecretString> {
        self.token
            .read()
            .ok()?
            .as_ref()
            .map(|t| SecretString::from(t.expose_secret().to_owned()))
    }

    /// `Authorization` header value for the current token.
    pub fn authorization_header(&self) -> Option<String> {
        self.token
            .read()
            .ok()?
            .as_ref()
            .map(|t| format!("Bearer {}", t.expose_secret()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().map(|t| t.is_some()).unwrap_or(false)
    }
}
