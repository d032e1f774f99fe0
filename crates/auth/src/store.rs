//! Where the bearer token lives between requests.

use std::sync::{Arc, RwLock};

/// Key the browser shell uses in `localStorage`.
pub const TOKEN_STORAGE_KEY: &str = "authToken";

/// Storage for the single bearer token.
///
/// Implementations must be cheap to read: the HTTP client calls [`token`]
/// on every request so a token swapped at runtime is picked up immediately.
///
/// [`token`]: TokenStore::token
pub trait TokenStore: Send + Sync {
    fn set_token(&self, token: &str);

    fn token(&self) -> Option<String>;

    fn remove_token(&self);

    fn is_authenticated(&self) -> bool {
        self.token().is_some_and(|t| !t.is_empty())
    }

    /// `Authorization` header value, or `None` when no token is stored.
    fn bearer_token(&self) -> Option<String> {
        self.token()
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {t}"))
    }
}

impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    fn set_token(&self, token: &str) {
        (**self).set_token(token)
    }

    fn token(&self) -> Option<String> {
        (**self).token()
    }

    fn remove_token(&self) {
        (**self).remove_token()
    }
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn set_token(&self, token: &str) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.to_string());
        tracing::debug!("bearer token stored");
    }

    fn token(&self) -> Option<String> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn remove_token(&self) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
        tracing::debug!("bearer token removed");
    }
}
