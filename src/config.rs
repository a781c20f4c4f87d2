use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};

/// Transport settings, fixed when a [`RequestClient`](crate::RequestClient) is built.
#[derive(Clone)]
pub struct ClientConfig {
    /// Reject invalid TLS certificates. On by default.
    pub ssl_check: bool,
    /// Shared by every request sent through the client. `None` disables cookies.
    pub cookie_store: Option<Arc<dyn CookieStore>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ssl_check: true,
            cookie_store: Some(Arc::new(Jar::default())),
        }
    }
}

impl ClientConfig {
    pub fn new(ssl_check: bool) -> Self {
        Self {
            ssl_check,
            ..Self::default()
        }
    }

    /// Uses `store` for cookies instead of a private in-memory jar.
    ///
    /// Pass the same store to several clients to share a session between them.
    pub fn with_cookie_store<S>(mut self, store: Arc<S>) -> Self
    where
        S: CookieStore + 'static,
    {
        let store: Arc<dyn CookieStore> = store;
        self.cookie_store = Some(store);
        self
    }

    pub fn without_cookies(mut self) -> Self {
        self.cookie_store = None;
        self
    }
}

impl Debug for ClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("ssl_check", &self.ssl_check)
            .field("cookies", &self.cookie_store.is_some())
            .finish()
    }
}
