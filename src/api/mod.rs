//! HTTP transport helper for the storefront backend.

mod client;

pub use client::{ApiClient, ApiClientConfig, ApiClientError, ApiError, Result};

/// Auth/session seam. The transport attaches a bearer token when one exists
/// and routes 401/403 responses through `on_unauthorized` instead of
/// surfacing them as generic errors; navigation stays with the caller.
pub trait AuthProvider: Send + Sync {
    /// Current bearer token, if the customer is signed in.
    fn token(&self) -> Option<String>;

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Called once per 401/403 response.
    fn on_unauthorized(&self) {}
}

/// Token-from-config auth provider.
#[derive(Debug, Default)]
pub struct StaticAuth {
    token: Option<String>,
}

impl StaticAuth {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl AuthProvider for StaticAuth {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }
}
