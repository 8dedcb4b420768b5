//! Cart session lifecycle and synchronization with the remote cart service.

mod backend;
mod session;

pub use backend::HttpCartBackend;
pub use session::{CartSession, MutationOutcome, QuantityAdjusted, SessionState};


use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::api::ApiClientError;
use crate::domain::CartIdentity;
use crate::store::StorageError;

/// Cart operation errors.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart is closed or expired; the UI should offer a new cart instead.
    #[error("cart is not open")]
    CartClosed,

    /// No persisted identity pair exists yet; checkout must never silently
    /// create an empty cart mid-flow.
    #[error("no cart session exists")]
    MissingIdentity,

    /// A mutation for the same line is already in flight.
    #[error("a change for {0} is already in flight")]
    MutationInFlight(String),

    #[error("line item {0} not found in cart")]
    ItemNotFound(String),

    #[error(transparent)]
    Api(#[from] ApiClientError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("state serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;

/// CartBackend is the remote cart service, payload-shaped: every call returns
/// the raw cart (or order) payload for the normalizer to map.
#[async_trait]
pub trait CartBackend: Send + Sync {
    /// Creates a brand-new cart and returns its payload.
    async fn create_cart(&self) -> std::result::Result<Value, ApiClientError>;

    /// Fetches the cart referenced by the identity pair.
    async fn fetch_cart(
        &self,
        identity: &CartIdentity,
    ) -> std::result::Result<Value, ApiClientError>;

    /// Adds a product (or variant) to the cart.
    async fn add_item(
        &self,
        identity: &CartIdentity,
        product_or_variant_id: &str,
        quantity: i64,
    ) -> std::result::Result<Value, ApiClientError>;

    /// Sets the quantity of an existing line item.
    async fn update_item(
        &self,
        identity: &CartIdentity,
        item_id: &str,
        quantity: i64,
    ) -> std::result::Result<Value, ApiClientError>;

    /// Removes a line item.
    async fn remove_item(
        &self,
        identity: &CartIdentity,
        item_id: &str,
    ) -> std::result::Result<Value, ApiClientError>;

    /// Hands the cart off to checkout; returns the created order payload.
    async fn checkout(
        &self,
        identity: &CartIdentity,
        payload: &Value,
    ) -> std::result::Result<Value, ApiClientError>;
}
