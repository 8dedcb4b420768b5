//! Order fetching and the admin-side order board.

mod backend;
mod board;

pub use backend::HttpOrderBackend;
pub use board::OrderBoard;


use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::api::ApiClientError;
use crate::status::TransitionError;

/// Order operation errors.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order {0} not found")]
    NotFound(String),

    /// The order's current status is not a board column.
    #[error("status {0} cannot be placed on the board")]
    NotBoardStatus(String),

    /// Marking an unpaid order as delivered needs an explicit confirmation.
    #[error("order {0} is not paid; confirm before marking it delivered")]
    ConfirmationRequired(String),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Api(#[from] ApiClientError),
}

/// Result type for order operations.
pub type Result<T> = std::result::Result<T, OrderError>;

/// OrderBackend is the remote order service, payload-shaped like CartBackend.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Lists the orders visible to the current session.
    async fn list_orders(&self) -> std::result::Result<Value, ApiClientError>;

    /// Fetches one order.
    async fn get_order(&self, order_id: &str) -> std::result::Result<Value, ApiClientError>;

    /// Asks the backend to move an order to a new status; returns the updated
    /// order payload.
    async fn update_status(
        &self,
        order_id: &str,
        status: &str,
    ) -> std::result::Result<Value, ApiClientError>;
}
