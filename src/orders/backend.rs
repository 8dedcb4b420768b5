//! HTTP implementation of the order service backend.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::api::{ApiClient, ApiClientError};

use super::OrderBackend;

/// HttpOrderBackend talks to the remote order service over the transport
/// helper.
pub struct HttpOrderBackend {
    api: ApiClient,
}

impl HttpOrderBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrderBackend for HttpOrderBackend {
    async fn list_orders(&self) -> Result<Value, ApiClientError> {
        self.api.get("/orders").await
    }

    async fn get_order(&self, order_id: &str) -> Result<Value, ApiClientError> {
        self.api.get(&format!("/orders/{}", order_id)).await
    }

    async fn update_status(
        &self,
        order_id: &str,
        status: &str,
    ) -> Result<Value, ApiClientError> {
        self.api
            .post(
                &format!("/admin/orders/{}/status", order_id),
                &json!({ "status": status }),
            )
            .await
    }
}
