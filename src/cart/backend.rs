//! HTTP implementation of the cart service backend.

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::api::{ApiClient, ApiClientError};
use crate::domain::CartIdentity;

use super::CartBackend;

/// HttpCartBackend talks to the remote cart service over the transport helper.
pub struct HttpCartBackend {
    api: ApiClient,
}

impl HttpCartBackend {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CartBackend for HttpCartBackend {
    async fn create_cart(&self) -> Result<Value, ApiClientError> {
        self.api.post("/carts", &json!({})).await
    }

    async fn fetch_cart(&self, identity: &CartIdentity) -> Result<Value, ApiClientError> {
        self.api
            .get(&format!(
                "/carts/{}?sessionId={}",
                identity.cart_id, identity.session_id
            ))
            .await
    }

    async fn add_item(
        &self,
        identity: &CartIdentity,
        product_or_variant_id: &str,
        quantity: i64,
    ) -> Result<Value, ApiClientError> {
        self.api
            .post(
                &format!("/carts/{}/items", identity.cart_id),
                &json!({
                    "sessionId": identity.session_id,
                    "productId": product_or_variant_id,
                    "quantity": quantity,
                }),
            )
            .await
    }

    async fn update_item(
        &self,
        identity: &CartIdentity,
        item_id: &str,
        quantity: i64,
    ) -> Result<Value, ApiClientError> {
        self.api
            .put(
                &format!("/carts/{}/items/{}", identity.cart_id, item_id),
                &json!({
                    "sessionId": identity.session_id,
                    "quantity": quantity,
                }),
            )
            .await
    }

    async fn remove_item(
        &self,
        identity: &CartIdentity,
        item_id: &str,
    ) -> Result<Value, ApiClientError> {
        self.api
            .delete(&format!(
                "/carts/{}/items/{}?sessionId={}",
                identity.cart_id, item_id, identity.session_id
            ))
            .await
    }

    async fn checkout(
        &self,
        identity: &CartIdentity,
        payload: &Value,
    ) -> Result<Value, ApiClientError> {
        let mut body = payload.clone();
        if let Value::Object(ref mut map) = body {
            map.insert("sessionId".to_string(), json!(identity.session_id));
        }
        self.api
            .post(&format!("/carts/{}/checkout", identity.cart_id), &body)
            .await
    }
}
