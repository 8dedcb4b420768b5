//! Order entities produced by the normalizer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Totals;

/// FulfillmentType is how an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentType {
    /// Customer picks the order up in store.
    Pickup,
    /// The order ships to an address.
    Shipping,
}

impl FulfillmentType {
    /// Parses a backend fulfillment string; anything not recognizably a
    /// pickup ships.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "PICKUP" | "PICK_UP" | "STORE_PICKUP" | "CLICK_AND_COLLECT" => FulfillmentType::Pickup,
            _ => FulfillmentType::Shipping,
        }
    }

    pub fn is_pickup(&self) -> bool {
        matches!(self, FulfillmentType::Pickup)
    }
}

/// Shipping address attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub name: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// A status-change event in the order timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    /// Normalized status key the order moved to.
    pub status: String,
    /// When the change happened, when known.
    pub at: Option<DateTime<Utc>>,
    /// Optional staff note attached to the change.
    pub note: Option<String>,
}

/// A single ordered item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub product_id: Option<String>,
    pub name: Option<String>,
    pub quantity: i64,
    /// Net unit price in major currency units.
    pub unit_price: Option<Decimal>,
    /// Backend-computed line total, when present.
    pub line_total: Option<Decimal>,
}

/// Canonical order record.
///
/// Status-like fields hold normalized keys (see `status::normalize_status_key`)
/// so equality and registry lookups are stable regardless of the backend's
/// spelling. Serialization uses the primary wire field names, which makes
/// normalizing an already-normalized order a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_number: String,
    /// Normalized order status key (machine status wins over display labels).
    #[serde(rename = "orderStatus")]
    pub status: String,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub payment_reference: Option<String>,
    /// Normalized payment mode key, e.g. `INVOICE_PAY_LATER`.
    pub payment_mode: Option<String>,
    /// Invoice number, for invoice orders.
    pub invoice_number: Option<String>,
    /// Bankgiro account printed on the invoice, for invoice orders.
    pub bankgiro: Option<String>,
    #[serde(rename = "fulfillmentType")]
    pub fulfillment: FulfillmentType,
    pub totals: Totals,
    pub items: Vec<OrderItem>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub shipping_address: Option<Address>,
    pub customer_note: Option<String>,
    pub tracking_reference: Option<String>,
    pub timeline: Vec<TimelineEvent>,
}
