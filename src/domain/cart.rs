//! Cart entities: the server-side cart and its client-held identity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Totals;

/// CartStatus is the lifecycle state of a server-side cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartStatus {
    /// The cart accepts mutations.
    Open,
    /// The cart was checked out or otherwise closed by the backend.
    Closed,
    /// The cart expired server-side; a new cart must replace it.
    Expired,
}

impl CartStatus {
    /// Parses a backend status string. Unknown values are treated as closed
    /// rather than open, so a surprising status never re-enables mutation.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "OPEN" | "ACTIVE" => CartStatus::Open,
            "EXPIRED" => CartStatus::Expired,
            _ => CartStatus::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, CartStatus::Open)
    }
}

/// The client-held identity pair referencing a server-side cart.
///
/// This is the only durable client state. It is always written and cleared
/// as a whole value, never field by field, so a new cart id can never be
/// paired with a stale session id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartIdentity {
    pub cart_id: String,
    pub session_id: String,
}

/// A single line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Line id, stable across requests.
    pub id: String,
    /// Product this line refers to.
    pub product_id: String,
    /// Variant, when the product has variants.
    pub variant_id: Option<String>,
    /// Display name, when the backend sends one.
    pub name: Option<String>,
    /// Quantity in the cart; zero is equivalent to removal.
    pub quantity: i64,
    /// Net (pre-VAT) unit price in major currency units.
    pub unit_price: Decimal,
    /// Discounted net unit price, when a discount applies.
    pub discounted_unit_price: Option<Decimal>,
    /// Backend-computed line total override.
    pub line_total: Option<Decimal>,
    /// Backend-computed discounted line total override.
    pub discounted_line_total: Option<Decimal>,
    /// Upper bound for quantity edits, when the backend reports stock.
    pub available_stock: Option<i64>,
}

impl CartLineItem {
    /// The unit price to charge: discounted when present, otherwise regular.
    pub fn resolved_unit_price(&self) -> Decimal {
        self.discounted_unit_price.unwrap_or(self.unit_price)
    }

    /// Net line total: backend override when present, otherwise
    /// quantity times the resolved unit price.
    pub fn resolved_line_total(&self) -> Decimal {
        self.discounted_line_total
            .or(self.line_total)
            .unwrap_or_else(|| self.resolved_unit_price() * Decimal::from(self.quantity))
    }

    /// Quantity capped at available stock. Displayed quantity must never
    /// exceed what the backend says is in stock.
    pub fn capped_quantity(&self) -> i64 {
        match self.available_stock {
            Some(stock) => self.quantity.min(stock.max(0)),
            None => self.quantity,
        }
    }
}

/// A normalized server-side cart snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub cart_id: String,
    pub session_id: String,
    pub status: CartStatus,
    pub items: Vec<CartLineItem>,
    pub totals: Totals,
}

impl Cart {
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// The identity pair, when the backend supplied both fields.
    pub fn identity(&self) -> Option<CartIdentity> {
        if self.cart_id.is_empty() || self.session_id.is_empty() {
            return None;
        }
        Some(CartIdentity {
            cart_id: self.cart_id.clone(),
            session_id: self.session_id.clone(),
        })
    }

    /// Finds a line by its line id.
    pub fn line(&self, item_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Finds a line by the product (or variant) it refers to.
    pub fn line_for_product(&self, product_or_variant_id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|i| {
            i.product_id == product_or_variant_id
                || i.variant_id.as_deref() == Some(product_or_variant_id)
        })
    }
}
