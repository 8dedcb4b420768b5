//! Money totals as reported by the backend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals breakdown attached to a cart or order.
///
/// Every amount is a decimal in major currency units; the backend is free to
/// omit any subset, so all fields are optional. Missing subtotal/total values
/// are derived from line items by the normalizer, but a nonzero backend value
/// is never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// ISO currency code (e.g., "SEK").
    pub currency: String,
    /// Sum of line totals before shipping and tax.
    pub subtotal: Option<Decimal>,
    /// Shipping cost.
    pub shipping: Option<Decimal>,
    /// VAT amount.
    pub tax: Option<Decimal>,
    /// Total discount applied.
    pub discount: Option<Decimal>,
    /// Grand total.
    pub total: Option<Decimal>,
}
