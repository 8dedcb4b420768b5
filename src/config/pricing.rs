//! Pricing and VAT display configuration.

use rust_decimal::Decimal;
use serde::Deserialize;

/// VAT and price display settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Default VAT rate, either a fraction ("0.12") or whole percent ("12").
    pub default_vat_rate: Decimal,
    /// Price display mode: "incl" (private customers) or "excl" (business).
    pub display_mode: Option<String>,
}
