//! Customer pricing tiers.

use serde::{Deserialize, Serialize};

/// PricingTier selects which price list applies to a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingTier {
    /// The price everyone gets.
    Default,
    /// Supporter club members.
    Supporter,
    /// VIP customers.
    Vip,
    /// Business customers (companies, restaurants).
    B2b,
}

impl PricingTier {
    /// Parses a tier string from a customer profile. Case-insensitive and
    /// synonym-tolerant; unknown or missing values mean the default tier.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "SUPPORTER" => PricingTier::Supporter,
            "VIP" => PricingTier::Vip,
            "B2B" | "COMPANY" | "BUSINESS" | "RESTAURANT" => PricingTier::B2b,
            _ => PricingTier::Default,
        }
    }

    /// Canonical key used in tier price maps.
    pub fn key(&self) -> &'static str {
        match self {
            PricingTier::Default => "DEFAULT",
            PricingTier::Supporter => "SUPPORTER",
            PricingTier::Vip => "VIP",
            PricingTier::B2b => "B2B",
        }
    }
}
