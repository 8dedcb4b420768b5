//! Per-tier unit price resolution over raw product payloads.
//!
//! Resolution order, first match wins: an explicit per-tier price map, a
//! flat field named for the tier, then the generic unit price. A tier price
//! of exactly zero means "not configured" and falls through; it is never a
//! free item.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::PricingTier;
use crate::normalize::extract::{as_decimal, lookup};

/// Spellings of the per-tier price map.
const TIER_MAP_CANDIDATES: &[&str] = &["tierPrices", "tier_prices", "prices"];

/// Generic unit price fields, tried when no tier price is configured.
const BASE_PRICE_CANDIDATES: &[&str] =
    &["unitPrice", "unit_price", "price", "netPrice", "net_price"];

/// Resolves the net unit price to charge a customer in the given tier.
/// An unconfigured tier falls through to the default tier's price, then to
/// the generic unit price.
pub fn resolve_price(entity: &Value, tier: PricingTier) -> Option<Decimal> {
    tier_price(entity, tier)
        .or_else(|| {
            if tier == PricingTier::Default {
                None
            } else {
                tier_price(entity, PricingTier::Default)
            }
        })
        .or_else(|| base_price(entity))
}

fn tier_price(entity: &Value, tier: PricingTier) -> Option<Decimal> {
    tier_map_price(entity, tier).or_else(|| flat_tier_price(entity, tier))
}

/// True only when the tier-resolved price is a known positive amount strictly
/// below the default-tier price. Equal or missing values are not a discount,
/// so the UI never shows a struck-through price that is not actually lower.
pub fn has_discount(entity: &Value, tier: PricingTier) -> bool {
    match (
        resolve_price(entity, tier),
        resolve_price(entity, PricingTier::Default),
    ) {
        (Some(tiered), Some(default)) => {
            tiered > Decimal::ZERO && default > Decimal::ZERO && tiered < default
        }
        _ => false,
    }
}

/// Looks the tier up in an explicit price map, accepting the tier key or its
/// lowercase form. Zero and negative entries are unconfigured.
fn tier_map_price(entity: &Value, tier: PricingTier) -> Option<Decimal> {
    let map = TIER_MAP_CANDIDATES
        .iter()
        .find_map(|path| lookup(entity, path).filter(|v| v.is_object()))?;

    let key = tier.key();
    let entry = map.get(key).or_else(|| map.get(key.to_lowercase().as_str()));

    entry.and_then(as_decimal).filter(|p| *p > Decimal::ZERO)
}

/// Flat fields literally named for the tier (e.g. `vipPrice`).
fn flat_tier_price(entity: &Value, tier: PricingTier) -> Option<Decimal> {
    let candidates: &[&str] = match tier {
        PricingTier::Default => &["defaultPrice", "default_price"],
        PricingTier::Supporter => &["supporterPrice", "supporter_price"],
        PricingTier::Vip => &["vipPrice", "vip_price"],
        PricingTier::B2b => &["b2bPrice", "b2b_price", "companyPrice", "company_price"],
    };

    candidates
        .iter()
        .find_map(|path| lookup(entity, path).and_then(as_decimal))
        .filter(|p| *p > Decimal::ZERO)
}

fn base_price(entity: &Value) -> Option<Decimal> {
    BASE_PRICE_CANDIDATES
        .iter()
        .find_map(|path| lookup(entity, path).and_then(as_decimal))
}
