//! Tests for pricing module.

use super::*;
use crate::domain::{PricingTier, Totals};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ==================== Tier resolution tests ====================

#[test]
fn test_resolve_price_from_tier_map() {
    let entity = json!({"tierPrices": {"VIP": 80, "DEFAULT": 100}, "price": 100});
    assert_eq!(resolve_price(&entity, PricingTier::Vip), Some(dec("80")));
}

#[test]
fn test_resolve_price_accepts_lowercase_map_keys() {
    let entity = json!({"tierPrices": {"vip": 80}, "price": 100});
    assert_eq!(resolve_price(&entity, PricingTier::Vip), Some(dec("80")));
}

#[test]
fn test_resolve_price_from_flat_tier_field() {
    let entity = json!({"b2bPrice": 75, "price": 100});
    assert_eq!(resolve_price(&entity, PricingTier::B2b), Some(dec("75")));
}

#[test]
fn test_resolve_price_falls_back_to_unit_price() {
    let entity = json!({"unitPrice": 49.5});
    assert_eq!(
        resolve_price(&entity, PricingTier::Supporter),
        Some(dec("49.5"))
    );
}

#[test]
fn test_zero_tier_price_is_unconfigured_not_free() {
    let entity = json!({"tierPrices": {"VIP": 0, "DEFAULT": 2990}});
    assert_eq!(resolve_price(&entity, PricingTier::Vip), Some(dec("2990")));
}

#[test]
fn test_tier_map_wins_over_flat_field() {
    let entity = json!({"tierPrices": {"VIP": 80}, "vipPrice": 90, "price": 100});
    assert_eq!(resolve_price(&entity, PricingTier::Vip), Some(dec("80")));
}

#[test]
fn test_numeric_string_prices_parse() {
    let entity = json!({"tierPrices": {"B2B": "74.50"}, "price": "99.00"});
    assert_eq!(resolve_price(&entity, PricingTier::B2b), Some(dec("74.50")));
}

#[test]
fn test_resolve_price_missing_everything() {
    let entity = json!({"name": "no prices here"});
    assert_eq!(resolve_price(&entity, PricingTier::Vip), None);
}

// ==================== Discount predicate tests ====================

#[test]
fn test_has_discount_iff_strictly_lower() {
    let discounted = json!({"tierPrices": {"VIP": 80, "DEFAULT": 100}});
    let equal = json!({"tierPrices": {"VIP": 100, "DEFAULT": 100}});
    let higher = json!({"tierPrices": {"VIP": 120, "DEFAULT": 100}});

    assert!(has_discount(&discounted, PricingTier::Vip));
    assert!(!has_discount(&equal, PricingTier::Vip));
    assert!(!has_discount(&higher, PricingTier::Vip));
}

#[test]
fn test_has_discount_false_when_unpriced() {
    let entity = json!({"tierPrices": {"VIP": 80}});
    // No default price resolvable at all.
    assert!(!has_discount(&entity, PricingTier::Vip));
}

#[test]
fn test_has_discount_agrees_with_resolve_price() {
    let entities = [
        json!({"tierPrices": {"SUPPORTER": 90, "DEFAULT": 100}}),
        json!({"tierPrices": {"SUPPORTER": 0}, "price": 100}),
        json!({"supporterPrice": 45, "price": 60}),
        json!({"price": 60}),
    ];

    for entity in &entities {
        let tiered = resolve_price(entity, PricingTier::Supporter);
        let default = resolve_price(entity, PricingTier::Default);
        let expected = match (tiered, default) {
            (Some(t), Some(d)) => t > Decimal::ZERO && d > Decimal::ZERO && t < d,
            _ => false,
        };
        assert_eq!(has_discount(entity, PricingTier::Supporter), expected);
    }
}

// ==================== Tier parsing tests ====================

#[test]
fn test_tier_synonyms_normalize_to_b2b() {
    for raw in ["company", "BUSINESS", "Restaurant", "b2b"] {
        assert_eq!(PricingTier::parse(raw), PricingTier::B2b);
    }
}

#[test]
fn test_unknown_tier_is_default() {
    assert_eq!(PricingTier::parse("gold-member"), PricingTier::Default);
    assert_eq!(PricingTier::parse(""), PricingTier::Default);
}

// ==================== VAT display tests ====================

#[test]
fn test_display_price_excl_is_passthrough() {
    assert_eq!(
        display_price(dec("56"), dec("0.12"), VatMode::ExclVat),
        dec("56")
    );
}

#[test]
fn test_display_price_incl_applies_rate() {
    assert_eq!(
        display_price(dec("100"), dec("0.25"), VatMode::InclVat),
        dec("125")
    );
}

#[test]
fn test_whole_number_rate_read_as_percent() {
    assert_eq!(normalize_vat_rate(dec("12")), dec("0.12"));
    assert_eq!(normalize_vat_rate(dec("25")), dec("0.25"));
    assert_eq!(
        display_price(dec("100"), dec("25"), VatMode::InclVat),
        dec("125")
    );
}

#[test]
fn test_negative_rate_clamps_to_zero() {
    assert_eq!(normalize_vat_rate(dec("-0.1")), Decimal::ZERO);
}

#[test]
fn test_display_line_total() {
    // 2 x 56 net at 12% shown gross.
    assert_eq!(
        display_line_total(dec("56"), 2, dec("0.12"), VatMode::InclVat),
        dec("125.44")
    );
    assert_eq!(
        display_line_total(dec("56"), 2, dec("0.12"), VatMode::ExclVat),
        dec("112")
    );
}

// ==================== Totals breakdown tests ====================

fn totals(subtotal: Option<&str>, total: Option<&str>, tax: Option<&str>) -> Totals {
    Totals {
        currency: "SEK".to_string(),
        subtotal: subtotal.map(dec),
        shipping: None,
        tax: tax.map(dec),
        discount: None,
        total: total.map(dec),
    }
}

#[test]
fn test_breakdown_subtotal_only_has_zero_vat() {
    // No tax field supplied means vat defaults to 0, not derived from a rate.
    let breakdown = resolve_totals_breakdown(&totals(Some("112"), None, None));
    assert_eq!(breakdown.net, dec("112"));
    assert_eq!(breakdown.vat, Decimal::ZERO);
    assert_eq!(breakdown.gross, dec("112"));
}

#[test]
fn test_breakdown_prefers_backend_fields() {
    let breakdown = resolve_totals_breakdown(&totals(Some("100"), Some("125"), Some("25")));
    assert_eq!(breakdown.net, dec("100"));
    assert_eq!(breakdown.vat, dec("25"));
    assert_eq!(breakdown.gross, dec("125"));
}

#[test]
fn test_breakdown_derives_net_from_gross_and_vat() {
    let breakdown = resolve_totals_breakdown(&totals(None, Some("125"), Some("25")));
    assert_eq!(breakdown.net, dec("100"));
    assert_eq!(breakdown.vat, dec("25"));
    assert_eq!(breakdown.gross, dec("125"));
}

#[test]
fn test_breakdown_derives_vat_from_net_and_gross() {
    let breakdown = resolve_totals_breakdown(&totals(Some("100"), Some("112"), None));
    assert_eq!(breakdown.vat, dec("12"));
}

#[test]
fn test_breakdown_gross_only() {
    let breakdown = resolve_totals_breakdown(&totals(None, Some("250"), None));
    assert_eq!(breakdown.net, dec("250"));
    assert_eq!(breakdown.vat, Decimal::ZERO);
    assert_eq!(breakdown.gross, dec("250"));
}

#[test]
fn test_breakdown_clamps_negative_values() {
    // Inconsistent backend data: vat larger than gross.
    let breakdown = resolve_totals_breakdown(&totals(None, Some("10"), Some("25")));
    assert_eq!(breakdown.net, Decimal::ZERO);
    assert_eq!(breakdown.gross, dec("10"));
}

#[test]
fn test_breakdown_empty_totals() {
    let breakdown = resolve_totals_breakdown(&totals(None, None, None));
    assert_eq!(breakdown.net, Decimal::ZERO);
    assert_eq!(breakdown.vat, Decimal::ZERO);
    assert_eq!(breakdown.gross, Decimal::ZERO);
}
