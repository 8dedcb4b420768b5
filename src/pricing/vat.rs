//! VAT-aware display math.
//!
//! Private customers see gross (VAT-inclusive) amounts, business customers
//! see net amounts. Backends vary in which totals fields they send, so the
//! breakdown resolver prefers explicit fields and only derives what is
//! missing, clamping everything non-negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Totals;

/// Which amount the customer should see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VatMode {
    /// VAT-inclusive amounts; the default for private customers.
    InclVat,
    /// Net amounts; the default for business customers.
    ExclVat,
}

/// Net/VAT/gross triple resolved from a totals record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VatBreakdown {
    pub net: Decimal,
    pub vat: Decimal,
    pub gross: Decimal,
}

/// Normalizes a VAT rate to a fraction: anything at or above 1 is read as a
/// whole-number percentage and divided by 100; negatives clamp to zero.
pub fn normalize_vat_rate(rate: Decimal) -> Decimal {
    if rate >= Decimal::ONE {
        rate / Decimal::from(100)
    } else if rate < Decimal::ZERO {
        Decimal::ZERO
    } else {
        rate
    }
}

/// The number to show for a net amount in the given display mode.
pub fn display_price(net: Decimal, vat_rate: Decimal, mode: VatMode) -> Decimal {
    match mode {
        VatMode::ExclVat => net,
        VatMode::InclVat => net * (Decimal::ONE + normalize_vat_rate(vat_rate)),
    }
}

/// The line total to show for a quantity of a net unit price.
pub fn display_line_total(
    net_unit: Decimal,
    quantity: i64,
    vat_rate: Decimal,
    mode: VatMode,
) -> Decimal {
    display_price(net_unit * Decimal::from(quantity), vat_rate, mode)
}

/// Resolves a net/VAT/gross breakdown from whatever totals fields the backend
/// supplied. Explicit fields win over derivation; when only one side is known
/// the VAT defaults to zero rather than being inferred from a rate.
pub fn resolve_totals_breakdown(totals: &Totals) -> VatBreakdown {
    let (net, vat, gross) = match (totals.subtotal, totals.total, totals.tax) {
        (Some(net), Some(gross), Some(vat)) => (net, vat, gross),
        (Some(net), Some(gross), None) => (net, gross - net, gross),
        (Some(net), None, Some(vat)) => (net, vat, net + vat),
        (None, Some(gross), Some(vat)) => (gross - vat, vat, gross),
        (Some(net), None, None) => (net, Decimal::ZERO, net),
        (None, Some(gross), None) => (gross, Decimal::ZERO, gross),
        (None, None, Some(vat)) => (Decimal::ZERO, vat, vat),
        (None, None, None) => (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
    };

    VatBreakdown {
        net: net.max(Decimal::ZERO),
        vat: vat.max(Decimal::ZERO),
        gross: gross.max(Decimal::ZERO),
    }
}
