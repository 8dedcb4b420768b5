//! Tiered price resolution and VAT display math.

mod tier;
mod vat;

pub use tier::{has_discount, resolve_price};
pub use vat::{
    VatBreakdown, VatMode, display_line_total, display_price, normalize_vat_rate,
    resolve_totals_breakdown,
};

#[cfg(test)]
mod tests;
