//! Cart payload normalization.

use rust_decimal::Decimal;
use serde_json::Value;

use crate::domain::{Cart, CartLineItem, CartStatus, Totals};

use super::extract::{MoneyUnit, lookup, pick_array, pick_i64, pick_money, pick_str};
use super::order::normalize_totals;

/// Normalizes a cart payload, unwrapping `{cart: {...}}` and `{data: {...}}`
/// envelopes. Subtotal and total are derived from line items when the backend
/// omits them; a nonzero backend value always wins over derivation.
pub fn normalize_cart(payload: &Value) -> Cart {
    let record = ["cart", "data"]
        .iter()
        .find_map(|key| lookup(payload, key).filter(|v| v.is_object()))
        .unwrap_or(payload);

    let items: Vec<CartLineItem> = pick_array(
        record,
        &["items", "lineItems", "line_items", "lines"],
    )
    .map(|arr| arr.iter().map(normalize_line_item).collect())
    .unwrap_or_default();

    let status = pick_str(record, &["status", "cartStatus", "cart_status", "state"])
        .map(|s| CartStatus::parse(&s))
        .unwrap_or(CartStatus::Open);

    let totals = derive_totals(normalize_totals(record), &items);

    Cart {
        cart_id: pick_str(record, &["cartId", "cart_id", "id"]).unwrap_or_default(),
        session_id: pick_str(record, &["sessionId", "session_id", "session"]).unwrap_or_default(),
        status,
        items,
        totals,
    }
}

fn normalize_line_item(record: &Value) -> CartLineItem {
    let product_id =
        pick_str(record, &["productId", "product_id", "sku"]).unwrap_or_default();

    CartLineItem {
        id: pick_str(record, &["id", "itemId", "item_id", "lineId", "line_id"])
            .unwrap_or_else(|| product_id.clone()),
        product_id,
        variant_id: pick_str(record, &["variantId", "variant_id"]),
        name: pick_str(record, &["name", "title", "productName", "product_name"]),
        quantity: pick_i64(record, &["quantity", "qty"]).unwrap_or(0).max(0),
        unit_price: pick_money(
            record,
            &[
                ("unitPrice", MoneyUnit::Major),
                ("unit_price", MoneyUnit::Major),
                ("price", MoneyUnit::Major),
                ("unitPriceCents", MoneyUnit::Cents),
                ("unit_price_cents", MoneyUnit::Cents),
                ("priceCents", MoneyUnit::Cents),
            ],
        )
        .unwrap_or_default(),
        discounted_unit_price: pick_money(
            record,
            &[
                ("discountedUnitPrice", MoneyUnit::Major),
                ("discounted_unit_price", MoneyUnit::Major),
                ("discountPrice", MoneyUnit::Major),
                ("discountedUnitPriceCents", MoneyUnit::Cents),
            ],
        ),
        line_total: pick_money(
            record,
            &[
                ("lineTotal", MoneyUnit::Major),
                ("line_total", MoneyUnit::Major),
                ("lineTotalCents", MoneyUnit::Cents),
            ],
        ),
        discounted_line_total: pick_money(
            record,
            &[
                ("discountedLineTotal", MoneyUnit::Major),
                ("discounted_line_total", MoneyUnit::Major),
                ("discountedLineTotalCents", MoneyUnit::Cents),
            ],
        ),
        available_stock: pick_i64(
            record,
            &["availableStock", "available_stock", "stock", "inventory"],
        ),
    }
}

/// Fills missing or zero subtotal/total from the line items. Derived values
/// never replace a nonzero backend amount.
fn derive_totals(mut totals: Totals, items: &[CartLineItem]) -> Totals {
    let derived_subtotal: Decimal = items.iter().map(CartLineItem::resolved_line_total).sum();

    if totals.subtotal.unwrap_or_default().is_zero() {
        totals.subtotal = Some(derived_subtotal);
    }

    if totals.total.unwrap_or_default().is_zero() {
        let subtotal = totals.subtotal.unwrap_or(derived_subtotal);
        totals.total = Some(subtotal + totals.shipping.unwrap_or_default());
    }

    totals
}
