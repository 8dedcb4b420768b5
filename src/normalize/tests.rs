//! Tests for payload normalization.

use super::*;
use crate::domain::FulfillmentType;
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ==================== Extractor tests ====================

#[test]
fn test_lookup_dotted_path() {
    let payload = json!({"invoice": {"bankgiro": "5555-1234"}});
    assert_eq!(
        extract::lookup(&payload, "invoice.bankgiro").and_then(|v| v.as_str()),
        Some("5555-1234")
    );
    assert_eq!(extract::lookup(&payload, "invoice.missing"), None);
}

#[test]
fn test_null_is_absent() {
    let payload = json!({"total": null, "totalCents": 12345});
    let total = extract::pick_money(
        &payload,
        &[
            ("total", extract::MoneyUnit::Major),
            ("totalCents", extract::MoneyUnit::Cents),
        ],
    );
    assert_eq!(total, Some(dec("123.45")));
}

#[test]
fn test_pick_money_first_populated_wins() {
    let payload = json!({"total": "99.90", "totalCents": 5000});
    let total = extract::pick_money(
        &payload,
        &[
            ("total", extract::MoneyUnit::Major),
            ("totalCents", extract::MoneyUnit::Cents),
        ],
    );
    assert_eq!(total, Some(dec("99.90")));
}

#[test]
fn test_datetime_accepts_rfc3339_and_epoch_millis() {
    let payload = json!({
        "a": "2026-03-01T10:00:00Z",
        "b": 1_767_225_600_000_i64,
    });
    assert!(extract::pick_datetime(&payload, &["a"]).is_some());
    assert!(extract::pick_datetime(&payload, &["b"]).is_some());
}

// ==================== Order list tests ====================

#[test]
fn test_list_accepts_bare_array_and_wrappers() {
    let record = json!({"id": "o1", "orderStatus": "RECEIVED"});

    let bare = json!([record.clone()]);
    let wrapped = json!({"orders": [record.clone()]});
    let data = json!({"data": [record.clone()]});
    let results = json!({"results": [record]});

    for payload in [&bare, &wrapped, &data, &results] {
        let orders = normalize_order_list(payload);
        assert_eq!(orders.len(), 1, "payload {:?}", payload);
        assert_eq!(orders[0].id, "o1");
    }
}

#[test]
fn test_list_of_nothing_is_empty() {
    assert!(normalize_order_list(&json!({"message": "no orders"})).is_empty());
    assert!(normalize_order_list(&json!(null)).is_empty());
}

#[test]
fn test_machine_status_wins_over_display_label() {
    let payload = json!({
        "id": "o1",
        "orderStatus": "SHIPPING",
        "displayStatus": "On its way!",
    });
    assert_eq!(normalize_order(&payload).status, "SHIPPING");
}

#[test]
fn test_display_label_used_when_no_machine_status() {
    let payload = json!({"id": "o1", "displayStatus": "ready for pickup"});
    assert_eq!(normalize_order(&payload).status, "READY_FOR_PICKUP");
}

// ==================== Money field tests ====================

#[test]
fn test_cents_fields_divide_by_100() {
    let payload = json!({
        "id": "o1",
        "subtotalCents": 11200,
        "totalCents": 12544,
        "taxCents": 1344,
    });
    let order = normalize_order(&payload);
    assert_eq!(order.totals.subtotal, Some(dec("112")));
    assert_eq!(order.totals.total, Some(dec("125.44")));
    assert_eq!(order.totals.tax, Some(dec("13.44")));
}

#[test]
fn test_snake_case_money_fields() {
    let payload = json!({"id": "o1", "sub_total": 50, "total_cents": 6250});
    let order = normalize_order(&payload);
    assert_eq!(order.totals.subtotal, Some(dec("50")));
    assert_eq!(order.totals.total, Some(dec("62.50")));
}

// ==================== Invoice defaulting tests ====================

#[test]
fn test_invoice_mode_defaults_method_and_status() {
    let payload = json!({
        "id": "o1",
        "paymentMode": "INVOICE_PAY_LATER",
        "invoice": {"number": "INV-101", "bankgiro": "5555-1234"},
    });
    let order = normalize_order(&payload);

    assert_eq!(order.payment_method.as_deref(), Some("Invoice"));
    assert_eq!(order.payment_status.as_deref(), Some("UNPAID"));
    assert_eq!(order.invoice_number.as_deref(), Some("INV-101"));
    assert_eq!(order.bankgiro.as_deref(), Some("5555-1234"));
}

#[test]
fn test_invoice_defaults_never_override_explicit_values() {
    let payload = json!({
        "id": "o1",
        "paymentMode": "invoice pay later",
        "paymentMethod": "Card",
        "paymentStatus": "PAID",
    });
    let order = normalize_order(&payload);

    assert_eq!(order.payment_method.as_deref(), Some("Card"));
    assert_eq!(order.payment_status.as_deref(), Some("PAID"));
}

#[test]
fn test_non_invoice_orders_stay_blank() {
    let payload = json!({"id": "o1", "paymentMode": "PAY_NOW"});
    let order = normalize_order(&payload);
    assert_eq!(order.payment_method, None);
    assert_eq!(order.payment_status, None);
}

// ==================== Envelope and field mapping tests ====================

#[test]
fn test_single_order_envelopes() {
    let record = json!({"id": "o1", "orderStatus": "RECEIVED"});
    for payload in [
        json!({"order": record.clone()}),
        json!({"data": record.clone()}),
        record,
    ] {
        assert_eq!(normalize_order(&payload).id, "o1");
    }
}

#[test]
fn test_order_fields_map_from_snake_case() {
    let payload = json!({
        "order_id": "o9",
        "order_number": "1009",
        "order_status": "pending payment",
        "payment_status": "unpaid",
        "fulfillment_type": "pickup",
        "tracking_number": "TRK-1",
        "customer_note": "ring the bell",
        "created_at": "2026-02-01T08:30:00Z",
    });
    let order = normalize_order(&payload);

    assert_eq!(order.id, "o9");
    assert_eq!(order.order_number, "1009");
    assert_eq!(order.status, "PENDING_PAYMENT");
    assert_eq!(order.payment_status.as_deref(), Some("UNPAID"));
    assert_eq!(order.fulfillment, FulfillmentType::Pickup);
    assert_eq!(order.tracking_reference.as_deref(), Some("TRK-1"));
    assert_eq!(order.customer_note.as_deref(), Some("ring the bell"));
    assert!(order.created_at.is_some());
}

#[test]
fn test_order_number_falls_back_to_id() {
    let order = normalize_order(&json!({"id": "o1"}));
    assert_eq!(order.order_number, "o1");
}

#[test]
fn test_timeline_events_normalize_statuses() {
    let payload = json!({
        "id": "o1",
        "statusHistory": [
            {"status": "received", "timestamp": "2026-02-01T08:00:00Z"},
            {"status": "preparing", "note": "started"},
        ],
    });
    let order = normalize_order(&payload);

    assert_eq!(order.timeline.len(), 2);
    assert_eq!(order.timeline[0].status, "RECEIVED");
    assert!(order.timeline[0].at.is_some());
    assert_eq!(order.timeline[1].note.as_deref(), Some("started"));
}

// ==================== Idempotence tests ====================

#[test]
fn test_normalize_order_is_idempotent() {
    let payload = json!({
        "order_id": "o42",
        "number": "1042",
        "status": "payment failed",
        "payment_mode": "INVOICE_PAY_LATER",
        "invoice": {"number": "INV-7", "bankgiro": "123-4567"},
        "delivery_method": "pickup",
        "subtotalCents": 11200,
        "tax": 13.44,
        "items": [
            {"item_id": "l1", "product_id": "p1", "qty": 2, "priceCents": 5600}
        ],
        "created_at": "2026-02-01T08:30:00Z",
        "shipping_address": {"street": "Storgatan 1", "city": "Umeå"},
        "statusHistory": [{"status": "received", "timestamp": "2026-02-01T08:00:00Z"}],
    });

    let once = normalize_order(&payload);
    let reserialized = serde_json::to_value(&once).unwrap();
    let twice = normalize_order(&reserialized);

    assert_eq!(once, twice);
}

#[test]
fn test_normalize_cart_is_idempotent() {
    let payload = json!({
        "cart": {
            "cart_id": "c1",
            "session_id": "s1",
            "state": "open",
            "line_items": [
                {"id": "l1", "productId": "p1", "quantity": 2, "unit_price": 56}
            ],
        }
    });

    let once = normalize_cart(&payload);
    let reserialized = serde_json::to_value(&once).unwrap();
    let twice = normalize_cart(&reserialized);

    assert_eq!(once, twice);
}

// ==================== Cart normalization tests ====================

#[test]
fn test_cart_derives_subtotal_and_total_from_lines() {
    let payload = json!({
        "cartId": "c1",
        "sessionId": "s1",
        "status": "OPEN",
        "items": [
            {"id": "l1", "productId": "p1", "quantity": 2, "unitPrice": 56},
            {"id": "l2", "productId": "p2", "quantity": 1, "unitPrice": 10,
             "discountedUnitPrice": 8},
        ],
        "shipping": 49,
    });
    let cart = normalize_cart(&payload);

    assert_eq!(cart.totals.subtotal, Some(dec("120")));
    assert_eq!(cart.totals.total, Some(dec("169")));
}

#[test]
fn test_cart_never_overwrites_nonzero_backend_totals() {
    let payload = json!({
        "cartId": "c1",
        "sessionId": "s1",
        "subtotal": 999,
        "total": 1048,
        "items": [
            {"id": "l1", "productId": "p1", "quantity": 2, "unitPrice": 56}
        ],
    });
    let cart = normalize_cart(&payload);

    assert_eq!(cart.totals.subtotal, Some(dec("999")));
    assert_eq!(cart.totals.total, Some(dec("1048")));
}

#[test]
fn test_cart_backend_line_total_override_wins() {
    let payload = json!({
        "cartId": "c1",
        "sessionId": "s1",
        "items": [
            {"id": "l1", "productId": "p1", "quantity": 2, "unitPrice": 56,
             "discountedLineTotal": 100}
        ],
    });
    let cart = normalize_cart(&payload);
    assert_eq!(cart.totals.subtotal, Some(dec("100")));
}

#[test]
fn test_cart_unknown_status_is_closed() {
    let payload = json!({"cartId": "c1", "sessionId": "s1", "status": "ARCHIVED"});
    assert!(!normalize_cart(&payload).is_open());
}

#[test]
fn test_cart_capped_quantity_respects_stock() {
    let payload = json!({
        "cartId": "c1",
        "sessionId": "s1",
        "items": [
            {"id": "l1", "productId": "p1", "quantity": 5, "unitPrice": 10,
             "availableStock": 3}
        ],
    });
    let cart = normalize_cart(&payload);
    assert_eq!(cart.items[0].quantity, 5);
    assert_eq!(cart.items[0].capped_quantity(), 3);
}
