//! Order payload normalization.

use serde_json::Value;

use crate::domain::{Address, FulfillmentType, Order, OrderItem, TimelineEvent, Totals};
use crate::status::normalize_status_key;

use super::extract::{
    MoneyUnit, lookup, pick_array, pick_datetime, pick_i64, pick_money, pick_str,
};

/// Machine status wins over any human display label.
const STATUS_CANDIDATES: &[&str] = &[
    "orderStatus",
    "order_status",
    "status",
    "displayStatus",
    "display_status",
];

/// Wrapper keys a list payload may hide its array under.
const LIST_WRAPPERS: &[&str] = &["orders", "data", "items", "results"];

/// Normalizes a list payload: either a bare array or any documented wrapper.
pub fn normalize_order_list(payload: &Value) -> Vec<Order> {
    let records = payload
        .as_array()
        .or_else(|| pick_array(payload, LIST_WRAPPERS));

    match records {
        Some(records) => records.iter().map(normalize_record).collect(),
        None => Vec::new(),
    }
}

/// Normalizes a single order payload, unwrapping `{order: {...}}` and
/// `{data: {...}}` envelopes. Idempotent over its own output.
pub fn normalize_order(payload: &Value) -> Order {
    let record = ["order", "data"]
        .iter()
        .find_map(|key| lookup(payload, key).filter(|v| v.is_object()))
        .unwrap_or(payload);

    normalize_record(record)
}

fn normalize_record(record: &Value) -> Order {
    let id = pick_str(record, &["id", "orderId", "order_id"]);
    let order_number = pick_str(record, &["orderNumber", "order_number", "number"]);

    let status = pick_str(record, STATUS_CANDIDATES)
        .map(|s| normalize_status_key(&s))
        .unwrap_or_else(|| "PENDING_CONFIRMATION".to_string());

    let mut payment_status = pick_str(record, &["paymentStatus", "payment_status", "payment.status"])
        .map(|s| normalize_status_key(&s));
    let mut payment_method =
        pick_str(record, &["paymentMethod", "payment_method", "payment.method"]);
    let payment_mode = pick_str(record, &["paymentMode", "payment_mode", "paymentOption"])
        .map(|s| normalize_status_key(&s));

    let invoice_number = pick_str(
        record,
        &["invoiceNumber", "invoice_number", "invoice.number", "invoice.invoiceNumber"],
    );
    let bankgiro = pick_str(
        record,
        &["bankgiro", "bankGiro", "bank_giro", "invoice.bankgiro", "invoice.bankGiro"],
    );

    // Invoice orders pay later: an absent method/status must read as an
    // unpaid invoice, never as blank.
    let is_invoice_mode = payment_mode
        .as_deref()
        .map(|m| m.contains("INVOICE"))
        .unwrap_or(false);
    if is_invoice_mode {
        payment_method.get_or_insert_with(|| "Invoice".to_string());
        payment_status.get_or_insert_with(|| "UNPAID".to_string());
    }

    let fulfillment = pick_str(
        record,
        &[
            "fulfillmentType",
            "fulfillment_type",
            "deliveryMethod",
            "delivery_method",
            "shippingMethod",
        ],
    )
    .map(|s| FulfillmentType::parse(&s))
    .unwrap_or(FulfillmentType::Shipping);

    let items = pick_array(
        record,
        &["items", "orderItems", "order_items", "lines", "lineItems", "line_items"],
    )
    .map(|arr| arr.iter().map(normalize_order_item).collect())
    .unwrap_or_default();

    Order {
        id: id.clone().or_else(|| order_number.clone()).unwrap_or_default(),
        order_number: order_number.or(id).unwrap_or_default(),
        status,
        payment_status,
        payment_method,
        payment_reference: pick_str(
            record,
            &["paymentReference", "payment_reference", "paymentRef", "payment.reference"],
        ),
        payment_mode,
        invoice_number,
        bankgiro,
        fulfillment,
        totals: normalize_totals(record),
        items,
        created_at: pick_datetime(record, &["createdAt", "created_at", "created"]),
        updated_at: pick_datetime(record, &["updatedAt", "updated_at", "updated"]),
        shipping_address: normalize_address(record),
        customer_note: pick_str(record, &["customerNote", "customer_note", "note", "comment"]),
        tracking_reference: pick_str(
            record,
            &["trackingReference", "tracking_reference", "trackingNumber", "tracking_number"],
        ),
        timeline: normalize_timeline(record),
    }
}

/// Shared totals mapping for orders and carts. Cents variants are listed
/// after their major-unit spellings; the first populated candidate wins.
pub(super) fn normalize_totals(record: &Value) -> Totals {
    Totals {
        currency: pick_str(record, &["totals.currency", "currency", "currencyCode"])
            .unwrap_or_else(|| "SEK".to_string()),
        subtotal: pick_money(
            record,
            &[
                ("totals.subtotal", MoneyUnit::Major),
                ("subtotal", MoneyUnit::Major),
                ("sub_total", MoneyUnit::Major),
                ("subtotalCents", MoneyUnit::Cents),
                ("subtotal_cents", MoneyUnit::Cents),
            ],
        ),
        shipping: pick_money(
            record,
            &[
                ("totals.shipping", MoneyUnit::Major),
                ("shipping", MoneyUnit::Major),
                ("shippingCost", MoneyUnit::Major),
                ("shipping_cost", MoneyUnit::Major),
                ("shippingCents", MoneyUnit::Cents),
                ("shipping_cents", MoneyUnit::Cents),
            ],
        ),
        tax: pick_money(
            record,
            &[
                ("totals.tax", MoneyUnit::Major),
                ("tax", MoneyUnit::Major),
                ("vat", MoneyUnit::Major),
                ("vatAmount", MoneyUnit::Major),
                ("taxCents", MoneyUnit::Cents),
                ("tax_cents", MoneyUnit::Cents),
            ],
        ),
        discount: pick_money(
            record,
            &[
                ("totals.discount", MoneyUnit::Major),
                ("discount", MoneyUnit::Major),
                ("discountTotal", MoneyUnit::Major),
                ("discountCents", MoneyUnit::Cents),
                ("discount_cents", MoneyUnit::Cents),
            ],
        ),
        total: pick_money(
            record,
            &[
                ("totals.total", MoneyUnit::Major),
                ("total", MoneyUnit::Major),
                ("grandTotal", MoneyUnit::Major),
                ("totalAmount", MoneyUnit::Major),
                ("totalCents", MoneyUnit::Cents),
                ("total_cents", MoneyUnit::Cents),
            ],
        ),
    }
}

fn normalize_order_item(record: &Value) -> OrderItem {
    let product_id = pick_str(record, &["productId", "product_id", "sku"]);

    OrderItem {
        id: pick_str(record, &["id", "itemId", "item_id", "lineId", "line_id"])
            .or_else(|| product_id.clone())
            .unwrap_or_default(),
        product_id,
        name: pick_str(record, &["name", "title", "productName", "product_name"]),
        quantity: pick_i64(record, &["quantity", "qty"]).unwrap_or(1),
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
        ),
        line_total: pick_money(
            record,
            &[
                ("lineTotal", MoneyUnit::Major),
                ("line_total", MoneyUnit::Major),
                ("total", MoneyUnit::Major),
                ("lineTotalCents", MoneyUnit::Cents),
                ("total_cents", MoneyUnit::Cents),
            ],
        ),
    }
}

fn normalize_address(record: &Value) -> Option<Address> {
    let address = ["shippingAddress", "shipping_address", "address"]
        .iter()
        .find_map(|key| lookup(record, key).filter(|v| v.is_object()))?;

    Some(Address {
        name: pick_str(address, &["name", "recipient", "fullName", "full_name"]),
        street: pick_str(address, &["street", "address1", "line1", "streetAddress"]),
        postal_code: pick_str(address, &["postalCode", "postal_code", "zip", "zipCode"]),
        city: pick_str(address, &["city", "town"]),
        country: pick_str(address, &["country", "countryCode", "country_code"]),
    })
}

fn normalize_timeline(record: &Value) -> Vec<TimelineEvent> {
    let events = pick_array(
        record,
        &["timeline", "statusHistory", "status_history", "events", "history"],
    );

    match events {
        Some(events) => events
            .iter()
            .map(|event| TimelineEvent {
                status: pick_str(event, STATUS_CANDIDATES)
                    .map(|s| normalize_status_key(&s))
                    .unwrap_or_default(),
                at: pick_datetime(event, &["at", "timestamp", "createdAt", "created_at"]),
                note: pick_str(event, &["note", "comment", "message"]),
            })
            .collect(),
        None => Vec::new(),
    }
}
