//! Static classification of backend status strings.
//!
//! The mapping table below is the single source of truth: every known status
//! alias normalizes to one key, and each key carries exactly one customer
//! "primary action". Unknown statuses degrade to a pending-confirmation
//! descriptor; a backend we do not control must never crash the client.

/// UI severity of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Info,
    Danger,
    Neutral,
}

/// The single action a customer may take for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    /// Pay an order that is awaiting payment.
    Pay,
    /// Retry a failed payment.
    RetryPayment,
    /// Open the order detail page.
    ViewOrder,
    /// Follow the shipment.
    TrackOrder,
    /// Open the receipt.
    ViewReceipt,
    /// No action offered (cancelled orders must never expose payment actions).
    None,
}

/// Value object describing one status. Never persisted; always recomputed
/// from the raw backend string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDescriptor {
    /// Normalized status key.
    pub key: &'static str,
    /// Human label.
    pub label: &'static str,
    pub severity: Severity,
    pub primary_action: PrimaryAction,
}

const fn descriptor(
    key: &'static str,
    label: &'static str,
    severity: Severity,
    primary_action: PrimaryAction,
) -> StatusDescriptor {
    StatusDescriptor {
        key,
        label,
        severity,
        primary_action,
    }
}

/// Fallback for anything the registry does not know.
const PENDING_CONFIRMATION: StatusDescriptor = descriptor(
    "PENDING_CONFIRMATION",
    "Awaiting confirmation",
    Severity::Warning,
    PrimaryAction::ViewOrder,
);

const CANCELLED: StatusDescriptor =
    descriptor("CANCELLED", "Cancelled", Severity::Neutral, PrimaryAction::None);

/// Normalizes a raw status string: trim, uppercase, collapse every run of
/// whitespace, hyphens, and underscores into a single underscore.
///
/// `"payment failed"`, `"PAYMENT-FAILED"`, and `"PAYMENT_FAILED"` all map to
/// `PAYMENT_FAILED`.
pub fn normalize_status_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for c in raw.trim().chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = !key.is_empty();
        } else {
            if pending_separator {
                key.push('_');
                pending_separator = false;
            }
            for upper in c.to_uppercase() {
                key.push(upper);
            }
        }
    }
    key
}

/// Maps a raw backend status string to its descriptor.
pub fn map_status(raw: &str) -> StatusDescriptor {
    match normalize_status_key(raw).as_str() {
        "RECEIVED" | "NEW" | "CREATED" => {
            descriptor("RECEIVED", "Received", Severity::Info, PrimaryAction::ViewOrder)
        }
        "PENDING_CONFIRMATION" => PENDING_CONFIRMATION,
        "PENDING_PAYMENT" | "AWAITING_PAYMENT" | "PAYMENT_PENDING" => descriptor(
            "PENDING_PAYMENT",
            "Awaiting payment",
            Severity::Warning,
            PrimaryAction::Pay,
        ),
        "UNPAID" => descriptor("UNPAID", "Unpaid", Severity::Warning, PrimaryAction::Pay),
        "PAYMENT_FAILED" | "FAILED" => descriptor(
            "PAYMENT_FAILED",
            "Failed",
            Severity::Danger,
            PrimaryAction::RetryPayment,
        ),
        "PAID" | "PAYMENT_COMPLETED" => {
            descriptor("PAID", "Paid", Severity::Success, PrimaryAction::ViewReceipt)
        }
        "PREPARING" | "PROCESSING" | "IN_PROGRESS" => {
            descriptor("PREPARING", "Preparing", Severity::Info, PrimaryAction::ViewOrder)
        }
        "SHIPPING" | "SHIPPED" | "IN_TRANSIT" => {
            descriptor("SHIPPING", "Shipping", Severity::Info, PrimaryAction::TrackOrder)
        }
        "READY_FOR_PICKUP" => descriptor(
            "READY_FOR_PICKUP",
            "Ready for pickup",
            Severity::Info,
            PrimaryAction::ViewOrder,
        ),
        "DELIVERED" => descriptor(
            "DELIVERED",
            "Delivered",
            Severity::Success,
            PrimaryAction::ViewReceipt,
        ),
        "COMPLETED" => descriptor(
            "COMPLETED",
            "Completed",
            Severity::Success,
            PrimaryAction::ViewReceipt,
        ),
        // Distinct key, same descriptor content as CANCELLED: a customer
        // cancellation must never surface a retry-payment action.
        "CANCELLED_BY_CUSTOMER" | "CANCELED_BY_CUSTOMER" => descriptor(
            "CANCELLED_BY_CUSTOMER",
            CANCELLED.label,
            CANCELLED.severity,
            CANCELLED.primary_action,
        ),
        "CANCELLED" | "CANCELED" => CANCELLED,
        "REFUNDED" => descriptor(
            "REFUNDED",
            "Refunded",
            Severity::Neutral,
            PrimaryAction::ViewReceipt,
        ),
        _ => PENDING_CONFIRMATION,
    }
}

/// Resolves the action to actually offer: track-order links are downgraded to
/// view-order when no tracking reference exists, so the UI never dead-ends.
pub fn resolve_primary_action(descriptor: &StatusDescriptor, has_tracking: bool) -> PrimaryAction {
    match descriptor.primary_action {
        PrimaryAction::TrackOrder if !has_tracking => PrimaryAction::ViewOrder,
        action => action,
    }
}

/// True when a payment status string means the order is commercially settled.
pub fn is_payment_settled(raw: &str) -> bool {
    matches!(
        normalize_status_key(raw).as_str(),
        "PAID" | "PAYMENT_COMPLETED" | "REFUNDED"
    )
}
