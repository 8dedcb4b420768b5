//! Admin-side order state machine over the board statuses.

use thiserror::Error;

use crate::domain::Order;

use super::registry::{is_payment_settled, normalize_status_key};

/// Order statuses usable as board columns in the admin view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardStatus {
    Received,
    Preparing,
    Shipping,
    ReadyForPickup,
    Delivered,
    Cancelled,
    CancelledByCustomer,
}

impl BoardStatus {
    /// Parses a raw status string into a board status, when it is one.
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_status_key(raw).as_str() {
            "RECEIVED" | "NEW" | "CREATED" => Some(BoardStatus::Received),
            "PREPARING" | "PROCESSING" | "IN_PROGRESS" => Some(BoardStatus::Preparing),
            "SHIPPING" | "SHIPPED" | "IN_TRANSIT" => Some(BoardStatus::Shipping),
            "READY_FOR_PICKUP" => Some(BoardStatus::ReadyForPickup),
            "DELIVERED" | "COMPLETED" => Some(BoardStatus::Delivered),
            "CANCELLED" | "CANCELED" => Some(BoardStatus::Cancelled),
            "CANCELLED_BY_CUSTOMER" | "CANCELED_BY_CUSTOMER" => {
                Some(BoardStatus::CancelledByCustomer)
            }
            _ => None,
        }
    }

    /// Canonical status key sent back to the backend.
    pub fn key(&self) -> &'static str {
        match self {
            BoardStatus::Received => "RECEIVED",
            BoardStatus::Preparing => "PREPARING",
            BoardStatus::Shipping => "SHIPPING",
            BoardStatus::ReadyForPickup => "READY_FOR_PICKUP",
            BoardStatus::Delivered => "DELIVERED",
            BoardStatus::Cancelled => "CANCELLED",
            BoardStatus::CancelledByCustomer => "CANCELLED_BY_CUSTOMER",
        }
    }

    /// Terminal statuses permit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BoardStatus::Delivered | BoardStatus::Cancelled | BoardStatus::CancelledByCustomer
        )
    }
}

/// Transition rejection reasons.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// Customer-cancelled orders accept no edits at all.
    #[error("order was cancelled by the customer and is read-only")]
    ReadOnly,

    #[error("transition {from} -> {to} is not allowed")]
    Illegal { from: &'static str, to: &'static str },
}

/// An approved transition, possibly demanding a human confirmation first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionPlan {
    pub from: BoardStatus,
    pub to: BoardStatus,
    /// True when the move would mark an unpaid order as delivered. The caller
    /// must obtain an explicit confirmation before applying the plan.
    pub requires_payment_confirmation: bool,
}

/// Decides whether moving `order` from one board column to another is legal.
pub fn can_transition(from: BoardStatus, to: BoardStatus, order: &Order) -> bool {
    plan_transition(from, to, order).is_ok()
}

/// Like [`can_transition`], but returns the plan or the rejection reason.
///
/// Rules:
/// - customer-cancelled orders are read-only, even for identity saves;
/// - the identity transition is a legal no-op save;
/// - from PREPARING the forward target is fixed by the fulfillment type;
/// - CANCELLED is reachable only through backend events, never manually;
/// - otherwise the adjacency table applies, with DELIVERED terminal.
pub fn plan_transition(
    from: BoardStatus,
    to: BoardStatus,
    order: &Order,
) -> Result<TransitionPlan, TransitionError> {
    if order_is_read_only(order) || from == BoardStatus::CancelledByCustomer {
        return Err(TransitionError::ReadOnly);
    }

    let legal = if from == to {
        true
    } else {
        match from {
            BoardStatus::Received => to == BoardStatus::Preparing,
            BoardStatus::Preparing => {
                if order.fulfillment.is_pickup() {
                    to == BoardStatus::ReadyForPickup
                } else {
                    to == BoardStatus::Shipping
                }
            }
            BoardStatus::Shipping | BoardStatus::ReadyForPickup => to == BoardStatus::Delivered,
            BoardStatus::Delivered | BoardStatus::Cancelled | BoardStatus::CancelledByCustomer => {
                false
            }
        }
    };

    if !legal {
        return Err(TransitionError::Illegal {
            from: from.key(),
            to: to.key(),
        });
    }

    Ok(TransitionPlan {
        from,
        to,
        requires_payment_confirmation: to == BoardStatus::Delivered && !order_is_paid(order),
    })
}

fn order_is_read_only(order: &Order) -> bool {
    normalize_status_key(&order.status) == "CANCELLED_BY_CUSTOMER"
}

fn order_is_paid(order: &Order) -> bool {
    order
        .payment_status
        .as_deref()
        .map(is_payment_settled)
        .unwrap_or(false)
}

/// Explicit optimistic-update pair: apply `pending`, await the backend, then
/// either commit server truth or restore `previous` deterministically.
#[derive(Debug)]
pub struct Optimistic<T: Clone> {
    previous: T,
    pending: T,
}

impl<T: Clone> Optimistic<T> {
    /// Captures the pre-transition snapshot alongside the optimistic state.
    pub fn begin(previous: T, pending: T) -> Self {
        Self { previous, pending }
    }

    /// The optimistic state to show while the request is in flight.
    pub fn pending(&self) -> &T {
        &self.pending
    }

    /// The snapshot taken before the transition.
    pub fn previous(&self) -> &T {
        &self.previous
    }

    /// Resolves with the server's authoritative state.
    pub fn commit(self, server_truth: T) -> T {
        server_truth
    }

    /// Resolves by restoring the pre-transition snapshot.
    pub fn rollback(self) -> T {
        self.previous
    }
}
