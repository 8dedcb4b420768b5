//! Order status classification and the admin-side transition policy.

mod board;
mod registry;

pub use board::{
    BoardStatus, Optimistic, TransitionError, TransitionPlan, can_transition, plan_transition,
};
pub use registry::{
    PrimaryAction, Severity, StatusDescriptor, is_payment_settled, map_status,
    normalize_status_key, resolve_primary_action,
};
