//! Normalization of heterogeneous backend payloads into the canonical model.
//!
//! The backend is not under this client's control: the same logical field
//! arrives under snake_case or camelCase names, and money arrives either in
//! major units or in cents under a `*Cents` suffix. Every tolerated spelling
//! lives in an explicit ordered candidate list here, so the compatibility
//! contract stays auditable instead of being scattered through conditionals.

mod cart;
pub mod extract;
mod order;

pub use cart::normalize_cart;
pub use order::{normalize_order, normalize_order_list};

#[cfg(test)]
mod tests;
