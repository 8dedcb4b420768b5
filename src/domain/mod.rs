//! Canonical data model for carts, orders, and pricing tiers.

mod cart;
mod order;
mod tier;
mod totals;

pub use cart::{Cart, CartIdentity, CartLineItem, CartStatus};
pub use order::{Address, FulfillmentType, Order, OrderItem, TimelineEvent};
pub use tier::PricingTier;
pub use totals::Totals;
