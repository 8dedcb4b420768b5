//! CartSession: owns the lifetime of one cart.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::{Cart, CartIdentity, Order};
use crate::normalize::{normalize_cart, normalize_order};
use crate::store::KeyValueStore;

use super::{CartBackend, CartError, Result};

/// Storage key for the persisted identity pair.
const IDENTITY_KEY: &str = "cart.identity";

/// Session lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Bootstrapping,
    Ready,
}

/// Soft notice emitted when the backend adjusted a requested quantity,
/// typically because stock changed server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityAdjusted {
    pub item_id: String,
    pub requested: i64,
    pub applied: i64,
}

/// Result of a successful cart mutation. The new cart snapshot is available
/// through [`CartSession::cart`]; the notice, when present, should surface as
/// a non-blocking warning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MutationOutcome {
    pub notice: Option<QuantityAdjusted>,
}

/// CartSession tracks one customer's cart: bootstrap and recovery, line item
/// mutations with single-flight guarding, checkout handoff, and persistence
/// of the identity pair.
///
/// Every successful mutation response replaces the whole local cart with the
/// server's cart; local state is never patched, so it cannot drift. Failed
/// mutations leave the pre-failure cart authoritative. Cancellation is
/// dropping the future: the session spawns no detached tasks, and a dropped
/// mutation releases its single-flight marker through [`PendingGuard`].
pub struct CartSession {
    backend: Arc<dyn CartBackend>,
    store: Arc<dyn KeyValueStore>,
    state: SessionState,
    cart: Option<Cart>,
    pending: Arc<Mutex<HashSet<String>>>,
}

impl CartSession {
    pub fn new(backend: Arc<dyn CartBackend>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            store,
            state: SessionState::Uninitialized,
            cart: None,
            pending: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The current cart snapshot, once bootstrapped.
    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    /// True while a mutation for this line-item or product key is in flight;
    /// the triggering control should be disabled rather than re-submitted.
    pub fn is_pending(&self, key: &str) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(key)
    }

    /// Converges the session to a usable cart: fetch the persisted one if an
    /// identity pair exists, otherwise (or when that fetch fails) clear the
    /// stale pair and create a brand-new cart.
    pub async fn bootstrap(&mut self) -> Result<()> {
        self.state = SessionState::Bootstrapping;

        let bootstrapped = match self.load_identity().await? {
            Some(identity) => match self.backend.fetch_cart(&identity).await {
                Ok(payload) => self.install_cart(payload).await,
                Err(e) => {
                    warn!(error = %e, cart_id = %identity.cart_id,
                        "persisted cart unusable, starting a new one");
                    self.store.remove(IDENTITY_KEY).await?;
                    self.create_new_cart().await
                }
            },
            None => self.create_new_cart().await,
        };

        match bootstrapped {
            Ok(()) => {
                self.state = SessionState::Ready;
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Uninitialized;
                Err(e)
            }
        }
    }

    /// Adds a product (or variant) to the cart.
    pub async fn add_item(
        &mut self,
        product_or_variant_id: &str,
        quantity: i64,
    ) -> Result<MutationOutcome> {
        let identity = self.ensure_open()?;
        let _guard = self.begin_mutation(product_or_variant_id)?;

        let result = self
            .backend
            .add_item(&identity, product_or_variant_id, quantity)
            .await;

        let payload = self.check_mutation(result).await?;
        self.reconcile(payload, LineKey::Product(product_or_variant_id), quantity)
            .await
    }

    /// Sets the quantity of a line item. A quantity of zero or less removes
    /// the line.
    pub async fn update_item_quantity(
        &mut self,
        item_id: &str,
        quantity: i64,
    ) -> Result<MutationOutcome> {
        if quantity <= 0 {
            return self.remove_item(item_id).await;
        }

        let identity = self.ensure_open()?;
        let cart = self.cart.as_ref().ok_or(CartError::CartClosed)?;
        if cart.line(item_id).is_none() {
            return Err(CartError::ItemNotFound(item_id.to_string()));
        }

        let _guard = self.begin_mutation(item_id)?;

        let result = self.backend.update_item(&identity, item_id, quantity).await;

        let payload = self.check_mutation(result).await?;
        self.reconcile(payload, LineKey::Item(item_id), quantity).await
    }

    /// Removes a line item.
    pub async fn remove_item(&mut self, item_id: &str) -> Result<MutationOutcome> {
        let identity = self.ensure_open()?;
        let _guard = self.begin_mutation(item_id)?;

        let result = self.backend.remove_item(&identity, item_id).await;

        let payload = self.check_mutation(result).await?;
        self.install_cart(payload).await?;
        Ok(MutationOutcome::default())
    }

    /// Hands the cart off to checkout and returns the created order. Fails
    /// fast when no identity pair exists; a successful checkout consumes the
    /// session.
    pub async fn checkout(&mut self, payload: &Value) -> Result<Order> {
        let identity = match self.current_identity() {
            Some(identity) => identity,
            None => return Err(CartError::MissingIdentity),
        };

        let result = self.backend.checkout(&identity, payload).await;
        let response = self.check_mutation(result).await?;
        let order = normalize_order(&response);

        info!(order_id = %order.id, "checkout complete");

        self.store.remove(IDENTITY_KEY).await?;
        self.cart = None;
        self.state = SessionState::Uninitialized;

        Ok(order)
    }

    /// Tears the session down: clears the persisted pair and local state.
    /// Called on logout or an explicit "start a new cart".
    pub async fn reset(&mut self) -> Result<()> {
        self.store.remove(IDENTITY_KEY).await?;
        self.cart = None;
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.state = SessionState::Uninitialized;
        Ok(())
    }

    async fn create_new_cart(&mut self) -> Result<()> {
        let payload = self.backend.create_cart().await?;
        self.install_cart(payload).await
    }

    /// Replaces the local cart with the server's cart, persisting the
    /// identity pair whenever the response yields both fields.
    async fn install_cart(&mut self, payload: Value) -> Result<()> {
        let cart = normalize_cart(&payload);

        if let Some(identity) = cart.identity() {
            let serialized = serde_json::to_string(&identity)?;
            self.store.set(IDENTITY_KEY, &serialized).await?;
        }

        debug!(cart_id = %cart.cart_id, items = cart.items.len(), "cart snapshot replaced");
        self.cart = Some(cart);
        Ok(())
    }

    async fn load_identity(&self) -> Result<Option<CartIdentity>> {
        let raw = self.store.get(IDENTITY_KEY).await?;
        // A corrupt value is the same as no value; bootstrap recovers.
        Ok(raw.and_then(|json| serde_json::from_str(&json).ok()))
    }

    fn current_identity(&self) -> Option<CartIdentity> {
        self.cart.as_ref().and_then(Cart::identity)
    }

    /// Local guard: mutations on a cart that is not open never reach the
    /// network; the UI should offer "start a new cart" instead.
    fn ensure_open(&self) -> Result<CartIdentity> {
        match self.cart.as_ref() {
            Some(cart) if cart.is_open() => {
                cart.identity().ok_or(CartError::MissingIdentity)
            }
            _ => Err(CartError::CartClosed),
        }
    }

    /// Single-flight marker per logical line key. The returned guard must be
    /// held across the backend await; it releases the key on drop, so an
    /// abandoned mutation never blocks later ones on the same line.
    fn begin_mutation(&self, key: &str) -> Result<PendingGuard> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if !pending.insert(key.to_string()) {
            return Err(CartError::MutationInFlight(key.to_string()));
        }
        Ok(PendingGuard {
            pending: Arc::clone(&self.pending),
            key: key.to_string(),
        })
    }

    /// Converts a mutation result, clearing the persisted pair when the
    /// backend says the cart no longer exists. Other failures leave local
    /// state untouched; the pre-failure cart stays authoritative.
    async fn check_mutation(
        &mut self,
        result: std::result::Result<Value, crate::api::ApiClientError>,
    ) -> Result<Value> {
        match result {
            Ok(payload) => Ok(payload),
            Err(e) => {
                if matches!(e.status(), Some(404) | Some(410)) {
                    warn!(error = %e, "cart gone server-side, clearing identity");
                    self.store.remove(IDENTITY_KEY).await?;
                    self.cart = None;
                    self.state = SessionState::Uninitialized;
                }
                Err(e.into())
            }
        }
    }

    /// Installs the returned cart and compares the requested quantity with
    /// what the server actually applied for the affected line.
    async fn reconcile(
        &mut self,
        payload: Value,
        key: LineKey<'_>,
        requested: i64,
    ) -> Result<MutationOutcome> {
        self.install_cart(payload).await?;

        let cart = self.cart.as_ref().ok_or(CartError::CartClosed)?;
        let line = match key {
            LineKey::Product(id) => cart.line_for_product(id),
            LineKey::Item(id) => cart.line(id),
        };

        let notice = line.and_then(|line| {
            if line.quantity == requested {
                None
            } else {
                warn!(
                    item_id = %line.id,
                    requested,
                    applied = line.quantity,
                    "quantity adjusted by server"
                );
                Some(QuantityAdjusted {
                    item_id: line.id.clone(),
                    requested,
                    applied: line.quantity,
                })
            }
        });

        Ok(MutationOutcome { notice })
    }
}

/// The line a mutation targeted: adds are keyed by product, edits by line id.
enum LineKey<'a> {
    Product(&'a str),
    Item(&'a str),
}

/// Clears its single-flight key when dropped, whether the mutation finished
/// or its future was dropped mid-await.
struct PendingGuard {
    pending: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
