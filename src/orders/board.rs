//! Kanban-style order board for staff.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::Order;
use crate::normalize::{normalize_order, normalize_order_list};
use crate::status::{BoardStatus, Optimistic, plan_transition};

use super::{OrderBackend, OrderError, Result};

/// OrderBoard holds the staff view of orders grouped by board status and
/// applies transitions through the policy, optimistically with rollback.
pub struct OrderBoard {
    backend: Arc<dyn OrderBackend>,
    orders: Vec<Order>,
}

impl OrderBoard {
    pub fn new(backend: Arc<dyn OrderBackend>) -> Self {
        Self {
            backend,
            orders: Vec::new(),
        }
    }

    /// Reloads all orders from the backend.
    pub async fn refresh(&mut self) -> Result<()> {
        let payload = self.backend.list_orders().await?;
        self.orders = normalize_order_list(&payload);
        info!(orders = self.orders.len(), "order board refreshed");
        Ok(())
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders in one board column.
    pub fn column(&self, status: BoardStatus) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| BoardStatus::parse(&o.status) == Some(status))
            .collect()
    }

    /// Moves an order to a new board column.
    ///
    /// The move is validated by the transition policy first; moving an unpaid
    /// order to DELIVERED is refused until the caller passes
    /// `confirmed_unpaid = true` after an explicit human confirmation. The
    /// local order is updated optimistically, then the backend is called: on
    /// success the server's order replaces the optimistic one, on failure the
    /// pre-transition snapshot is restored and the error surfaces.
    pub async fn move_order(
        &mut self,
        order_id: &str,
        to: BoardStatus,
        confirmed_unpaid: bool,
    ) -> Result<()> {
        let index = self
            .orders
            .iter()
            .position(|o| o.id == order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        let order = &self.orders[index];
        let from = BoardStatus::parse(&order.status)
            .ok_or_else(|| OrderError::NotBoardStatus(order.status.clone()))?;

        let plan = plan_transition(from, to, order)?;
        if plan.requires_payment_confirmation && !confirmed_unpaid {
            return Err(OrderError::ConfirmationRequired(order_id.to_string()));
        }

        let mut pending = order.clone();
        pending.status = to.key().to_string();

        let transition = Optimistic::begin(self.orders[index].clone(), pending);
        self.orders[index] = transition.pending().clone();

        match self.backend.update_status(order_id, to.key()).await {
            Ok(payload) => {
                self.orders[index] = transition.commit(normalize_order(&payload));
                info!(order_id = %order_id, from = from.key(), to = to.key(), "order moved");
                Ok(())
            }
            Err(e) => {
                warn!(order_id = %order_id, error = %e, "status save failed, rolling back");
                self.orders[index] = transition.rollback();
                Err(e.into())
            }
        }
    }
}
