//! In-memory order board backed by the remote order service.
//!
//! The board mirrors what a stage page holds: the orders loaded for the
//! visible stages, plus the mutations an operator can trigger. Mutations
//! follow two patterns:
//!
//! - **Optimistic** ([`OrderBoard::toggle_urgent`]): the local flag flips
//!   immediately and is reverted when the backend rejects the change or
//!   cannot be reached.
//! - **Confirmed** ([`OrderBoard::update_remarks`], [`OrderBoard::submit`]):
//!   nothing changes locally until the backend accepts.
//!
//! Assignments are validated before anything is sent, and only one
//! submission may be in flight per board. The backend re-validates and stays
//! the final authority; after a successful submit the caller reloads the
//! affected stages.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use tokio::sync::Mutex;

pub mod backend;
pub mod builder;
pub mod export;

#[cfg(test)]
mod tests;

pub use backend::{BackendReply, OrderBackend};
pub use builder::DashboardBuilder;
pub use export::ExportBackend;

use crate::{
    error::{DashboardError, Result},
    models::{AssignmentRequest, Order},
    params::AssignOrder,
    session::{Role, Session},
    workflow::{all_workflow_steps, board_stage, Stage},
};

/// Orders loaded for one session, with the operations stage pages perform.
pub struct OrderBoard<B> {
    backend: B,
    session: Session,
    orders: Mutex<Vec<Order>>,
    submitting: AtomicBool,
}

impl<B: OrderBackend> OrderBoard<B> {
    pub fn new(backend: B, session: Session) -> Self {
        Self {
            backend,
            session,
            orders: Mutex::new(Vec::new()),
            submitting: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether an assignment is currently being submitted.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Replaces the local orders at `stage` with a fresh fetch.
    ///
    /// Returns the number of orders fetched.
    pub async fn load_stage(&self, stage: Stage) -> Result<usize> {
        let fetched = self.backend.fetch_stage_orders(&self.session, stage).await?;
        let count = fetched.len();

        let mut orders = self.orders.lock().await;
        orders.retain(|order| board_stage(&order.current_stage) != Some(stage));
        orders.extend(fetched);

        debug!("loaded {count} orders at {stage}");
        Ok(count)
    }

    /// Loads every workflow stage the session may view, in declaration order.
    /// Admin sessions also load the orders outside the graph.
    pub async fn load_all_stages(&self) -> Result<usize> {
        let mut total = 0;
        for stage in all_workflow_steps() {
            if self.session.can_view(*stage) {
                total += self.load_stage(*stage).await?;
            }
        }
        if self.session.role() == Role::Admin {
            total += self.load_unstaged().await?;
        }
        Ok(total)
    }

    /// Replaces the local orders that belong to no graph stage.
    pub async fn load_unstaged(&self) -> Result<usize> {
        let fetched = self.backend.fetch_unstaged_orders(&self.session).await?;
        let count = fetched.len();

        let mut orders = self.orders.lock().await;
        orders.retain(|order| board_stage(&order.current_stage).is_some());
        orders.extend(fetched);

        debug!("loaded {count} orders outside the workflow graph");
        Ok(count)
    }

    /// Snapshot of all loaded orders.
    pub async fn orders(&self) -> Vec<Order> {
        self.orders.lock().await.clone()
    }

    /// Loaded orders currently at `stage`.
    pub async fn orders_at(&self, stage: Stage) -> Vec<Order> {
        self.orders
            .lock()
            .await
            .iter()
            .filter(|order| board_stage(&order.current_stage) == Some(stage))
            .cloned()
            .collect()
    }

    /// Loaded orders this session's role is allowed to see.
    pub async fn visible_orders(&self) -> Vec<Order> {
        match self.session.role() {
            Role::Admin => self.orders().await,
            Role::Operator(stage) => self.orders_at(stage).await,
        }
    }

    /// First loaded portion of `order_id`.
    pub async fn find(&self, order_id: &str) -> Result<Order> {
        self.orders
            .lock()
            .await
            .iter()
            .find(|order| order.id == order_id)
            .cloned()
            .ok_or_else(|| DashboardError::OrderNotFound {
                id: order_id.to_string(),
            })
    }

    /// The loaded portion of `order_id` with exactly this `split_id`;
    /// `None` matches the unsplit order.
    pub async fn find_portion(&self, order_id: &str, split_id: Option<&str>) -> Result<Order> {
        self.orders
            .lock()
            .await
            .iter()
            .find(|order| order.is_portion(order_id, split_id))
            .cloned()
            .ok_or_else(|| DashboardError::OrderNotFound {
                id: order_id.to_string(),
            })
    }

    /// Flips the urgent flag of every portion of `order_id`.
    ///
    /// The local flag changes before the backend is asked and is put back on
    /// rejection or transport failure. Returns the new flag value.
    pub async fn toggle_urgent(&self, order_id: &str) -> Result<bool> {
        let previous = {
            let mut orders = self.orders.lock().await;
            let mut portions = orders
                .iter_mut()
                .filter(|order| order.id == order_id)
                .peekable();
            let previous = match portions.peek() {
                Some(order) => order.urgent,
                None => {
                    return Err(DashboardError::OrderNotFound {
                        id: order_id.to_string(),
                    })
                }
            };
            for order in portions {
                order.urgent = !previous;
            }
            previous
        };

        let outcome = self
            .backend
            .set_urgent(&self.session, order_id, !previous)
            .await
            .and_then(accepted);

        match outcome {
            Ok(()) => Ok(!previous),
            Err(e) => {
                warn!("urgency change for order {order_id} failed, rolling back: {e}");
                let mut orders = self.orders.lock().await;
                for order in orders.iter_mut().filter(|order| order.id == order_id) {
                    order.urgent = previous;
                }
                Err(e)
            }
        }
    }

    /// Stores new remarks for `order_id` once the backend accepts them.
    /// Blank remarks clear the field.
    pub async fn update_remarks(&self, order_id: &str, remarks: &str) -> Result<()> {
        self.find(order_id).await?;

        self.backend
            .set_remarks(&self.session, order_id, remarks)
            .await
            .and_then(accepted)?;

        let remarks = Some(remarks.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        let mut orders = self.orders.lock().await;
        for order in orders.iter_mut().filter(|order| order.id == order_id) {
            order.remarks = remarks.clone();
        }
        Ok(())
    }

    /// Validates and submits an assignment, returning the requests sent.
    ///
    /// # Errors
    ///
    /// * `DashboardError::OrderNotFound` - no loaded portion matches
    /// * `DashboardError::InvalidInput` - validation failed; nothing was sent
    /// * `DashboardError::SubmissionInProgress` - another submit is in flight
    /// * `DashboardError::Rejected` / `DashboardError::Transport` - the
    ///   backend refused or could not be reached
    pub async fn submit(&self, params: &AssignOrder) -> Result<Vec<AssignmentRequest>> {
        let order = self
            .find_portion(&params.order_id, params.split_id.as_deref())
            .await?;

        let requests = params.validate(&order)?;

        let _guard = SubmitGuard::acquire(&self.submitting).ok_or_else(|| {
            DashboardError::SubmissionInProgress {
                id: params.order_id.clone(),
            }
        })?;

        for request in &requests {
            let reply = self
                .backend
                .submit_assignment(&self.session, request)
                .await?;
            if let Err(e) = accepted(reply) {
                warn!(
                    "assignment of order {} to {} rejected: {e}",
                    request.order_id, request.next_stage
                );
                return Err(e);
            }
            info!(
                "assigned {} of order {} to {}",
                request.quantity, request.order_id, request.next_stage
            );
        }

        Ok(requests)
    }
}

fn accepted(reply: BackendReply) -> Result<()> {
    if reply.success {
        Ok(())
    } else {
        Err(DashboardError::Rejected {
            message: reply.message,
        })
    }
}

/// Holds the "is submitting" flag for the duration of one submit.
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
