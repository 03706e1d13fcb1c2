//! Parameter structures for dashboard operations
//!
//! These structures carry what an operator entered on a stage page. They have
//! no framework derives beyond serde, so the CLI (or any other front end) can
//! wrap them with its own argument types and convert with `From`.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────────┐
//! │   CLI Args      │───▶│  AssignOrder    │───▶│ AssignmentRequest(s)│
//! │  (clap derives) │    │  (validate)     │    │ (backend payload)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    error::{DashboardError, Result},
    models::{AssignmentRequest, Order},
    workflow::{next_steps, step_label, Stage},
};

/// How the main target stage is chosen on a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStagePolicy {
    /// Operator picks one of the graph successors of the current stage
    #[default]
    Graph,
    /// The page always sends to this stage (e.g. SVS → marking1); the
    /// selector is bypassed but quantity bounds still apply
    Fixed(Stage),
}

/// Second half of a split assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitAssign {
    /// Stage receiving the split quantity
    pub next_stage: Option<String>,
    /// Quantity sent to the split stage
    pub quantity: u32,
}

/// Parameters for assigning an order (portion) to the next stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignOrder {
    /// Order to assign
    pub order_id: String,
    /// Split portion of the order, when the order has been divided before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_id: Option<String>,
    /// Selected next stage (ignored under [`NextStagePolicy::Fixed`])
    pub next_stage: Option<String>,
    /// Quantity sent to the main next stage
    pub quantity: u32,
    /// Optional second target consuming the rest of the pending quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitAssign>,
    #[serde(default)]
    pub policy: NextStagePolicy,
}

impl AssignOrder {
    /// Validate the assignment against `order` and build the requests to send.
    ///
    /// Returns one request, or two when the quantity is split across two next
    /// stages. Both carry the order's `split_id`.
    ///
    /// # Errors
    ///
    /// * `DashboardError::InvalidInput` with field `order_id` - `order` is not
    ///   the order named by the parameters
    /// * field `next_stage` - nothing selected, or not a successor of the
    ///   current stage
    /// * field `quantity` - zero, or more than the pending quantity
    /// * field `split_stage` - missing, not a successor, or equal to the main
    ///   target
    /// * field `split_quantity` - zero, or main + split differs from the
    ///   pending quantity
    ///
    /// # Examples
    ///
    /// ```rust
    /// use valveflow_core::{models::Order, params::{AssignOrder, SplitAssign}};
    ///
    /// let order = Order {
    ///     id: "SO-1".to_string(),
    ///     total_qty: 100,
    ///     executed_qty: 0,
    ///     qty_pending: 100,
    ///     current_stage: "assembly".to_string(),
    ///     urgent: false,
    ///     remarks: None,
    ///     split_id: None,
    ///     stage_progress: None,
    ///     workflow_history: vec![],
    /// };
    ///
    /// let params = AssignOrder {
    ///     order_id: "SO-1".to_string(),
    ///     next_stage: Some("testing1".to_string()),
    ///     quantity: 60,
    ///     split: Some(SplitAssign {
    ///         next_stage: Some("testing2".to_string()),
    ///         quantity: 40,
    ///     }),
    ///     ..Default::default()
    /// };
    /// let requests = params.validate(&order)?;
    /// assert_eq!(requests.len(), 2);
    ///
    /// // 60 + 30 leaves 10 behind, which a split may not do
    /// let short = AssignOrder {
    ///     split: Some(SplitAssign { next_stage: Some("testing2".to_string()), quantity: 30 }),
    ///     ..params
    /// };
    /// assert!(short.validate(&order).is_err());
    /// # Ok::<(), valveflow_core::DashboardError>(())
    /// ```
    pub fn validate(&self, order: &Order) -> Result<Vec<AssignmentRequest>> {
        if !order.is_portion(&self.order_id, self.split_id.as_deref()) {
            return Err(DashboardError::invalid_input("order_id").with_reason(format!(
                "Parameters name order {} but order {} was given",
                self.order_id, order.id
            )));
        }

        let options = next_steps(&order.current_stage);
        let main_stage = match self.policy {
            NextStagePolicy::Fixed(stage) => stage,
            NextStagePolicy::Graph => {
                select_stage(self.next_stage.as_deref(), options, order, "next_stage")?
            }
        };

        let pending = order.qty_pending;
        if self.quantity == 0 {
            return Err(DashboardError::invalid_input("quantity")
                .with_reason("Quantity must be greater than zero"));
        }
        if self.quantity > pending {
            return Err(DashboardError::invalid_input("quantity").with_reason(format!(
                "Quantity {} exceeds the pending quantity {pending}",
                self.quantity
            )));
        }

        let mut requests = vec![self.request(order, main_stage, self.quantity)];

        if let Some(split) = &self.split {
            if split.quantity == 0 {
                return Err(DashboardError::invalid_input("split_quantity")
                    .with_reason("Split quantity must be greater than zero"));
            }
            let split_stage =
                select_stage(split.next_stage.as_deref(), options, order, "split_stage")?;
            if split_stage == main_stage {
                return Err(DashboardError::invalid_input("split_stage").with_reason(format!(
                    "Split stage must differ from the main stage {}",
                    main_stage.label()
                )));
            }

            let total = u64::from(self.quantity) + u64::from(split.quantity);
            if total != u64::from(pending) {
                return Err(DashboardError::invalid_input("split_quantity").with_reason(format!(
                    "Main ({}) and split ({}) quantities must add up to the pending quantity {pending}",
                    self.quantity, split.quantity
                )));
            }

            requests.push(self.request(order, split_stage, split.quantity));
        }

        Ok(requests)
    }

    fn request(&self, order: &Order, next_stage: Stage, quantity: u32) -> AssignmentRequest {
        AssignmentRequest {
            order_id: order.id.clone(),
            total_qty: order.total_qty,
            quantity,
            current_stage: order.current_stage.clone(),
            next_stage,
            split_id: order.split_id.clone(),
        }
    }
}

/// Parses an operator's stage choice and checks it against the allowed
/// successors.
fn select_stage(
    selected: Option<&str>,
    options: &[Stage],
    order: &Order,
    field: &str,
) -> Result<Stage> {
    let selected = selected.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        DashboardError::invalid_input(field).with_reason("Please select the next stage")
    })?;

    if options.is_empty() {
        return Err(DashboardError::invalid_input(field).with_reason(format!(
            "{} is a terminal stage; the order cannot be moved further",
            step_label(&order.current_stage)
        )));
    }

    Stage::parse_lenient(selected)
        .filter(|stage| options.contains(stage))
        .ok_or_else(|| {
            let allowed = options
                .iter()
                .map(Stage::label)
                .collect::<Vec<_>>()
                .join(", ");
            DashboardError::invalid_input(field).with_reason(format!(
                "'{selected}' is not a valid next stage after {}. Must be one of: {allowed}",
                step_label(&order.current_stage)
            ))
        })
}
