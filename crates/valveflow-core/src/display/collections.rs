//! Collection wrapper types for tables and option lists.

use std::fmt;

use crate::{
    models::Order,
    progress::resolve_all,
    workflow::{all_workflow_steps, next_steps, step_label, Stage},
};

/// Newtype wrapper rendering orders as a markdown progress table, one status
/// cell per workflow stage.
///
/// # Examples
///
/// ```rust
/// use valveflow_core::{display::ProgressTable, models::Order};
///
/// let order = Order {
///     id: "SO-1".to_string(),
///     total_qty: 10,
///     executed_qty: 0,
///     qty_pending: 10,
///     current_stage: "planning".to_string(),
///     urgent: true,
///     remarks: None,
///     split_id: None,
///     stage_progress: None,
///     workflow_history: vec![],
/// };
/// let output = ProgressTable(vec![order]).to_string();
/// assert!(output.contains("| SO-1 | 10 | 10 | yes |"));
/// ```
pub struct ProgressTable(pub Vec<Order>);

impl ProgressTable {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ProgressTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No orders found.");
        }

        write!(f, "| Order | Qty | Pending | Urgent |")?;
        for stage in all_workflow_steps() {
            write!(f, " {} |", stage.label())?;
        }
        writeln!(f)?;

        write!(f, "|---|---:|---:|---|")?;
        for _ in all_workflow_steps() {
            write!(f, "---|")?;
        }
        writeln!(f)?;

        for order in &self.0 {
            match &order.split_id {
                Some(split) => write!(f, "| {} ({split}) |", order.id)?,
                None => write!(f, "| {} |", order.id)?,
            }
            write!(
                f,
                " {} | {} | {} |",
                order.total_qty,
                order.qty_pending,
                if order.urgent { "yes" } else { "" }
            )?;
            for (_, resolution) in resolve_all(order) {
                write!(f, " {} |", resolution.cell())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Next-step choices offered for a stage.
pub struct StageOptions {
    pub current: String,
    pub options: &'static [Stage],
}

impl StageOptions {
    pub fn for_stage(current: &str) -> Self {
        Self {
            current: current.to_string(),
            options: next_steps(current),
        }
    }
}

impl fmt::Display for StageOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = step_label(&self.current);
        if self.options.is_empty() {
            return writeln!(f, "{label} is a terminal stage.");
        }

        writeln!(f, "Next stages after {label}:")?;
        writeln!(f)?;
        for stage in self.options {
            writeln!(f, "- {} (`{}`)", stage.label(), stage.key())?;
        }
        Ok(())
    }
}

/// The whole workflow graph as a markdown list.
pub struct WorkflowStages;

impl fmt::Display for WorkflowStages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Workflow stages")?;
        writeln!(f)?;
        for stage in all_workflow_steps() {
            let successors = stage
                .successors()
                .iter()
                .map(Stage::label)
                .collect::<Vec<_>>();
            let successors = if successors.is_empty() {
                "(terminal)".to_string()
            } else {
                successors.join(", ")
            };
            writeln!(
                f,
                "- **{}** (`{}`) -> {successors}",
                stage.label(),
                stage.key()
            )?;
        }
        Ok(())
    }
}
