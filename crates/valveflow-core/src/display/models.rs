//! Display implementations for domain models.
//!
//! Output is markdown so the CLI renderer can style it; plain terminals get
//! readable text as-is.

use std::fmt;

use jiff::Timestamp;

use super::datetime::{Elapsed, LocalDateTime};
use crate::{
    models::{Order, Resolution, StageStatus},
    progress::resolve_all,
    workflow::step_label,
};

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Direct(status) => write!(f, "{status}"),
            Resolution::Derived(status) => write!(f, "{status} (from history)"),
            Resolution::Unknown => f.write_str("-"),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.split_id {
            Some(split) => writeln!(f, "### {} (split {split})", self.id)?,
            None => writeln!(f, "### {}", self.id)?,
        }
        writeln!(f)?;
        writeln!(f, "- Stage: {}", step_label(&self.current_stage))?;
        writeln!(
            f,
            "- Quantity: {} pending of {} ({} executed)",
            self.qty_pending, self.total_qty, self.executed_qty
        )?;
        if self.urgent {
            writeln!(f, "- Urgent: yes")?;
        }
        if let Some(remarks) = &self.remarks {
            writeln!(f, "- Remarks: {remarks}")?;
        }
        Ok(())
    }
}

/// Detail dialog for one order: summary, resolved stage progress and the
/// history timeline with time spent per stage.
///
/// Open history entries are measured up to `now`.
pub struct OrderDetail<'a> {
    pub order: &'a Order,
    pub now: Timestamp,
}

impl<'a> OrderDetail<'a> {
    pub fn new(order: &'a Order, now: Timestamp) -> Self {
        Self { order, now }
    }
}

impl fmt::Display for OrderDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.order)?;

        let reached: Vec<_> = resolve_all(self.order)
            .into_iter()
            .filter(|(_, resolution)| resolution.status().is_some())
            .collect();
        if !reached.is_empty() {
            writeln!(f, "\n#### Progress")?;
            writeln!(f)?;
            for (stage, resolution) in reached {
                writeln!(f, "- {}: {resolution}", stage.label())?;
            }
        }

        if self.order.workflow_history.is_empty() {
            return writeln!(f, "\nNo stage history recorded.");
        }

        writeln!(f, "\n#### History")?;
        writeln!(f)?;
        writeln!(f, "| Stage | Entered | Exited | Duration | Qty |")?;
        writeln!(f, "|---|---|---|---|---:|")?;
        for entry in &self.order.workflow_history {
            let exited = entry
                .exited_at
                .as_ref()
                .map_or_else(|| "(open)".to_string(), |t| LocalDateTime(t).to_string());
            writeln!(
                f,
                "| {} | {} | {exited} | {} | {} |",
                step_label(&entry.stage),
                LocalDateTime(&entry.entered_at),
                Elapsed(entry.elapsed(self.now)),
                entry.qty_processed
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::HistoryEntry;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn sample_order() -> Order {
        Order {
            id: "SO-1042".to_string(),
            total_qty: 40,
            executed_qty: 0,
            qty_pending: 40,
            current_stage: "phosphating".to_string(),
            urgent: true,
            remarks: Some("priority customer".to_string()),
            split_id: None,
            stage_progress: Some(BTreeMap::from([(
                "Planning".to_string(),
                "ok".to_string(),
            )])),
            workflow_history: vec![
                HistoryEntry {
                    stage: "semi-qc".to_string(),
                    entered_at: ts("2024-01-01T00:00:00Z"),
                    exited_at: Some(ts("2024-01-02T03:00:00Z")),
                    qty_processed: 40,
                },
                HistoryEntry {
                    stage: "phosphating".to_string(),
                    entered_at: ts("2024-01-02T03:00:00Z"),
                    exited_at: None,
                    qty_processed: 0,
                },
            ],
        }
    }

    #[test]
    fn test_order_summary() {
        let output = sample_order().to_string();
        assert!(output.starts_with("### SO-1042\n"));
        assert!(output.contains("- Stage: Phosphating QC"));
        assert!(output.contains("- Quantity: 40 pending of 40 (0 executed)"));
        assert!(output.contains("- Urgent: yes"));
        assert!(output.contains("- Remarks: priority customer"));
    }

    #[test]
    fn test_order_detail_progress_and_durations() {
        let order = sample_order();
        let output = OrderDetail::new(&order, ts("2024-01-02T05:30:00Z")).to_string();

        assert!(output.contains("- Planning: OK\n"));
        assert!(output.contains("- Semi QC: OK (from history)"));
        assert!(output.contains("- Phosphating QC: IN PROCESS (from history)"));
        assert!(!output.contains("- Assembly:"));

        assert!(output.contains("| Semi QC |"));
        assert!(output.contains("| 1d 3h | 40 |"));
        assert!(output.contains("| (open) | 2h 30m | 0 |"));
    }

    #[test]
    fn test_order_detail_without_history() {
        let mut order = sample_order();
        order.workflow_history.clear();
        order.stage_progress = None;

        let output = OrderDetail::new(&order, Timestamp::UNIX_EPOCH).to_string();
        assert!(output.contains("No stage history recorded."));
        assert!(!output.contains("#### Progress"));
    }

    #[test]
    fn test_resolution_display() {
        assert_eq!(Resolution::Direct(StageStatus::Pending).to_string(), "pending");
        assert_eq!(Resolution::Derived(StageStatus::Ok).to_string(), "OK (from history)");
        assert_eq!(Resolution::Unknown.to_string(), "-");
    }
}
