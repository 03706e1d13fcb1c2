//! Order model as returned by the backend's stage listing endpoints.

use std::collections::BTreeMap;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// One manufacturing job, or one split portion of it.
///
/// Quantities are tracked by the backend. In particular `qty_pending` is taken
/// as delivered and never recomputed from the other two.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend identifier of the order
    #[serde(alias = "_id", alias = "orderId")]
    pub id: String,

    /// Quantity ordered
    #[serde(default)]
    pub total_qty: u32,

    /// Quantity already assigned forward from the current stage
    #[serde(default)]
    pub executed_qty: u32,

    /// Quantity still available for assignment
    #[serde(default, alias = "pendingQty")]
    pub qty_pending: u32,

    /// Raw stage key or label the order currently sits at
    #[serde(default)]
    pub current_stage: String,

    #[serde(default)]
    pub urgent: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    /// Distinguishes sibling portions of an order divided across two stages
    #[serde(default, rename = "split_id", skip_serializing_if = "Option::is_none")]
    pub split_id: Option<String>,

    /// Precomputed per-stage status, keyed by backend-normalized label
    #[serde(
        default,
        rename = "stage_progress",
        alias = "stageProgress",
        skip_serializing_if = "Option::is_none"
    )]
    pub stage_progress: Option<BTreeMap<String, String>>,

    /// Raw stage log, oldest first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workflow_history: Vec<HistoryEntry>,
}

impl Order {
    /// Whether this record is the portion identified by `order_id` and
    /// `split_id`.
    pub fn is_portion(&self, order_id: &str, split_id: Option<&str>) -> bool {
        self.id == order_id && self.split_id.as_deref() == split_id
    }
}

/// A single visit of an order to a stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Stage name as logged by the backend
    pub stage: String,

    /// When the order entered the stage (UTC)
    pub entered_at: Timestamp,

    /// When the order left the stage; absent for the open entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exited_at: Option<Timestamp>,

    #[serde(default)]
    pub qty_processed: u32,
}

impl HistoryEntry {
    /// Time spent in the stage, measured up to `now` while the entry is open.
    pub fn elapsed(&self, now: Timestamp) -> SignedDuration {
        self.exited_at.unwrap_or(now).duration_since(self.entered_at)
    }

    pub fn is_open(&self) -> bool {
        self.exited_at.is_none()
    }
}
