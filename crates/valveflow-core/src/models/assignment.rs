//! Assignment request sent to the backend when an order moves forward.

use serde::{Serialize, Serializer};

use crate::workflow::{step_label, Stage};

/// One transition attempt, built after validation and discarded once
/// submitted.
///
/// Serializes to the backend payload
/// `{ orderId, totalQty, executedQty, currentSteps, nextSteps, split_id? }`
/// where `executedQty` is the quantity being assigned and both step fields are
/// display labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRequest {
    pub order_id: String,

    pub total_qty: u32,

    /// Quantity moved to `next_stage`
    #[serde(rename = "executedQty")]
    pub quantity: u32,

    /// Stage the order is leaving, as recorded on the order
    #[serde(rename = "currentSteps", serialize_with = "serialize_key_as_label")]
    pub current_stage: String,

    #[serde(rename = "nextSteps", serialize_with = "serialize_stage_label")]
    pub next_stage: Stage,

    #[serde(rename = "split_id", skip_serializing_if = "Option::is_none")]
    pub split_id: Option<String>,
}

#[allow(clippy::ptr_arg)]
fn serialize_key_as_label<S: Serializer>(key: &String, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&step_label(key))
}

fn serialize_stage_label<S: Serializer>(stage: &Stage, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(stage.label())
}
