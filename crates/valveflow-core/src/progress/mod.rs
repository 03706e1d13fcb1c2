//! Stage status resolution for progress cells, detail dialogs and exports.
//!
//! Two sources are consulted, first match wins:
//!
//! 1. the backend's precomputed `stage_progress` map ([`Resolution::Direct`]);
//! 2. the order's `workflowHistory` log ([`Resolution::Derived`]).
//!
//! The history log cannot express "pending", so a derived status is always
//! either OK or IN PROCESS. Resolution only reads the order.

use log::debug;

use crate::{
    models::{Order, Resolution, StageStatus},
    workflow::{all_workflow_steps, Stage},
};

/// Display label whose `stage_progress` key differs from the label itself.
const PROGRESS_KEY_ALIASES: [(&str, &str); 1] = [("Phosphating QC", "Phosphating")];

/// Normalizes a label the way the backend normalizes `stage_progress` keys:
/// hyphens become spaces, whitespace runs collapse, ends are trimmed.
pub fn progress_key(label: &str) -> String {
    label
        .replace('-', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes a stage name for matching against history entries.
///
/// Lowercases, turns hyphens into spaces, collapses whitespace and strips a
/// trailing `" qc"`, so the label `"Phosphating QC"` matches the logged
/// `"phosphating"`.
pub fn history_key(stage: &str) -> String {
    let collapsed = stage
        .to_lowercase()
        .replace('-', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    match collapsed.strip_suffix(" qc") {
        Some(stripped) => stripped.to_string(),
        None => collapsed,
    }
}

/// Resolves the status of the stage labelled `target` for `order`.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use valveflow_core::{models::{Order, Resolution, StageStatus}, progress::resolve};
///
/// let order = Order {
///     id: "SO-1".to_string(),
///     total_qty: 10,
///     executed_qty: 0,
///     qty_pending: 10,
///     current_stage: "semi-qc".to_string(),
///     urgent: false,
///     remarks: None,
///     split_id: None,
///     stage_progress: Some(BTreeMap::from([("Semi QC".to_string(), "ok".to_string())])),
///     workflow_history: vec![],
/// };
///
/// assert_eq!(resolve(&order, "Semi QC"), Resolution::Direct(StageStatus::Ok));
/// ```
pub fn resolve(order: &Order, target: &str) -> Resolution {
    if let Some(resolution) = direct(order, target) {
        return resolution;
    }
    derived(order, target)
}

/// Resolves a graph stage by its curated label.
pub fn resolve_stage(order: &Order, stage: Stage) -> Resolution {
    resolve(order, stage.label())
}

/// Resolves every workflow stage in declaration order.
pub fn resolve_all(order: &Order) -> Vec<(Stage, Resolution)> {
    all_workflow_steps()
        .iter()
        .map(|stage| (*stage, resolve_stage(order, *stage)))
        .collect()
}

/// Looks the target up in `stage_progress`. Returns `None` when the map is
/// absent or has no entry for the target, letting history decide.
fn direct(order: &Order, target: &str) -> Option<Resolution> {
    let progress = order.stage_progress.as_ref()?;

    let key = progress_key(target);
    let key = PROGRESS_KEY_ALIASES
        .iter()
        .find(|(label, _)| *label == key)
        .map_or(key.clone(), |(_, alias)| (*alias).to_string());

    let raw = progress
        .get(&key)
        .or_else(|| progress.get(&key.to_uppercase()))
        .or_else(|| progress.get(&key.to_lowercase()))?;

    match raw.parse::<StageStatus>() {
        Ok(status) => Some(Resolution::Direct(status)),
        Err(_) => {
            debug!(
                "order {}: unrecognised stage_progress value '{raw}' for '{key}'",
                order.id
            );
            Some(Resolution::Unknown)
        }
    }
}

fn derived(order: &Order, target: &str) -> Resolution {
    let wanted = history_key(target);

    let Some(entry) = order
        .workflow_history
        .iter()
        .find(|entry| history_key(&entry.stage) == wanted)
    else {
        return Resolution::Unknown;
    };

    if entry.exited_at.is_some() {
        Resolution::Derived(StageStatus::Ok)
    } else if history_key(&order.current_stage) == wanted {
        Resolution::Derived(StageStatus::InProcess)
    } else {
        Resolution::Unknown
    }
}
