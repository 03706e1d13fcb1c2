//! Lookup functions over the static production graph.

use log::debug;

use super::stage::{normalize_stage_key, Stage};

/// Keys that are shown on the dashboard but are not nodes of the graph.
///
/// Assembly is a single graph node fanned out over four physical lines, and
/// packaging is a display state after dispatch.
const DISPLAY_LABELS: [(&str, &str); 5] = [
    ("assembly-a", "Assembly A"),
    ("assembly-b", "Assembly B"),
    ("assembly-c", "Assembly C"),
    ("assembly-d", "Assembly D"),
    ("packaging", "Packaging"),
];

/// Returns the stages an order may move to from `current_step`.
///
/// The input is normalized first, so any capitalisation or spacing of a key
/// resolves to the same node. Only keys are looked up: a label such as
/// `"Testing 1"` normalizes to `testing-1`, which is not a node. Unknown keys
/// yield an empty slice, which callers treat exactly like a terminal stage.
///
/// # Examples
///
/// ```rust
/// use valveflow_core::workflow::{next_steps, Stage};
///
/// assert_eq!(next_steps("Material Issue"), &[Stage::SemiQc]);
/// assert!(next_steps("not-a-real-stage").is_empty());
/// assert!(next_steps("Testing 1").is_empty());
/// ```
pub fn next_steps(current_step: &str) -> &'static [Stage] {
    match Stage::from_key(&normalize_stage_key(current_step)) {
        Some(stage) => stage.successors(),
        None => {
            debug!("no workflow node for stage '{current_step}', treating as terminal");
            &[]
        }
    }
}

/// Returns the display label for a stage key.
///
/// Curated labels win; any other key is title-cased word by word after
/// splitting on hyphens (`"semi-qc"` would become `"Semi Qc"`). Acronyms are
/// not special-cased by the fallback.
pub fn step_label(step: &str) -> String {
    let key = normalize_stage_key(step);
    if let Some(stage) = Stage::parse_lenient(&key) {
        return stage.label().to_string();
    }
    if let Some((_, label)) = DISPLAY_LABELS.iter().find(|(k, _)| *k == key) {
        return (*label).to_string();
    }

    key.split('-')
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Graph stage an order's current stage is filed under on the board.
///
/// Graph keys and labels map to their own stage and the assembly lines fold
/// into [`Stage::Assembly`]. Packaging and unknown keys belong to no stage.
pub fn board_stage(current_stage: &str) -> Option<Stage> {
    let key = normalize_stage_key(current_stage);
    if let Some(stage) = Stage::parse_lenient(&key) {
        return Some(stage);
    }
    key.strip_prefix("assembly-")
        .filter(|_| DISPLAY_LABELS.iter().any(|(k, _)| *k == key))
        .map(|_| Stage::Assembly)
}

/// True when no transition leaves `step`, including unknown keys.
pub fn is_final_step(step: &str) -> bool {
    next_steps(step).is_empty()
}

/// All graph stages in declaration order.
pub fn all_workflow_steps() -> &'static [Stage] {
    &Stage::ALL
}

/// Checks that the production graph contains no cycle.
///
/// Nothing enforces this at runtime; the flow is expected to drain into
/// `dispatch`.
pub fn is_acyclic() -> bool {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Active,
        Finished,
    }

    fn visit(stage: Stage, marks: &mut [Mark; 14]) -> bool {
        let index = stage as usize;
        match marks[index] {
            Mark::Active => return false,
            Mark::Finished => return true,
            Mark::New => {}
        }
        marks[index] = Mark::Active;
        for next in stage.successors() {
            if !visit(*next, marks) {
                return false;
            }
        }
        marks[index] = Mark::Finished;
        true
    }

    let mut marks = [Mark::New; 14];
    Stage::ALL.iter().all(|stage| visit(*stage, &mut marks))
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
