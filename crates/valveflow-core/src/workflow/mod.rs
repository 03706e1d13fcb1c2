//! The production workflow graph.
//!
//! The graph is a fixed lookup table from each [`Stage`] to its successors:
//!
//! ```text
//! planning -> material-issue -> semi-qc -> phosphating -> assembly
//! assembly -> testing1 -> marking1 -> pdi1 -> tpi | dispatch
//!          -> testing2 -> marking2 -> pdi2 -> tpi | dispatch
//! svs -> marking1
//! tpi -> dispatch
//! ```
//!
//! Raw keys coming from the backend or from operators are parsed into
//! [`Stage`] through [`normalize_stage_key`]. Keys that do not name a node are
//! never an error: they behave as terminal stages with no successors.
//! Operator input may also use curated labels (`Stage::from_str`), while the
//! graph lookups in [`next_steps`] and [`is_final_step`] take keys only.

pub mod graph;
pub mod stage;


pub use graph::{
    all_workflow_steps, board_stage, is_acyclic, is_final_step, next_steps, step_label,
};
pub use stage::{normalize_stage_key, Stage};
