//! Core library for the valve shop order dashboard.
//!
//! Orders move through a fixed production workflow (planning, material issue,
//! QC, assembly lines, testing, marking, PDI, TPI, dispatch). This crate holds
//! the rules every stage page relies on:
//!
//! - [`workflow`]: the stage graph, key normalization and display labels
//! - [`progress`]: per-stage status of an order for tables and exports
//! - [`params`]: assignment validation, including quantity splits
//! - [`board`]: loaded orders plus backend-confirmed mutations
//! - [`display`]: markdown views of orders, tables and options
//!
//! The remote backend owns storage and re-validates every assignment; this
//! crate never persists anything.
//!
//! # Quick Start
//!
//! ```rust
//! use valveflow_core::{is_final_step, next_steps, step_label, Stage};
//!
//! assert_eq!(next_steps("Assembly"), &[Stage::Testing1, Stage::Testing2]);
//! assert_eq!(step_label("semi-qc"), "Semi QC");
//! assert!(is_final_step("dispatch"));
//! ```
//!
//! Loading an order export and submitting through a board:
//!
//! ```rust,no_run
//! use valveflow_core::{params::AssignOrder, DashboardBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let board = DashboardBuilder::new()
//!     .with_orders_path(Some("orders.json"))
//!     .build()
//!     .await?;
//!
//! let params = AssignOrder {
//!     order_id: "SO-1042".to_string(),
//!     next_stage: Some("semi-qc".to_string()),
//!     quantity: 10,
//!     ..Default::default()
//! };
//! let requests = board.submit(&params).await?;
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod progress;
pub mod session;
pub mod workflow;

// Re-export commonly used types
pub use board::{BackendReply, DashboardBuilder, ExportBackend, OrderBackend, OrderBoard};
pub use display::{OperationStatus, OrderDetail, ProgressTable, StageOptions, WorkflowStages};
pub use error::{DashboardError, Result};
pub use models::{AssignmentRequest, HistoryEntry, Order, Resolution, StageStatus};
pub use params::{AssignOrder, NextStagePolicy, SplitAssign};
pub use progress::{resolve, resolve_all, resolve_stage};
pub use session::{Role, Session};
pub use workflow::{
    all_workflow_steps, board_stage, is_final_step, next_steps, normalize_stage_key, step_label,
    Stage,
};
