//! Display wrappers and formatting helpers.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! newtype wrappers cover collections and contextual views:
//!
//! - [`collections`]: progress tables, next-step options, the workflow list
//! - [`datetime`]: local timestamps and time spent per stage
//! - [`status`]: dialog status lines
//! - [`models`]: order summary and detail view
//!
//! All output is markdown.

pub mod collections;
pub mod datetime;
pub mod models;
pub mod status;

pub use collections::{ProgressTable, StageOptions, WorkflowStages};
pub use datetime::{Elapsed, LocalDateTime};
pub use models::OrderDetail;
pub use status::OperationStatus;
