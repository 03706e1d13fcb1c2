//! Data models for orders, their stage history and assignments.
//!
//! Orders arrive from the backend as JSON and are only read by this crate; the
//! backend stays the owner of quantities and stage history. Display
//! implementations live in [`crate::display::models`].

pub mod assignment;
pub mod order;
pub mod status;


pub use assignment::AssignmentRequest;
pub use order::{HistoryEntry, Order};
pub use status::{Resolution, StageStatus};
