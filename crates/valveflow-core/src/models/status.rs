//! Stage status values and the resolver's tagged result.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of an order with respect to one stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// The order has moved past the stage
    Ok,

    /// The order is currently at the stage
    InProcess,

    /// Explicitly marked pending by the backend
    Pending,
}

impl FromStr for StageStatus {
    type Err = String;

    /// Parses a backend status value after lowercasing it and turning spaces
    /// into underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(' ', "_").as_str() {
            "ok" => Ok(StageStatus::Ok),
            "pending" => Ok(StageStatus::Pending),
            "in_progress" | "inprogress" => Ok(StageStatus::InProcess),
            _ => Err(format!("Invalid stage status: {s}")),
        }
    }
}

impl StageStatus {
    /// Text used in table cells and export sheets.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::Ok => "OK",
            StageStatus::InProcess => "IN PROCESS",
            StageStatus::Pending => "pending",
        }
    }
}

/// Outcome of resolving one stage for one order, tagged with where the answer
/// came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Read from the backend's `stage_progress` map
    Direct(StageStatus),

    /// Reconstructed from `workflowHistory`
    Derived(StageStatus),

    /// Stage not reached, or no usable data
    Unknown,
}

impl Resolution {
    pub fn status(&self) -> Option<StageStatus> {
        match self {
            Resolution::Direct(status) | Resolution::Derived(status) => Some(*status),
            Resolution::Unknown => None,
        }
    }

    /// Cell text; unknown stages render as an empty cell.
    pub fn cell(&self) -> &'static str {
        self.status().map_or("", |status| status.as_str())
    }
}
