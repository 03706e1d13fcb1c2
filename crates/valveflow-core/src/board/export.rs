//! Read-only backend over an order export file.
//!
//! The export is the JSON the backend's listing endpoints return, saved to
//! disk: either a bare array of orders or an object with an `orders` array.
//! Every order in the file is served: graph stages through
//! `fetch_stage_orders`, packaging and unknown stages through
//! `fetch_unstaged_orders`. Mutating calls are answered with a rejection.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::task;

use super::backend::{BackendReply, OrderBackend};
use crate::{
    error::{DashboardError, Result},
    models::{AssignmentRequest, Order},
    session::Session,
    workflow::{board_stage, Stage},
};

#[derive(Deserialize)]
#[serde(untagged)]
enum ExportFile {
    Orders(Vec<Order>),
    Wrapped { orders: Vec<Order> },
}

impl From<ExportFile> for Vec<Order> {
    fn from(file: ExportFile) -> Self {
        match file {
            ExportFile::Orders(orders) | ExportFile::Wrapped { orders } => orders,
        }
    }
}

/// Orders read once from an export file.
#[derive(Debug, Clone)]
pub struct ExportBackend {
    path: PathBuf,
    orders: Vec<Order>,
}

impl ExportBackend {
    /// Reads and parses the export at `path` on a blocking thread.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::FileSystem` if the file cannot be read
    /// Returns `DashboardError::Serialization` if it is not an order export
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let read_path = path.clone();

        let orders = task::spawn_blocking(move || {
            let text = std::fs::read_to_string(&read_path).map_err(|e| {
                DashboardError::FileSystem {
                    path: read_path.clone(),
                    source: e,
                }
            })?;
            let file: ExportFile = serde_json::from_str(&text)?;
            Ok::<Vec<Order>, DashboardError>(file.into())
        })
        .await
        .map_err(|e| DashboardError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Self::from_orders(path, orders))
    }

    /// Wraps orders already in memory.
    pub fn from_orders(path: impl Into<PathBuf>, orders: Vec<Order>) -> Self {
        Self {
            path: path.into(),
            orders,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_only(&self) -> BackendReply {
        BackendReply::rejected(format!("{} is a read-only export", self.path.display()))
    }
}

#[async_trait]
impl OrderBackend for ExportBackend {
    async fn fetch_stage_orders(&self, _session: &Session, stage: Stage) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .iter()
            .filter(|order| board_stage(&order.current_stage) == Some(stage))
            .cloned()
            .collect())
    }

    async fn fetch_unstaged_orders(&self, _session: &Session) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .iter()
            .filter(|order| board_stage(&order.current_stage).is_none())
            .cloned()
            .collect())
    }

    async fn submit_assignment(
        &self,
        _session: &Session,
        _request: &AssignmentRequest,
    ) -> Result<BackendReply> {
        Ok(self.read_only())
    }

    async fn set_urgent(
        &self,
        _session: &Session,
        _order_id: &str,
        _urgent: bool,
    ) -> Result<BackendReply> {
        Ok(self.read_only())
    }

    async fn set_remarks(
        &self,
        _session: &Session,
        _order_id: &str,
        _remarks: &str,
    ) -> Result<BackendReply> {
        Ok(self.read_only())
    }
}
