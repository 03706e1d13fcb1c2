//! The remote order service seen from the dashboard.

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{AssignmentRequest, Order},
    session::Session,
    workflow::Stage,
};

/// Answer to a mutating call that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReply {
    pub success: bool,
    pub message: String,
}

impl BackendReply {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Remote order storage. The backend owns persistence and re-validates every
/// assignment; implementations report transport failures as
/// `DashboardError::Transport`.
#[async_trait]
pub trait OrderBackend: Send + Sync {
    /// Orders currently sitting at `stage`, including the assembly lines
    /// when `stage` is assembly.
    async fn fetch_stage_orders(&self, session: &Session, stage: Stage) -> Result<Vec<Order>>;

    /// Orders whose current stage is outside the graph, such as packaging.
    /// Backends that only list by stage have none to offer.
    async fn fetch_unstaged_orders(&self, _session: &Session) -> Result<Vec<Order>> {
        Ok(Vec::new())
    }

    async fn submit_assignment(
        &self,
        session: &Session,
        request: &AssignmentRequest,
    ) -> Result<BackendReply>;

    async fn set_urgent(&self, session: &Session, order_id: &str, urgent: bool)
        -> Result<BackendReply>;

    async fn set_remarks(
        &self,
        session: &Session,
        order_id: &str,
        remarks: &str,
    ) -> Result<BackendReply>;
}
