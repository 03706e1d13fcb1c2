//! Tests for the order board against a scripted backend.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex as StdMutex},
};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::*;
use crate::params::SplitAssign;

#[derive(Clone, Copy)]
enum Outcome {
    Accept,
    Reject,
    Fail,
}

impl Outcome {
    fn reply(self) -> Result<BackendReply> {
        match self {
            Outcome::Accept => Ok(BackendReply::ok("saved")),
            Outcome::Reject => Ok(BackendReply::rejected("order is locked")),
            Outcome::Fail => Err(DashboardError::Transport {
                message: "connection reset".to_string(),
            }),
        }
    }
}

struct ScriptedBackend {
    orders: Vec<Order>,
    outcome: Outcome,
    gate: Option<Arc<Notify>>,
    assign_script: StdMutex<VecDeque<Outcome>>,
    calls: StdMutex<Vec<String>>,
}

impl ScriptedBackend {
    fn new(orders: Vec<Order>, outcome: Outcome) -> Self {
        Self {
            orders,
            outcome,
            gate: None,
            assign_script: StdMutex::new(VecDeque::new()),
            calls: StdMutex::new(Vec::new()),
        }
    }

    /// Answers assignments from `script` in order, then with the default
    /// outcome.
    fn with_assign_script(self, script: Vec<Outcome>) -> Self {
        *self.assign_script.lock().unwrap() = script.into();
        self
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderBackend for ScriptedBackend {
    async fn fetch_stage_orders(&self, _session: &Session, stage: Stage) -> Result<Vec<Order>> {
        self.record(format!("fetch {stage}"));
        Ok(self
            .orders
            .iter()
            .filter(|o| board_stage(&o.current_stage) == Some(stage))
            .cloned()
            .collect())
    }

    async fn fetch_unstaged_orders(&self, _session: &Session) -> Result<Vec<Order>> {
        self.record("fetch unstaged".to_string());
        Ok(self
            .orders
            .iter()
            .filter(|o| board_stage(&o.current_stage).is_none())
            .cloned()
            .collect())
    }

    async fn submit_assignment(
        &self,
        _session: &Session,
        request: &AssignmentRequest,
    ) -> Result<BackendReply> {
        self.record(format!(
            "assign {} {} -> {}",
            request.order_id, request.quantity, request.next_stage
        ));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let scripted = self.assign_script.lock().unwrap().pop_front();
        scripted.unwrap_or(self.outcome).reply()
    }

    async fn set_urgent(
        &self,
        _session: &Session,
        order_id: &str,
        urgent: bool,
    ) -> Result<BackendReply> {
        self.record(format!("urgent {order_id} {urgent}"));
        self.outcome.reply()
    }

    async fn set_remarks(
        &self,
        _session: &Session,
        order_id: &str,
        remarks: &str,
    ) -> Result<BackendReply> {
        self.record(format!("remarks {order_id} {remarks}"));
        self.outcome.reply()
    }
}

fn order(id: &str, stage: &str, pending: u32) -> Order {
    Order {
        id: id.to_string(),
        total_qty: pending,
        executed_qty: 0,
        qty_pending: pending,
        current_stage: stage.to_string(),
        urgent: false,
        remarks: None,
        split_id: None,
        stage_progress: None,
        workflow_history: vec![],
    }
}

fn sample_orders() -> Vec<Order> {
    vec![
        order("SO-1", "planning", 10),
        order("SO-2", "Semi QC", 20),
        order("SO-3", "assembly", 100),
        order("SO-4", "svs", 8),
        order("SO-5", "packaging", 3),
        order("SO-6", "assembly-b", 12),
    ]
}

async fn loaded_board(outcome: Outcome, role: Role) -> OrderBoard<ScriptedBackend> {
    let board = OrderBoard::new(
        ScriptedBackend::new(sample_orders(), outcome),
        Session::new("t0ken", role),
    );
    board.load_all_stages().await.expect("load stages");
    board
}

fn assign(order_id: &str, next: &str, quantity: u32) -> AssignOrder {
    AssignOrder {
        order_id: order_id.to_string(),
        next_stage: Some(next.to_string()),
        quantity,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_load_all_stages_fetches_every_stage_in_order() {
    let board = loaded_board(Outcome::Accept, Role::Admin).await;

    let fetches: Vec<String> = board.backend().calls();
    let mut expected: Vec<String> = all_workflow_steps()
        .iter()
        .map(|s| format!("fetch {s}"))
        .collect();
    expected.push("fetch unstaged".to_string());
    assert_eq!(fetches, expected);

    assert_eq!(board.orders().await.len(), 6);
    assert_eq!(board.orders_at(Stage::SemiQc).await[0].id, "SO-2");
}

#[tokio::test]
async fn test_display_only_stages_stay_on_board() {
    let board = loaded_board(Outcome::Accept, Role::Admin).await;

    assert_eq!(board.find("SO-5").await.unwrap().current_stage, "packaging");

    let assembly: Vec<String> = board
        .orders_at(Stage::Assembly)
        .await
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(assembly, vec!["SO-3", "SO-6"]);

    let ids: Vec<String> = board.visible_orders().await.into_iter().map(|o| o.id).collect();
    assert!(ids.contains(&"SO-5".to_string()));
}

#[tokio::test]
async fn test_assembly_operator_sees_assembly_lines() {
    let board = loaded_board(Outcome::Accept, Role::Operator(Stage::Assembly)).await;

    assert_eq!(board.backend().calls(), vec!["fetch assembly".to_string()]);
    assert_eq!(board.visible_orders().await.len(), 2);
    assert!(board.find("SO-5").await.is_err());
}

#[tokio::test]
async fn test_operator_loads_and_sees_own_stage_only() {
    let board = loaded_board(Outcome::Accept, Role::Operator(Stage::Svs)).await;

    assert_eq!(board.backend().calls(), vec!["fetch svs".to_string()]);
    let visible = board.visible_orders().await;
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "SO-4");
}

#[tokio::test]
async fn test_reload_replaces_stage_orders() {
    let board = loaded_board(Outcome::Accept, Role::Admin).await;
    assert_eq!(board.load_stage(Stage::Assembly).await.unwrap(), 2);
    assert_eq!(board.orders_at(Stage::Assembly).await.len(), 2);
    assert_eq!(board.load_unstaged().await.unwrap(), 1);
    assert_eq!(board.orders().await.len(), 6);
}

#[tokio::test]
async fn test_find_unknown_order() {
    let board = loaded_board(Outcome::Accept, Role::Admin).await;
    assert!(matches!(
        board.find("SO-404").await,
        Err(DashboardError::OrderNotFound { id }) if id == "SO-404"
    ));
}

#[tokio::test]
async fn test_toggle_urgent_accepted() {
    let board = loaded_board(Outcome::Accept, Role::Admin).await;

    assert!(board.toggle_urgent("SO-2").await.unwrap());
    assert!(board.find("SO-2").await.unwrap().urgent);
    assert!(board.backend().calls().contains(&"urgent SO-2 true".to_string()));

    assert!(!board.toggle_urgent("SO-2").await.unwrap());
    assert!(!board.find("SO-2").await.unwrap().urgent);
}

#[tokio::test]
async fn test_toggle_urgent_rolls_back_on_rejection() {
    let board = loaded_board(Outcome::Reject, Role::Admin).await;

    let err = board.toggle_urgent("SO-2").await.unwrap_err();
    assert!(matches!(&err, DashboardError::Rejected { message } if message == "order is locked"));
    assert!(err.is_remote());
    assert!(!board.find("SO-2").await.unwrap().urgent);
}

#[tokio::test]
async fn test_toggle_urgent_rolls_back_on_transport_failure() {
    let board = loaded_board(Outcome::Fail, Role::Admin).await;

    let err = board.toggle_urgent("SO-3").await.unwrap_err();
    assert!(matches!(err, DashboardError::Transport { .. }));
    assert!(!board.find("SO-3").await.unwrap().urgent);
}

#[tokio::test]
async fn test_toggle_urgent_unknown_order() {
    let board = loaded_board(Outcome::Accept, Role::Admin).await;
    assert!(matches!(
        board.toggle_urgent("SO-404").await,
        Err(DashboardError::OrderNotFound { .. })
    ));
}

#[tokio::test]
async fn test_remarks_applied_only_after_acceptance() {
    let board = loaded_board(Outcome::Accept, Role::Admin).await;
    board.update_remarks("SO-1", " rush for customer ").await.unwrap();
    assert_eq!(
        board.find("SO-1").await.unwrap().remarks.as_deref(),
        Some("rush for customer")
    );

    board.update_remarks("SO-1", "").await.unwrap();
    assert_eq!(board.find("SO-1").await.unwrap().remarks, None);

    let rejecting = loaded_board(Outcome::Reject, Role::Admin).await;
    assert!(rejecting.update_remarks("SO-1", "hold").await.is_err());
    assert_eq!(rejecting.find("SO-1").await.unwrap().remarks, None);
}

#[tokio::test]
async fn test_submit_sends_validated_requests() {
    let board = loaded_board(Outcome::Accept, Role::Admin).await;

    let mut params = assign("SO-3", "testing1", 60);
    params.split = Some(SplitAssign {
        next_stage: Some("testing2".to_string()),
        quantity: 40,
    });

    let requests = board.submit(&params).await.unwrap();
    assert_eq!(requests.len(), 2);

    let calls = board.backend().calls();
    assert!(calls.contains(&"assign SO-3 60 -> testing1".to_string()));
    assert!(calls.contains(&"assign SO-3 40 -> testing2".to_string()));
    assert!(!board.is_submitting());
}

#[tokio::test]
async fn test_submit_validation_error_makes_no_backend_call() {
    let board = loaded_board(Outcome::Accept, Role::Admin).await;
    let before = board.backend().calls().len();

    let err = board.submit(&assign("SO-1", "material-issue", 11)).await.unwrap_err();
    assert_eq!(err.field(), Some("quantity"));
    assert_eq!(board.backend().calls().len(), before);
    assert!(!board.is_submitting());
}

#[tokio::test]
async fn test_submit_rejected_by_backend() {
    let board = loaded_board(Outcome::Reject, Role::Admin).await;

    let err = board.submit(&assign("SO-4", "marking1", 8)).await.unwrap_err();
    assert!(matches!(err, DashboardError::Rejected { .. }));
    assert!(!board.is_submitting());
}

#[tokio::test]
async fn test_split_rejected_after_main_accepted() {
    let backend = ScriptedBackend::new(sample_orders(), Outcome::Accept)
        .with_assign_script(vec![Outcome::Accept, Outcome::Reject]);
    let board = OrderBoard::new(backend, Session::new("t0ken", Role::Admin));
    board.load_all_stages().await.unwrap();

    let mut params = assign("SO-3", "testing1", 60);
    params.split = Some(SplitAssign {
        next_stage: Some("testing2".to_string()),
        quantity: 40,
    });

    let err = board.submit(&params).await.unwrap_err();
    assert!(matches!(&err, DashboardError::Rejected { message } if message == "order is locked"));

    let calls = board.backend().calls();
    assert!(calls.contains(&"assign SO-3 60 -> testing1".to_string()));
    assert!(calls.contains(&"assign SO-3 40 -> testing2".to_string()));
    assert!(!board.is_submitting());
}

#[tokio::test]
async fn test_find_portion_matches_split_id() {
    let mut first = order("SO-7", "pdi1", 5);
    first.split_id = Some("SO-7-A".to_string());
    let mut second = order("SO-7", "pdi2", 7);
    second.split_id = Some("SO-7-B".to_string());

    let board = OrderBoard::new(
        ScriptedBackend::new(vec![first, second], Outcome::Accept),
        Session::new("t0ken", Role::Admin),
    );
    board.load_all_stages().await.unwrap();

    let portion = board.find_portion("SO-7", Some("SO-7-B")).await.unwrap();
    assert_eq!(portion.current_stage, "pdi2");
    assert_eq!(board.find("SO-7").await.unwrap().split_id.as_deref(), Some("SO-7-A"));
    assert!(matches!(
        board.find_portion("SO-7", None).await,
        Err(DashboardError::OrderNotFound { .. })
    ));
}

#[tokio::test]
async fn test_submit_unknown_order() {
    let board = loaded_board(Outcome::Accept, Role::Admin).await;
    assert!(matches!(
        board.submit(&assign("SO-404", "semi-qc", 1)).await,
        Err(DashboardError::OrderNotFound { .. })
    ));
}

#[tokio::test]
async fn test_second_submit_blocked_while_first_in_flight() {
    let gate = Arc::new(Notify::new());
    let mut backend = ScriptedBackend::new(sample_orders(), Outcome::Accept);
    backend.gate = Some(gate.clone());

    let board = Arc::new(OrderBoard::new(backend, Session::new("t0ken", Role::Admin)));
    board.load_all_stages().await.unwrap();

    let first = {
        let board = board.clone();
        tokio::spawn(async move { board.submit(&assign("SO-1", "material-issue", 10)).await })
    };

    while !board.is_submitting() {
        tokio::task::yield_now().await;
    }

    let second = board.submit(&assign("SO-2", "phosphating", 20)).await;
    assert!(matches!(
        second,
        Err(DashboardError::SubmissionInProgress { id }) if id == "SO-2"
    ));

    gate.notify_one();
    let sent = first.await.unwrap().unwrap();
    assert_eq!(sent[0].next_stage, Stage::MaterialIssue);
    assert!(!board.is_submitting());

    // the flag is released, so the next submit goes through
    gate.notify_one();
    board
        .submit(&assign("SO-2", "phosphating", 20))
        .await
        .unwrap();
}
