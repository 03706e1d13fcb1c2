//! Command handlers
//!
//! Each handler turns parsed arguments into a core call and renders the
//! result. Handlers that need orders take the loaded board by reference so
//! `main` decides when the export is read.

use anyhow::{Context, Result};
use jiff::Timestamp;
use log::debug;
use valveflow_core::{
    params::AssignOrder, step_label, ExportBackend, OperationStatus,
    OrderBoard, OrderDetail, ProgressTable, Stage, StageOptions, WorkflowStages,
};

use crate::{
    cli::{AssignArgs, OrdersArgs, ShowOrderArgs, StageArgs},
    renderer::TerminalRenderer,
};

pub struct Cli {
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(renderer: TerminalRenderer) -> Self {
        Self { renderer }
    }

    pub fn list_stages(&self) -> Result<()> {
        self.renderer.render(&WorkflowStages.to_string())
    }

    /// Operators may name the stage by its label; it is mapped to the graph
    /// key before the lookup.
    pub fn next_steps(&self, args: &StageArgs) -> Result<()> {
        let current = Stage::parse_lenient(&args.stage)
            .map_or_else(|| args.stage.clone(), |stage| stage.key().to_string());
        self.renderer
            .render(&StageOptions::for_stage(&current).to_string())
    }

    /// Prints the bare label so it can be used from scripts.
    pub fn label(&self, args: &StageArgs) -> Result<()> {
        println!("{}", step_label(&args.stage));
        Ok(())
    }

    pub async fn list_orders(
        &self,
        board: &OrderBoard<ExportBackend>,
        args: &OrdersArgs,
    ) -> Result<()> {
        let orders = match args.stage.as_deref() {
            Some(raw) => match Stage::parse_lenient(raw) {
                Some(stage) => board.orders_at(stage).await,
                None => {
                    debug!("No workflow stage matches {raw:?}");
                    Vec::new()
                }
            },
            None => board.visible_orders().await,
        };

        self.renderer.render(&ProgressTable(orders).to_string())
    }

    pub async fn show_order(
        &self,
        board: &OrderBoard<ExportBackend>,
        args: &ShowOrderArgs,
    ) -> Result<()> {
        let order = match args.split_id.as_deref() {
            Some(split_id) => board.find_portion(&args.order_id, Some(split_id)).await?,
            None => board.find(&args.order_id).await?,
        };
        self.renderer
            .render(&OrderDetail::new(&order, Timestamp::now()).to_string())
    }

    /// Validates an assignment against the exported order and prints the
    /// payload(s) the backend would receive, one JSON document per request.
    ///
    /// Nothing is sent: the export is a snapshot and the backend owns the
    /// real submission.
    pub async fn assign(&self, board: &OrderBoard<ExportBackend>, args: AssignArgs) -> Result<()> {
        let params: AssignOrder = args.into();

        let order = board
            .find_portion(&params.order_id, params.split_id.as_deref())
            .await?;

        let requests = params.validate(&order)?;

        for request in &requests {
            let payload =
                serde_json::to_string_pretty(request).context("Failed to encode payload")?;
            println!("{payload}");
        }

        self.renderer.render_status(&OperationStatus::success(format!(
            "{} assignment request(s) valid for order {}",
            requests.len(),
            params.order_id
        )))
    }
}
