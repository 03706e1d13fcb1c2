//! Argument wrappers for each subcommand
//!
//! Each wrapper carries the clap attributes for one command and converts into
//! the core parameter type with `From`, keeping clap out of the core crate.

use clap::Args;
use valveflow_core::{
    params::{AssignOrder, NextStagePolicy, SplitAssign},
    Stage,
};

/// A stage key or label, in any capitalisation
#[derive(Args)]
pub struct StageArgs {
    #[arg(help = "Stage key or label, e.g. material-issue or \"Material Issue\"")]
    pub stage: String,
}

/// Show the progress table
///
/// Without --stage, every order the export holds for a workflow stage is
/// listed. Unknown stages simply match nothing.
#[derive(Args)]
pub struct OrdersArgs {
    #[arg(short, long, help = "Only show orders currently at this stage")]
    pub stage: Option<String>,
}

/// Show one order in detail
///
/// Without --split-id the first loaded portion of the order is shown.
#[derive(Args)]
pub struct ShowOrderArgs {
    #[arg(help = "Identifier of the order to show")]
    pub order_id: String,
    #[arg(long, help = "Split portion to show when the order was divided")]
    pub split_id: Option<String>,
}

/// Validate an assignment to the next stage
///
/// The main quantity may not exceed the pending quantity. When --split-next
/// or --split-qty is given, main and split quantities must add up to exactly
/// the pending quantity and target two different next stages. Pages with a
/// single fixed successor use --fixed-next instead of --next.
#[derive(Args)]
pub struct AssignArgs {
    #[arg(help = "Identifier of the order to assign")]
    pub order_id: String,
    #[arg(long, help = "Split portion of the order, if it was divided before")]
    pub split_id: Option<String>,
    #[arg(short, long, help = "Next stage to send the quantity to")]
    pub next: Option<String>,
    #[arg(short, long, help = "Quantity to send to the next stage")]
    pub qty: u32,
    #[arg(long, help = "Second next stage receiving the rest of the pending quantity")]
    pub split_next: Option<String>,
    #[arg(long, help = "Quantity for the second next stage")]
    pub split_qty: Option<u32>,
    #[arg(
        long,
        value_parser = parse_stage,
        conflicts_with = "next",
        help = "Always send to this stage, bypassing the next-stage choice"
    )]
    pub fixed_next: Option<Stage>,
}

fn parse_stage(raw: &str) -> Result<Stage, String> {
    raw.parse()
}

impl From<AssignArgs> for AssignOrder {
    fn from(val: AssignArgs) -> Self {
        let split = (val.split_next.is_some() || val.split_qty.is_some()).then(|| SplitAssign {
            next_stage: val.split_next,
            quantity: val.split_qty.unwrap_or(0),
        });

        AssignOrder {
            order_id: val.order_id,
            split_id: val.split_id,
            next_stage: val.next,
            quantity: val.qty,
            split,
            policy: val
                .fixed_next
                .map_or(NextStagePolicy::Graph, NextStagePolicy::Fixed),
        }
    }
}
