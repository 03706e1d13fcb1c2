use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{AssignArgs, OrdersArgs, ShowOrderArgs, StageArgs};

/// Command-line view of valve shop orders and their workflow stages
///
/// Reads an order export saved from the order service and shows where each
/// order stands, which stages it may move to next, and the exact payload an
/// assignment would send.
#[derive(Parser)]
#[command(version, about, name = "vf")]
pub struct Args {
    /// Path to the order export (JSON). Defaults to
    /// $XDG_DATA_HOME/valveflow/orders.json
    #[arg(long, global = true)]
    pub orders_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
///
/// `stages`, `next` and `label` only need the workflow graph; `orders`,
/// `show` and `assign` read the order export.
#[derive(Subcommand)]
pub enum Commands {
    /// List every workflow stage with its successors
    Stages,
    /// Show the stages an order may move to next
    #[command(alias = "n")]
    Next(StageArgs),
    /// Print the display label of a stage key
    Label(StageArgs),
    /// Show the progress table of exported orders
    #[command(aliases = ["o", "ls"])]
    Orders(OrdersArgs),
    /// Show one order with its stage history
    #[command(alias = "s")]
    Show(ShowOrderArgs),
    /// Validate an assignment and print the payload it would send
    #[command(alias = "a")]
    Assign(AssignArgs),
}
