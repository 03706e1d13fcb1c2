//! Valveflow CLI
//!
//! Read-only terminal view of the valve shop workflow and an order export.

mod args;
mod cli;
mod handlers;
mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::Cli;
use log::info;
use renderer::TerminalRenderer;
use valveflow_core::{DashboardBuilder, ExportBackend, OrderBoard};
use Commands::*;

async fn load_board(orders_file: Option<PathBuf>) -> Result<OrderBoard<ExportBackend>> {
    DashboardBuilder::new()
        .with_orders_path(orders_file)
        .build()
        .await
        .context("Failed to load order export")
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        orders_file,
        no_color,
        command,
    } = Args::parse();

    let cli = Cli::new(TerminalRenderer::new(!no_color));

    info!("Valveflow started");

    match command {
        Some(Stages) | None => cli.list_stages(),
        Some(Next(args)) => cli.next_steps(&args),
        Some(Label(args)) => cli.label(&args),
        Some(Orders(args)) => cli.list_orders(&load_board(orders_file).await?, &args).await,
        Some(Show(args)) => cli.show_order(&load_board(orders_file).await?, &args).await,
        Some(Assign(args)) => cli.assign(&load_board(orders_file).await?, args).await,
    }
}
