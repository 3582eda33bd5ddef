// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! stalk: command-line client for beanstalkd work queues.

mod commands;
mod exit_error;
mod output;

use anyhow::Context;
use clap::Parser;
use stalk_client::Client;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, ConnectionArgs};
use crate::exit_error::ExitError;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "stalk", version, about = "Command-line client for beanstalkd work queues")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

/// Log to stderr, filtered by `STALK_LOG` (default: warn).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("STALK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        let exit = ExitError::from_error(error);
        if !exit.message.is_empty() {
            eprintln!("Error: {}", exit.message);
        }
        std::process::exit(exit.code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.connection.config();
    let address = config.address.clone();
    debug!(address = %address, command = ?cli.command, "running command");
    let client = Client::connect(config)
        .await
        .with_context(|| format!("cannot open a session with {address}"))?;

    let result = cli.command.run(&client, cli.output, &mut std::io::stdout()).await;
    // A failed command still gets a clean shutdown
    let closed = client.close().await;
    result?;
    Ok(closed?)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
