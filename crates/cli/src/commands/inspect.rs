// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only commands: peek and stats

use std::io::Write;

use anyhow::Result;
use clap::{ArgGroup, Args};
use stalk_client::Client;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::output::{write_job, write_stats, OutputFormat};

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("which").required(true).args(["id", "ready", "delayed", "buried"])
))]
pub struct PeekArgs {
    /// Job ID
    pub id: Option<u64>,
    /// Next ready job in the used tube
    #[arg(long)]
    pub ready: bool,
    /// Delayed job in the used tube closest to becoming ready
    #[arg(long)]
    pub delayed: bool,
    /// Oldest buried job in the used tube
    #[arg(long)]
    pub buried: bool,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Statistics for one job
    #[arg(long, value_name = "ID", conflicts_with = "tube")]
    pub job: Option<u64>,
    /// Statistics for one tube
    #[arg(long, value_name = "NAME")]
    pub tube: Option<String>,
}

pub async fn peek<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    args: PeekArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let job = match args.id {
        Some(id) => client.peek(id).await?,
        None if args.ready => client.peek_ready().await?,
        None if args.delayed => client.peek_delayed().await?,
        None => client.peek_buried().await?,
    };
    write_job(out, &job, format)
}

pub async fn stats<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    args: StatsArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let stats = match (args.job, &args.tube) {
        (Some(id), _) => client.stats_job(id).await?,
        (None, Some(tube)) => client.stats_tube(tube).await?,
        (None, None) => client.stats().await?,
    };
    write_stats(out, &stats, format)
}
