// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tube command handlers

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use stalk_client::Client;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::output::{write_list, write_name, OutputFormat};

#[derive(Args, Debug)]
pub struct PauseArgs {
    /// Tube name
    pub tube: String,
    /// Seconds to hold back reservations
    pub delay: u64,
}

pub async fn list<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    write_list(out, &client.tubes().await?, format)
}

pub async fn watching<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    write_list(out, &client.watching().await?, format)
}

pub async fn using<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    write_name(out, &client.using().await?, format)
}

pub async fn pause<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    args: PauseArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    client.pause_tube(&args.tube, Duration::from_secs(args.delay)).await?;
    match format {
        OutputFormat::Text => writeln!(out, "paused {} for {}s", args.tube, args.delay)?,
        OutputFormat::Json => {
            let value = serde_json::json!({ "tube": args.tube, "paused": args.delay });
            serde_json::to_writer_pretty(&mut *out, &value)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
