// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job command handlers

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use stalk_client::{Body, Client, JobId, PutOptions, DEFAULT_PRIORITY};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::output::{write_done, write_job, write_number, OutputFormat};

#[derive(Args, Debug)]
pub struct PutArgs {
    /// Job body
    pub body: String,
    /// Priority (lower is more urgent)
    #[arg(long, default_value_t = DEFAULT_PRIORITY)]
    pub priority: u32,
    /// Seconds before the job becomes ready
    #[arg(long, default_value_t = 0)]
    pub delay: u64,
    /// Seconds a worker may hold the job before it is released
    #[arg(long, default_value_t = 60)]
    pub ttr: u64,
}

#[derive(Args, Debug)]
pub struct ReserveArgs {
    /// Give up after this many seconds (0: only take a job that is ready now)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// Reserve this job instead of the next ready one
    #[arg(long, value_name = "ID", conflicts_with = "timeout")]
    pub job: Option<u64>,
    /// Delete the job once printed
    #[arg(long)]
    pub delete: bool,
}

#[derive(Args, Debug)]
pub struct ReleaseArgs {
    /// Job ID
    pub id: u64,
    /// New priority (lower is more urgent)
    #[arg(long, default_value_t = DEFAULT_PRIORITY)]
    pub priority: u32,
    /// Seconds before the job becomes ready again
    #[arg(long, default_value_t = 0)]
    pub delay: u64,
}

pub async fn put<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    args: PutArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let body = match client.encoding() {
        Some(_) => Body::Text(args.body),
        None => Body::Bytes(args.body.into_bytes()),
    };
    let options = PutOptions::default()
        .priority(args.priority)
        .delay(Duration::from_secs(args.delay))
        .ttr(Duration::from_secs(args.ttr));
    let id = client.put(body, options).await?;
    write_number(out, "id", id.0, format)
}

pub async fn reserve<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    args: ReserveArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let job = match args.job {
        Some(id) => client.reserve_job(id).await?,
        None => client.reserve(args.timeout.map(Duration::from_secs)).await?,
    };
    write_job(out, &job, format)?;
    if args.delete {
        client.delete(&job).await?;
    }
    Ok(())
}

pub async fn delete<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    id: u64,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    client.delete(id).await?;
    write_done(out, "deleted", JobId(id), format)
}

// A fresh session holds no reservations, so the commands below take the
// job first.

pub async fn release<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    args: ReleaseArgs,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let job = client.reserve_job(args.id).await?;
    client.release(&job, args.priority, Duration::from_secs(args.delay)).await?;
    write_done(out, "released", job.id, format)
}

pub async fn bury<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    id: u64,
    priority: u32,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let job = client.reserve_job(id).await?;
    client.bury(&job, priority).await?;
    write_done(out, "buried", job.id, format)
}

pub async fn touch<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    id: u64,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let job = client.reserve_job(id).await?;
    client.touch(&job).await?;
    write_done(out, "touched", job.id, format)
}

pub async fn kick<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    bound: u64,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let kicked = client.kick(bound).await?;
    write_number(out, "kicked", kicked, format)
}

pub async fn kick_job<S: AsyncRead + AsyncWrite + Unpin>(
    client: &Client<S>,
    id: u64,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    client.kick_job(id).await?;
    write_done(out, "kicked", JobId(id), format)
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
