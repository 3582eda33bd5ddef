// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering of command results as text or JSON.

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use stalk_client::{Job, JobId, Stats};

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// A job: header line then the raw body in text mode.
pub fn write_job(out: &mut impl Write, job: &Job, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "id: {}", job.id)?;
            out.write_all(job.body.as_bytes())?;
            if !job.body.as_bytes().ends_with(b"\n") {
                writeln!(out)?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, job),
    }
}

/// Outcome of a command that acts on one job, e.g. `deleted 7`.
pub fn write_done(
    out: &mut impl Write,
    action: &str,
    id: JobId,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => Ok(writeln!(out, "{action} {id}")?),
        OutputFormat::Json => write_json(out, &serde_json::json!({ "id": id, "status": action })),
    }
}

/// A bare count or id under a JSON key.
pub fn write_number(
    out: &mut impl Write,
    key: &str,
    value: u64,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => Ok(writeln!(out, "{value}")?),
        OutputFormat::Json => write_json(out, &serde_json::json!({ key: value })),
    }
}

/// Stats in server order, `key: value` per line in text mode.
pub fn write_stats(
    out: &mut impl Write,
    stats: &Stats,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let width = stats.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
            for (key, value) in stats.iter() {
                writeln!(out, "{:width$}  {}", format!("{key}:"), value, width = width + 1)?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, stats),
    }
}

pub fn write_list(
    out: &mut impl Write,
    items: &[String],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for item in items {
                writeln!(out, "{item}")?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, items),
    }
}

pub fn write_name(out: &mut impl Write, name: &str, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => Ok(writeln!(out, "{name}")?),
        OutputFormat::Json => write_json(out, &serde_json::json!({ "tube": name })),
    }
}
