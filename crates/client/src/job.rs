// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Jobs and job bodies.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default priority for new and released jobs (2^16).
pub const DEFAULT_PRIORITY: u32 = 1 << 16;

/// Default delay before a job becomes ready.
pub const DEFAULT_DELAY: Duration = Duration::ZERO;

/// Default time-to-run for a reserved job.
pub const DEFAULT_TTR: Duration = Duration::from_secs(60);

/// Server-assigned job identifier.
///
/// Only meaningful to the server that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for JobId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<&Job> for JobId {
    fn from(job: &Job) -> Self {
        job.id
    }
}

impl From<Job> for JobId {
    fn from(job: Job) -> Self {
        job.id
    }
}

impl FromStr for JobId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// A job body: raw bytes, or text decoded under the client's encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Text(String),
    Bytes(Vec<u8>),
}

impl Body {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            Body::Bytes(_) => None,
        }
    }

    /// Bytes as held by this value. For text this is its UTF-8 form, not
    /// necessarily what goes on the wire.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Text(text) => text.as_bytes(),
            Body::Bytes(bytes) => bytes,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Body::Text(_))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Body {
    fn from(bytes: &[u8; N]) -> Self {
        Body::Bytes(bytes.to_vec())
    }
}

/// A job as returned by reserve and peek.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub id: JobId,
    pub body: Body,
}

impl Job {
    pub fn new(id: impl Into<JobId>, body: impl Into<Body>) -> Self {
        Self { id: id.into(), body: body.into() }
    }
}

/// Scheduling parameters for `put`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PutOptions {
    /// 0 is most urgent, `u32::MAX` least
    pub priority: u32,
    /// Whole seconds before the job becomes ready
    pub delay: Duration,
    /// Whole seconds a reservation lasts before the server releases the job
    pub ttr: Duration,
}

impl Default for PutOptions {
    fn default() -> Self {
        Self { priority: DEFAULT_PRIORITY, delay: DEFAULT_DELAY, ttr: DEFAULT_TTR }
    }
}

impl PutOptions {
    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn ttr(mut self, ttr: Duration) -> Self {
        self.ttr = ttr;
        self
    }
}

/// Whole seconds of `duration`, saturating at `u32::MAX`.
pub(crate) fn whole_secs(duration: Duration) -> u32 {
    u32::try_from(duration.as_secs()).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
