// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! stalk-client: async client for the beanstalkd work queue.
//!
//! A [`Client`] owns one connection and exposes the full command set: put,
//! reserve, delete, release, bury, touch, watch/ignore, peek, kick, stats,
//! tube listings and pause. Commands are strictly request-then-response;
//! concurrent callers on one client take turns on the connection.

mod client;
mod config;
mod connection;
mod encoding;
mod env;
mod error;
mod job;
mod operations;
mod stats;
mod tubes;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use client::Client;
pub use config::{Address, ClientConfig, Watch, DEFAULT_CONNECT_TIMEOUT, DEFAULT_PORT};
pub use encoding::{Encoding, UnknownEncoding};
pub use error::ClientError;
pub use job::{Body, Job, JobId, PutOptions, DEFAULT_DELAY, DEFAULT_PRIORITY, DEFAULT_TTR};
pub use stats::Stats;
pub use tubes::{init_commands, TubeState};

// Errors callers match on come from the wire crate
pub use stalk_wire::{ProtocolError, Rejection, ServerError, DEFAULT_TUBE};
