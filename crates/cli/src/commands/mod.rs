// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod inspect;
pub mod job;
pub mod tube;

use std::io::Write;

use clap::{Args, Subcommand};
use stalk_client::{Client, ClientConfig, Watch};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::output::OutputFormat;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

/// Connection options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Server host [env: STALK_HOST, default: 127.0.0.1]
    #[arg(long, global = true)]
    pub host: Option<String>,
    /// Server port [env: STALK_PORT, default: 11300]
    #[arg(long, global = true)]
    pub port: Option<u16>,
    /// Tube to put into; also watched unless --watch is given
    #[arg(long, global = true)]
    pub tube: Option<String>,
    /// Tube to reserve from (can be repeated)
    #[arg(long = "watch", value_name = "TUBE", global = true)]
    pub watch: Vec<String>,
    /// Send and show job bodies as raw bytes
    #[arg(long, global = true)]
    pub raw: bool,
}

impl ConnectionArgs {
    /// Session config: environment first, then these flags.
    pub fn config(&self) -> ClientConfig {
        self.apply(ClientConfig::from_env())
    }

    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(host) = &self.host {
            config.address.host = host.clone();
        }
        if let Some(port) = self.port {
            config.address.port = port;
        }
        if let Some(tube) = &self.tube {
            config = config.with_use(tube.clone()).with_watch(Watch::One(tube.clone()));
        }
        if !self.watch.is_empty() {
            config = config.with_watch(self.watch.clone());
        }
        if self.raw {
            config = config.with_encoding(None);
        }
        config
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Insert a job into the used tube
    Put(job::PutArgs),
    /// Reserve a job from the watched tubes and print it
    Reserve(job::ReserveArgs),
    /// Delete a job
    Delete {
        /// Job ID
        id: u64,
    },
    /// Reserve a job by ID and release it back to the queue
    Release(job::ReleaseArgs),
    /// Reserve a job by ID and bury it
    Bury {
        /// Job ID
        id: u64,
        /// New priority (lower is more urgent)
        #[arg(long, default_value_t = stalk_client::DEFAULT_PRIORITY)]
        priority: u32,
    },
    /// Reserve a job by ID and restart its time-to-run
    Touch {
        /// Job ID
        id: u64,
    },
    /// Kick buried jobs (or, with none buried, delayed jobs) in the used tube
    Kick {
        /// Maximum number of jobs to kick
        bound: u64,
    },
    /// Kick one buried or delayed job
    KickJob {
        /// Job ID
        id: u64,
    },
    /// Show a job without reserving it
    Peek(inspect::PeekArgs),
    /// Show server, tube, or job statistics
    Stats(inspect::StatsArgs),
    /// List all tubes on the server
    Tubes,
    /// List the tubes this session watches
    Watching,
    /// Show the tube this session puts into
    Using,
    /// Stop reservations from a tube for a while
    Pause(tube::PauseArgs),
}

impl Command {
    pub async fn run<S: AsyncRead + AsyncWrite + Unpin>(
        self,
        client: &Client<S>,
        format: OutputFormat,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        match self {
            Command::Put(args) => job::put(client, args, format, out).await,
            Command::Reserve(args) => job::reserve(client, args, format, out).await,
            Command::Delete { id } => job::delete(client, id, format, out).await,
            Command::Release(args) => job::release(client, args, format, out).await,
            Command::Bury { id, priority } => job::bury(client, id, priority, format, out).await,
            Command::Touch { id } => job::touch(client, id, format, out).await,
            Command::Kick { bound } => job::kick(client, bound, format, out).await,
            Command::KickJob { id } => job::kick_job(client, id, format, out).await,
            Command::Peek(args) => inspect::peek(client, args, format, out).await,
            Command::Stats(args) => inspect::stats(client, args, format, out).await,
            Command::Tubes => tube::list(client, format, out).await,
            Command::Watching => tube::watching(client, format, out).await,
            Command::Using => tube::using(client, format, out).await,
            Command::Pause(args) => tube::pause(client, args, format, out).await,
        }
    }
}
