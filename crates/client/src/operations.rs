// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue operations for Client.

use std::time::Duration;

use stalk_wire::{parse_list, parse_stats, Command};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::job::whole_secs;
use crate::{Body, Client, ClientError, Job, JobId, PutOptions, Stats};

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /// Insert a job into the used tube and return its id.
    ///
    /// Text bodies are encoded under the client's encoding; with no
    /// encoding configured they are refused before anything is sent.
    pub async fn put(
        &self,
        body: impl Into<Body>,
        options: PutOptions,
    ) -> Result<JobId, ClientError> {
        let body = body.into();
        let bytes = self.encode_body(&body)?;
        let command = Command::Put {
            priority: options.priority,
            delay: whole_secs(options.delay),
            ttr: whole_secs(options.ttr),
            body: &bytes,
        };
        let id = self.session().await.int(&command).await?;
        Ok(JobId(id))
    }

    /// Change the tube `put` inserts into.
    pub async fn use_tube(&self, tube: &str) -> Result<(), ClientError> {
        self.session().await.use_tube(tube).await
    }

    /// Reserve a job from the watched tubes.
    ///
    /// With no timeout this waits until a job is ready, holding the
    /// connection the whole time. With a timeout (whole seconds, zero
    /// meaning "only if one is ready now") it fails with a `TimedOut`
    /// rejection once the bound passes; see [`ClientError::is_timed_out`].
    pub async fn reserve(&self, timeout: Option<Duration>) -> Result<Job, ClientError> {
        let command = match timeout {
            None => Command::Reserve,
            Some(timeout) => Command::ReserveWithTimeout { timeout: timeout.as_secs() },
        };
        self.job_command(&command).await
    }

    /// Reserve a specific job. Fails with a `NotFound` rejection when the
    /// job is gone or reserved elsewhere.
    pub async fn reserve_job(&self, job: impl Into<JobId>) -> Result<Job, ClientError> {
        self.job_command(&Command::ReserveJob { id: job.into().0 }).await
    }

    pub async fn delete(&self, job: impl Into<JobId>) -> Result<(), ClientError> {
        self.status_command(&Command::Delete { id: job.into().0 }).await
    }

    /// Return a reserved job to the ready (or, with a delay, delayed) state.
    pub async fn release(
        &self,
        job: impl Into<JobId>,
        priority: u32,
        delay: Duration,
    ) -> Result<(), ClientError> {
        let command = Command::Release { id: job.into().0, priority, delay: whole_secs(delay) };
        self.status_command(&command).await
    }

    /// Bury a reserved job until it is kicked.
    pub async fn bury(&self, job: impl Into<JobId>, priority: u32) -> Result<(), ClientError> {
        self.status_command(&Command::Bury { id: job.into().0, priority }).await
    }

    /// Restart the TTR of a reserved job.
    pub async fn touch(&self, job: impl Into<JobId>) -> Result<(), ClientError> {
        self.status_command(&Command::Touch { id: job.into().0 }).await
    }

    /// Add a tube to the watch list; returns the number of watched tubes.
    pub async fn watch(&self, tube: &str) -> Result<u64, ClientError> {
        self.session().await.watch(tube).await
    }

    /// Remove a tube from the watch list; returns the number of watched
    /// tubes. The server refuses to drop the last one (`NotIgnored`).
    pub async fn ignore(&self, tube: &str) -> Result<u64, ClientError> {
        self.session().await.ignore(tube).await
    }

    pub async fn peek(&self, job: impl Into<JobId>) -> Result<Job, ClientError> {
        self.job_command(&Command::Peek { id: job.into().0 }).await
    }

    /// Next ready job in the used tube.
    pub async fn peek_ready(&self) -> Result<Job, ClientError> {
        self.job_command(&Command::PeekReady).await
    }

    /// Delayed job in the used tube with the shortest delay left.
    pub async fn peek_delayed(&self) -> Result<Job, ClientError> {
        self.job_command(&Command::PeekDelayed).await
    }

    /// Oldest buried job in the used tube.
    pub async fn peek_buried(&self) -> Result<Job, ClientError> {
        self.job_command(&Command::PeekBuried).await
    }

    /// Move up to `bound` jobs in the used tube to ready; returns how many
    /// moved.
    ///
    /// The server kicks only buried jobs when there are any, otherwise
    /// delayed jobs.
    pub async fn kick(&self, bound: u64) -> Result<u64, ClientError> {
        self.session().await.int(&Command::Kick { bound }).await
    }

    /// Move one buried or delayed job to ready.
    pub async fn kick_job(&self, job: impl Into<JobId>) -> Result<(), ClientError> {
        self.status_command(&Command::KickJob { id: job.into().0 }).await
    }

    pub async fn stats_job(&self, job: impl Into<JobId>) -> Result<Stats, ClientError> {
        self.stats_command(&Command::StatsJob { id: job.into().0 }).await
    }

    pub async fn stats_tube(&self, tube: &str) -> Result<Stats, ClientError> {
        self.stats_command(&Command::StatsTube { tube }).await
    }

    /// Server-wide statistics.
    pub async fn stats(&self) -> Result<Stats, ClientError> {
        self.stats_command(&Command::Stats).await
    }

    /// Every tube that currently exists on the server.
    pub async fn tubes(&self) -> Result<Vec<String>, ClientError> {
        self.list_command(&Command::ListTubes).await
    }

    /// The used tube, as the server reports it.
    pub async fn using(&self) -> Result<String, ClientError> {
        self.session().await.name(&Command::ListTubeUsed).await
    }

    /// The watched tubes, as the server reports them.
    pub async fn watching(&self) -> Result<Vec<String>, ClientError> {
        self.list_command(&Command::ListTubesWatched).await
    }

    /// Stop reservations from `tube` for `delay` (whole seconds).
    pub async fn pause_tube(&self, tube: &str, delay: Duration) -> Result<(), ClientError> {
        self.status_command(&Command::PauseTube { tube, delay: whole_secs(delay) }).await
    }

    async fn status_command(&self, command: &Command<'_>) -> Result<(), ClientError> {
        self.session().await.status(command).await?;
        Ok(())
    }

    async fn job_command(&self, command: &Command<'_>) -> Result<Job, ClientError> {
        let (id, chunk) = self.session().await.job(command).await?;
        self.decode_job(id, chunk)
    }

    async fn stats_command(&self, command: &Command<'_>) -> Result<Stats, ClientError> {
        let chunk = self.session().await.block(command).await?;
        Ok(parse_stats(&chunk)?.into())
    }

    async fn list_command(&self, command: &Command<'_>) -> Result<Vec<String>, ClientError> {
        let chunk = self.session().await.block(command).await?;
        Ok(parse_list(&chunk)?)
    }
}

#[cfg(test)]
#[path = "operations_tests.rs"]
mod tests;
