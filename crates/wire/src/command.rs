// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commands sent from client to server.
//!
//! Each variant knows its command line, the status word that means
//! success, and which rejections it may legitimately receive.

use crate::codec::encode_command;
use crate::Status;

/// A single request on the connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Insert a job into the used tube
    Put { priority: u32, delay: u32, ttr: u32, body: &'a [u8] },

    /// Change the tube new jobs are put into
    Use { tube: &'a str },

    /// Reserve a job, waiting indefinitely
    Reserve,

    /// Reserve a job, waiting at most `timeout` seconds
    ReserveWithTimeout { timeout: u64 },

    /// Reserve a specific job
    ReserveJob { id: u64 },

    Delete { id: u64 },

    Release { id: u64, priority: u32, delay: u32 },

    Bury { id: u64, priority: u32 },

    /// Extend the TTR of a reserved job
    Touch { id: u64 },

    Watch { tube: &'a str },

    Ignore { tube: &'a str },

    Peek { id: u64 },

    PeekReady,

    PeekDelayed,

    PeekBuried,

    /// Move up to `bound` buried (or, failing that, delayed) jobs to ready
    Kick { bound: u64 },

    KickJob { id: u64 },

    StatsJob { id: u64 },

    StatsTube { tube: &'a str },

    Stats,

    ListTubes,

    ListTubeUsed,

    ListTubesWatched,

    PauseTube { tube: &'a str, delay: u32 },
}

impl Command<'_> {
    /// The command verb as sent on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Put { .. } => "put",
            Command::Use { .. } => "use",
            Command::Reserve => "reserve",
            Command::ReserveWithTimeout { .. } => "reserve-with-timeout",
            Command::ReserveJob { .. } => "reserve-job",
            Command::Delete { .. } => "delete",
            Command::Release { .. } => "release",
            Command::Bury { .. } => "bury",
            Command::Touch { .. } => "touch",
            Command::Watch { .. } => "watch",
            Command::Ignore { .. } => "ignore",
            Command::Peek { .. } => "peek",
            Command::PeekReady => "peek-ready",
            Command::PeekDelayed => "peek-delayed",
            Command::PeekBuried => "peek-buried",
            Command::Kick { .. } => "kick",
            Command::KickJob { .. } => "kick-job",
            Command::StatsJob { .. } => "stats-job",
            Command::StatsTube { .. } => "stats-tube",
            Command::Stats => "stats",
            Command::ListTubes => "list-tubes",
            Command::ListTubeUsed => "list-tube-used",
            Command::ListTubesWatched => "list-tubes-watched",
            Command::PauseTube { .. } => "pause-tube",
        }
    }

    /// The status word that signals success.
    pub fn expected(&self) -> Status {
        match self {
            Command::Put { .. } => Status::Inserted,
            Command::Use { .. } | Command::ListTubeUsed => Status::Using,
            Command::Reserve | Command::ReserveWithTimeout { .. } | Command::ReserveJob { .. } => {
                Status::Reserved
            }
            Command::Delete { .. } => Status::Deleted,
            Command::Release { .. } => Status::Released,
            Command::Bury { .. } => Status::Buried,
            Command::Touch { .. } => Status::Touched,
            Command::Watch { .. } | Command::Ignore { .. } => Status::Watching,
            Command::Peek { .. }
            | Command::PeekReady
            | Command::PeekDelayed
            | Command::PeekBuried => Status::Found,
            Command::Kick { .. } | Command::KickJob { .. } => Status::Kicked,
            Command::StatsJob { .. }
            | Command::StatsTube { .. }
            | Command::Stats
            | Command::ListTubes
            | Command::ListTubesWatched => Status::Ok,
            Command::PauseTube { .. } => Status::Paused,
        }
    }

    /// Negative status words this command may receive besides the
    /// universal server errors.
    pub fn rejections(&self) -> &'static [Status] {
        match self {
            Command::Put { .. } => &[Status::Buried, Status::ExpectedCrlf, Status::JobTooBig],
            Command::Reserve => &[Status::DeadlineSoon],
            Command::ReserveWithTimeout { .. } => &[Status::DeadlineSoon, Status::TimedOut],
            Command::Release { .. } => &[Status::Buried, Status::NotFound],
            Command::Ignore { .. } => &[Status::NotIgnored],
            Command::ReserveJob { .. }
            | Command::Delete { .. }
            | Command::Bury { .. }
            | Command::Touch { .. }
            | Command::Peek { .. }
            | Command::PeekReady
            | Command::PeekDelayed
            | Command::PeekBuried
            | Command::KickJob { .. }
            | Command::StatsJob { .. }
            | Command::StatsTube { .. }
            | Command::PauseTube { .. } => &[Status::NotFound],
            Command::Use { .. }
            | Command::Watch { .. }
            | Command::Kick { .. }
            | Command::Stats
            | Command::ListTubes
            | Command::ListTubeUsed
            | Command::ListTubesWatched => &[],
        }
    }

    /// Encode the command without its final CR LF.
    pub fn encode(&self) -> Vec<u8> {
        let name = self.name().to_string();
        match *self {
            Command::Put { priority, delay, ttr, body } => encode_command(
                &[
                    name,
                    priority.to_string(),
                    delay.to_string(),
                    ttr.to_string(),
                    body.len().to_string(),
                ],
                Some(body),
            ),
            Command::Use { tube }
            | Command::Watch { tube }
            | Command::Ignore { tube }
            | Command::StatsTube { tube } => encode_command(&[name.as_str(), tube], None),
            Command::ReserveWithTimeout { timeout } => {
                encode_command(&[name, timeout.to_string()], None)
            }
            Command::ReserveJob { id }
            | Command::Delete { id }
            | Command::Touch { id }
            | Command::Peek { id }
            | Command::KickJob { id }
            | Command::StatsJob { id } => encode_command(&[name, id.to_string()], None),
            Command::Release { id, priority, delay } => encode_command(
                &[name, id.to_string(), priority.to_string(), delay.to_string()],
                None,
            ),
            Command::Bury { id, priority } => {
                encode_command(&[name, id.to_string(), priority.to_string()], None)
            }
            Command::Kick { bound } => encode_command(&[name, bound.to_string()], None),
            Command::PauseTube { tube, delay } => {
                encode_command(&[name, tube.to_string(), delay.to_string()], None)
            }
            Command::Reserve
            | Command::PeekReady
            | Command::PeekDelayed
            | Command::PeekBuried
            | Command::Stats
            | Command::ListTubes
            | Command::ListTubeUsed
            | Command::ListTubesWatched => encode_command(&[name], None),
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
