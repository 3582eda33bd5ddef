// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status words and their classification.
//!
//! Every reply starts with one of a fixed set of words. Relative to the
//! command that was sent, a word is either the expected success, a
//! universal server error, an operation-specific rejection, or a protocol
//! violation.

use std::fmt;

use thiserror::Error;

use crate::codec::{ProtocolError, StatusLine};

/// Every status word the server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Inserted,
    Buried,
    ExpectedCrlf,
    JobTooBig,
    Draining,
    Using,
    Reserved,
    DeadlineSoon,
    TimedOut,
    Deleted,
    NotFound,
    Released,
    Touched,
    Watching,
    NotIgnored,
    Found,
    Kicked,
    Ok,
    Paused,
    OutOfMemory,
    InternalError,
    BadFormat,
    UnknownCommand,
}

impl Status {
    pub const ALL: [Status; 23] = [
        Status::Inserted,
        Status::Buried,
        Status::ExpectedCrlf,
        Status::JobTooBig,
        Status::Draining,
        Status::Using,
        Status::Reserved,
        Status::DeadlineSoon,
        Status::TimedOut,
        Status::Deleted,
        Status::NotFound,
        Status::Released,
        Status::Touched,
        Status::Watching,
        Status::NotIgnored,
        Status::Found,
        Status::Kicked,
        Status::Ok,
        Status::Paused,
        Status::OutOfMemory,
        Status::InternalError,
        Status::BadFormat,
        Status::UnknownCommand,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Inserted => "INSERTED",
            Status::Buried => "BURIED",
            Status::ExpectedCrlf => "EXPECTED_CRLF",
            Status::JobTooBig => "JOB_TOO_BIG",
            Status::Draining => "DRAINING",
            Status::Using => "USING",
            Status::Reserved => "RESERVED",
            Status::DeadlineSoon => "DEADLINE_SOON",
            Status::TimedOut => "TIMED_OUT",
            Status::Deleted => "DELETED",
            Status::NotFound => "NOT_FOUND",
            Status::Released => "RELEASED",
            Status::Touched => "TOUCHED",
            Status::Watching => "WATCHING",
            Status::NotIgnored => "NOT_IGNORED",
            Status::Found => "FOUND",
            Status::Kicked => "KICKED",
            Status::Ok => "OK",
            Status::Paused => "PAUSED",
            Status::OutOfMemory => "OUT_OF_MEMORY",
            Status::InternalError => "INTERNAL_ERROR",
            Status::BadFormat => "BAD_FORMAT",
            Status::UnknownCommand => "UNKNOWN_COMMAND",
        }
    }

    /// Look up a status word. Returns `None` for words outside the protocol.
    pub fn parse(word: &str) -> Option<Status> {
        Status::ALL.iter().copied().find(|s| s.as_str() == word)
    }

    /// The universal error this word denotes, if any.
    pub fn server_error(self) -> Option<ServerError> {
        match self {
            Status::BadFormat => Some(ServerError::BadFormat),
            Status::UnknownCommand => Some(ServerError::UnknownCommand),
            Status::OutOfMemory => Some(ServerError::OutOfMemory),
            Status::InternalError => Some(ServerError::InternalError),
            Status::Draining => Some(ServerError::Draining),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors any command can receive.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ServerError {
    #[error("malformed command")]
    BadFormat,

    #[error("unknown command")]
    UnknownCommand,

    #[error("server out of memory")]
    OutOfMemory,

    #[error("internal server error")]
    InternalError,

    #[error("server is draining and refuses new jobs")]
    Draining,
}

/// Outcomes that are valid replies but mean the operation did not proceed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("job not found")]
    NotFound,

    #[error("job too big")]
    JobTooBig,

    #[error("expected CR LF after job body")]
    ExpectedCrlf,

    #[error("reservation timed out")]
    TimedOut,

    #[error("deadline soon for a reserved job")]
    DeadlineSoon,

    #[error("cannot ignore the only watched tube")]
    NotIgnored,

    #[error("job buried: server out of memory growing the priority queue")]
    Buried { id: Option<u64> },
}

impl Rejection {
    fn from_status(status: Status, args: &[String]) -> Option<Rejection> {
        match status {
            Status::NotFound => Some(Rejection::NotFound),
            Status::JobTooBig => Some(Rejection::JobTooBig),
            Status::ExpectedCrlf => Some(Rejection::ExpectedCrlf),
            Status::TimedOut => Some(Rejection::TimedOut),
            Status::DeadlineSoon => Some(Rejection::DeadlineSoon),
            Status::NotIgnored => Some(Rejection::NotIgnored),
            Status::Buried => Some(Rejection::Buried {
                id: args.first().and_then(|a| a.parse().ok()),
            }),
            _ => None,
        }
    }
}

/// Why a status line did not carry the expected success word.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error(transparent)]
    Server(ServerError),

    #[error(transparent)]
    Rejected(Rejection),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Check a status line against the expected success word.
///
/// On success returns the argument tokens. Universal errors are accepted
/// for any command; rejections only when listed in `rejections`. Anything
/// else is a protocol violation.
pub fn decode_status(
    line: StatusLine,
    expected: Status,
    rejections: &[Status],
) -> Result<Vec<String>, StatusError> {
    if line.word == expected.as_str() {
        return Ok(line.args);
    }
    let Some(status) = Status::parse(&line.word) else {
        return Err(ProtocolError::UnknownStatus(line.word).into());
    };
    if let Some(error) = status.server_error() {
        return Err(StatusError::Server(error));
    }
    if rejections.contains(&status) {
        if let Some(rejection) = Rejection::from_status(status, &line.args) {
            return Err(StatusError::Rejected(rejection));
        }
    }
    Err(ProtocolError::UnexpectedStatus { expected, found: status }.into())
}

/// Parse the argument at `index` as an unsigned integer.
pub fn int_arg(status: Status, args: &[String], index: usize) -> Result<u64, ProtocolError> {
    args.get(index).and_then(|a| a.parse().ok()).ok_or_else(|| ProtocolError::MalformedArgs {
        status: status.as_str().to_string(),
        args: args.to_vec(),
    })
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
