// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use stalk_wire::{ProtocolError, Rejection, ServerError, StatusError};
use thiserror::Error;

use crate::{Address, Encoding, JobId};

/// Errors from client operations.
///
/// Nothing here is retried by the client. `Protocol`, `Broken` and the
/// connect errors mean the session must be discarded; the rest leave the
/// connection usable.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Connection is unusable after an earlier fault or an abandoned command")]
    Broken,

    #[error("{command}: {error}")]
    Server { command: &'static str, error: ServerError },

    #[error("{command}: {rejection}")]
    Rejected { command: &'static str, rejection: Rejection },

    #[error("Cannot put a text body with no encoding configured")]
    NoEncoding,

    #[error("Body cannot be encoded as {encoding}")]
    Encode { encoding: Encoding },

    #[error("Body of job {id} is not valid {encoding}")]
    Decode { id: JobId, encoding: Encoding },

    #[error("Watch list is empty: a connection must watch at least one tube")]
    EmptyWatchList,

    #[error("Failed to connect to {address}: {source}")]
    Connect {
        address: Address,
        #[source]
        source: std::io::Error,
    },

    #[error("Timed out connecting to {address}")]
    ConnectTimeout { address: Address },
}

impl ClientError {
    pub(crate) fn from_status(command: &'static str, error: StatusError) -> Self {
        match error {
            StatusError::Server(error) => ClientError::Server { command, error },
            StatusError::Rejected(rejection) => ClientError::Rejected { command, rejection },
            StatusError::Protocol(e) => ClientError::Protocol(e),
        }
    }

    /// The operation-specific rejection, if this is one.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            ClientError::Rejected { rejection, .. } => Some(*rejection),
            _ => None,
        }
    }

    /// The universal server error, if this is one.
    pub fn server_error(&self) -> Option<ServerError> {
        match self {
            ClientError::Server { error, .. } => Some(*error),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.rejection() == Some(Rejection::NotFound)
    }

    /// True when a bounded reserve found no job in time.
    pub fn is_timed_out(&self) -> bool {
        self.rejection() == Some(Rejection::TimedOut)
    }

    pub fn is_deadline_soon(&self) -> bool {
        self.rejection() == Some(Rejection::DeadlineSoon)
    }

    /// True when the connection can no longer be used.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ClientError::Protocol(_)
                | ClientError::Broken
                | ClientError::Connect { .. }
                | ClientError::ConnectTimeout { .. }
        )
    }
}
