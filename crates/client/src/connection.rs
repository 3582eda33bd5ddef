// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One request in flight at a time over a duplex byte stream.
//!
//! The protocol has no request identifiers, so a command's response must be
//! consumed completely before the next command is written. A `Session` is
//! only ever reached through the client's mutex, which makes each method
//! here a critical section.

use stalk_wire::{
    decode_status, int_arg, read_chunk, read_status_line, write_line, Command, ProtocolError,
};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufStream};
use tracing::{debug, warn};

use crate::tubes::TubeState;
use crate::{ClientError, JobId};

/// Channel plus the session-local tube view.
pub(crate) struct Session<S> {
    stream: BufStream<S>,
    tubes: TubeState,
    /// Set while a command's response is outstanding. If it is still set
    /// when the next command starts, the previous one was abandoned
    /// mid-flight (or failed fatally) and the framing can't be trusted.
    in_flight: bool,
}

impl<S: AsyncRead + AsyncWrite + Unpin> Session<S> {
    pub(crate) fn new(stream: S) -> Self {
        Self { stream: BufStream::new(stream), tubes: TubeState::default(), in_flight: false }
    }

    pub(crate) fn tubes(&self) -> &TubeState {
        &self.tubes
    }

    /// Write `command` and read its status line, returning its arguments.
    ///
    /// For commands with a chunk the response stays in flight until
    /// [`Session::chunk`] has read it.
    async fn request(&mut self, command: &Command<'_>) -> Result<Vec<String>, ClientError> {
        if self.in_flight {
            return Err(ClientError::Broken);
        }
        self.in_flight = true;
        let name = command.name();
        debug!(command = name, "sending command");

        write_line(&mut self.stream, &command.encode()).await.map_err(|e| fault(name, e))?;
        let line = read_status_line(&mut self.stream).await.map_err(|e| fault(name, e))?;
        debug!(command = name, status = %line.word, "received status");

        decode_status(line, command.expected(), command.rejections()).map_err(|e| {
            let error = ClientError::from_status(name, e);
            if error.is_fatal() {
                warn!(command = name, error = %error, "protocol fault, connection unusable");
            } else {
                // Negative replies carry no chunk
                self.in_flight = false;
            }
            error
        })
    }

    async fn chunk(&mut self, name: &'static str, size: u64) -> Result<Vec<u8>, ClientError> {
        let size =
            usize::try_from(size).map_err(|_| fault(name, ProtocolError::ChunkTooLarge(size)))?;
        let chunk = read_chunk(&mut self.stream, size).await.map_err(|e| fault(name, e))?;
        self.in_flight = false;
        Ok(chunk)
    }

    /// Status-only command; returns the status line's arguments.
    pub(crate) async fn status(
        &mut self,
        command: &Command<'_>,
    ) -> Result<Vec<String>, ClientError> {
        let args = self.request(command).await?;
        self.in_flight = false;
        Ok(args)
    }

    /// Command whose single argument is an integer result.
    ///
    /// A malformed argument leaves the exchange in flight, so the session
    /// refuses further commands.
    pub(crate) async fn int(&mut self, command: &Command<'_>) -> Result<u64, ClientError> {
        let args = self.request(command).await?;
        let value = int_arg(command.expected(), &args, 0).map_err(|e| fault(command.name(), e))?;
        self.in_flight = false;
        Ok(value)
    }

    /// Command whose single argument is a tube name.
    pub(crate) async fn name(&mut self, command: &Command<'_>) -> Result<String, ClientError> {
        let mut args = self.request(command).await?;
        if args.len() != 1 {
            let error = ProtocolError::MalformedArgs {
                status: command.expected().to_string(),
                args,
            };
            return Err(fault(command.name(), error));
        }
        self.in_flight = false;
        Ok(args.remove(0))
    }

    /// Command answered with `<id> <bytes>` and a job body chunk.
    pub(crate) async fn job(
        &mut self,
        command: &Command<'_>,
    ) -> Result<(JobId, Vec<u8>), ClientError> {
        let args = self.request(command).await?;
        let expected = command.expected();
        let (id, size) = match (int_arg(expected, &args, 0), int_arg(expected, &args, 1)) {
            (Ok(id), Ok(size)) => (id, size),
            (Err(e), _) | (_, Err(e)) => return Err(fault(command.name(), e)),
        };
        let body = self.chunk(command.name(), size).await?;
        Ok((JobId(id), body))
    }

    /// Command answered with `OK <bytes>` and a YAML-like block.
    pub(crate) async fn block(&mut self, command: &Command<'_>) -> Result<Vec<u8>, ClientError> {
        let args = self.request(command).await?;
        let size = int_arg(command.expected(), &args, 0).map_err(|e| fault(command.name(), e))?;
        self.chunk(command.name(), size).await
    }

    pub(crate) async fn use_tube(&mut self, tube: &str) -> Result<(), ClientError> {
        self.status(&Command::Use { tube }).await?;
        self.tubes.record_use(tube);
        Ok(())
    }

    pub(crate) async fn watch(&mut self, tube: &str) -> Result<u64, ClientError> {
        let count = self.int(&Command::Watch { tube }).await?;
        self.tubes.record_watch(tube);
        Ok(count)
    }

    pub(crate) async fn ignore(&mut self, tube: &str) -> Result<u64, ClientError> {
        let count = self.int(&Command::Ignore { tube }).await?;
        self.tubes.record_ignore(tube);
        Ok(count)
    }

    /// Run a tube command produced by [`crate::tubes::init_commands`].
    pub(crate) async fn apply(&mut self, command: &Command<'_>) -> Result<(), ClientError> {
        match *command {
            Command::Use { tube } => self.use_tube(tube).await,
            Command::Watch { tube } => self.watch(tube).await.map(drop),
            Command::Ignore { tube } => self.ignore(tube).await.map(drop),
            _ => self.status(command).await.map(drop),
        }
    }

    pub(crate) async fn shutdown(&mut self) -> Result<(), ClientError> {
        self.stream.shutdown().await.map_err(ProtocolError::from)?;
        Ok(())
    }
}

fn fault(command: &'static str, error: ProtocolError) -> ClientError {
    warn!(command, error = %error, "protocol fault, connection unusable");
    ClientError::Protocol(error)
}

#[cfg(test)]
#[path = "connection_tests.rs"]
mod tests;
