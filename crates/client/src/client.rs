// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connection session: owns the channel and serializes every command on it.

use std::borrow::Cow;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::connection::Session;
use crate::tubes::init_commands;
use crate::{Body, ClientConfig, ClientError, Encoding, Job, JobId, Watch};

/// A session with the queue server over one connection.
///
/// All methods take `&self`; share the client with an `Arc` to issue
/// commands from several tasks. Commands queue for exclusive use of the
/// connection and each holds it until its full response has been read.
///
/// A `reserve` without timeout holds the connection until a job arrives,
/// stalling every other command on this client meanwhile. Give each
/// long-blocking worker its own client. Such a reserve can only be
/// abandoned by dropping its future, after which this client refuses
/// further commands with [`ClientError::Broken`].
///
/// Dropping the client closes the connection.
pub struct Client<S = TcpStream> {
    session: Mutex<Session<S>>,
    encoding: Option<Encoding>,
}

impl Client<TcpStream> {
    /// Dial `config.address` and converge to the configured tubes.
    pub async fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        let address = config.address.clone();
        let dial = TcpStream::connect((address.host.as_str(), address.port));
        let stream = match tokio::time::timeout(config.connect_timeout, dial).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(ClientError::Connect { address, source }),
            Err(_) => return Err(ClientError::ConnectTimeout { address }),
        };
        // Commands are small and latency-bound
        if let Err(error) = stream.set_nodelay(true) {
            debug!(address = %address, %error, "could not disable Nagle's algorithm");
        }
        info!(address = %address, "connected");
        Self::with_stream(stream, config).await
    }
}

impl<S: AsyncRead + AsyncWrite + Unpin> Client<S> {
    /// Start a session over an established duplex stream.
    ///
    /// Issues the `use`/`watch`/`ignore` commands needed to reach the
    /// configured tubes before returning.
    pub async fn with_stream(stream: S, config: ClientConfig) -> Result<Self, ClientError> {
        if matches!(&config.watch, Watch::Many(tubes) if tubes.is_empty()) {
            return Err(ClientError::EmptyWatchList);
        }
        let mut session = Session::new(stream);
        for command in init_commands(&config.use_tube, &config.watch) {
            session.apply(&command).await?;
        }
        Ok(Self { session: Mutex::new(session), encoding: config.encoding })
    }

    pub fn encoding(&self) -> Option<Encoding> {
        self.encoding
    }

    /// Tube that `put` inserts into.
    pub async fn used_tube(&self) -> String {
        self.session.lock().await.tubes().used().to_string()
    }

    /// Tubes that `reserve` takes jobs from.
    pub async fn watched_tubes(&self) -> Vec<String> {
        self.session.lock().await.tubes().watched().to_vec()
    }

    /// Close the connection.
    ///
    /// The protocol has no goodbye: the write half is shut down and the
    /// channel dropped.
    pub async fn close(self) -> Result<(), ClientError> {
        let mut session = self.session.into_inner();
        let result = session.shutdown().await;
        drop(session);
        info!("connection closed");
        result
    }

    pub(crate) async fn session(&self) -> MutexGuard<'_, Session<S>> {
        self.session.lock().await
    }

    /// Wire bytes for `body`. Fails before any I/O if a text body can't be
    /// encoded.
    pub(crate) fn encode_body<'b>(&self, body: &'b Body) -> Result<Cow<'b, [u8]>, ClientError> {
        match body {
            Body::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            Body::Text(text) => {
                let encoding = self.encoding.ok_or(ClientError::NoEncoding)?;
                if encoding == Encoding::Utf8 {
                    return Ok(Cow::Borrowed(text.as_bytes()));
                }
                let bytes = encoding.encode(text).ok_or(ClientError::Encode { encoding })?;
                Ok(Cow::Owned(bytes))
            }
        }
    }

    /// Build a job, decoding its body when an encoding is configured.
    pub(crate) fn decode_job(&self, id: JobId, chunk: Vec<u8>) -> Result<Job, ClientError> {
        let body = match self.encoding {
            None => Body::Bytes(chunk),
            Some(encoding) => {
                Body::Text(encoding.decode(&chunk).ok_or(ClientError::Decode { id, encoding })?)
            }
        };
        Ok(Job { id, body })
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
