// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line and chunk framing.
//!
//! Every command and status line ends in CR LF. Bodies travel as a chunk:
//! the declared number of raw bytes followed by another CR LF, which is
//! validated and stripped here and nowhere else.

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::Status;

/// Line terminator for commands, status lines and chunks.
pub const CRLF: &[u8; 2] = b"\r\n";

/// Upper bound on a status line, terminator included.
///
/// The longest legitimate reply is `USING <tube>` with a 200 byte tube name.
pub const MAX_LINE_LEN: usize = 1024;

/// Upper bound on a declared chunk size (1 GiB).
pub const MAX_CHUNK_LEN: usize = 1 << 30;

/// Faults that leave the connection in an unknown framing state.
///
/// None of these are recoverable on the same connection: the caller should
/// drop it and dial again.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Status line exceeds {MAX_LINE_LEN} bytes")]
    LineTooLong,

    #[error("Status line not terminated by CR LF")]
    MissingTerminator,

    #[error("Status line is not ASCII")]
    InvalidLine,

    #[error("Chunk terminator mismatch: expected CR LF, found {found:?}")]
    ChunkTerminator { found: [u8; 2] },

    #[error("Declared chunk of {0} bytes exceeds limit")]
    ChunkTooLarge(u64),

    #[error("Unknown status word: {0:?}")]
    UnknownStatus(String),

    #[error("Unexpected status {found} (expected {expected})")]
    UnexpectedStatus { expected: Status, found: Status },

    #[error("Malformed arguments for {status}: {args:?}")]
    MalformedArgs { status: String, args: Vec<String> },

    #[error("Malformed block: {0}")]
    MalformedBlock(String),
}

/// A decoded status line: the status word and its argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub word: String,
    pub args: Vec<String>,
}

impl StatusLine {
    pub fn new(word: impl Into<String>, args: Vec<String>) -> Self {
        Self { word: word.into(), args }
    }
}

/// Join command tokens with single spaces.
///
/// When `body` is given it follows the header's CR LF verbatim. The final
/// terminator is appended by [`write_line`]. Tokens and bodies are not
/// escaped: they must not contain CR LF themselves.
pub fn encode_command<T: AsRef<str>>(parts: &[T], body: Option<&[u8]>) -> Vec<u8> {
    let header_len: usize = parts.iter().map(|p| p.as_ref().len() + 1).sum();
    let body_len = body.map_or(0, |b| b.len() + CRLF.len());
    let mut buf = Vec::with_capacity(header_len + body_len);
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            buf.push(b' ');
        }
        buf.extend_from_slice(part.as_ref().as_bytes());
    }
    if let Some(body) = body {
        buf.extend_from_slice(CRLF);
        buf.extend_from_slice(body);
    }
    buf
}

/// Write `bytes` followed by CR LF in a single write, then flush.
pub async fn write_line<W: AsyncWrite + Unpin>(
    writer: &mut W,
    bytes: &[u8],
) -> Result<(), ProtocolError> {
    let mut buf = Vec::with_capacity(bytes.len() + CRLF.len());
    buf.extend_from_slice(bytes);
    buf.extend_from_slice(CRLF);
    writer.write_all(&buf).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one status line and split it into word and arguments.
pub async fn read_status_line<R: AsyncBufRead + Unpin>(
    reader: &mut R,
) -> Result<StatusLine, ProtocolError> {
    let mut line = Vec::new();
    let n = (&mut *reader).take(MAX_LINE_LEN as u64).read_until(b'\n', &mut line).await?;
    if n == 0 {
        return Err(ProtocolError::ConnectionClosed);
    }
    if !line.ends_with(b"\n") {
        return Err(if line.len() >= MAX_LINE_LEN {
            ProtocolError::LineTooLong
        } else {
            ProtocolError::ConnectionClosed
        });
    }
    let Some(content) = line.strip_suffix(CRLF) else {
        return Err(ProtocolError::MissingTerminator);
    };
    if !content.is_ascii() {
        return Err(ProtocolError::InvalidLine);
    }
    let text = std::str::from_utf8(content).map_err(|_| ProtocolError::InvalidLine)?;
    let mut tokens = text.split(' ').filter(|t| !t.is_empty()).map(str::to_string);
    let word = tokens.next().unwrap_or_default();
    Ok(StatusLine { word, args: tokens.collect() })
}

/// Read a chunk of `size` declared bytes plus its CR LF terminator.
///
/// Consumes exactly `size + 2` bytes and returns the first `size`.
pub async fn read_chunk<R: AsyncRead + Unpin>(
    reader: &mut R,
    size: usize,
) -> Result<Vec<u8>, ProtocolError> {
    if size > MAX_CHUNK_LEN {
        return Err(ProtocolError::ChunkTooLarge(size as u64));
    }
    let mut buf = vec![0u8; size + CRLF.len()];
    match reader.read_exact(&mut buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(ProtocolError::ConnectionClosed)
        }
        Err(e) => return Err(e.into()),
    }
    let found = [buf[size], buf[size + 1]];
    if &found != CRLF {
        return Err(ProtocolError::ChunkTerminator { found });
    }
    buf.truncate(size);
    Ok(buf)
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
