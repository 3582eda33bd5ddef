// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocol for the beanstalkd work queue.
//!
//! Wire format: ASCII command and status lines terminated by CR LF, with job
//! bodies and stats blocks sent as length-prefixed chunks followed by CR LF.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod block;
mod codec;
mod command;
mod status;

pub use block::{parse_list, parse_stats};
pub use codec::{
    encode_command, read_chunk, read_status_line, write_line, ProtocolError, StatusLine, CRLF,
    MAX_CHUNK_LEN, MAX_LINE_LEN,
};
pub use command::Command;
pub use status::{decode_status, int_arg, Rejection, ServerError, Status, StatusError};

/// Tube every connection starts out using and watching.
pub const DEFAULT_TUBE: &str = "default";
