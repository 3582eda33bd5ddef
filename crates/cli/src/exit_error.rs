// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return errors instead of calling `std::process::exit()`
//! directly; `main()` turns them into an `ExitError` and terminates.

use std::fmt;

use stalk_client::ClientError;

/// No job became ready within a reserve timeout.
pub const EXIT_TIMED_OUT: i32 = 2;
/// The job or tube named on the command line does not exist.
pub const EXIT_NOT_FOUND: i32 = 3;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Pick the exit code for a failed command.
    pub fn from_error(error: anyhow::Error) -> Self {
        let error = match error.downcast::<ExitError>() {
            Ok(exit) => return exit,
            Err(error) => error,
        };
        let code = match error.downcast_ref::<ClientError>() {
            Some(e) if e.is_timed_out() => EXIT_TIMED_OUT,
            Some(e) if e.is_not_found() => EXIT_NOT_FOUND,
            _ => 1,
        };
        Self::new(code, format!("{error:#}"))
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
