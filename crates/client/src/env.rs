// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the client crate.

use std::time::Duration;

use crate::Encoding;

/// Server host (`STALK_HOST`)
pub fn host() -> Option<String> {
    std::env::var("STALK_HOST").ok().filter(|s| !s.is_empty())
}

/// Server port (`STALK_PORT`)
pub fn port() -> Option<u16> {
    std::env::var("STALK_PORT").ok().and_then(|s| s.parse::<u16>().ok())
}

/// Connect timeout override (`STALK_CONNECT_TIMEOUT_MS`)
pub fn connect_timeout() -> Option<Duration> {
    std::env::var("STALK_CONNECT_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Body encoding override (`STALK_ENCODING`).
///
/// `Some(None)` means the variable asks for raw bytes (`none`).
pub fn encoding() -> Option<Option<Encoding>> {
    let value = std::env::var("STALK_ENCODING").ok()?;
    if value.eq_ignore_ascii_case("none") {
        return Some(None);
    }
    value.parse::<Encoding>().ok().map(Some)
}
