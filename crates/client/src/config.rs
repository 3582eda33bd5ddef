// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration: where to connect and which tubes to use.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::time::Duration;

use stalk_wire::DEFAULT_TUBE;

use crate::{env, Encoding};

/// Standard server port.
pub const DEFAULT_PORT: u16 = 11300;

/// Default timeout for establishing the TCP connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Server address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    pub host: String,
    pub port: u16,
}

impl Address {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::new("127.0.0.1", DEFAULT_PORT)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Address {
    type Err = ParseIntError;

    /// Parses `host`, `host:port` or `[v6]:port`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix('[') {
            if let Some((host, tail)) = rest.split_once(']') {
                let port = match tail.strip_prefix(':') {
                    Some(port) => port.parse()?,
                    None => DEFAULT_PORT,
                };
                return Ok(Self::new(host, port));
            }
        }
        match s.rsplit_once(':') {
            Some((host, port)) if !host.contains(':') => Ok(Self::new(host, port.parse()?)),
            _ => Ok(Self::new(s, DEFAULT_PORT)),
        }
    }
}

/// Tubes to watch after connecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Watch {
    /// A single tube; `default` is ignored unless this is `default`.
    One(String),
    /// Several tubes, in order; `default` is ignored unless listed.
    Many(Vec<String>),
}

impl Default for Watch {
    fn default() -> Self {
        Watch::One(DEFAULT_TUBE.to_string())
    }
}

impl From<&str> for Watch {
    fn from(tube: &str) -> Self {
        Watch::One(tube.to_string())
    }
}

impl From<String> for Watch {
    fn from(tube: String) -> Self {
        Watch::One(tube)
    }
}

impl From<Vec<String>> for Watch {
    fn from(tubes: Vec<String>) -> Self {
        Watch::Many(tubes)
    }
}

impl From<&[&str]> for Watch {
    fn from(tubes: &[&str]) -> Self {
        Watch::Many(tubes.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Watch {
    fn from(tubes: [&str; N]) -> Self {
        Watch::Many(tubes.iter().map(|t| t.to_string()).collect())
    }
}

/// Everything needed to open a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub address: Address,
    /// `None` keeps bodies as raw bytes and refuses text bodies on `put`
    pub encoding: Option<Encoding>,
    pub use_tube: String,
    pub watch: Watch,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: Address::default(),
            encoding: Some(Encoding::Utf8),
            use_tube: DEFAULT_TUBE.to_string(),
            watch: Watch::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(address: Address) -> Self {
        Self { address, ..Self::default() }
    }

    /// Defaults overlaid with `STALK_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(host) = env::host() {
            config.address.host = host;
        }
        if let Some(port) = env::port() {
            config.address.port = port;
        }
        if let Some(timeout) = env::connect_timeout() {
            config.connect_timeout = timeout;
        }
        if let Some(encoding) = env::encoding() {
            config.encoding = encoding;
        }
        config
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    pub fn with_encoding(mut self, encoding: Option<Encoding>) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_use(mut self, tube: impl Into<String>) -> Self {
        self.use_tube = tube.into();
        self
    }

    pub fn with_watch(mut self, watch: impl Into<Watch>) -> Self {
        self.watch = watch.into();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
