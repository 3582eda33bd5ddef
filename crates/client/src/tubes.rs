// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local view of the used and watched tubes.
//!
//! Every connection starts out using and watching only `default`. At
//! connect time the session replays the minimal `use`/`watch`/`ignore`
//! sequence that converges the server to the configured tubes, then keeps
//! this view current as the caller issues those commands.

use stalk_wire::{Command, DEFAULT_TUBE};

use crate::Watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TubeState {
    used: String,
    watched: Vec<String>,
}

impl Default for TubeState {
    fn default() -> Self {
        Self { used: DEFAULT_TUBE.to_string(), watched: vec![DEFAULT_TUBE.to_string()] }
    }
}

impl TubeState {
    pub fn used(&self) -> &str {
        &self.used
    }

    /// Watched tubes, in the order they were added.
    pub fn watched(&self) -> &[String] {
        &self.watched
    }

    pub(crate) fn record_use(&mut self, tube: &str) {
        self.used = tube.to_string();
    }

    pub(crate) fn record_watch(&mut self, tube: &str) {
        if !self.watched.iter().any(|t| t == tube) {
            self.watched.push(tube.to_string());
        }
    }

    pub(crate) fn record_ignore(&mut self, tube: &str) {
        self.watched.retain(|t| t != tube);
    }
}

/// Commands that take a fresh connection to the configured tubes.
///
/// `default` is never used or watched explicitly since a new connection
/// already does both; it is ignored only when the watch list omits it.
/// Repeated tubes in the watch list are watched once.
pub fn init_commands<'a>(use_tube: &'a str, watch: &'a Watch) -> Vec<Command<'a>> {
    let mut commands = Vec::new();
    if use_tube != DEFAULT_TUBE {
        commands.push(Command::Use { tube: use_tube });
    }
    match watch {
        Watch::One(tube) => {
            if tube != DEFAULT_TUBE {
                commands.push(Command::Watch { tube });
                commands.push(Command::Ignore { tube: DEFAULT_TUBE });
            }
        }
        Watch::Many(tubes) => {
            let mut seen: Vec<&str> = Vec::new();
            for tube in tubes {
                if tube == DEFAULT_TUBE || seen.contains(&tube.as_str()) {
                    continue;
                }
                seen.push(tube);
                commands.push(Command::Watch { tube });
            }
            if !tubes.iter().any(|t| t == DEFAULT_TUBE) {
                commands.push(Command::Ignore { tube: DEFAULT_TUBE });
            }
        }
    }
    commands
}

#[cfg(test)]
#[path = "tubes_tests.rs"]
mod tests;
