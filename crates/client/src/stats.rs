// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server, tube and job statistics.

use indexmap::IndexMap;
use serde::Serialize;

/// Statistics as reported by the server, in the order it sent them.
///
/// Values stay textual; numeric accessors coerce on request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Stats(IndexMap<String, String>);

impl Stats {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The value for `key` as an unsigned integer, if it is one.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key)?.parse().ok()
    }

    /// The value for `key` as a float, if it is one.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key)?.parse().ok()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.0
    }
}

impl From<IndexMap<String, String>> for Stats {
    fn from(map: IndexMap<String, String>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
