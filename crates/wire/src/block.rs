// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsers for the YAML-like blocks returned by `stats*` and `list-*`.
//!
//! Both start with a `---` line. Stats blocks carry one `key: value` per
//! line, list blocks one `- item` per line.

use indexmap::IndexMap;

use crate::codec::ProtocolError;

fn block_lines(chunk: &[u8]) -> Result<std::str::Lines<'_>, ProtocolError> {
    let text = std::str::from_utf8(chunk)
        .map_err(|_| ProtocolError::MalformedBlock("block is not valid UTF-8".to_string()))?;
    let mut lines = text.lines();
    match lines.next() {
        Some("---") => Ok(lines),
        other => Err(ProtocolError::MalformedBlock(format!(
            "expected '---' header, found {:?}",
            other.unwrap_or("")
        ))),
    }
}

/// Parse a stats block into an ordered map of textual values.
///
/// Keys keep the order the server sent them in. A repeated key keeps its
/// first position and its last value.
pub fn parse_stats(chunk: &[u8]) -> Result<IndexMap<String, String>, ProtocolError> {
    let mut stats = IndexMap::new();
    for line in block_lines(chunk)? {
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = match line.split_once(": ") {
            Some(pair) => pair,
            None => match line.strip_suffix(':') {
                Some(key) => (key, ""),
                None => {
                    return Err(ProtocolError::MalformedBlock(format!(
                        "expected 'key: value', found {line:?}"
                    )))
                }
            },
        };
        stats.insert(key.to_string(), value.to_string());
    }
    Ok(stats)
}

/// Parse a list block into its items, in order.
pub fn parse_list(chunk: &[u8]) -> Result<Vec<String>, ProtocolError> {
    let mut items = Vec::new();
    for line in block_lines(chunk)? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(item) = line.strip_prefix("- ") else {
            return Err(ProtocolError::MalformedBlock(format!(
                "expected '- item', found {line:?}"
            )));
        };
        items.push(item.to_string());
    }
    Ok(items)
}

#[cfg(test)]
#[path = "block_tests.rs"]
mod tests;
