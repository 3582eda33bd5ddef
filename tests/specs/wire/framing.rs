// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire framing specs
//!
//! Talk to the fake server with only the codec, no client session.

use stalk_wire::{
    decode_status, parse_stats, read_chunk, read_status_line, write_line, Command, StatusError,
};
use tokio::io::BufStream;
use tokio::net::TcpStream;

use crate::prelude::*;

async fn raw(harness: &Harness) -> BufStream<TcpStream> {
    let stream = TcpStream::connect((harness.address.host.as_str(), harness.address.port))
        .await
        .unwrap();
    BufStream::new(stream)
}

async fn send(
    stream: &mut BufStream<TcpStream>,
    command: Command<'_>,
) -> Result<Vec<String>, StatusError> {
    write_line(stream, &command.encode()).await.unwrap();
    let line = read_status_line(stream).await.unwrap();
    decode_status(line, command.expected(), command.rejections())
}

#[tokio::test]
async fn body_bytes_survive_the_round_trip() {
    let harness = Harness::start().await;
    let mut stream = raw(&harness).await;
    let body = b"line one\r\nline two\0";

    let put = Command::Put { priority: 0, delay: 0, ttr: 60, body };
    assert_eq!(send(&mut stream, put).await.unwrap(), vec!["1"]);

    let args = send(&mut stream, Command::Reserve).await.unwrap();
    assert_eq!(args, vec!["1".to_string(), body.len().to_string()]);
    let chunk = read_chunk(&mut stream, body.len()).await.unwrap();
    assert_eq!(chunk, body);
}

#[tokio::test]
async fn stats_block_parses_in_order() {
    let harness = Harness::start().await;
    let mut stream = raw(&harness).await;

    let args = send(&mut stream, Command::StatsTube { tube: "default" }).await.unwrap();
    let size: usize = args[0].parse().unwrap();
    let stats = parse_stats(&read_chunk(&mut stream, size).await.unwrap()).unwrap();

    let first = stats.get_index(0).map(|(k, v)| (k.as_str(), v.as_str()));
    assert_eq!(first, Some(("name", "default")));
    assert_eq!(stats.get("current-jobs-ready").map(String::as_str), Some("0"));
}

#[tokio::test]
async fn negative_reply_is_a_rejection() {
    let harness = Harness::start().await;
    let mut stream = raw(&harness).await;

    let err = send(&mut stream, Command::Peek { id: 99 }).await.unwrap_err();

    assert!(matches!(err, StatusError::Rejected(Rejection::NotFound)));
    assert_eq!(send(&mut stream, Command::ListTubeUsed).await.unwrap(), vec!["default"]);
}
