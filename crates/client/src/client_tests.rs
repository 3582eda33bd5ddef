// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufStream};

use super::*;
use crate::test_support::FakeServer;
use crate::PutOptions;

fn config() -> ClientConfig {
    ClientConfig::default()
}

#[tokio::test]
async fn session_converges_to_configured_tubes() {
    let server = FakeServer::new();
    let config = config().with_use("jobs").with_watch(["jobs", "urgent"]);

    let client = Client::with_stream(server.connect(), config).await.unwrap();

    assert_eq!(
        server.transcript(),
        vec!["use jobs", "watch jobs", "watch urgent", "ignore default"]
    );
    assert_eq!(client.used_tube().await, "jobs");
    assert_eq!(client.watched_tubes().await, vec!["jobs", "urgent"]);
}

#[tokio::test]
async fn default_tubes_send_nothing() {
    let server = FakeServer::new();

    let client = Client::with_stream(server.connect(), config()).await.unwrap();

    assert!(server.transcript().is_empty());
    assert_eq!(client.used_tube().await, "default");
    assert_eq!(client.watched_tubes().await, vec!["default"]);
}

#[tokio::test]
async fn empty_watch_list_fails_before_any_command() {
    let server = FakeServer::new();
    let config = config().with_watch(Vec::<String>::new());

    let result = Client::with_stream(server.connect(), config).await;

    assert!(matches!(result, Err(ClientError::EmptyWatchList)));
    assert!(server.transcript().is_empty());
}

#[tokio::test]
async fn text_put_without_encoding_is_refused_locally() {
    let server = FakeServer::new();
    let client =
        Client::with_stream(server.connect(), config().with_encoding(None)).await.unwrap();

    let err = client.put("hello", PutOptions::default()).await.unwrap_err();

    assert!(matches!(err, ClientError::NoEncoding));
    assert!(server.transcript().is_empty());
}

#[tokio::test]
async fn no_encoding_passes_bytes_through() {
    let server = FakeServer::new();
    let client =
        Client::with_stream(server.connect(), config().with_encoding(None)).await.unwrap();

    let id = client.put(vec![0u8, 159, 255], PutOptions::default()).await.unwrap();
    let job = client.reserve(Some(Duration::ZERO)).await.unwrap();

    assert_eq!(job.id, id);
    assert_eq!(job.body, Body::Bytes(vec![0, 159, 255]));
}

#[tokio::test]
async fn latin1_encodes_on_put_and_decodes_on_reserve() {
    let server = FakeServer::new();
    let latin1 = config().with_encoding(Some(Encoding::Latin1));
    let client = Client::with_stream(server.connect(), latin1).await.unwrap();
    let raw = Client::with_stream(server.connect(), config().with_encoding(None)).await.unwrap();

    let id = client.put("café", PutOptions::default()).await.unwrap();

    assert_eq!(raw.peek(id).await.unwrap().body, Body::Bytes(b"caf\xe9".to_vec()));
    assert_eq!(client.reserve(None).await.unwrap().body, Body::from("café"));
}

#[tokio::test]
async fn unencodable_text_is_refused_locally() {
    let server = FakeServer::new();
    let ascii = config().with_encoding(Some(Encoding::Ascii));
    let client = Client::with_stream(server.connect(), ascii).await.unwrap();

    let err = client.put("café", PutOptions::default()).await.unwrap_err();

    assert!(matches!(err, ClientError::Encode { encoding: Encoding::Ascii }));
    assert_eq!(server.job_count(), 0);
}

#[tokio::test]
async fn undecodable_body_reports_job_and_keeps_connection() {
    let server = FakeServer::new();
    let ascii = config().with_encoding(Some(Encoding::Ascii));
    let client = Client::with_stream(server.connect(), ascii).await.unwrap();
    let id = client.put(vec![0xffu8], PutOptions::default()).await.unwrap();

    let err = client.peek(id).await.unwrap_err();

    assert!(matches!(err, ClientError::Decode { id: failed, .. } if failed == id));
    assert!(!err.is_fatal());
    client.delete(id).await.unwrap();
}

#[tokio::test]
async fn commands_wait_for_the_previous_response() {
    let (stream, server) = tokio::io::duplex(4096);
    let client = Arc::new(Client::with_stream(stream, config()).await.unwrap());
    let mut server = BufStream::new(server);
    let mut line = String::new();

    let first = tokio::spawn({
        let client = Arc::clone(&client);
        async move { client.stats().await }
    });
    server.read_line(&mut line).await.unwrap();
    assert_eq!(line, "stats\r\n");

    let second = tokio::spawn({
        let client = Arc::clone(&client);
        async move { client.delete(1u64).await }
    });

    // The second command's bytes must not interleave with the first exchange
    line.clear();
    let early = tokio::time::timeout(Duration::from_millis(50), server.read_line(&mut line)).await;
    assert!(early.is_err());
    assert!(line.is_empty());

    server.write_all(b"OK 4\r\n---\n\r\n").await.unwrap();
    server.flush().await.unwrap();
    server.read_line(&mut line).await.unwrap();
    assert_eq!(line, "delete 1\r\n");
    server.write_all(b"DELETED\r\n").await.unwrap();
    server.flush().await.unwrap();

    assert!(first.await.unwrap().unwrap().is_empty());
    second.await.unwrap().unwrap();
}

#[tokio::test]
async fn close_shuts_the_channel() {
    let (stream, server) = tokio::io::duplex(4096);
    let client = Client::with_stream(stream, config()).await.unwrap();
    let mut server = BufStream::new(server);

    client.close().await.unwrap();

    let mut line = String::new();
    assert_eq!(server.read_line(&mut line).await.unwrap(), 0);
}
