// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session lifecycle specs
//!
//! Opening converges on the configured tubes; closing or dropping a
//! session hands its reservations back to the server.

use crate::prelude::*;

#[tokio::test]
async fn connect_converges_on_configured_tubes() {
    let harness = Harness::start().await;
    let config = harness.config().with_use("emails").with_watch(["emails", "sms"]);

    let client = harness.connect(config).await;

    assert_eq!(
        harness.server.transcript(),
        vec!["use emails", "watch emails", "watch sms", "ignore default"]
    );
    assert_eq!(client.used_tube().await, "emails");
    assert_eq!(client.watched_tubes().await, vec!["emails", "sms"]);
    assert_eq!(client.watching().await.unwrap(), vec!["emails", "sms"]);
}

#[tokio::test]
async fn refused_connection_is_a_connect_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ClientConfig::new(Address::new("127.0.0.1", port));
    let err = Client::connect(config).await.err().unwrap();

    assert!(matches!(err, ClientError::Connect { .. }));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn empty_watch_list_never_opens_a_session() {
    let harness = Harness::start().await;
    let config = harness.config().with_watch(Vec::<String>::new());

    let err = Client::connect(config).await.err().unwrap();

    assert!(matches!(err, ClientError::EmptyWatchList));
    assert!(harness.server.transcript().is_empty());
}

#[tokio::test]
async fn close_hands_back_reservations() {
    let harness = Harness::start().await;
    let first = harness.client().await;
    let second = harness.client().await;
    let id = first.put("job", PutOptions::default()).await.unwrap();
    first.reserve(Some(Duration::ZERO)).await.unwrap();

    first.close().await.unwrap();

    let job = second.reserve(Some(Duration::from_secs(2))).await.unwrap();
    assert_eq!(job.id, id);
}

#[tokio::test]
async fn dropping_a_client_closes_its_connection() {
    let harness = Harness::start().await;
    let observer = harness.client().await;
    let transient = harness.client().await;
    let stats = observer.stats().await.unwrap();
    assert_eq!(stats.get_u64("current-connections"), Some(2));

    drop(transient);

    let mut connections = None;
    for _ in 0..100 {
        connections = observer.stats().await.unwrap().get_u64("current-connections");
        if connections == Some(1) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(connections, Some(1));
}
