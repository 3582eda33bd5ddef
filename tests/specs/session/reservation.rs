// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reservation specs
//!
//! Blocking reserves hold their session; abandoning one poisons it;
//! reservations lapse after their time-to-run.

use crate::prelude::*;

#[tokio::test]
async fn blocking_reserve_holds_its_session() {
    let harness = Harness::start().await;
    let worker = Arc::new(harness.client().await);
    let producer = harness.client().await;

    let waiting = tokio::spawn({
        let worker = Arc::clone(&worker);
        async move { worker.reserve(None).await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Other commands on the same session queue behind the reserve
    let queued = tokio::time::timeout(Duration::from_millis(100), worker.stats()).await;
    assert!(queued.is_err());

    let id = producer.put("wake", PutOptions::default()).await.unwrap();
    assert_eq!(waiting.await.unwrap().unwrap().id, id);
    assert!(worker.stats().await.is_ok());
}

#[tokio::test]
async fn abandoned_reserve_leaves_session_broken() {
    let harness = Harness::start().await;
    let client = harness.client().await;

    let abandoned = tokio::time::timeout(Duration::from_millis(50), client.reserve(None)).await;
    assert!(abandoned.is_err());

    let err = client.stats().await.unwrap_err();
    assert!(matches!(err, ClientError::Broken));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn reservation_lapses_after_ttr() {
    let harness = Harness::start().await;
    let slow = harness.client().await;
    let other = harness.client().await;
    let options = PutOptions::default().ttr(Duration::from_secs(1));
    let id = slow.put("slow", options).await.unwrap();
    slow.reserve(Some(Duration::ZERO)).await.unwrap();

    let job = other.reserve(Some(Duration::from_secs(3))).await.unwrap();

    assert_eq!(job.id, id);
    assert_eq!(other.stats_job(id).await.unwrap().get_u64("timeouts"), Some(1));
    assert!(slow.delete(id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn reserve_draws_from_every_watched_tube() {
    let harness = Harness::start().await;
    let producer = harness.client().await;
    let worker = harness.connect(harness.config().with_watch(["a", "b"])).await;

    producer.use_tube("a").await.unwrap();
    producer.put("from a", PutOptions::default().priority(50)).await.unwrap();
    producer.use_tube("b").await.unwrap();
    producer.put("from b", PutOptions::default().priority(10)).await.unwrap();

    let first = worker.reserve(Some(Duration::ZERO)).await.unwrap();
    let second = worker.reserve(Some(Duration::ZERO)).await.unwrap();
    assert_eq!(first.body, Body::from("from b"));
    assert_eq!(second.body, Body::from("from a"));
    assert!(worker.reserve(Some(Duration::ZERO)).await.unwrap_err().is_timed_out());
}
