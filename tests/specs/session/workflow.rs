// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Producer/worker workflow specs

use crate::prelude::*;

const NOW: Option<Duration> = Some(Duration::ZERO);

#[tokio::test]
async fn job_moves_through_every_state() {
    let harness = Harness::start().await;
    let producer = harness.connect(harness.config().with_use("emails")).await;
    let worker = harness.connect(harness.config().with_watch("emails")).await;

    let id = producer.put("welcome", PutOptions::default().priority(100)).await.unwrap();
    assert_eq!(producer.peek_ready().await.unwrap().id, id);

    // reserved, touched, then released with a delay
    let job = worker.reserve(NOW).await.unwrap();
    worker.touch(&job).await.unwrap();
    worker.release(&job, 100, Duration::from_secs(60)).await.unwrap();
    assert_eq!(producer.peek_delayed().await.unwrap().id, id);
    assert!(worker.reserve(NOW).await.unwrap_err().is_timed_out());

    // kicked back to ready, then buried
    producer.kick_job(id).await.unwrap();
    let job = worker.reserve(NOW).await.unwrap();
    worker.bury(&job, 100).await.unwrap();
    assert_eq!(producer.peek_buried().await.unwrap().id, id);

    // kicked by bound, then finished
    assert_eq!(producer.kick(10).await.unwrap(), 1);
    let job = worker.reserve(NOW).await.unwrap();
    worker.delete(&job).await.unwrap();

    let stats = producer.stats_tube("emails").await.unwrap();
    assert_eq!(stats.get_u64("current-jobs-ready"), Some(0));
    assert_eq!(stats.get_u64("total-jobs"), Some(1));
    assert_eq!(stats.get_u64("cmd-delete"), Some(1));
}

#[tokio::test]
async fn shared_session_serves_concurrent_callers() {
    let harness = Harness::start().await;
    let client = Arc::new(harness.client().await);

    let puts: Vec<_> = (0..20)
        .map(|n| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.put(format!("job {n}"), PutOptions::default()).await })
        })
        .collect();
    let mut ids = Vec::new();
    for put in puts {
        ids.push(put.await.unwrap().unwrap());
    }
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 20);
    assert_eq!(client.stats().await.unwrap().get_u64("current-jobs-ready"), Some(20));
}

#[tokio::test]
async fn rejections_leave_session_usable() {
    let harness = Harness::start().await;
    let client = harness.client().await;

    assert!(client.delete(404u64).await.unwrap_err().is_not_found());
    let err = client.ignore("default").await.unwrap_err();
    assert_eq!(err.rejection(), Some(Rejection::NotIgnored));
    assert!(client.stats_tube("missing").await.unwrap_err().is_not_found());

    assert_eq!(client.tubes().await.unwrap(), vec!["default"]);
    assert_eq!(client.using().await.unwrap(), "default");
}

#[tokio::test]
async fn paused_tube_defers_reservations() {
    let harness = Harness::start().await;
    let client = harness.client().await;
    let id = client.put("later", PutOptions::default()).await.unwrap();

    client.pause_tube("default", Duration::from_secs(1)).await.unwrap();
    assert!(client.reserve(NOW).await.unwrap_err().is_timed_out());

    let job = client.reserve(Some(Duration::from_secs(3))).await.unwrap();
    assert_eq!(job.id, id);
}
