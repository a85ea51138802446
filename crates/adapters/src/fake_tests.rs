// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[tokio::test]
async fn records_calls_in_arrival_order() {
    let adapter = FakeTaskAdapter::new();

    adapter.heartbeat().await.unwrap();
    adapter.wait_for(&WaitSpan::seconds(5)).await.unwrap();
    adapter
        .metadata_set("progress", &json!("half"))
        .await
        .unwrap();

    assert_eq!(
        adapter.calls(),
        vec![
            TaskCall::Heartbeat,
            TaskCall::WaitFor {
                span: WaitSpan::seconds(5)
            },
            TaskCall::MetadataSet {
                key: "progress".to_string(),
                value: json!("half"),
            },
        ]
    );
}

#[tokio::test]
async fn fail_on_injects_failures_for_that_kind_only() {
    let adapter = FakeTaskAdapter::new();
    adapter.fail_on("wait.for");

    assert!(adapter.wait_for(&WaitSpan::seconds(1)).await.is_err());
    assert!(adapter.heartbeat().await.is_ok());

    // The failed call is still recorded
    assert_eq!(adapter.calls().len(), 2);
}

#[tokio::test]
async fn clones_share_recorded_state() {
    let adapter = FakeTaskAdapter::new();
    let clone = adapter.clone();

    clone.log("from clone", None).await.unwrap();

    assert_eq!(adapter.calls().len(), 1);
}
