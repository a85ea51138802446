// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::fake::{FakeTaskAdapter, TaskCall};

#[tokio::test]
async fn passes_calls_through_to_inner_adapter() {
    let fake = FakeTaskAdapter::new();
    let traced = TracedTaskAdapter::new(fake.clone());

    traced.heartbeat().await.unwrap();
    traced.wait_for(&WaitSpan::seconds(2)).await.unwrap();
    traced.log("hello", None).await.unwrap();

    assert_eq!(
        fake.calls(),
        vec![
            TaskCall::Heartbeat,
            TaskCall::WaitFor {
                span: WaitSpan::seconds(2)
            },
            TaskCall::Log {
                message: "hello".to_string(),
                attributes: None,
            },
        ]
    );
}

#[tokio::test]
async fn propagates_inner_failures() {
    let fake = FakeTaskAdapter::new();
    fake.fail_on("wait.until");
    let traced = TracedTaskAdapter::new(fake);

    let result = traced.wait_until(Utc::now()).await;
    assert!(result.is_err());
}
