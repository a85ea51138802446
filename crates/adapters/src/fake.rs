// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake task adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::traits::{TaskAdapter, TaskError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relay_core::{Attributes, WaitSpan};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Recorded adapter call
#[derive(Debug, Clone, PartialEq)]
pub enum TaskCall {
    Heartbeat,
    WaitFor {
        span: WaitSpan,
    },
    WaitUntil {
        instant: DateTime<Utc>,
    },
    Log {
        message: String,
        attributes: Option<Attributes>,
    },
    LogError {
        message: String,
        attributes: Option<Attributes>,
    },
    MetadataSet {
        key: String,
        value: Value,
    },
    MetadataAppend {
        key: String,
        value: Value,
    },
}

/// Fake task adapter for testing
///
/// Records every call and can inject failures per operation kind so tests
/// can verify that a failed handler still acknowledges the child.
#[derive(Clone, Default)]
pub struct FakeTaskAdapter {
    calls: Arc<Mutex<Vec<TaskCall>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl FakeTaskAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls in arrival order
    pub fn calls(&self) -> Vec<TaskCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make every subsequent invocation of the given operation kind fail.
    /// Kinds use the wire discriminators ("heartbeat", "wait.for", ...).
    pub fn fail_on(&self, kind: &str) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(kind.to_string());
    }

    fn invoke(&self, kind: &str, call: TaskCall) -> Result<(), TaskError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);

        let failing = self.failing.lock().unwrap_or_else(|e| e.into_inner());
        if failing.contains(kind) {
            return Err(TaskError::Failed(format!("injected failure: {kind}")));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskAdapter for FakeTaskAdapter {
    async fn heartbeat(&self) -> Result<(), TaskError> {
        self.invoke("heartbeat", TaskCall::Heartbeat)
    }

    async fn wait_for(&self, span: &WaitSpan) -> Result<(), TaskError> {
        self.invoke("wait.for", TaskCall::WaitFor { span: span.clone() })
    }

    async fn wait_until(&self, instant: DateTime<Utc>) -> Result<(), TaskError> {
        self.invoke("wait.until", TaskCall::WaitUntil { instant })
    }

    async fn log(&self, message: &str, attributes: Option<&Attributes>) -> Result<(), TaskError> {
        self.invoke(
            "log",
            TaskCall::Log {
                message: message.to_string(),
                attributes: attributes.cloned(),
            },
        )
    }

    async fn log_error(
        &self,
        message: &str,
        attributes: Option<&Attributes>,
    ) -> Result<(), TaskError> {
        self.invoke(
            "log.error",
            TaskCall::LogError {
                message: message.to_string(),
                attributes: attributes.cloned(),
            },
        )
    }

    async fn metadata_set(&self, key: &str, value: &Value) -> Result<(), TaskError> {
        self.invoke(
            "metadata.set",
            TaskCall::MetadataSet {
                key: key.to_string(),
                value: value.clone(),
            },
        )
    }

    async fn metadata_append(&self, key: &str, value: &Value) -> Result<(), TaskError> {
        self.invoke(
            "metadata.append",
            TaskCall::MetadataAppend {
                key: key.to_string(),
                value: value.clone(),
            },
        )
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
