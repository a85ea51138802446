// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrapper for consistent observability

use crate::traits::{TaskAdapter, TaskError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relay_core::{Attributes, WaitSpan};
use serde_json::Value;

/// Wrapper that adds tracing to any TaskAdapter
#[derive(Clone)]
pub struct TracedTaskAdapter<A> {
    inner: A,
}

impl<A> TracedTaskAdapter<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<A: TaskAdapter> TaskAdapter for TracedTaskAdapter<A> {
    async fn heartbeat(&self) -> Result<(), TaskError> {
        let result = self.inner.heartbeat().await;
        tracing::trace!(ok = result.is_ok(), "heartbeat");
        result
    }

    async fn wait_for(&self, span: &WaitSpan) -> Result<(), TaskError> {
        let op_span = tracing::info_span!("task.wait_for", wait = %span);
        let _guard = op_span.enter();

        tracing::info!("starting");
        let start = std::time::Instant::now();
        let result = self.inner.wait_for(span).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "completed"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "failed"
            ),
        }

        result
    }

    async fn wait_until(&self, instant: DateTime<Utc>) -> Result<(), TaskError> {
        let op_span = tracing::info_span!("task.wait_until", until = %instant.to_rfc3339());
        let _guard = op_span.enter();

        tracing::info!("starting");
        let start = std::time::Instant::now();
        let result = self.inner.wait_until(instant).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "completed"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "failed"
            ),
        }

        result
    }

    async fn log(&self, message: &str, attributes: Option<&Attributes>) -> Result<(), TaskError> {
        let result = self.inner.log(message, attributes).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "log operation failed");
        }
        result
    }

    async fn log_error(
        &self,
        message: &str,
        attributes: Option<&Attributes>,
    ) -> Result<(), TaskError> {
        let result = self.inner.log_error(message, attributes).await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "log.error operation failed");
        }
        result
    }

    async fn metadata_set(&self, key: &str, value: &Value) -> Result<(), TaskError> {
        let result = self.inner.metadata_set(key, value).await;
        tracing::debug!(key, ok = result.is_ok(), "metadata set");
        result
    }

    async fn metadata_append(&self, key: &str, value: &Value) -> Result<(), TaskError> {
        let result = self.inner.metadata_append(key, value).await;
        tracing::debug!(key, ok = result.is_ok(), "metadata append");
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
