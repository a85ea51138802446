// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing-backed local adapter.

use crate::traits::{TaskAdapter, TaskError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relay_core::{Attributes, WaitSpan};
use serde_json::Value;
use std::time::Duration;

/// Longest wait the local adapter will actually sleep.
///
/// Durable multi-month waits are checkpointed by the platform adapter;
/// locally a wait beyond this cap is clamped so the sleep stays within
/// what the timer implementation accepts.
const MAX_LOCAL_WAIT: Duration = Duration::from_secs(365 * 86_400);

/// Local implementation of the host operations.
///
/// Logs map onto `tracing` events and waits sleep in-process for the
/// requested span. Intended for local runs and diagnostics; production
/// hosts plug their task platform in behind [`TaskAdapter`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTaskAdapter;

impl TracingTaskAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TaskAdapter for TracingTaskAdapter {
    async fn heartbeat(&self) -> Result<(), TaskError> {
        tracing::trace!("heartbeat");
        Ok(())
    }

    async fn wait_for(&self, span: &WaitSpan) -> Result<(), TaskError> {
        let duration = span.as_duration().min(MAX_LOCAL_WAIT);
        tracing::info!(wait = %span, "waiting");
        tokio::time::sleep(duration).await;
        Ok(())
    }

    async fn wait_until(&self, instant: DateTime<Utc>) -> Result<(), TaskError> {
        let remaining = instant
            .signed_duration_since(Utc::now())
            .to_std()
            .unwrap_or(Duration::ZERO);
        tracing::info!(until = %instant.to_rfc3339(), "waiting");
        tokio::time::sleep(remaining.min(MAX_LOCAL_WAIT)).await;
        Ok(())
    }

    async fn log(&self, message: &str, attributes: Option<&Attributes>) -> Result<(), TaskError> {
        match attributes {
            Some(attrs) => tracing::info!(attributes = ?attrs, "{}", message),
            None => tracing::info!("{}", message),
        }
        Ok(())
    }

    async fn log_error(
        &self,
        message: &str,
        attributes: Option<&Attributes>,
    ) -> Result<(), TaskError> {
        match attributes {
            Some(attrs) => tracing::error!(attributes = ?attrs, "{}", message),
            None => tracing::error!("{}", message),
        }
        Ok(())
    }

    async fn metadata_set(&self, key: &str, value: &Value) -> Result<(), TaskError> {
        tracing::debug!(key, value = %value, "metadata set");
        Ok(())
    }

    async fn metadata_append(&self, key: &str, value: &Value) -> Result<(), TaskError> {
        tracing::debug!(key, value = %value, "metadata append");
        Ok(())
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
