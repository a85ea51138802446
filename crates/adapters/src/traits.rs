// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapter trait for the host operations scripts can request.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use relay_core::{Attributes, WaitSpan};
use serde_json::Value;
use thiserror::Error;

/// Errors from host task operations.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("operation failed: {0}")]
    Failed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Host task operations a supervised script can request.
///
/// One operation per event kind on the wire. Durable semantics —
/// checkpointed waits, heartbeat bookkeeping, the metadata store — live
/// behind implementations of this trait; the dispatcher only awaits
/// completion and never interprets the operation itself.
#[async_trait]
pub trait TaskAdapter: Clone + Send + Sync + 'static {
    /// Keep the current run alive.
    async fn heartbeat(&self) -> Result<(), TaskError>;

    /// Wait for a relative span. May take arbitrarily long (the wait can be
    /// checkpointed and resumed elsewhere); the child stays blocked until
    /// the dispatcher acknowledges completion.
    async fn wait_for(&self, span: &WaitSpan) -> Result<(), TaskError>;

    /// Wait until a specific instant.
    async fn wait_until(&self, instant: DateTime<Utc>) -> Result<(), TaskError>;

    /// Structured log line. `attributes` is `None` when the event carried
    /// no attributes.
    async fn log(&self, message: &str, attributes: Option<&Attributes>) -> Result<(), TaskError>;

    /// Error-level structured log line.
    async fn log_error(
        &self,
        message: &str,
        attributes: Option<&Attributes>,
    ) -> Result<(), TaskError>;

    /// Assign a metadata key for the current run.
    async fn metadata_set(&self, key: &str, value: &Value) -> Result<(), TaskError>;

    /// Append a value to an array-valued metadata key.
    async fn metadata_append(&self, key: &str, value: &Value) -> Result<(), TaskError>;
}
