// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event-to-operation dispatch.

use relay_adapters::{TaskAdapter, TaskError};
use relay_core::{Attributes, ScriptEvent};

/// Dispatch one decoded event to its host operation and await completion.
///
/// Returns whether the child is blocked on an acknowledgment. The ack
/// requirement is decided by the event kind alone, before the operation
/// runs, so a failed handler never leaves the child blocked. Operation
/// failures are absorbed here: reported through the logging collaborator
/// (with a plain tracing fallback) and never escalated to the invocation.
pub async fn dispatch<A: TaskAdapter>(adapter: &A, event: ScriptEvent) -> bool {
    let needs_ack = event.needs_ack();
    let kind = event.kind();

    let result = match &event {
        ScriptEvent::Heartbeat => adapter.heartbeat().await,
        ScriptEvent::WaitFor(span) => adapter.wait_for(span).await,
        ScriptEvent::WaitUntil { timestamp } => adapter.wait_until(*timestamp).await,
        ScriptEvent::Log {
            message,
            attributes,
        } => adapter.log(message, non_empty(attributes)).await,
        ScriptEvent::LogError {
            message,
            attributes,
        } => adapter.log_error(message, non_empty(attributes)).await,
        ScriptEvent::MetadataSet { key, value } => adapter.metadata_set(key, value).await,
        ScriptEvent::MetadataAppend { key, value } => adapter.metadata_append(key, value).await,
        // Unrecognized tags are accepted and ignored.
        ScriptEvent::Unknown => Ok(()),
    };

    if let Err(error) = result {
        report_failure(adapter, kind, &error).await;
    }

    needs_ack
}

/// Empty attribute maps are passed as "no attributes".
fn non_empty(attributes: &Attributes) -> Option<&Attributes> {
    if attributes.is_empty() {
        None
    } else {
        Some(attributes)
    }
}

async fn report_failure<A: TaskAdapter>(adapter: &A, kind: &str, error: &TaskError) {
    let message = format!("{kind} handler failed: {error}");
    if let Err(log_error) = adapter.log_error(&message, None).await {
        tracing::warn!(kind, error = %error, log_error = %log_error, "event handler failed");
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
