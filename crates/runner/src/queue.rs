// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serialized event handling for one invocation.

use crate::ack::AckChannel;
use crate::dispatch::dispatch;
use relay_adapters::TaskAdapter;
use relay_core::ScriptEvent;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Strictly ordered, single-consumer event pipeline.
///
/// Decoded events are pushed as they stream off the child's stdout;
/// exactly one worker task pulls them and dispatches one at a time, so
/// handler N+1 starts only after handler N settles (success or failure).
/// Pushing never blocks the stdout reader — the channel is unbounded and
/// the backlog simply grows while a slow handler runs.
pub struct EventQueue {
    tx: mpsc::UnboundedSender<ScriptEvent>,
    worker: JoinHandle<()>,
}

impl EventQueue {
    /// Spawn the worker for one invocation. The queue owns the ack channel;
    /// acknowledgments are written by the worker after the handler of an
    /// ack-requiring event settles.
    pub fn spawn<A, W>(adapter: A, mut ack: AckChannel<W>) -> Self
    where
        A: TaskAdapter,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                let needs_ack = dispatch(&adapter, event).await;
                if needs_ack {
                    ack.send().await;
                }
            }
        });
        Self { tx, worker }
    }

    /// Enqueue one decoded event.
    pub fn push(&self, event: ScriptEvent) {
        if self.tx.send(event).is_err() {
            tracing::warn!("event dropped: queue worker is no longer running");
        }
    }

    /// Close the queue and wait until every already-pushed event has
    /// finished handling, including any pending acknowledgment writes.
    pub async fn drain(self) {
        drop(self.tx);
        if let Err(e) = self.worker.await {
            tracing::error!(error = %e, "event worker aborted");
        }
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
