// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Host-to-child acknowledgment channel.

use relay_core::ACK_SENTINEL;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes the acknowledgment sentinel to the child's stdin.
///
/// Each write is independent and idempotent from the channel's point of
/// view: the child reads exactly one line per blocking request. A failed
/// write means the child already went away, which is not an error for the
/// protocol — the invocation's outcome is decided by the exit code alone.
pub struct AckChannel<W> {
    stdin: W,
}

impl<W: AsyncWrite + Unpin> AckChannel<W> {
    pub fn new(stdin: W) -> Self {
        Self { stdin }
    }

    /// Write one acknowledgment line, unblocking the child's pending read.
    pub async fn send(&mut self) {
        let line = format!("{ACK_SENTINEL}\n");
        if let Err(e) = self.stdin.write_all(line.as_bytes()).await {
            tracing::debug!(error = %e, "ack write failed; child likely exited");
            return;
        }
        if let Err(e) = self.stdin.flush().await {
            tracing::debug!(error = %e, "ack flush failed; child likely exited");
        }
    }
}

#[cfg(test)]
#[path = "ack_tests.rs"]
mod tests;
