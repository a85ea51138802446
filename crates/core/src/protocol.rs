// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocol for the host<->script stdio channel.

use crate::event::ScriptEvent;

/// Prefix marking a control-event line on the child's stdout.
pub const EVENT_PREFIX: &str = "__TRIGGER_EVENT__:";

/// Sentinel written (newline-terminated) to the child's stdin to unblock a
/// waiting read.
pub const ACK_SENTINEL: &str = "__ACK__";

/// Classify one stdout line.
///
/// Returns `Some(event)` only for a well-formed control-event line.
/// Everything else — no prefix, malformed JSON, a payload that fits no
/// variant shape — is plain program output and returns `None`. Degrading a
/// broken event line to output keeps the information visible instead of
/// failing the whole invocation.
pub fn decode_event_line(line: &str) -> Option<ScriptEvent> {
    let payload = line.strip_prefix(EVENT_PREFIX)?;
    serde_json::from_str(payload).ok()
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
