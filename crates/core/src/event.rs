// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed events emitted by a supervised script over its stdout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;

/// Extra attributes attached to log events.
pub type Attributes = Map<String, Value>;

/// A control event decoded from one event-prefixed stdout line.
///
/// The wire shape is one JSON object per line with a `type` discriminator.
/// Unrecognized discriminators decode to [`ScriptEvent::Unknown`], which is
/// explicitly legal — the dispatcher treats it as a no-op, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScriptEvent {
    /// Keep-alive ping; no payload.
    #[serde(rename = "heartbeat")]
    Heartbeat,

    /// Durable timed wait; the child blocks until acknowledged.
    #[serde(rename = "wait.for")]
    WaitFor(WaitSpan),

    /// Durable wait until a specific instant; the child blocks until
    /// acknowledged.
    #[serde(rename = "wait.until")]
    WaitUntil { timestamp: DateTime<Utc> },

    /// Structured log line with optional extra attributes.
    #[serde(rename = "log")]
    Log {
        message: String,
        #[serde(default)]
        attributes: Attributes,
    },

    /// Error-level structured log line.
    #[serde(rename = "log.error")]
    LogError {
        message: String,
        #[serde(default)]
        attributes: Attributes,
    },

    /// Assign a metadata key for the current run.
    #[serde(rename = "metadata.set")]
    MetadataSet { key: String, value: Value },

    /// Append a value to an array-valued metadata key.
    #[serde(rename = "metadata.append")]
    MetadataAppend { key: String, value: Value },

    /// Any other `type` tag.
    #[serde(other)]
    Unknown,
}

impl ScriptEvent {
    /// Whether the child performs a blocking stdin read after emitting this
    /// event and must be unblocked with an acknowledgment line.
    pub fn needs_ack(&self) -> bool {
        matches!(
            self,
            ScriptEvent::WaitFor(_) | ScriptEvent::WaitUntil { .. }
        )
    }

    /// The wire discriminator, for logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ScriptEvent::Heartbeat => "heartbeat",
            ScriptEvent::WaitFor(_) => "wait.for",
            ScriptEvent::WaitUntil { .. } => "wait.until",
            ScriptEvent::Log { .. } => "log",
            ScriptEvent::LogError { .. } => "log.error",
            ScriptEvent::MetadataSet { .. } => "metadata.set",
            ScriptEvent::MetadataAppend { .. } => "metadata.append",
            ScriptEvent::Unknown => "unknown",
        }
    }
}

/// Duration fields of a `wait.for` event.
///
/// All fields are optional and combinable. A span with no fields set is
/// passed through to the wait operation as-is; the host does not suppress
/// it (the child is already blocked and must still be acknowledged).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitSpan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weeks: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<u64>,
}

const DAY_SECS: u64 = 86_400;

impl WaitSpan {
    /// A span with only `seconds` set.
    pub fn seconds(seconds: u64) -> Self {
        Self {
            seconds: Some(seconds),
            ..Self::default()
        }
    }

    /// True when no duration field is set.
    pub fn is_empty(&self) -> bool {
        self.seconds.is_none()
            && self.minutes.is_none()
            && self.hours.is_none()
            && self.days.is_none()
            && self.weeks.is_none()
            && self.months.is_none()
            && self.years.is_none()
    }

    /// Total span as a coarse [`Duration`].
    ///
    /// Months use a fixed 30 days and years a fixed 365; calendar-accurate
    /// arithmetic belongs to the durable wait implementation behind the
    /// adapter, not to this conversion.
    pub fn as_duration(&self) -> Duration {
        let units: [(Option<u64>, u64); 7] = [
            (self.seconds, 1),
            (self.minutes, 60),
            (self.hours, 3_600),
            (self.days, DAY_SECS),
            (self.weeks, 7 * DAY_SECS),
            (self.months, 30 * DAY_SECS),
            (self.years, 365 * DAY_SECS),
        ];

        let secs = units.iter().fold(0u64, |acc, (value, scale)| {
            acc.saturating_add(value.unwrap_or(0).saturating_mul(*scale))
        });
        Duration::from_secs(secs)
    }
}

impl fmt::Display for WaitSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", humantime::format_duration(self.as_duration()))
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
