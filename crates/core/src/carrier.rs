// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trace-context propagation into the child environment.

/// Environment variable carrying the W3C trace-context header value.
pub const TRACEPARENT_ENV: &str = "TRACEPARENT";

/// Environment variable carrying the resource-attributes string.
pub const RESOURCE_ATTRS_ENV: &str = "OTEL_RESOURCE_ATTRIBUTES";

/// Fixed marker identifying where the script executes.
const EXECUTION_ENVIRONMENT: (&str, &str) = ("execution.environment", "relay");

/// Distributed-tracing carrier exported to a spawned script.
///
/// An instrumented script can pick these variables up and continue the
/// same trace. An empty carrier still exports the execution-environment
/// marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceCarrier {
    traceparent: Option<String>,
    attributes: Vec<(String, String)>,
}

impl TraceCarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the W3C `traceparent` header value.
    pub fn with_traceparent(mut self, value: impl Into<String>) -> Self {
        self.traceparent = Some(value.into());
        self
    }

    /// Add a task-context resource attribute. Insertion order is preserved.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Environment variables to export into the child.
    ///
    /// The resource-attributes string always leads with the fixed
    /// execution-environment marker, followed by caller attributes.
    pub fn env_vars(&self) -> Vec<(String, String)> {
        let mut vars = Vec::new();
        if let Some(traceparent) = &self.traceparent {
            vars.push((TRACEPARENT_ENV.to_string(), traceparent.clone()));
        }

        let mut attrs = vec![format!(
            "{}={}",
            EXECUTION_ENVIRONMENT.0, EXECUTION_ENVIRONMENT.1
        )];
        attrs.extend(
            self.attributes
                .iter()
                .map(|(key, value)| format!("{key}={value}")),
        );
        vars.push((RESOURCE_ATTRS_ENV.to_string(), attrs.join(",")));

        vars
    }
}

#[cfg(test)]
#[path = "carrier_tests.rs"]
mod tests;
