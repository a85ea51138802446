// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command and environment assembly for script invocations.

use relay_core::{config, RuntimeConfig, TraceCarrier};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Environment variable carrying the JSON-encoded invocation payload.
pub const PAYLOAD_ENV: &str = "RELAY_PAYLOAD";

/// How a script is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Run a Python script through the resolved interpreter.
    Python { script: PathBuf },
    /// Run a script through `rails runner` in the project's context.
    RailsRunner { script: PathBuf },
}

impl Invocation {
    /// Path of the script being invoked.
    pub fn script(&self) -> &Path {
        match self {
            Invocation::Python { script } | Invocation::RailsRunner { script } => script,
        }
    }
}

/// Options for one invocation.
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    /// Ordered arguments passed to the script.
    pub args: Vec<String>,
    /// Extra environment merged over the inherited environment. Entries
    /// with a `None` value are filtered out before export.
    pub env: HashMap<String, Option<String>>,
    /// Working directory for the child.
    pub cwd: Option<PathBuf>,
    /// JSON payload exported as `RELAY_PAYLOAD`.
    pub payload: Option<Value>,
    /// Trace-propagation carrier exported into the child environment.
    pub carrier: TraceCarrier,
    /// Mirror child stdout/stderr to the host's own streams in real time.
    pub echo: bool,
}

/// Assemble the extra environment exported to the child.
///
/// Sorted for a deterministic export order; the carrier and payload
/// variables go last so they cannot be shadowed by caller entries.
pub(crate) fn build_env(options: &InvokeOptions) -> Vec<(String, String)> {
    let mut env: Vec<(String, String)> = options
        .env
        .iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key.clone(), v)))
        .collect();
    env.sort();

    if let Some(payload) = &options.payload {
        env.push((PAYLOAD_ENV.to_string(), payload.to_string()));
    }
    env.extend(options.carrier.env_vars());
    env
}

/// Build the spawn command for an invocation.
///
/// Python scripts run as a direct argument vector. The Rails mode is the
/// one place a shell is involved: a version-managed Ruby may only resolve
/// after sourcing the rvm bootstrap, so the command line is assembled with
/// explicit quoting and handed to `bash -c`.
pub(crate) fn build_command(
    invocation: &Invocation,
    options: &InvokeOptions,
    runtime: &RuntimeConfig,
) -> Command {
    let mut command = match invocation {
        Invocation::Python { script } => {
            let mut command = Command::new(runtime.resolve_python());
            command.arg(script);
            command.args(&options.args);
            command
        }
        Invocation::RailsRunner { script } => {
            let project_dir = options.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
            let rails = runtime.resolve_rails(&project_dir);

            let mut words = vec![rails, "runner".to_string(), script.display().to_string()];
            words.extend(options.args.iter().cloned());
            let invoke = words
                .iter()
                .map(|word| shell_quote(word))
                .collect::<Vec<_>>()
                .join(" ");

            let line = match config::rvm_bootstrap() {
                Some(bootstrap) => format!(
                    "source {} && exec {}",
                    shell_quote(&bootstrap.display().to_string()),
                    invoke
                ),
                None => format!("exec {invoke}"),
            };

            let mut command = Command::new("bash");
            command.arg("-c").arg(line);
            command
        }
    };

    if let Some(cwd) = &options.cwd {
        command.current_dir(cwd);
    }
    for (key, value) in build_env(options) {
        command.env(key, value);
    }
    command
}

/// Quote one word for POSIX `sh`/`bash`.
pub fn shell_quote(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }
    if word
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':' | '='))
    {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', r"'\''"))
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
