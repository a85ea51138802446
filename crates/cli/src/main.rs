// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! relay - supervised script execution CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use relay_adapters::{TracedTaskAdapter, TracingTaskAdapter};
use relay_core::{RuntimeConfig, TraceCarrier};
use relay_runner::{Invocation, InvokeOptions, ScriptRunner};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "relay",
    version,
    about = "Relay - supervised script execution"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a script under event supervision
    Run(RunArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// Script to execute
    script: PathBuf,

    /// Arguments passed to the script (after `--`)
    #[arg(last = true)]
    args: Vec<String>,

    /// Invocation mode
    #[arg(long, value_enum, default_value_t = Runtime::Python)]
    runtime: Runtime,

    /// Extra environment variable (KEY=VALUE), repeatable
    #[arg(long = "env", value_name = "KEY=VALUE")]
    env: Vec<String>,

    /// Working directory for the script
    #[arg(long)]
    cwd: Option<PathBuf>,

    /// JSON payload exported to the script as RELAY_PAYLOAD
    #[arg(long)]
    payload: Option<String>,

    /// Do not mirror child output live; print captured stdout at the end
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Runtime {
    /// Run through the resolved Python interpreter
    Python,
    /// Run through `rails runner`
    Rails,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run(args).await,
    }
}

async fn run(args: RunArgs) -> Result<()> {
    let payload = args
        .payload
        .as_deref()
        .map(serde_json::from_str)
        .transpose()
        .context("invalid --payload JSON")?;

    let mut env: HashMap<String, Option<String>> = HashMap::new();
    for pair in &args.env {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("invalid --env entry (expected KEY=VALUE): {pair}");
        };
        env.insert(key.to_string(), Some(value.to_string()));
    }

    let invocation = match args.runtime {
        Runtime::Python => Invocation::Python {
            script: args.script,
        },
        Runtime::Rails => Invocation::RailsRunner {
            script: args.script,
        },
    };

    let options = InvokeOptions {
        args: args.args,
        env,
        cwd: args.cwd,
        payload,
        carrier: TraceCarrier::new(),
        echo: !args.quiet,
    };

    let adapter = TracedTaskAdapter::new(TracingTaskAdapter::new());
    let runner = ScriptRunner::new(adapter, RuntimeConfig::default());

    match runner.run(invocation, options).await {
        Ok(output) => {
            if args.quiet && !output.stdout.is_empty() {
                println!("{}", output.stdout);
            }
            Ok(())
        }
        Err(error) => {
            // Propagate the child's exit code where there is one; the
            // signal sentinel maps to a plain failure.
            if let Some(code) = error.exit_code() {
                eprintln!("error: {error}");
                std::process::exit(if code > 0 { code } else { 1 });
            }
            Err(error.into())
        }
    }
}
