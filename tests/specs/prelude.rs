// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness for CLI specs.

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Temp-dir project fixture with scripts and a configured CLI handle.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write a script into the project and return its path.
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    /// CLI command rooted in this project. The interpreter override makes
    /// the specs run plain `sh` scripts through the Python mode without
    /// requiring Python on the host.
    pub fn relay(&self) -> Command {
        let mut cmd = Command::cargo_bin("relay").unwrap();
        cmd.current_dir(self.dir.path());
        cmd.env("PYTHON_BIN_PATH", "sh");
        cmd
    }
}
