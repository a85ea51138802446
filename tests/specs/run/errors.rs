// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error contract specs

use crate::prelude::*;
use predicates::prelude::*;

#[test]
fn missing_script_fails_before_spawning() {
    let project = Project::empty();

    project
        .relay()
        .args(["run", "does-not-exist.sh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("script not found"));
}

#[test]
fn propagates_the_child_exit_code() {
    let project = Project::empty();
    let script = project.script("fail.sh", "echo some output\nexit 7\n");

    project
        .relay()
        .args(["run"])
        .arg(&script)
        .assert()
        .code(7)
        .stderr(predicate::str::contains("non-zero code 7"))
        .stderr(predicate::str::contains("some output"));
}

#[test]
fn rejects_invalid_payload_json() {
    let project = Project::empty();
    let script = project.script("fine.sh", "echo ok\n");

    project
        .relay()
        .args(["run", "--payload", "{oops"])
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("payload"));
}

#[test]
fn rejects_malformed_env_entries() {
    let project = Project::empty();
    let script = project.script("fine.sh", "echo ok\n");

    project
        .relay()
        .args(["run", "--env", "NO_EQUALS_SIGN"])
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"));
}
