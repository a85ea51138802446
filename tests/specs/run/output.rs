// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output pass-through specs

use crate::prelude::*;
use predicates::prelude::*;

#[test]
fn mirrors_plain_output_live() {
    let project = Project::empty();
    let script = project.script("hello.sh", "echo hello from the script\n");

    project
        .relay()
        .args(["run"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("hello from the script"));
}

#[test]
fn quiet_prints_captured_output_at_the_end() {
    let project = Project::empty();
    let script = project.script("hello.sh", "echo captured line\n");

    project
        .relay()
        .args(["run", "--quiet"])
        .arg(&script)
        .assert()
        .success()
        .stdout("captured line\n");
}

#[test]
fn passes_script_arguments_after_the_separator() {
    let project = Project::empty();
    let script = project.script("args.sh", "echo \"got:$1:$2\"\n");

    project
        .relay()
        .args(["run"])
        .arg(&script)
        .args(["--", "first", "second value"])
        .assert()
        .success()
        .stdout(predicate::str::contains("got:first:second value"));
}

#[test]
fn exports_env_and_payload() {
    let project = Project::empty();
    let script = project.script("env.sh", "echo \"$MODE $RELAY_PAYLOAD\"\n");

    project
        .relay()
        .args(["run", "--env", "MODE=fast", "--payload", r#"{"id":7}"#])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"fast {"id":7}"#));
}
