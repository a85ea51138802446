// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event protocol specs

use crate::prelude::*;
use predicates::prelude::*;

#[test]
fn event_lines_never_reach_stdout() {
    let project = Project::empty();
    let script = project.script(
        "events.sh",
        r#"
echo "visible"
echo '__TRIGGER_EVENT__:{"type":"heartbeat"}'
echo '__TRIGGER_EVENT__:{"type":"log","message":"from the script"}'
"#,
    );

    project
        .relay()
        .args(["run"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("visible"))
        .stdout(predicate::str::contains("__TRIGGER_EVENT__").not());
}

#[test]
fn wait_event_is_acknowledged_and_the_script_resumes() {
    let project = Project::empty();
    let script = project.script(
        "wait.sh",
        r#"
echo '__TRIGGER_EVENT__:{"type":"wait.for","seconds":0}'
read reply
echo "resumed:$reply"
"#,
    );

    project
        .relay()
        .args(["run"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("resumed:__ACK__"));
}

#[test]
fn malformed_event_line_degrades_to_output() {
    let project = Project::empty();
    let script = project.script(
        "broken.sh",
        "echo '__TRIGGER_EVENT__:{not valid json'\n",
    );

    project
        .relay()
        .args(["run"])
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("__TRIGGER_EVENT__:{not valid json"));
}
