// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use yare::parameterized;

#[parameterized(
    bare_word = { "simple", "simple" },
    path = { "/usr/bin/python3", "/usr/bin/python3" },
    key_value = { "RAILS_ENV=production", "RAILS_ENV=production" },
    spaces = { "two words", "'two words'" },
    single_quote = { "it's", r"'it'\''s'" },
    dollar = { "$HOME", "'$HOME'" },
    empty = { "", "''" },
)]
fn shell_quote_cases(word: &str, expected: &str) {
    assert_eq!(shell_quote(word), expected);
}

#[test]
fn build_env_filters_unset_values_and_sorts() {
    let mut options = InvokeOptions::default();
    options.env.insert("B_VAR".to_string(), Some("b".to_string()));
    options.env.insert("A_VAR".to_string(), Some("a".to_string()));
    options.env.insert("SKIPPED".to_string(), None);

    let env = build_env(&options);
    let keys: Vec<&str> = env.iter().map(|(k, _)| k.as_str()).collect();

    assert!(!keys.contains(&"SKIPPED"));
    assert_eq!(&keys[..2], &["A_VAR", "B_VAR"]);
}

#[test]
fn build_env_exports_payload_as_json() {
    let options = InvokeOptions {
        payload: Some(json!({"rows": [1, 2]})),
        ..InvokeOptions::default()
    };

    let env = build_env(&options);
    let payload = env.iter().find(|(k, _)| k == PAYLOAD_ENV);

    assert_eq!(
        payload.map(|(_, v)| v.as_str()),
        Some(r#"{"rows":[1,2]}"#)
    );
}

#[test]
fn build_env_always_exports_the_carrier_marker() {
    let env = build_env(&InvokeOptions::default());
    let attrs = env
        .iter()
        .find(|(k, _)| k == relay_core::carrier::RESOURCE_ATTRS_ENV);

    assert_eq!(
        attrs.map(|(_, v)| v.as_str()),
        Some("execution.environment=relay")
    );
}

#[test]
fn python_invocation_is_a_direct_argument_vector() {
    let invocation = Invocation::Python {
        script: PathBuf::from("/jobs/import.py"),
    };
    let options = InvokeOptions {
        args: vec!["--batch".to_string(), "42".to_string()],
        ..InvokeOptions::default()
    };
    let runtime = RuntimeConfig {
        python_bin: Some("/opt/python".to_string()),
        ..RuntimeConfig::default()
    };

    let command = build_command(&invocation, &options, &runtime);
    let std_command = command.as_std();

    assert_eq!(std_command.get_program(), "/opt/python");
    let args: Vec<String> = std_command
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(args, vec!["/jobs/import.py", "--batch", "42"]);
}

#[test]
fn rails_invocation_goes_through_bash() {
    let invocation = Invocation::RailsRunner {
        script: PathBuf::from("/app/scripts/report.rb"),
    };
    let options = InvokeOptions {
        args: vec!["fast mode".to_string()],
        ..InvokeOptions::default()
    };
    let runtime = RuntimeConfig {
        rails_bin: Some("/app/bin/rails".to_string()),
        ..RuntimeConfig::default()
    };

    let command = build_command(&invocation, &options, &runtime);
    let std_command = command.as_std();

    assert_eq!(std_command.get_program(), "bash");
    let args: Vec<String> = std_command
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(args[0], "-c");
    assert!(args[1].contains("/app/bin/rails runner /app/scripts/report.rb"));
    // Arguments with spaces are quoted for the shell.
    assert!(args[1].contains("'fast mode'"));
}

#[test]
fn invocation_exposes_its_script_path() {
    let script = PathBuf::from("/jobs/import.py");
    assert_eq!(
        Invocation::Python {
            script: script.clone()
        }
        .script(),
        script.as_path()
    );
    assert_eq!(
        Invocation::RailsRunner {
            script: script.clone()
        }
        .script(),
        script.as_path()
    );
}
