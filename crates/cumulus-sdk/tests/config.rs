use std::collections::BTreeMap;

use cumulus_sdk::config::{
    CONFIG_ENV, DEFAULT_PROJECT, DRY_RUN_ENV, PROJECT_ENV, STACK_ENV, parse_config_json,
};
use cumulus_sdk::{Config, RunInfo, SdkError};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: BTreeMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn bare_keys_are_namespaced_by_project() {
    let config = Config::new(
        "ibmcloud-examples",
        BTreeMap::from([
            ("ibmcloud-examples:zone".to_string(), "us-south-2".to_string()),
            ("ibmcloud:region".to_string(), "us-south".to_string()),
        ]),
    );
    assert_eq!(config.get("zone"), Some("us-south-2"));
    assert_eq!(config.get("ibmcloud:region"), Some("us-south"));
    assert_eq!(config.get("region"), None);
}

#[test]
fn require_names_the_full_key() {
    let config = Config::new("proj", BTreeMap::new());
    let err = config.require("plan").unwrap_err();
    assert!(err.to_string().contains("proj:plan"), "got: {err}");
}

#[test]
fn get_bool_parses_common_spellings() {
    let config = Config::new(
        "p",
        BTreeMap::from([
            ("p:a".to_string(), "true".to_string()),
            ("p:b".to_string(), "0".to_string()),
            ("p:c".to_string(), "maybe".to_string()),
        ]),
    );
    assert_eq!(config.get_bool("a").unwrap(), Some(true));
    assert_eq!(config.get_bool("b").unwrap(), Some(false));
    assert_eq!(config.get_bool("missing").unwrap(), None);
    assert!(config.get_bool("c").is_err());
}

#[test]
fn config_json_stringifies_non_string_values() {
    let values = parse_config_json(r#"{"p:count": 3, "p:name": "x", "p:on": true}"#).unwrap();
    assert_eq!(values["p:count"], "3");
    assert_eq!(values["p:name"], "x");
    assert_eq!(values["p:on"], "true");
}

#[test]
fn config_json_must_be_an_object() {
    assert!(parse_config_json("[1, 2]").is_err());
    assert!(parse_config_json("{\"p:k\": null}").is_err());
}

#[test]
fn run_info_builder() {
    let info = RunInfo::new("proj", "dev").with_dry_run(true);
    assert_eq!(info.stack, "dev");
    assert_eq!(info.project, "proj");
    assert!(info.dry_run);
}

#[test]
fn insert_namespaces_bare_keys() {
    let mut config = Config::new("proj", BTreeMap::new());
    config.insert("zone", "us-south-3");
    config.insert("ibmcloud:region", "eu-de");
    assert_eq!(config.get("proj:zone"), Some("us-south-3"));
    assert_eq!(config.get("region"), None);
    assert_eq!(config.get("ibmcloud:region"), Some("eu-de"));
}

#[test]
fn blank_stack_or_project_is_invalid() {
    assert!(RunInfo::new("proj", "dev").validate().is_ok());
    for (project, stack) in [("proj", ""), ("proj", "  "), ("", "dev"), (" ", "dev")] {
        let err = RunInfo::new(project, stack).validate().unwrap_err();
        assert!(matches!(err, SdkError::Config(_)), "got: {err}");
    }
}

#[test]
fn lookup_reads_every_variable() {
    let info = RunInfo::from_lookup(lookup(&[
        (STACK_ENV, "dev"),
        (PROJECT_ENV, "net"),
        (DRY_RUN_ENV, "true"),
        (CONFIG_ENV, r#"{"net:zone": "us-south-2"}"#),
    ]))
    .unwrap();
    assert_eq!(info.stack, "dev");
    assert_eq!(info.project, "net");
    assert!(info.dry_run);
    assert_eq!(info.config.get("zone"), Some("us-south-2"));
}

#[test]
fn lookup_defaults() {
    let info = RunInfo::from_lookup(lookup(&[(STACK_ENV, "dev"), (PROJECT_ENV, " ")])).unwrap();
    assert_eq!(info.project, DEFAULT_PROJECT);
    assert!(!info.dry_run);
    assert_eq!(info.config.get("zone"), None);
}

#[test]
fn missing_or_blank_stack_is_a_config_error() {
    let err = RunInfo::from_lookup(lookup(&[])).unwrap_err();
    assert!(matches!(err, SdkError::Config(_)), "got: {err}");
    assert!(err.to_string().contains(STACK_ENV), "got: {err}");

    let err = RunInfo::from_lookup(lookup(&[(STACK_ENV, "  ")])).unwrap_err();
    assert!(matches!(err, SdkError::Config(_)), "got: {err}");
}

#[test]
fn non_boolean_dry_run_is_rejected() {
    let err = RunInfo::from_lookup(lookup(&[(STACK_ENV, "dev"), (DRY_RUN_ENV, "sometimes")]))
        .unwrap_err();
    assert!(err.to_string().contains(DRY_RUN_ENV), "got: {err}");
}

#[test]
fn malformed_config_json_is_rejected() {
    let result = RunInfo::from_lookup(lookup(&[(STACK_ENV, "dev"), (CONFIG_ENV, "not json")]));
    assert!(matches!(result, Err(SdkError::Serialization(_))));
}

/// The only test in this binary that touches the process environment.
#[test]
fn from_env_reads_process_environment() {
    // SAFETY: no other test in this binary reads or writes the environment.
    unsafe {
        std::env::set_var(STACK_ENV, "staging");
        std::env::set_var(PROJECT_ENV, "env-proj");
        std::env::set_var(DRY_RUN_ENV, "1");
        std::env::set_var(CONFIG_ENV, r#"{"env-proj:plan": "lite"}"#);
    }
    let info = RunInfo::from_env().unwrap();
    assert_eq!(info.stack, "staging");
    assert_eq!(info.project, "env-proj");
    assert!(info.dry_run);
    assert_eq!(info.config.require("plan").unwrap(), "lite");

    unsafe {
        std::env::set_var(DRY_RUN_ENV, "perhaps");
    }
    assert!(RunInfo::from_env().is_err());

    unsafe {
        for key in [STACK_ENV, PROJECT_ENV, DRY_RUN_ENV, CONFIG_ENV] {
            std::env::remove_var(key);
        }
    }
    let err = RunInfo::from_env().unwrap_err();
    assert!(matches!(err, SdkError::Config(_)), "got: {err}");
}
