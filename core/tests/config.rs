//! Study configuration tests.

use simeval_core::{EvalConfig, EvalError, FirmGroup, InputSet, SweepConfig};
use std::path::PathBuf;

fn write_temp(name: &str, content: &str) -> String {
    let path = std::env::temp_dir().join(format!("simeval-config-{}-{name}", std::process::id()));
    std::fs::write(&path, content).unwrap();
    path.display().to_string()
}

#[test]
fn default_study_expands_the_max_demand_sweep() {
    let config = EvalConfig::default_study();
    config.validate().unwrap();

    let paths = config.resolve_paths();

    assert_eq!(paths.len(), 25, "intercepts 6..=30");
    assert_eq!(
        paths[0],
        PathBuf::from("MasterOutputFiles/MasterOutputMaxDemand6.csv")
    );
    assert_eq!(
        paths[24],
        PathBuf::from("MasterOutputFiles/MasterOutputMaxDemand30.csv")
    );
    let labels: Vec<&str> = config.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, ["AI agent", "sophisticated agents", "naive agents"]);
    assert_eq!(config.starting_capital, 2000.0);
}

#[test]
fn explicit_files_come_before_sweep() {
    let inputs = InputSet {
        files: vec![PathBuf::from("baseline.csv")],
        sweep: Some(SweepConfig {
            path_prefix: "out/run".into(),
            path_suffix: ".tsv".into(),
            first: 1,
            last: 2,
        }),
    };

    let paths = inputs.resolve_paths();

    assert_eq!(
        paths,
        vec![
            PathBuf::from("baseline.csv"),
            PathBuf::from("out/run1.tsv"),
            PathBuf::from("out/run2.tsv"),
        ]
    );
}

#[test]
fn loads_json_with_defaults() {
    let path = write_temp(
        "defaults.json",
        r#"{
            "inputs": { "sweep": { "path_prefix": "data/MaxDemand", "first": 10, "last": 12 } },
            "groups": [ { "label": "AI agent", "firm_ids": [4] } ]
        }"#,
    );

    let config = EvalConfig::load(&path).unwrap();

    assert_eq!(config.starting_capital, 2000.0);
    assert_eq!(
        config.resolve_paths().last(),
        Some(&PathBuf::from("data/MaxDemand12.csv"))
    );
}

#[test]
fn load_rejects_invalid_configs() {
    let cases = [
        (
            "no-inputs.json",
            r#"{ "inputs": {}, "groups": [ { "label": "a", "firm_ids": [1] } ] }"#,
        ),
        (
            "empty-group.json",
            r#"{ "inputs": { "files": ["x.csv"] }, "groups": [ { "label": "a", "firm_ids": [] } ] }"#,
        ),
        (
            "backwards-sweep.json",
            r#"{ "inputs": { "sweep": { "path_prefix": "p", "first": 9, "last": 3 } },
                 "groups": [ { "label": "a", "firm_ids": [1] } ] }"#,
        ),
        (
            "bad-capital.json",
            r#"{ "inputs": { "files": ["x.csv"] }, "groups": [ { "label": "a", "firm_ids": [1] } ],
                 "starting_capital": 0.0 }"#,
        ),
    ];

    for (name, json) in cases {
        let path = write_temp(name, json);
        let result = EvalConfig::load(&path);
        assert!(
            matches!(result, Err(EvalError::Config(_))),
            "{name} should be rejected, got {result:?}"
        );
    }
}

#[test]
fn duplicate_group_labels_are_rejected() {
    let mut config = EvalConfig::default_study();
    config.groups.push(FirmGroup::new("AI agent", vec![5]));

    assert!(matches!(config.validate(), Err(EvalError::Config(_))));
}

/// A group is a set of firms; a repeated id would double-count its runs.
#[test]
fn repeated_firm_id_in_group_is_rejected() {
    let mut config = EvalConfig::default_study();
    config.groups[0] = FirmGroup::new("AI agent", vec![4, 4]);

    match config.validate() {
        Err(EvalError::Config(msg)) => assert!(msg.contains("firm 4"), "{msg}"),
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let path = write_temp("malformed.json", "{ \"inputs\": ");

    assert!(matches!(
        EvalConfig::load(&path),
        Err(EvalError::Serialization(_))
    ));
}

#[test]
fn missing_config_file_is_an_io_error() {
    let result = EvalConfig::load("/nonexistent/study.json");

    assert!(matches!(result, Err(EvalError::Io { .. })));
}

#[test]
fn with_files_replaces_sweep() {
    let config = EvalConfig::default_study().with_files(vec![PathBuf::from("one.csv")]);

    assert_eq!(config.resolve_paths(), vec![PathBuf::from("one.csv")]);
    config.validate().unwrap();
}
