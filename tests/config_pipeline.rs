use std::io::Write;

use agdeps::cli::CliArgs;
use agdeps::config::{ConfigFile, load_and_validate};
use agdeps::errors::AgdepsError;
use agdeps::layers::LayerPlan;
use agdeps::types::UnknownLayerPolicy;
use agdeps_test_utils::builders::{ConfigFileBuilder, ManagerEntryBuilder};
use agdeps_test_utils::init_tracing;
use clap::Parser;
use tempfile::NamedTempFile;

const PIPELINE: &str = r#"
[config]
unknown_layers = "ignore"

[[manager]]
layer = "word"

[[manager]]
layer = "segment"

[[manager]]
layer = "utterance"

[[manager]]
layer = "orthography"
implementation = "Orth Standardizer"
requires = ["word"]

[[manager]]
layer = "pron"

[[manager]]
layer = "phonology"
implementation = "CELEX"
requires = ["orthography"]

[[manager]]
layer = "phonology"
auxiliary = 1
implementation = "Pattern Matcher"
requires = ["orthography", "pron"]

[[manager]]
layer = "arpabet"
implementation = "Character Mapper"
requires = ["segment"]

[[manager]]
layer = "htk"
implementation = "HTKAligner"
requires = ["word", "orthography", "utterance", "phonology", "participant", "main_participant"]
generates = ["segment"]
"#;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn run_cli(args: &[&str]) -> anyhow::Result<String> {
    let args = CliArgs::try_parse_from(std::iter::once("agdeps").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    agdeps::run(&args, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_pipeline_file_resolves_in_dependency_order() {
    init_tracing();
    let file = write_config(PIPELINE);

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.manager.len(), 9);
    assert_eq!(cfg.config.unknown_layers, UnknownLayerPolicy::Ignore);

    let order: Vec<String> =
        LayerPlan::from_configs(cfg.to_manager_configs(), cfg.config.unknown_layers)
            .resolve()
            .unwrap()
            .iter()
            .map(|m| m.to_string())
            .collect();

    // String layer ids are required in lexical order, which changes how htk's
    // inputs are visited compared to numeric ids.
    assert_eq!(
        order,
        vec![
            "word",
            "orthography [Orth Standardizer]",
            "phonology [CELEX]",
            "pron",
            "phonology (aux 1) [Pattern Matcher]",
            "utterance",
            "htk [HTKAligner]",
            "segment",
            "arpabet [Character Mapper]",
        ]
    );
}

#[test]
fn test_cli_prints_numbered_plan() {
    let file = write_config(PIPELINE);
    let path = file.path().to_str().unwrap();

    let output = run_cli(&["--config", path]).unwrap();
    let lines: Vec<&str> = output.lines().map(str::trim).collect();

    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "1. word");
    assert_eq!(lines[6], "7. htk [HTKAligner]");
    assert_eq!(lines[8], "9. arpabet [Character Mapper]");
}

#[test]
fn test_cli_dot_output() {
    let file = write_config(
        r#"
[[manager]]
layer = "word"

[[manager]]
layer = "stem"
implementation = "Porter Stemmer"
requires = ["word"]
"#,
    );
    let path = file.path().to_str().unwrap();

    let output = run_cli(&["--config", path, "--format", "dot"]).unwrap();
    assert!(output.starts_with("digraph"));
    assert!(output.contains("word"));
    assert!(output.contains("stem [Porter Stemmer]"));
    assert!(output.contains("0 -> 1"));
}

#[test]
fn test_cli_dry_run_lists_managers() {
    let file = write_config(PIPELINE);
    let path = file.path().to_str().unwrap();

    let output = run_cli(&["--config", path, "--dry-run"]).unwrap();
    assert!(output.starts_with("agdeps dry-run"));
    assert!(output.contains("managers (9):"));
    assert!(output.contains("auxiliary: 1"));
    assert!(output.contains("implementation: HTKAligner"));
}

#[test]
fn test_cli_unknown_layers_override() {
    let file = write_config(PIPELINE);
    let path = file.path().to_str().unwrap();

    let err = run_cli(&["--config", path, "--unknown-layers", "error"]).unwrap_err();
    match err.downcast_ref::<AgdepsError>() {
        Some(AgdepsError::UnknownLayer { manager, layer }) => {
            assert_eq!(manager, "htk [HTKAligner]");
            assert_eq!(layer, "main_participant");
        }
        other => panic!("Expected UnknownLayer error, got: {other:?}"),
    }
}

#[test]
fn test_manager_cycle_returns_structured_error() {
    let file = write_config(
        r#"
[[manager]]
layer = "A"
requires = ["B"]

[[manager]]
layer = "B"
requires = ["A"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(AgdepsError::DagCycle(msg)) => {
            assert!(msg.contains("circular dependency"));
            assert!(msg.contains("'B'"));
        }
        Err(e) => panic!("Expected DagCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_unknown_layer_policy_from_file() {
    let file = write_config(
        r#"
[config]
unknown_layers = "error"

[[manager]]
layer = "stem"
requires = ["word"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(AgdepsError::UnknownLayer { manager, layer }) => {
            assert_eq!(manager, "stem");
            assert_eq!(layer, "word");
        }
        other => panic!("Expected UnknownLayer error, got: {:?}", other),
    }
}

#[test]
fn test_invalid_policy_is_a_toml_error() {
    let file = write_config(
        r#"
[config]
unknown_layers = "sometimes"

[[manager]]
layer = "word"
"#,
    );

    assert!(matches!(
        load_and_validate(file.path()),
        Err(AgdepsError::TomlError(_))
    ));
}

#[test]
fn test_empty_config_is_rejected() {
    let raw = ConfigFileBuilder::new().build_raw();

    match ConfigFile::try_from(raw) {
        Err(AgdepsError::ConfigError(msg)) => assert!(msg.contains("at least one [[manager]]")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn test_duplicate_slot_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_manager(ManagerEntryBuilder::new("pos").auxiliary(1).build())
        .with_manager(ManagerEntryBuilder::new("pos").auxiliary(1).build())
        .build_raw();

    match ConfigFile::try_from(raw) {
        Err(AgdepsError::ConfigError(msg)) => {
            assert!(msg.contains("layer 'pos'"));
            assert!(msg.contains("auxiliary slot 1"));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn test_auxiliary_before_primary_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_manager(
            ManagerEntryBuilder::new("phonology")
                .auxiliary(1)
                .implementation("Pattern Matcher")
                .build(),
        )
        .with_manager(
            ManagerEntryBuilder::new("phonology")
                .implementation("CELEX")
                .build(),
        )
        .build_raw();

    match ConfigFile::try_from(raw) {
        Err(AgdepsError::ConfigError(msg)) => {
            assert!(msg.contains("layer 'phonology'"), "unexpected message: {msg}");
            assert!(msg.contains("before its auxiliaries"));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn test_requiring_own_layer_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_manager(
            ManagerEntryBuilder::new("stem")
                .name("stemmer")
                .requires("stem")
                .build(),
        )
        .build_raw();

    match ConfigFile::try_from(raw) {
        Err(AgdepsError::ConfigError(msg)) => {
            assert!(msg.contains("'stemmer' cannot require its own layer"));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn test_empty_layer_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_manager(ManagerEntryBuilder::new("word").build())
        .with_manager(ManagerEntryBuilder::new("  ").build())
        .build_raw();

    match ConfigFile::try_from(raw) {
        Err(AgdepsError::ConfigError(msg)) => assert!(msg.contains("#2")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn test_builder_config_to_manager_configs() {
    let cfg = ConfigFileBuilder::new()
        .unknown_layers(UnknownLayerPolicy::Error)
        .with_manager(ManagerEntryBuilder::new("word").build())
        .with_manager(
            ManagerEntryBuilder::new("htk")
                .name("aligner")
                .implementation("HTK")
                .requires("word")
                .generates("segment")
                .build(),
        )
        .build();

    let configs = cfg.to_manager_configs();
    assert_eq!(configs[1].name, "aligner");
    assert_eq!(configs[1].layer, "htk");
    assert!(configs[1].generates.contains("segment"));
    assert!(configs[1].generates.contains("htk"));
    assert!(configs[1].requires.contains("word"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("Pipeline.toml");

    assert!(matches!(
        load_and_validate(&missing),
        Err(AgdepsError::IoError(_))
    ));
}
