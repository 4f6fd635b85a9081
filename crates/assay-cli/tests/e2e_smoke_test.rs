use std::{fs, path::PathBuf};

use serde_json::Value;
use tempfile::tempdir;

use assay::AssayError;
use assay_cli::{Args, run};

/// Collects all .json documents from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn demo(name: &str) -> String {
    demos_path().join(name).to_string_lossy().to_string()
}

fn args(input: String, output: &PathBuf) -> Args {
    Args {
        input,
        output: Some(output.to_string_lossy().to_string()),
        log_level: "off".to_string(),
        ..Default::default()
    }
}

fn visible_ids(output: &PathBuf) -> Vec<String> {
    let json: Value =
        serde_json::from_str(&fs::read_to_string(output).expect("Output written"))
            .expect("Output is JSON");
    json["nodes"]
        .as_array()
        .expect("Nodes array")
        .iter()
        .filter(|node| node["hidden"] == false)
        .map(|node| node["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn e2e_smoke_test_demo_documents() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let documents = collect_json_files(demos_path());
    assert!(!documents.is_empty(), "No demo documents found in demos/");

    let mut failed = Vec::new();

    for path in &documents {
        let output = temp_dir
            .path()
            .join(path.file_name().unwrap().to_string_lossy().to_string());
        let args = Args {
            expand_all: true,
            ..args(path.to_string_lossy().to_string(), &output)
        };

        match run(&args) {
            Ok(()) => {
                let ids = visible_ids(&output);
                if ids.is_empty() {
                    failed.push((path.clone(), "empty graph".to_string()));
                }
            }
            Err(e) => failed.push((path.clone(), e.to_string())),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemo documents that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo document(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_default_view_shows_only_the_root() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.json");

    run(&args(demo("brake_controller.json"), &output)).expect("Run succeeds");

    assert_eq!(visible_ids(&output), vec!["goal-1"]);
}

#[test]
fn e2e_expand_all_shows_every_node() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.json");

    let args = Args {
        expand_all: true,
        ..args(demo("infusion_pump.json"), &output)
    };
    run(&args).expect("Run succeeds");

    assert_eq!(visible_ids(&output).len(), 9);
}

#[test]
fn e2e_reveal_expands_ancestors() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.json");

    let args = Args {
        reveal: vec!["evidence-31".to_string()],
        ..args(demo("brake_controller.json"), &output)
    };
    run(&args).expect("Run succeeds");

    let visible = visible_ids(&output);
    assert!(visible.contains(&"evidence-31".to_string()));
    assert!(visible.contains(&"strategy-11".to_string()));
    assert!(!visible.contains(&"evidence-32".to_string()));
}

#[test]
fn e2e_state_dir_persists_visibility() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let state_dir = temp_dir.path().join("state");
    let output = temp_dir.path().join("out.json");

    let first = Args {
        state_dir: Some(state_dir.to_string_lossy().to_string()),
        reveal: vec!["strategy-10".to_string()],
        reveal_subtree: vec!["strategy-10".to_string()],
        ..args(demo("brake_controller.json"), &output)
    };
    run(&first).expect("First run succeeds");
    assert!(state_dir.join("brake_controller.json").exists());
    let expected = visible_ids(&output);
    assert!(expected.contains(&"evidence-30".to_string()));

    let second = Args {
        state_dir: Some(state_dir.to_string_lossy().to_string()),
        ..args(demo("brake_controller.json"), &output)
    };
    run(&second).expect("Second run succeeds");

    assert_eq!(visible_ids(&output), expected);
}

#[test]
fn e2e_unknown_node_is_an_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.json");

    let args = Args {
        reveal: vec!["goal-404".to_string()],
        ..args(demo("brake_controller.json"), &output)
    };

    assert!(matches!(run(&args), Err(AssayError::UnknownNode(_))));
    assert!(!output.exists());
}

#[test]
fn e2e_invalid_document_is_an_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("broken.json");
    fs::write(&input, "{ \"goals\": [").expect("Failed to write input");
    let output = temp_dir.path().join("out.json");

    let result = run(&args(input.to_string_lossy().to_string(), &output));

    assert!(matches!(result, Err(AssayError::Parse(_))));
}

#[test]
fn e2e_config_file_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[visibility]\ndefault_expanded = true\n").expect("Failed to write config");
    let output = temp_dir.path().join("out.json");

    let args = Args {
        config: Some(config.to_string_lossy().to_string()),
        ..args(demo("infusion_pump.json"), &output)
    };
    run(&args).expect("Run succeeds");

    assert_eq!(visible_ids(&output).len(), 9);
}

#[test]
fn e2e_missing_config_is_an_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.json");

    let args = Args {
        config: Some(temp_dir.path().join("absent.toml").to_string_lossy().to_string()),
        ..args(demo("brake_controller.json"), &output)
    };

    assert!(matches!(run(&args), Err(AssayError::Config(_))));
}
