//! Integration tests for the CLI application
//!
//! These tests verify that the CLI commands work correctly with real data files.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::{Builder, NamedTempFile, TempDir};

/// Helper to create test data files
struct TestDataFiles {
    pub libsvm_file: NamedTempFile,
    pub dense_file: NamedTempFile,
    pub test_libsvm_file: NamedTempFile,
}

impl TestDataFiles {
    fn new() -> std::io::Result<Self> {
        let mut libsvm_file = Builder::new().suffix(".libsvm").tempfile()?;
        writeln!(libsvm_file, "+1 1:2.0 2:1.0")?;
        writeln!(libsvm_file, "-1 1:-2.0 2:-1.0")?;
        writeln!(libsvm_file, "+1 1:1.5 2:0.8")?;
        writeln!(libsvm_file, "-1 1:-1.5 2:-0.8")?;
        writeln!(libsvm_file, "+1 1:1.8 2:0.9")?;
        writeln!(libsvm_file, "-1 1:-1.8 2:-0.9")?;
        libsvm_file.flush()?;

        let mut dense_file = Builder::new().suffix(".dense").tempfile()?;
        writeln!(dense_file, "% dense training data")?;
        writeln!(dense_file, "+1 2.0 1.0")?;
        writeln!(dense_file, "-1 -2.0 -1.0")?;
        writeln!(dense_file, "+1 1.5 0.8")?;
        writeln!(dense_file, "-1 -1.5 -0.8")?;
        writeln!(dense_file, "+1 1.8 0.9")?;
        writeln!(dense_file, "-1 -1.8 -0.9")?;
        dense_file.flush()?;

        let mut test_libsvm_file = Builder::new().suffix(".libsvm").tempfile()?;
        writeln!(test_libsvm_file, "+1 1:1.6 2:0.7")?;
        writeln!(test_libsvm_file, "-1 1:-1.6 2:-0.7")?;
        test_libsvm_file.flush()?;

        Ok(TestDataFiles {
            libsvm_file,
            dense_file,
            test_libsvm_file,
        })
    }
}

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_smo-svm"))
        .args(args)
        .output()
        .expect("Failed to run CLI")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are utf-8")
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{what} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Train a linear model on the LibSVM fixture and return its path
fn train_model(test_data: &TestDataFiles, temp_dir: &TempDir) -> PathBuf {
    let model_path = temp_dir.path().join("model.json");
    let output = run_cli(&[
        "train",
        "--data",
        path_str(test_data.libsvm_file.path()),
        "--output",
        path_str(&model_path),
        "--seed",
        "1",
    ]);
    assert_success(&output, "Train command");
    model_path
}

#[test]
fn test_cli_train_command_libsvm() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = temp_dir.path().join("model.json");

    let output = run_cli(&[
        "train",
        "--data",
        path_str(test_data.libsvm_file.path()),
        "--output",
        path_str(&model_path),
        "--format",
        "libsvm",
        "-C",
        "1.0",
        "--epsilon",
        "0.001",
        "--max-iterations",
        "100",
    ]);

    assert_success(&output, "Train command");
    assert!(model_path.exists(), "Model file was not created");

    let saved = std::fs::read_to_string(&model_path).unwrap();
    assert!(saved.contains("\"type\": \"linear\""));
    assert!(saved.contains("\"weights\""));
}

#[test]
fn test_cli_train_dense_with_gaussian_kernel() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = temp_dir.path().join("gaussian.json");

    let output = run_cli(&[
        "train",
        "--data",
        path_str(test_data.dense_file.path()),
        "--output",
        path_str(&model_path),
        "--kernel",
        "gaussian",
        "--gamma",
        "0.5",
        "--cache-size",
        "1",
        "--seed",
        "3",
    ]);
    assert_success(&output, "Train command");

    let saved = std::fs::read_to_string(&model_path).unwrap();
    assert!(saved.contains("\"type\": \"gaussian\""));
    assert!(!saved.contains("\"weights\""));

    let info = run_cli(&["info", path_str(&model_path)]);
    assert_success(&info, "Info command");
    let stdout = String::from_utf8_lossy(&info.stdout);
    assert!(stdout.contains("gaussian(gamma=0.5)"), "{stdout}");
}

#[test]
fn test_cli_train_writes_dump() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = temp_dir.path().join("model.json");
    let dump_path = temp_dir.path().join("model.dump");

    let output = run_cli(&[
        "train",
        "--data",
        path_str(test_data.libsvm_file.path()),
        "--output",
        path_str(&model_path),
        "--dump",
        path_str(&dump_path),
    ]);
    assert_success(&output, "Train command");

    let dump = std::fs::read_to_string(&dump_path).expect("dump file written");
    let data_lines: Vec<&str> = dump.lines().filter(|l| !l.starts_with('%')).collect();
    // Header line plus one line per training example
    assert_eq!(data_lines.len(), 7);
    assert!(data_lines[0].starts_with("2 "));
    assert!(data_lines[0].ends_with(" 0 0"));
    assert!(dump.trim_end().ends_with("%\n% eof\n%"));
}

#[test]
fn test_cli_info_command() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = train_model(&test_data, &temp_dir);

    let output = run_cli(&["info", path_str(&model_path)]);
    assert_success(&output, "Info command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("=== SVM Model Summary ==="));
    assert!(stdout.contains("Kernel: linear"));
    assert!(stdout.contains("Support Vectors:"));
    assert!(stdout.contains("Weights:"));
}

#[test]
fn test_cli_predict_command() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = train_model(&test_data, &temp_dir);
    let predictions_path = temp_dir.path().join("predictions.txt");

    let output = run_cli(&[
        "predict",
        "--model",
        path_str(&model_path),
        "--data",
        path_str(test_data.test_libsvm_file.path()),
        "--output",
        path_str(&predictions_path),
    ]);
    assert_success(&output, "Predict command");

    let predictions = std::fs::read_to_string(&predictions_path).unwrap();
    let rows: Vec<&str> = predictions
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect();
    assert_eq!(rows, vec!["0 1", "1 -1"]);
}

#[test]
fn test_cli_predict_with_confidence() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = train_model(&test_data, &temp_dir);

    let output = run_cli(&[
        "predict",
        "--model",
        path_str(&model_path),
        "--data",
        path_str(test_data.test_libsvm_file.path()),
        "--confidence",
    ]);
    assert_success(&output, "Predict command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("# Predictions for 2 examples"));
    for line in stdout.lines().filter(|line| !line.starts_with('#')) {
        assert_eq!(line.split_whitespace().count(), 3, "{line}");
    }
}

#[test]
fn test_cli_evaluate_command() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = train_model(&test_data, &temp_dir);

    let output = run_cli(&[
        "evaluate",
        "--model",
        path_str(&model_path),
        "--data",
        path_str(test_data.test_libsvm_file.path()),
        "--detailed",
    ]);
    assert_success(&output, "Evaluate command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Accuracy: 100.00%"), "{stdout}");
    assert!(stdout.contains("Precision:"));
    assert!(stdout.contains("Specificity:"));
}

#[test]
fn test_cli_rejects_bad_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = temp_dir.path().join("model.json");

    let mut bad_labels = Builder::new().suffix(".libsvm").tempfile().unwrap();
    writeln!(bad_labels, "2 1:1.0").unwrap();
    writeln!(bad_labels, "-1 1:-1.0").unwrap();
    bad_labels.flush().unwrap();

    let output = run_cli(&[
        "train",
        "--data",
        path_str(bad_labels.path()),
        "--output",
        path_str(&model_path),
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!model_path.exists());

    let missing = run_cli(&["info", path_str(&temp_dir.path().join("absent.json"))]);
    assert_eq!(missing.status.code(), Some(1));
}

#[test]
fn test_cli_rejects_invalid_kernel_parameters() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let model_path = temp_dir.path().join("model.json");

    let output = run_cli(&[
        "train",
        "--data",
        path_str(test_data.libsvm_file.path()),
        "--output",
        path_str(&model_path),
        "--kernel",
        "polynomial",
        "--degree",
        "0",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!model_path.exists());
}

#[test]
fn test_cli_help() {
    let output = run_cli(&["--help"]);
    assert_success(&output, "Help");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["train", "predict", "evaluate", "info"] {
        assert!(stdout.contains(command), "help should list {command}");
    }
}
