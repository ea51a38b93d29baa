use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use chrono::{Local, NaiveDateTime, Timelike};

const CORPUS: &str = "El DA O\nAbogado NC B-PER\nGeneral AQ I-PER\n\nMelbourne NP B-LOC\n( Fpa O\nAustralia NP B-LOC\n) Fpt O\n\n";

fn crf_train(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crf-train"))
        .current_dir(cwd)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_corpus(dir: &Path, sentences: usize) -> String {
    let path = dir.join("esp.train");
    fs::write(&path, CORPUS.repeat(sentences / 2)).unwrap();
    path.to_string_lossy().into_owned()
}

fn entries(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_missing_file_is_usage_error() {
    let cwd = tempfile::tempdir().unwrap();
    let output = crf_train(cwd.path(), &["-x", "base_extractors"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--file"));
    assert!(entries(cwd.path()).is_empty());
}

#[test]
fn test_unknown_extractor_exits_with_failure() {
    let cwd = tempfile::tempdir().unwrap();
    let output = crf_train(cwd.path(), &["-f", "missing.conll", "-x", "no_such_module"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed loading feature extractor"));
    assert!(stderr.contains("base_extractors"));
    assert!(entries(cwd.path()).is_empty());
}

#[test]
fn test_derived_model_name() {
    let data = tempfile::tempdir().unwrap();
    let cwd = tempfile::tempdir().unwrap();
    let input = write_corpus(data.path(), 10);

    let before = Local::now().naive_local().with_nanosecond(0).unwrap();
    let output = crf_train(cwd.path(), &["-f", &input, "-i", "5", "-m", "1"]);
    let after = Local::now().naive_local();
    assert!(output.status.success(), "{:?}", output);

    let files = entries(cwd.path());
    assert_eq!(files.len(), 1);
    let name = &files[0];
    let stamp = name
        .strip_prefix("esp.train.")
        .and_then(|rest| rest.strip_suffix(".crfsuite.model"))
        .unwrap_or_else(|| panic!("unexpected model name {}", name));
    let stamp = NaiveDateTime::parse_from_str(stamp, "%Y%m%d-%H%M%S").unwrap();
    assert!(before <= stamp && stamp <= after);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("init"));
    assert!(stderr.contains("10 example sequences seen"));
    assert!(stderr.contains("CRF parameters:"));
}

#[test]
fn test_explicit_output_and_quiet() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_corpus(dir.path(), 10);
    let model = dir.path().join("ner.model");

    let output = crf_train(
        dir.path(),
        &["-f", &input, "-o", model.to_str().unwrap(), "-i", "5", "-v", "-q"],
    );
    assert!(output.status.success(), "{:?}", output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("example sequences seen"));
    assert!(!stderr.contains("init"));
    assert_eq!(&fs::read(&model).unwrap()[..4], b"lCRF");
}

#[test]
fn test_progress_on_large_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_corpus(dir.path(), 1000);
    let model = dir.path().join("ner.model");

    let output = crf_train(
        dir.path(),
        &["-f", &input, "-o", model.to_str().unwrap(), "-i", "2"],
    );
    assert!(output.status.success(), "{:?}", output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("..........1000"));
    assert!(stderr.contains("1000 example sequences seen"));
}

#[test]
fn test_repeated_flags_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_corpus(dir.path(), 4);
    let model = dir.path().join("ner.model");

    let output = crf_train(
        dir.path(),
        &[
            "-f", &input, "-o", model.to_str().unwrap(), "-i", "2",
            "-v", "-v", "-V", "-V", "-q", "-q",
        ],
    );
    assert!(output.status.success(), "{:?}", output);
    assert!(!String::from_utf8_lossy(&output.stderr).contains("example sequences seen"));
    assert!(model.exists());
}
