use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::tempdir;

use crate::harness::{SUITE_LONG, SUITE_SHORT, config_toml, fake_java, write_config, write_suite};

fn mutscore() -> Command {
    Command::new(PathBuf::from(env!("CARGO_BIN_EXE_mutscore")))
}

#[test]
fn test_run_writes_results_table() {
    let tmp = tempdir().unwrap();
    write_config(tmp.path(), &config_toml(tmp.path(), &fake_java(tmp.path())));
    write_suite(tmp.path(), "s1.csv", SUITE_SHORT);
    write_suite(tmp.path(), "s2.csv", SUITE_LONG);

    let output = mutscore()
        .arg("--cwd")
        .arg(tmp.path())
        .args(["--log.color", "off", "run", "s1.csv", "s2.csv"])
        .output()
        .expect("mutscore should run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Hand-Hand: score=2/3"), "stdout: {stdout}");
    assert!(stdout.contains("Jumble-Cart: score=3/4"), "stdout: {stdout}");
    assert!(stdout.contains("Pit-Scanette: score=1/2"), "stdout: {stdout}");

    let table = fs::read_to_string(tmp.path().join("results.csv")).unwrap();
    assert_eq!(
        table,
        "Suite,Events,Hand,Cart,Scanette,TotalKilled,TotalMutants,Percent\n\
         s1.csv,2,2,3,1,6,9,66.67\n\
         s2.csv,3,2,4,1,7,9,77.78\n"
    );
}

#[test]
fn test_engines_flag_drops_columns() {
    let tmp = tempdir().unwrap();
    write_config(tmp.path(), &config_toml(tmp.path(), &fake_java(tmp.path())));
    write_suite(tmp.path(), "s1.csv", SUITE_SHORT);

    let output = mutscore()
        .arg("--cwd")
        .arg(tmp.path())
        .args(["run", "s1.csv", "--engines", "binary", "--out", "hand-only.txt"])
        .output()
        .expect("mutscore should run");
    assert!(output.status.success());

    let table = fs::read_to_string(tmp.path().join("hand-only.csv")).unwrap();
    assert_eq!(
        table,
        "Suite,Events,Hand,TotalKilled,TotalMutants,Percent\n\
         s1.csv,2,2,2,3,66.67\n"
    );
}

#[test]
fn test_classify_binary_codes() {
    let output = mutscore()
        .args(["--log.color", "off", "classify", "binary", "1", "0", "-1", "7"])
        .output()
        .expect("mutscore should run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("score=2/4 .SX?"), "stdout: {stdout}");
}

#[test]
fn test_missing_config_fails() {
    let tmp = tempdir().unwrap();
    write_suite(tmp.path(), "s1.csv", SUITE_SHORT);
    let output = mutscore()
        .arg("--cwd")
        .arg(tmp.path())
        .arg("--config")
        .arg(tmp.path().join("nope.toml"))
        .args(["run", "s1.csv"])
        .output()
        .expect("mutscore should run");
    assert!(!output.status.success());
}
