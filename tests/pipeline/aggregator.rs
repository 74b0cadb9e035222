use std::fs;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use mutscore::types::AppError;
use mutscore::{Aggregator, EngineRegistry, ResultStore};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use crate::harness::{
    SUITE_CRASH, SUITE_LONG, SUITE_SHORT, config_toml, fake_java, resolve, write_suite,
};

#[tokio::test]
async fn test_rows_follow_input_order() {
    let tmp = tempdir().unwrap();
    let config = resolve(&config_toml(tmp.path(), &fake_java(tmp.path())));
    let registry = EngineRegistry::from_config(&config);
    let suites = vec![
        write_suite(tmp.path(), "s2.csv", SUITE_LONG),
        write_suite(tmp.path(), "s1.csv", SUITE_SHORT),
        write_suite(tmp.path(), "again.csv", SUITE_LONG),
    ];

    let store = ResultStore::create(&config.output, &config.targets).unwrap();
    let aggregator = Aggregator::new(&config, &registry, Arc::new(AtomicBool::new(true)));
    let rows = aggregator.run_all(&suites, &store).await.unwrap();

    assert_eq!(rows.len(), 3);
    let names: Vec<_> = rows.iter().map(|r| r.suite.clone()).collect();
    assert_eq!(names, suites);
    for row in &rows {
        assert_eq!(row.total, row.cells.iter().map(|c| c.total).sum::<usize>());
        assert_eq!(row.killed, row.cells.iter().map(|c| c.killed).sum::<usize>());
    }
    // Hand 2/3, Cart 4/4, Scanette 1/2
    assert_eq!((rows[0].killed, rows[0].total, rows[0].events), (7, 9, 3));
    assert_eq!(rows[0].percent, Some(77.78));
    // Hand 2/3, Cart 3/4, Scanette 1/2
    assert_eq!((rows[1].killed, rows[1].total, rows[1].events), (6, 9, 2));
    assert_eq!(rows[1].percent, Some(66.67));

    let table = fs::read_to_string(&config.output).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(
        lines[0],
        "Suite,Events,Hand,Cart,Scanette,TotalKilled,TotalMutants,Percent"
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[2].ends_with("s1.csv,2,2,3,1,6,9,66.67"));
    assert!(tmp.path().join("s2").join("summary.json").exists());
}

#[tokio::test]
async fn test_rerun_yields_same_row() {
    let tmp = tempdir().unwrap();
    let config = resolve(&config_toml(tmp.path(), &fake_java(tmp.path())));
    let registry = EngineRegistry::from_config(&config);
    let suite = write_suite(tmp.path(), "s1.csv", SUITE_SHORT);
    let aggregator = Aggregator::new(&config, &registry, Arc::new(AtomicBool::new(true)));

    let first = aggregator.run_suite(&suite).await.unwrap();
    let second = aggregator.run_suite(&suite).await.unwrap();
    assert_eq!(first.row, second.row);
    assert_eq!(first.summaries, second.summaries);
}

#[tokio::test]
async fn test_zero_mutants_is_configuration_error() {
    let tmp = tempdir().unwrap();
    let program = fake_java(tmp.path());
    let toml = format!(
        r#"
[run]
output = "{dir}/results"
workdir = "{dir}"

[runtime]
program = "{program}"

[engines.streaming]
entry_point = "Empty"
test_class = "TestCsv"

[[targets]]
name = "Cart"
engine = "streaming"
"#,
        dir = tmp.path().display(),
        program = program.display()
    );
    let config = resolve(&toml);
    let registry = EngineRegistry::from_config(&config);
    let suite = write_suite(tmp.path(), "s1.csv", SUITE_SHORT);

    let store = ResultStore::create(&config.output, &config.targets).unwrap();
    let aggregator = Aggregator::new(&config, &registry, Arc::new(AtomicBool::new(true)));
    let err = aggregator.run_all(&[suite], &store).await.unwrap_err();
    assert!(matches!(err, AppError::Configuration(_)));
    // Nothing partial is persisted for that suite
    assert_eq!(fs::read_to_string(&config.output).unwrap().lines().count(), 1);
}

#[tokio::test]
async fn test_failed_target_does_not_stop_later_suites() {
    let tmp = tempdir().unwrap();
    let program = fake_java(tmp.path());
    let toml = format!(
        r#"
[run]
output = "{dir}/results"
workdir = "{dir}"

[runtime]
program = "{program}"

[engines.streaming]
test_class = "TestCsv"

[[targets]]
name = "Cart"
engine = "streaming"
"#,
        dir = tmp.path().display(),
        program = program.display()
    );
    let config = resolve(&toml);
    let registry = EngineRegistry::from_config(&config);
    let suites = vec![
        write_suite(tmp.path(), "crash.csv", SUITE_CRASH),
        write_suite(tmp.path(), "s2.csv", SUITE_LONG),
    ];

    let store = ResultStore::create(&config.output, &config.targets).unwrap();
    let aggregator = Aggregator::new(&config, &registry, Arc::new(AtomicBool::new(true)));
    let rows = aggregator.run_all(&suites, &store).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert!(!rows[0].is_measured());
    assert!(!rows[0].cells[0].measured);
    assert_eq!((rows[1].killed, rows[1].total), (4, 4));
    assert_eq!(rows[1].percent, Some(100.0));

    let table = fs::read_to_string(&config.output).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with("crash.csv,1,NA,0,0,NA"));
    assert!(lines[2].ends_with("s2.csv,3,4,4,4,100.00"));
}

#[tokio::test]
async fn test_unreadable_suite_is_configuration_error() {
    let tmp = tempdir().unwrap();
    let config = resolve(&config_toml(tmp.path(), &fake_java(tmp.path())));
    let registry = EngineRegistry::from_config(&config);
    let aggregator = Aggregator::new(&config, &registry, Arc::new(AtomicBool::new(true)));
    let err = aggregator
        .run_suite(&tmp.path().join("missing.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Configuration(msg) if msg.contains("missing.csv")));
}

#[tokio::test]
async fn test_cleared_flag_stops_before_next_suite() {
    let tmp = tempdir().unwrap();
    let config = resolve(&config_toml(tmp.path(), &fake_java(tmp.path())));
    let registry = EngineRegistry::from_config(&config);
    let suite = write_suite(tmp.path(), "s1.csv", SUITE_SHORT);
    let store = ResultStore::create(&config.output, &config.targets).unwrap();
    let aggregator = Aggregator::new(&config, &registry, Arc::new(AtomicBool::new(false)));
    let rows = aggregator.run_all(&[suite], &store).await.unwrap();
    assert!(rows.is_empty());
}
