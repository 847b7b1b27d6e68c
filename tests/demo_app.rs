use serde_json::json;

use trendmine::data::SourceId;
use trendmine::example_apps::{load_tables, run_insight_demo};
use trendmine::source::{RawRow, RawTable};

fn search_table() -> RawTable {
    RawTable::new(
        SourceId::SearchTrends,
        ["show", "festival", "show", "ingressos"]
            .iter()
            .map(|term| RawRow::from_pairs([("term", json!(term))]))
            .collect(),
    )
}

#[test]
fn demo_runs_over_default_tables() {
    let args = ["--k", "1"].iter().map(|arg| arg.to_string());
    run_insight_demo(args, || vec![search_table()]).expect("demo run");
}

#[test]
fn demo_reads_tables_and_config_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let tables_path = dir.path().join("tables.json");
    let config_path = dir.path().join("config.json");
    std::fs::write(
        &tables_path,
        serde_json::to_string(&vec![search_table()]).unwrap(),
    )
    .unwrap();
    std::fs::write(&config_path, r#"{"mining":{"top_n":3}}"#).unwrap();

    let loaded = load_tables(&tables_path).unwrap();
    assert_eq!(loaded, vec![search_table()]);

    let args = [
        "--tables",
        tables_path.to_str().unwrap(),
        "--config",
        config_path.to_str().unwrap(),
        "--json",
    ]
    .iter()
    .map(|arg| arg.to_string())
    .collect::<Vec<_>>();
    run_insight_demo(args.into_iter(), Vec::new).expect("demo run");
}

#[test]
fn demo_rejects_unknown_sources_and_missing_files() {
    let args = ["--source", "radio"].iter().map(|arg| arg.to_string());
    assert!(run_insight_demo(args, Vec::new).is_err());

    let args = ["--tables", "/nonexistent/tables.json"]
        .iter()
        .map(|arg| arg.to_string());
    assert!(run_insight_demo(args, Vec::new).is_err());
}
