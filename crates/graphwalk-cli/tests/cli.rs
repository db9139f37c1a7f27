//! End-to-end tests for the graphwalk binary.

use std::io::Write;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::NamedTempFile;

fn graph_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn run(args: &[&str], file: &NamedTempFile) -> Output {
    Command::new(env!("CARGO_BIN_EXE_graphwalk"))
        .args(&args[..1])
        .arg(file.path())
        .args(&args[1..])
        .args(["--format", "json"])
        .output()
        .unwrap()
}

fn json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

const DIAMOND: &str = r#"{
    "edges": [
        {"source": "a", "target": "b", "weight": 1},
        {"source": "b", "target": "c", "weight": 2},
        {"source": "a", "target": "c", "weight": 5},
        {"source": "c", "target": "d"}
    ]
}"#;

#[test]
fn test_bfs_reports_depths() {
    let file = graph_file(DIAMOND);
    let rows = json(&run(&["bfs", "--root", "a"], &file));
    let rows = rows.as_array().unwrap();

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["vertex"], "a");
    let depth_of = |name: &str| {
        rows.iter()
            .find(|r| r["vertex"] == name)
            .and_then(|r| r["depth"].as_f64())
    };
    assert_eq!(depth_of("c"), Some(1.0));
    assert_eq!(depth_of("d"), Some(2.0));
}

#[test]
fn test_dfs_times_nest() {
    let file = graph_file(DIAMOND);
    let rows = json(&run(&["dfs", "--root", "a"], &file));
    let root = &rows.as_array().unwrap()[0];

    assert_eq!(root["vertex"], "a");
    assert_eq!(root["discover"], 0);
    assert_eq!(root["finish"], 7);
}

#[test]
fn test_shortest_path_to_target() {
    let file = graph_file(DIAMOND);
    for algorithm in ["dijkstra", "astar-zero", "dag", "bellman-ford"] {
        let rows = json(&run(
            &["shortest-path", "--root", "a", "--target", "d", "-a", algorithm],
            &file,
        ));
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1, "{algorithm}");
        assert_eq!(rows[0]["distance"].as_f64(), Some(4.0), "{algorithm}");
        assert_eq!(
            rows[0]["path"],
            serde_json::json!(["a", "b", "c", "d"]),
            "{algorithm}"
        );
    }
}

#[test]
fn test_shortest_path_unreachable_is_null() {
    let file = graph_file(DIAMOND);
    let rows = json(&run(&["shortest-path", "--root", "c"], &file));
    let a = rows
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["vertex"] == "a")
        .unwrap();
    assert!(a["distance"].is_null());
    assert!(a["path"].is_null());
}

#[test]
fn test_negative_cycle_fails() {
    let file = graph_file(
        r#"{"edges": [
            {"source": "a", "target": "b", "weight": 1},
            {"source": "b", "target": "a", "weight": -3}
        ]}"#,
    );
    let output = run(&["shortest-path", "--root", "a", "-a", "bellman-ford"], &file);
    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .to_lowercase()
            .contains("negative")
    );
}

#[test]
fn test_all_pairs() {
    let file = graph_file(DIAMOND);
    let rows = json(&run(&["all-pairs"], &file));
    let rows = rows.as_array().unwrap();

    // a->b, a->c, a->d, b->c, b->d, c->d
    assert_eq!(rows.len(), 6);
    let a_to_d = rows
        .iter()
        .find(|r| r["source"] == "a" && r["target"] == "d")
        .unwrap();
    assert_eq!(a_to_d["distance"].as_f64(), Some(4.0));
}

#[test]
fn test_components() {
    let file = graph_file(
        r#"{
            "vertices": ["e"],
            "edges": [
                {"source": "a", "target": "b"},
                {"source": "b", "target": "a"},
                {"source": "c", "target": "d"}
            ]
        }"#,
    );
    let weak = json(&run(&["components"], &file));
    assert_eq!(weak.as_array().unwrap().len(), 3);

    let strong = json(&run(&["components", "--kind", "strong"], &file));
    let sizes: Vec<u64> = strong
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["size"].as_u64())
        .collect();
    assert_eq!(sizes.len(), 4);
    assert_eq!(sizes.iter().sum::<u64>(), 5);
}

#[test]
fn test_topo_sort_orders_edges() {
    let file = graph_file(DIAMOND);
    for extra in [&[][..], &["--source-first"][..]] {
        let mut args = vec!["topo-sort"];
        args.extend_from_slice(extra);
        let rows = json(&run(&args, &file));
        let order: Vec<&str> = rows
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|r| r["vertex"].as_str())
            .collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }
}

#[test]
fn test_topo_sort_rejects_cycle() {
    let file = graph_file(
        r#"{"edges": [{"source": "a", "target": "b"}, {"source": "b", "target": "a"}]}"#,
    );
    let output = run(&["topo-sort"], &file);
    assert!(!output.status.success());
}

#[test]
fn test_max_flow_matches_cut() {
    let file = graph_file(
        r#"{"edges": [
            {"source": "s", "target": "a", "weight": 3},
            {"source": "s", "target": "b", "weight": 2},
            {"source": "a", "target": "b", "weight": 1},
            {"source": "a", "target": "t", "weight": 2},
            {"source": "b", "target": "t", "weight": 3}
        ]}"#,
    );
    let report = json(&run(&["max-flow", "--source", "s", "--sink", "t"], &file));

    assert_eq!(report["max_flow"].as_f64(), Some(5.0));
    let cut: f64 = report["cut"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["amount"].as_f64())
        .sum();
    assert_eq!(cut, 5.0);
    let into_sink: f64 = report["flows"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["target"] == "t")
        .filter_map(|e| e["amount"].as_f64())
        .sum();
    assert_eq!(into_sink, 5.0);
}

#[test]
fn test_matching() {
    let file = graph_file(
        r#"{"edges": [
            {"source": "l1", "target": "r1"},
            {"source": "l1", "target": "r2"},
            {"source": "l2", "target": "r1"}
        ]}"#,
    );
    let rows = json(&run(
        &["matching", "--left", "l1,l2", "--right", "r1,r2"],
        &file,
    ));
    assert_eq!(
        rows,
        serde_json::json!([
            {"left": "l1", "right": "r2"},
            {"left": "l2", "right": "r1"}
        ])
    );
}

#[test]
fn test_unknown_vertex_fails() {
    let file = graph_file(DIAMOND);
    let output = run(&["bfs", "--root", "nope"], &file);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("\"nope\" is not in the graph"));
}

#[test]
fn test_malformed_file_fails() {
    let file = graph_file(r#"{"edges": [{"source": "a"}]}"#);
    let output = run(&["components"], &file);
    assert!(!output.status.success());
}
