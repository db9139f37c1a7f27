//! Breadth-first and depth-first traversal commands.

use anyhow::Result;
use graphwalk::{
    Algorithm, BreadthFirstSearch, DepthFirstSearch, PredecessorRecorder, TimeStampRecorder,
    VertexDistanceRecorder, VertexSet,
};
use serde::Serialize;

use super::emit;
use crate::config::RunConfig;
use crate::input::{CliEdge, CliGraph, require_vertex};

/// One visited vertex.
#[derive(Serialize)]
struct VisitRow {
    vertex: String,
    depth: f64,
    parent: Option<String>,
    discover: usize,
    finish: usize,
}

/// Recorders shared by both traversals.
struct Recorders {
    parents: PredecessorRecorder<String, CliEdge>,
    depths: VertexDistanceRecorder<String, CliEdge>,
    times: TimeStampRecorder<String>,
}

impl Recorders {
    fn new() -> Self {
        Self {
            parents: PredecessorRecorder::new(),
            depths: VertexDistanceRecorder::hops(),
            times: TimeStampRecorder::new(),
        }
    }

    /// Visited vertices in discovery order.
    fn rows(&self, graph: &CliGraph) -> Vec<VisitRow> {
        let mut rows: Vec<VisitRow> = graph
            .vertices()
            .filter_map(|v| {
                Some(VisitRow {
                    vertex: v.clone(),
                    depth: self.depths.distance(v)?,
                    parent: self.parents.parent(v),
                    discover: self.times.discover_time(v)?,
                    finish: self.times.finish_time(v)?,
                })
            })
            .collect();
        rows.sort_by_key(|row| row.discover);
        rows
    }
}

fn print(config: &RunConfig, rows: &[VisitRow]) -> Result<()> {
    emit(
        config,
        rows,
        &["Vertex", "Depth", "Parent", "Discover", "Finish"],
        |row| {
            vec![
                row.vertex.clone(),
                row.depth.to_string(),
                row.parent.clone().unwrap_or_default(),
                row.discover.to_string(),
                row.finish.to_string(),
            ]
        },
    )
}

/// Run the bfs command.
pub fn run_bfs(config: &RunConfig, root: Option<String>) -> Result<()> {
    let (graph, _) = config.load()?.build()?;
    let root = root.map(|r| require_vertex(&graph, &r)).transpose()?;

    let recorders = Recorders::new();
    let mut search = BreadthFirstSearch::new(&graph);
    search.set_root(root);
    search.attach(recorders.parents.clone());
    search.attach(recorders.depths.clone());
    search.attach(recorders.times.clone());
    search.compute()?;

    let rows = recorders.rows(&graph);
    tracing::info!(visited = rows.len(), "breadth-first search finished");
    print(config, &rows)
}

/// Run the dfs command.
pub fn run_dfs(config: &RunConfig, root: Option<String>) -> Result<()> {
    let (graph, _) = config.load()?.build()?;
    let root = root.map(|r| require_vertex(&graph, &r)).transpose()?;

    let recorders = Recorders::new();
    let mut search = DepthFirstSearch::new(&graph);
    search.set_root(root);
    search.attach(recorders.parents.clone());
    search.attach(recorders.depths.clone());
    search.attach(recorders.times.clone());
    search.compute()?;

    let rows = recorders.rows(&graph);
    tracing::info!(visited = rows.len(), "depth-first search finished");
    print(config, &rows)
}
