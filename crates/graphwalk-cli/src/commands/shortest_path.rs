//! Single-source shortest path command.

use anyhow::Result;
use graphwalk::algorithms::ShortestPaths;
use graphwalk::{AStar, Algorithm, BellmanFord, DagShortestPath, Dijkstra, VertexSet};
use serde::Serialize;

use super::{emit, walk};
use crate::PathAlgorithm;
use crate::config::RunConfig;
use crate::input::{CliEdge, CliGraph, Weights, require_vertex};
use crate::output;

/// Distance and path to one vertex.
#[derive(Serialize)]
struct PathRow {
    vertex: String,
    distance: Option<f64>,
    path: Option<Vec<String>>,
}

fn solve(
    graph: &CliGraph,
    weights: &Weights,
    algorithm: PathAlgorithm,
    root: &str,
    target: Option<&String>,
) -> Result<ShortestPaths<String, CliEdge>> {
    let weight = |e: &CliEdge| weights.of(e);
    let root = root.to_string();
    let paths = match algorithm {
        PathAlgorithm::Dijkstra => {
            let mut dijkstra = Dijkstra::new(graph, weight).with_root(root);
            dijkstra.compute()?;
            dijkstra.paths().clone()
        }
        PathAlgorithm::AstarZero => {
            let mut astar = AStar::new(graph, weight, |_: &String| 0.0).with_root(root);
            if let Some(goal) = target {
                astar = astar.with_goal(goal.clone());
            }
            astar.compute()?;
            astar.paths().clone()
        }
        PathAlgorithm::Dag => {
            let mut dag = DagShortestPath::new(graph, weight).with_root(root);
            dag.compute()?;
            dag.paths().clone()
        }
        PathAlgorithm::BellmanFord => {
            let mut bellman_ford = BellmanFord::new(graph, weight).with_root(root);
            bellman_ford.compute()?;
            tracing::debug!(passes = bellman_ford.passes(), "bellman-ford converged");
            bellman_ford.paths().clone()
        }
    };
    Ok(paths)
}

/// Run the shortest-path command.
pub fn run(
    config: &RunConfig,
    algorithm: PathAlgorithm,
    root: String,
    target: Option<String>,
) -> Result<()> {
    let (graph, weights) = config.load()?.build()?;
    let root = require_vertex(&graph, &root)?;
    let target = target.map(|t| require_vertex(&graph, &t)).transpose()?;

    let paths = solve(&graph, &weights, algorithm, &root, target.as_ref())?;
    tracing::info!(
        ?algorithm,
        reached = paths.reached_count(),
        "shortest paths computed"
    );

    let vertices: Vec<&String> = match &target {
        Some(target) => vec![target],
        None => graph.vertices().collect(),
    };
    let rows: Vec<PathRow> = vertices
        .into_iter()
        .map(|v| PathRow {
            vertex: v.clone(),
            distance: paths.distance(v),
            path: paths.path_to(v).map(|edges| walk(&root, &edges)),
        })
        .collect();

    emit(config, &rows, &["Vertex", "Distance", "Path"], |row| {
        vec![
            row.vertex.clone(),
            output::distance(row.distance),
            row.path.as_deref().map(output::path).unwrap_or_default(),
        ]
    })
}
