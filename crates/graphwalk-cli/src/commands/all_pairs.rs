//! All-pairs shortest path command.

use anyhow::Result;
use graphwalk::{Algorithm, FloydWarshall};
use serde::Serialize;

use super::{emit, walk};
use crate::config::RunConfig;
use crate::input::CliEdge;
use crate::output;

/// Best distance between one ordered pair.
#[derive(Serialize)]
struct PairRow {
    source: String,
    target: String,
    distance: f64,
    path: Vec<String>,
}

/// Run the all-pairs command.
pub fn run(config: &RunConfig) -> Result<()> {
    let (graph, weights) = config.load()?.build()?;

    let mut table = FloydWarshall::new(&graph, |e: &CliEdge| weights.of(e));
    table.compute()?;

    let rows: Vec<PairRow> = table
        .pairs()
        .filter(|(source, target, _)| source != target)
        .map(|(source, target, distance)| PairRow {
            source: source.clone(),
            target: target.clone(),
            distance,
            path: table
                .path(source, target)
                .map(|edges| walk(source, &edges))
                .unwrap_or_default(),
        })
        .collect();
    tracing::info!(pairs = rows.len(), "all-pairs distances computed");

    emit(config, &rows, &["Source", "Target", "Distance", "Path"], |row| {
        vec![
            row.source.clone(),
            row.target.clone(),
            row.distance.to_string(),
            output::path(&row.path),
        ]
    })
}
