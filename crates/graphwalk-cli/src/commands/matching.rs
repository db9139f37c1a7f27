//! Maximum bipartite matching command.

use anyhow::Result;
use graphwalk::{Algorithm, Edge, MaximumBipartiteMatching};
use serde::Serialize;

use super::emit;
use crate::config::RunConfig;
use crate::input::{fresh_vertex, require_vertex};

#[derive(Serialize)]
struct PairRow {
    left: String,
    right: String,
}

/// Run the matching command.
pub fn run(config: &RunConfig, left: Vec<String>, right: Vec<String>) -> Result<()> {
    let (mut graph, weights) = config.load()?.build()?;
    let left = left
        .iter()
        .map(|v| require_vertex(&graph, v))
        .collect::<Result<Vec<_>, _>>()?;
    let right = right
        .iter()
        .map(|v| require_vertex(&graph, v))
        .collect::<Result<Vec<_>, _>>()?;
    let super_source = fresh_vertex(&graph, "source*");
    let super_sink = fresh_vertex(&graph, "sink*");

    let mut factory = weights.factory();
    let mut matching = MaximumBipartiteMatching::new(
        &mut graph,
        left,
        right,
        super_source,
        super_sink,
        |s: &String, t: &String| factory.make(s, t),
    );
    matching.compute()?;

    let mut rows: Vec<PairRow> = matching
        .matched_edges()
        .iter()
        .map(|e| PairRow {
            left: e.source().clone(),
            right: e.target().clone(),
        })
        .collect();
    rows.sort_by(|a, b| a.left.cmp(&b.left));
    tracing::info!(size = rows.len(), "maximum matching computed");

    emit(config, &rows, &["Left", "Right"], |row| {
        vec![row.left.clone(), row.right.clone()]
    })
}
