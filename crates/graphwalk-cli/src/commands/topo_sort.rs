//! Topological sort command.

use anyhow::Result;
use graphwalk::{Algorithm, SourceFirstTopologicalSort, TopologicalSort};
use serde::Serialize;

use super::emit;
use crate::config::RunConfig;

#[derive(Serialize)]
struct OrderRow {
    position: usize,
    vertex: String,
}

/// Run the topo-sort command.
pub fn run(config: &RunConfig, source_first: bool) -> Result<()> {
    let (graph, _) = config.load()?.build()?;

    let order = if source_first {
        let mut sort = SourceFirstTopologicalSort::new(&graph);
        sort.compute()?;
        sort.order().to_vec()
    } else {
        let mut sort = TopologicalSort::new(&graph);
        sort.compute()?;
        sort.into_order()
    };
    tracing::info!(source_first, vertices = order.len(), "topological order computed");

    let rows: Vec<OrderRow> = order
        .into_iter()
        .enumerate()
        .map(|(position, vertex)| OrderRow { position, vertex })
        .collect();
    emit(config, &rows, &["Position", "Vertex"], |row| {
        vec![row.position.to_string(), row.vertex.clone()]
    })
}
