//! CLI command implementations.

pub mod all_pairs;
pub mod components;
pub mod matching;
pub mod max_flow;
pub mod shortest_path;
pub mod topo_sort;
pub mod traverse;

use anyhow::Result;
use graphwalk::Edge;
use serde::Serialize;

use crate::config::RunConfig;
use crate::input::CliEdge;
use crate::output::{self, Format};

/// Prints `rows` as JSON or as a table with one line per row.
fn emit<T: Serialize>(
    config: &RunConfig,
    rows: &[T],
    headers: &[&str],
    cells: impl Fn(&T) -> Vec<String>,
) -> Result<()> {
    match config.format {
        Format::Json => output::print_json(&rows, config.quiet),
        Format::Table => {
            output::print_rows(headers, rows.iter().map(cells), config.quiet);
            Ok(())
        }
    }
}

/// The vertices visited when walking `edges` from `start`.
///
/// Undirected edges may be stored against the walking direction, so each
/// step takes the far end of the edge.
fn walk(start: &str, edges: &[CliEdge]) -> Vec<String> {
    let mut current = start.to_string();
    let mut vertices = vec![current.clone()];
    for edge in edges {
        current = edge
            .other_end(&current)
            .cloned()
            .unwrap_or_else(|| edge.target().clone());
        vertices.push(current.clone());
    }
    vertices
}
