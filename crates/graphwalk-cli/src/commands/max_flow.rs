//! Maximum flow command.

use anyhow::Result;
use graphwalk::{Algorithm, Edge, EdgeSet, EdmondsKarp, ReversedEdgeAugmentor};
use serde::Serialize;

use crate::config::RunConfig;
use crate::input::{CliEdge, CliGraph, Weights, require_vertex};
use crate::output::{self, Format};

#[derive(Serialize)]
struct EdgeRow {
    source: String,
    target: String,
    amount: f64,
}

impl EdgeRow {
    fn new(edge: &CliEdge, amount: f64) -> Self {
        Self {
            source: edge.source().clone(),
            target: edge.target().clone(),
            amount,
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.source.clone(),
            self.target.clone(),
            self.amount.to_string(),
        ]
    }
}

/// Flow value, minimum cut, and per-edge flow.
#[derive(Serialize)]
struct FlowReport {
    source: String,
    sink: String,
    max_flow: f64,
    augmenting_paths: usize,
    source_side: Vec<String>,
    cut: Vec<EdgeRow>,
    flows: Vec<EdgeRow>,
}

fn solve(
    graph: &CliGraph,
    weights: &Weights,
    reverser: &ReversedEdgeAugmentor<CliEdge>,
    source: &str,
    sink: &str,
) -> Result<FlowReport> {
    let mut flow = EdmondsKarp::new(graph, |e: &CliEdge| weights.of(e), reverser)
        .with_source(source.to_string())
        .with_sink(sink.to_string());
    flow.compute()?;

    let mut source_side: Vec<String> = flow.min_cut_source_side().into_iter().cloned().collect();
    source_side.sort();
    let cut = flow
        .min_cut_edges()
        .into_iter()
        .map(|e| EdgeRow::new(e, weights.of(e)))
        .collect();
    let flows = graph
        .edges()
        .filter(|e| !reverser.is_added(e))
        .filter_map(|e| {
            let amount = flow.flow(e)?;
            (amount > 0.0).then(|| EdgeRow::new(e, amount))
        })
        .collect();

    Ok(FlowReport {
        source: source.to_string(),
        sink: sink.to_string(),
        max_flow: flow.max_flow(),
        augmenting_paths: flow.augmenting_paths(),
        source_side,
        cut,
        flows,
    })
}

fn print(config: &RunConfig, report: &FlowReport) -> Result<()> {
    match config.format {
        Format::Json => output::print_json(report, config.quiet),
        Format::Table => {
            output::print_key_value_table(
                &[
                    ("Source", report.source.clone()),
                    ("Sink", report.sink.clone()),
                    ("Max flow", report.max_flow.to_string()),
                    ("Augmenting paths", report.augmenting_paths.to_string()),
                    ("Source side", report.source_side.join(", ")),
                ],
                config.quiet,
            );
            output::print_rows(
                &["Cut source", "Cut target", "Capacity"],
                report.cut.iter().map(EdgeRow::cells),
                config.quiet,
            );
            output::print_rows(
                &["Source", "Target", "Flow"],
                report.flows.iter().map(EdgeRow::cells),
                config.quiet,
            );
            Ok(())
        }
    }
}

/// Run the max-flow command.
pub fn run(config: &RunConfig, source: String, sink: String) -> Result<()> {
    let (mut graph, weights) = config.load()?.build()?;
    let source = require_vertex(&graph, &source)?;
    let sink = require_vertex(&graph, &sink)?;

    let mut factory = weights.factory();
    let mut reverser = ReversedEdgeAugmentor::new();
    reverser.augment(&mut graph, |e: &CliEdge| factory.make(e.target(), e.source()))?;
    tracing::debug!(added = reverser.added_edges().len(), "reverse edges added");

    let report = solve(&graph, &weights, &reverser, &source, &sink)?;
    tracing::info!(
        max_flow = report.max_flow,
        augmenting_paths = report.augmenting_paths,
        "maximum flow computed"
    );
    print(config, &report)
}
