//! Strongly connected components (Tarjan).

use graphwalk_common::{CancellationToken, Error, Result};
use graphwalk_core::{Edge, GraphBase, Incidence, VertexListGraph};

use super::ComponentLabels;
use crate::lifecycle::AlgorithmLifecycle;
use crate::traits::{Algorithm, Color, VertexIndex};
use crate::traversal::DfsVisitor;
use crate::traversal::dfs::depth_first_search;

const UNASSIGNED: usize = usize::MAX;

/// Tarjan bookkeeping driven by the depth-first engine.
struct TarjanVisitor<'a, G: GraphBase> {
    graph: &'a G,
    index: &'a VertexIndex<G::Vertex>,
    discover_time: Vec<usize>,
    roots: Vec<usize>,
    components: Vec<usize>,
    stack: Vec<usize>,
    time: usize,
    count: usize,
}

impl<'a, G: Incidence> TarjanVisitor<'a, G> {
    fn new(graph: &'a G, index: &'a VertexIndex<G::Vertex>) -> Self {
        let n = index.len();
        Self {
            graph,
            index,
            discover_time: vec![UNASSIGNED; n],
            roots: vec![UNASSIGNED; n],
            components: vec![UNASSIGNED; n],
            stack: Vec::new(),
            time: 0,
            count: 0,
        }
    }

    fn earlier(&self, a: usize, b: usize) -> usize {
        if self.discover_time[a] <= self.discover_time[b] { a } else { b }
    }
}

impl<G: Incidence> DfsVisitor<G::Vertex, G::Edge> for TarjanVisitor<'_, G> {
    fn discover_vertex(&mut self, vertex: &G::Vertex) -> Result<()> {
        let v = self.index.require(vertex)?;
        self.roots[v] = v;
        self.discover_time[v] = self.time;
        self.time += 1;
        self.stack.push(v);
        Ok(())
    }

    fn finish_vertex(&mut self, vertex: &G::Vertex) -> Result<()> {
        let v = self.index.require(vertex)?;
        for edge in self.graph.out_edges(vertex) {
            let w = self.index.require(edge.target())?;
            if self.components[w] == UNASSIGNED {
                self.roots[v] = self.earlier(self.roots[v], self.roots[w]);
            }
        }

        if self.roots[v] == v {
            while let Some(w) = self.stack.pop() {
                self.components[w] = self.count;
                if w == v {
                    break;
                }
            }
            self.count += 1;
        }
        Ok(())
    }
}

/// Strongly connected components of a directed graph.
///
/// Components are numbered in the order Tarjan's algorithm completes them,
/// which is a reverse topological order of the condensation: no edge leads
/// from a component to one with a larger number.
///
/// Undirected graphs are rejected with [`Error::InvalidOperation`]; use
/// [`WeakComponents`](super::WeakComponents) for them.
pub struct StrongComponents<'g, G: GraphBase> {
    graph: &'g G,
    lifecycle: AlgorithmLifecycle,
    labels: ComponentLabels<G::Vertex>,
}

impl<'g, G: VertexListGraph> StrongComponents<'g, G> {
    /// Creates the computation over `graph`.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            lifecycle: AlgorithmLifecycle::new("StrongComponents"),
            labels: ComponentLabels::default(),
        }
    }

    /// Uses `token` for cancellation instead of a private one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.lifecycle = AlgorithmLifecycle::with_cancellation("StrongComponents", token);
        self
    }

    /// Component labels from the last run.
    pub fn labels(&self) -> &ComponentLabels<G::Vertex> {
        &self.labels
    }

    /// Number of components.
    pub fn component_count(&self) -> usize {
        self.labels.count()
    }

    /// Component number of `vertex`.
    pub fn component_of(&self, vertex: &G::Vertex) -> Option<usize> {
        self.labels.component_of(vertex)
    }

    fn label(&mut self, cancel: &CancellationToken) -> Result<()> {
        self.labels = ComponentLabels::default();
        if !self.graph.is_directed() {
            return Err(Error::invalid_operation(
                "strong components require a directed graph",
            ));
        }
        let index = VertexIndex::from_graph(self.graph);
        let mut colors: Vec<Color> = Vec::new();
        let (components, count) = {
            let mut tarjan = TarjanVisitor::new(self.graph, &index);
            depth_first_search(self.graph, &index, &mut colors, None, &mut tarjan, cancel)?;
            (tarjan.components, tarjan.count)
        };
        if cancel.is_cancelling() {
            return Ok(());
        }
        self.labels = ComponentLabels::new(index, components, count);
        Ok(())
    }
}

impl<G: VertexListGraph> Algorithm for StrongComponents<'_, G> {
    fn compute(&mut self) -> Result<()> {
        let cancel = self.lifecycle.begin()?;
        let outcome = self.label(&cancel);
        self.lifecycle.end();
        outcome
    }

    fn lifecycle(&self) -> &AlgorithmLifecycle {
        &self.lifecycle
    }
}
