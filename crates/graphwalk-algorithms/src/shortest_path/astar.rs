//! A* search.

use graphwalk_common::{CancellationToken, Error, Result};
use graphwalk_core::{GraphBase, VertexListGraph};

use super::dijkstra::RelaxingDriver;
use super::relaxer::{DistanceRelaxer, ShortestDistanceRelaxer};
use super::{ShortestPathObserver, ShortestPaths};
use crate::frontier::PriorityFrontier;
use crate::lifecycle::AlgorithmLifecycle;
use crate::traits::{Algorithm, Color, ObserverId, Observers, VertexIndex};
use crate::traversal::bfs::breadth_first_search;

/// A* shortest paths from a root, guided by a heuristic.
///
/// The frontier is keyed by `combine(distance, heuristic(vertex))`. The
/// heuristic is trusted: with an admissible one the distance to the goal is
/// optimal; with an inconsistent one finished vertices are reopened when a
/// shorter path to them turns up. When a goal is set the search stops as
/// soon as the goal is finished.
pub struct AStar<'g, G: GraphBase, W, H, R = ShortestDistanceRelaxer> {
    graph: &'g G,
    weights: W,
    heuristic: H,
    relaxer: R,
    root: Option<G::Vertex>,
    goal: Option<G::Vertex>,
    observers: Observers<dyn ShortestPathObserver<G::Vertex, G::Edge> + 'g>,
    lifecycle: AlgorithmLifecycle,
    frontier: PriorityFrontier,
    colors: Vec<Color>,
    paths: ShortestPaths<G::Vertex, G::Edge>,
}

impl<'g, G, W, H> AStar<'g, G, W, H>
where
    G: VertexListGraph,
    W: Fn(&G::Edge) -> f64,
    H: Fn(&G::Vertex) -> f64,
{
    /// Creates a search with edge weights and a vertex heuristic.
    pub fn new(graph: &'g G, weights: W, heuristic: H) -> Self {
        Self {
            graph,
            weights,
            heuristic,
            relaxer: ShortestDistanceRelaxer,
            root: None,
            goal: None,
            observers: Observers::new(),
            lifecycle: AlgorithmLifecycle::new("AStar"),
            frontier: PriorityFrontier::new(),
            colors: Vec::new(),
            paths: ShortestPaths::default(),
        }
    }
}

impl<'g, G, W, H, R> AStar<'g, G, W, H, R>
where
    G: VertexListGraph,
    W: Fn(&G::Edge) -> f64,
    H: Fn(&G::Vertex) -> f64,
    R: DistanceRelaxer,
{
    /// Sets the source vertex. Required.
    #[must_use]
    pub fn with_root(mut self, root: G::Vertex) -> Self {
        self.root = Some(root);
        self
    }

    /// Sets the goal vertex; the search stops once it is finished.
    #[must_use]
    pub fn with_goal(mut self, goal: G::Vertex) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Uses `token` for cancellation instead of a private one.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.lifecycle = AlgorithmLifecycle::with_cancellation("AStar", token);
        self
    }

    /// Replaces the distance relaxer.
    #[must_use]
    pub fn with_relaxer<R2: DistanceRelaxer>(self, relaxer: R2) -> AStar<'g, G, W, H, R2> {
        AStar {
            graph: self.graph,
            weights: self.weights,
            heuristic: self.heuristic,
            relaxer,
            root: self.root,
            goal: self.goal,
            observers: self.observers,
            lifecycle: self.lifecycle,
            frontier: self.frontier,
            colors: self.colors,
            paths: self.paths,
        }
    }

    /// Attaches an observer; it receives events from every later `compute`.
    pub fn attach<O>(&mut self, observer: O) -> ObserverId
    where
        O: ShortestPathObserver<G::Vertex, G::Edge> + 'g,
    {
        self.observers.attach(Box::new(observer))
    }

    /// Detaches an observer.
    pub fn detach(
        &mut self,
        id: ObserverId,
    ) -> Option<Box<dyn ShortestPathObserver<G::Vertex, G::Edge> + 'g>> {
        self.observers.detach(id)
    }

    /// Results of the last computation.
    pub fn paths(&self) -> &ShortestPaths<G::Vertex, G::Edge> {
        &self.paths
    }

    /// Distance of `vertex`, or `None` if it was not reached.
    pub fn distance(&self, vertex: &G::Vertex) -> Option<f64> {
        self.paths.distance(vertex)
    }

    /// Edges from the root to `vertex`.
    pub fn path_to(&self, vertex: &G::Vertex) -> Option<Vec<G::Edge>> {
        self.paths.path_to(vertex)
    }

    /// Edges from the root to the goal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingGoal`] if no goal was set.
    pub fn goal_path(&self) -> Result<Option<Vec<G::Edge>>> {
        let goal = self.goal.as_ref().ok_or(Error::MissingGoal)?;
        Ok(self.paths.path_to(goal))
    }

    fn search(&mut self, cancel: &CancellationToken) -> Result<()> {
        let index = VertexIndex::from_graph(self.graph);
        let root = index.require(self.root.as_ref().ok_or(Error::MissingRoot)?)?;
        let goal = self.goal.as_ref().map(|g| index.require(g)).transpose()?;
        self.paths.reset(index, self.relaxer.initial_distance());

        let mut driver = RelaxingDriver {
            index: &self.paths.index,
            weights: &self.weights,
            relaxer: &self.relaxer,
            heuristic: Some(&self.heuristic),
            goal,
            distances: &mut self.paths.distances,
            predecessors: &mut self.paths.predecessors,
            observers: &mut self.observers,
            done: false,
        };
        breadth_first_search(
            self.graph,
            &self.paths.index,
            &mut self.colors,
            &mut self.frontier,
            Some(root),
            &mut driver,
            cancel,
        )
    }
}

impl<G, W, H, R> Algorithm for AStar<'_, G, W, H, R>
where
    G: VertexListGraph,
    W: Fn(&G::Edge) -> f64,
    H: Fn(&G::Vertex) -> f64,
    R: DistanceRelaxer,
{
    fn compute(&mut self) -> Result<()> {
        let cancel = self.lifecycle.begin()?;
        let outcome = self.search(&cancel);
        self.lifecycle.end();
        outcome
    }

    fn lifecycle(&self) -> &AlgorithmLifecycle {
        &self.lifecycle
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use graphwalk_core::{AdjacencyGraph, SEdge, TaggedEdge};

    use super::*;

    type Pos = (i32, i32);

    fn grid(size: i32) -> AdjacencyGraph<Pos, SEdge<Pos>> {
        let mut edges = Vec::new();
        for x in 0..size {
            for y in 0..size {
                if x + 1 < size {
                    edges.push(SEdge::new((x, y), (x + 1, y)));
                }
                if y + 1 < size {
                    edges.push(SEdge::new((x, y), (x, y + 1)));
                }
            }
        }
        AdjacencyGraph::from_edges(false, edges)
    }

    fn manhattan(goal: Pos) -> impl Fn(&Pos) -> f64 {
        move |&(x, y): &Pos| f64::from((goal.0 - x).abs() + (goal.1 - y).abs())
    }

    #[test]
    fn test_grid_goal_distance() {
        let g = grid(5);
        let mut astar = AStar::new(&g, |_: &SEdge<Pos>| 1.0, manhattan((4, 4)))
            .with_root((0, 0))
            .with_goal((4, 4));
        astar.compute().unwrap();

        assert_eq!(astar.distance(&(4, 4)), Some(8.0));
        assert_eq!(astar.goal_path().unwrap().map(|p| p.len()), Some(8));
    }

    #[test]
    fn test_goal_stops_early() {
        let g = grid(6);
        let examined = Rc::new(Cell::new(0));

        struct Count(Rc<Cell<usize>>);
        impl ShortestPathObserver<Pos, SEdge<Pos>> for Count {
            fn examine_vertex(&mut self, _: &Pos) -> Result<()> {
                self.0.set(self.0.get() + 1);
                Ok(())
            }
        }

        let mut astar = AStar::new(&g, |_: &SEdge<Pos>| 1.0, manhattan((0, 2)))
            .with_root((0, 0))
            .with_goal((0, 2));
        astar.attach(Count(Rc::clone(&examined)));
        astar.compute().unwrap();

        assert_eq!(astar.distance(&(0, 2)), Some(2.0));
        assert!(examined.get() < 36);
    }

    #[test]
    fn test_zero_heuristic_matches_dijkstra() {
        let g = AdjacencyGraph::from_edges(
            true,
            [
                TaggedEdge::new('a', 'b', 4),
                TaggedEdge::new('a', 'c', 1),
                TaggedEdge::new('c', 'b', 2),
                TaggedEdge::new('b', 'd', 1),
            ],
        );
        let weight = |e: &TaggedEdge<char, u32>| f64::from(*e.tag());
        let mut astar = AStar::new(&g, weight, |_: &char| 0.0).with_root('a');
        astar.compute().unwrap();
        assert_eq!(astar.distance(&'d'), Some(4.0));
    }

    #[test]
    fn test_inconsistent_heuristic_reopens() {
        let g = AdjacencyGraph::from_edges(
            true,
            [
                TaggedEdge::new('s', 'a', 1),
                TaggedEdge::new('s', 'b', 4),
                TaggedEdge::new('a', 'b', 1),
                TaggedEdge::new('b', 'g', 1),
            ],
        );
        let weight = |e: &TaggedEdge<char, u32>| f64::from(*e.tag());
        let heuristic = |v: &char| if *v == 'a' { 10.0 } else { 0.0 };
        let mut astar = AStar::new(&g, weight, heuristic).with_root('s');
        astar.compute().unwrap();

        assert_eq!(astar.distance(&'b'), Some(2.0));
        assert_eq!(astar.distance(&'g'), Some(3.0));
    }

    #[test]
    fn test_missing_root_and_goal() {
        let g = grid(2);
        let mut astar = AStar::new(&g, |_: &SEdge<Pos>| 1.0, |_: &Pos| 0.0);
        assert_eq!(astar.compute(), Err(Error::MissingRoot));
        assert_eq!(astar.goal_path(), Err(Error::MissingGoal));
    }
}
