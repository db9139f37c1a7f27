//! Property tests over random graphs.

use graphwalk_algorithms::{
    Algorithm, BreadthFirstSearch, DepthFirstSearch, Dijkstra, EdmondsKarp, FloydWarshall,
    ReversedEdgeAugmentor, TimeStampRecorder, UnionFind, is_reachable,
};
use graphwalk_core::{AdjacencyGraph, Edge, MutableEdgeSet, MutableVertexSet, SEdge, TaggedEdge};
use proptest::prelude::*;

type Weighted = TaggedEdge<u32, u32>;

/// Random directed graph on `0..n`; each edge tag is unique so parallel
/// edges stay distinct.
fn weighted_graph(n: u32, edges: &[(u32, u32, u32)]) -> AdjacencyGraph<u32, Weighted> {
    let mut graph = AdjacencyGraph::directed();
    for v in 0..n {
        graph.add_vertex(v).unwrap();
    }
    for (i, &(s, t, w)) in (0u32..).zip(edges) {
        graph
            .add_vertices_and_edge(TaggedEdge::new(s % n, t % n, i * 100 + w % 100))
            .unwrap();
    }
    graph
}

fn weight(edge: &Weighted) -> f64 {
    f64::from(*edge.tag() % 100)
}

fn edge_list() -> impl Strategy<Value = Vec<(u32, u32, u32)>> {
    prop::collection::vec((0u32..12, 0u32..12, 0u32..100), 0..40)
}

proptest! {
    #[test]
    fn prop_traversals_cover_every_vertex(n in 1u32..12, edges in edge_list()) {
        let graph = weighted_graph(n, &edges);

        let bfs_times = TimeStampRecorder::new();
        let mut bfs = BreadthFirstSearch::new(&graph);
        bfs.attach(bfs_times.clone());
        bfs.compute().unwrap();

        let dfs_times = TimeStampRecorder::new();
        let mut dfs = DepthFirstSearch::new(&graph);
        dfs.attach(dfs_times.clone());
        dfs.compute().unwrap();

        for v in 0..n {
            prop_assert!(bfs_times.discover_time(&v).is_some());
            prop_assert!(bfs_times.finish_time(&v).is_some());
            prop_assert!(dfs_times.discover_time(&v).is_some());
            prop_assert!(dfs_times.finish_time(&v).is_some());
        }
    }

    #[test]
    fn prop_dfs_intervals_nest(n in 1u32..12, edges in edge_list()) {
        let graph = weighted_graph(n, &edges);
        let times = TimeStampRecorder::new();
        let mut dfs = DepthFirstSearch::new(&graph);
        dfs.attach(times.clone());
        dfs.compute().unwrap();

        let interval = |v: u32| (times.discover_time(&v).unwrap(), times.finish_time(&v).unwrap());
        for u in 0..n {
            let (du, fu) = interval(u);
            prop_assert!(du < fu);
            for v in 0..n {
                if u == v {
                    continue;
                }
                let (dv, fv) = interval(v);
                let disjoint = fu < dv || fv < du;
                let nested = (du < dv && fv < fu) || (dv < du && fu < fv);
                prop_assert!(disjoint || nested, "{u}:[{du},{fu}] {v}:[{dv},{fv}]");
            }
        }
    }

    #[test]
    fn prop_dijkstra_agrees_with_floyd_warshall(
        n in 1u32..10,
        edges in edge_list(),
        root in 0u32..10,
    ) {
        let graph = weighted_graph(n, &edges);
        let root = root % n;
        let mut dijkstra = Dijkstra::new(&graph, weight).with_root(root);
        dijkstra.compute().unwrap();
        let mut all_pairs = FloydWarshall::new(&graph, weight);
        all_pairs.compute().unwrap();

        for v in 0..n {
            prop_assert_eq!(dijkstra.distance(&v), all_pairs.distance(&root, &v));
        }
    }

    #[test]
    fn prop_max_flow_equals_min_cut(n in 2u32..10, edges in edge_list()) {
        let mut graph = weighted_graph(n, &edges);
        let (source, sink) = (0, n - 1);
        let mut reverser = ReversedEdgeAugmentor::new();
        reverser
            .augment(&mut graph, |e: &Weighted| {
                TaggedEdge::new(*e.target(), *e.source(), *e.tag() + 1_000_000)
            })
            .unwrap();

        let mut flow = EdmondsKarp::new(&graph, weight, &reverser)
            .with_source(source)
            .with_sink(sink);
        flow.compute().unwrap();

        let cut: f64 = flow.min_cut_edges().into_iter().map(weight).sum();
        prop_assert_eq!(flow.max_flow(), cut);

        let residuals = flow.residual_capacities();
        for (edge, residual) in &residuals {
            prop_assert!(*residual >= 0.0, "{edge:?} has residual {residual}");
        }
        for v in (0..n).filter(|&v| v != source && v != sink) {
            let mut net = 0.0;
            for edge in residuals.keys().filter(|e| !reverser.is_added(e)) {
                // Antiparallel partners carry opposite net flow; count one side.
                let carried = flow.flow(edge).unwrap().max(0.0);
                if *edge.source() == v {
                    net += carried;
                }
                if *edge.target() == v {
                    net -= carried;
                }
            }
            prop_assert_eq!(net, 0.0, "flow not conserved at {}", v);
        }
    }

    #[test]
    fn prop_union_find_matches_reachability(
        n in 1u32..12,
        pairs in prop::collection::vec((0u32..12, 0u32..12), 0..30),
    ) {
        let mut graph = AdjacencyGraph::undirected();
        let mut sets = UnionFind::new();
        for v in 0..n {
            graph.add_vertex(v).unwrap();
            sets.make_set(v);
        }
        for (a, b) in pairs.into_iter().map(|(a, b)| (a % n, b % n)) {
            graph.add_edge(SEdge::new(a, b)).unwrap();
            let before = sets.set_count();
            if sets.union(&a, &b).unwrap() {
                prop_assert_eq!(sets.set_count(), before - 1);
            } else {
                prop_assert_eq!(sets.set_count(), before);
            }
        }

        for u in 0..n {
            for v in 0..n {
                prop_assert_eq!(sets.are_in_same_set(&u, &v), is_reachable(&graph, &u, &v).unwrap());
            }
        }
    }
}
