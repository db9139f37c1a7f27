//! Maximum flow.
//!
//! The flow engine works in three reversible steps:
//!
//! 1. [`GraphAugmentor`] adds a super source and super sink when the
//!    problem has several terminals.
//! 2. [`ReversedEdgeAugmentor`] pairs every edge with a reverse edge so
//!    residual capacity has somewhere to go.
//! 3. [`EdmondsKarp`] pushes flow along shortest augmenting paths.
//!
//! [`maximum_flow`] and [`MaximumBipartiteMatching`] run the whole pipeline
//! and leave the graph as they found it.

mod augmentor;
mod edmonds_karp;
mod matching;
mod residual;
mod reversed;

pub use augmentor::{AugmentStrategy, GraphAugmentor};
pub use edmonds_karp::{EdmondsKarp, maximum_flow};
pub use matching::MaximumBipartiteMatching;
pub use reversed::ReversedEdgeAugmentor;
