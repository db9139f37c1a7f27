//! Error types shared by every Graphwalk crate.
//!
//! Errors fall into three families:
//!
//! - **Precondition violations**: the caller asked for something the
//!   algorithm cannot start with (missing root, unknown vertex, wrong state).
//! - **Structural violations**: the graph does not have the shape the
//!   algorithm requires (a cycle in a DAG algorithm, a negative weight in
//!   Dijkstra, a negative cycle in all-pairs, a negative capacity in flow).
//! - **Unsupported operations**: the operation is never valid for the
//!   component, such as removing an element from a disjoint-set forest.
//!
//! Cooperative cancellation is not an error. A cancelled computation ends in
//! the `Aborted` state and returns `Ok`.

use thiserror::Error;

/// Result alias used throughout Graphwalk.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by graph algorithms and graph containers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The operation is not valid in the current state.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A vertex argument is not part of the graph.
    #[error("vertex not found: {0}")]
    VertexNotFound(String),

    /// The algorithm needs a root vertex and none was set.
    #[error("root vertex not set")]
    MissingRoot,

    /// The algorithm needs a goal vertex and none was set.
    #[error("goal vertex not set")]
    MissingGoal,

    /// A flow terminal (source or sink) was not set.
    #[error("{0} vertex not set")]
    MissingTerminal(&'static str),

    /// A back edge was found where the graph must be acyclic.
    #[error("graph is not acyclic")]
    NonAcyclicGraph,

    /// An edge weight is negative where only non-negative weights are allowed.
    #[error("negative weight {weight} on edge {edge}")]
    NegativeWeight {
        /// Debug rendering of the offending edge.
        edge: String,
        /// The weight returned for it.
        weight: f64,
    },

    /// A negative-weight cycle makes shortest distances undefined.
    #[error("graph contains a negative cycle")]
    NegativeCycle,

    /// An edge capacity is negative.
    #[error("negative capacity {capacity} on edge {edge}")]
    NegativeCapacity {
        /// Debug rendering of the offending edge.
        edge: String,
        /// The capacity returned for it.
        capacity: f64,
    },

    /// The operation is never supported by this component.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl Error {
    /// Builds an [`Error::InvalidOperation`] from any displayable message.
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Error::InvalidOperation(msg.into())
    }

    /// Builds an [`Error::VertexNotFound`] from the vertex's debug rendering.
    pub fn vertex_not_found(vertex: &impl std::fmt::Debug) -> Self {
        Error::VertexNotFound(format!("{vertex:?}"))
    }

    /// Returns true for structural violations (the graph has the wrong shape).
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::NonAcyclicGraph
                | Error::NegativeWeight { .. }
                | Error::NegativeCycle
                | Error::NegativeCapacity { .. }
        )
    }
}
