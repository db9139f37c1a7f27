//! Graphwalk CLI - run graph algorithms on JSON edge lists.
//!
//! Every command reads one graph file:
//!
//! ```json
//! {
//!   "directed": true,
//!   "vertices": ["isolated"],
//!   "edges": [{ "source": "a", "target": "b", "weight": 2.5 }]
//! }
//! ```
//!
//! `directed` defaults to true, `vertices` lists extra vertices without
//! edges, and `weight` defaults to 1.

mod commands;
mod config;
mod input;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::RunConfig;

/// Graph algorithm runner.
///
/// Loads a graph from a JSON edge list, runs one algorithm, and prints the
/// result as a table or JSON.
#[derive(Parser)]
#[command(name = "graphwalk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Suppress result output and info messages
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

/// Output format options.
#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Single-source shortest-path algorithms.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum PathAlgorithm {
    /// Dijkstra; weights must be non-negative
    #[default]
    Dijkstra,
    /// A* with a zero heuristic
    AstarZero,
    /// Relaxation in topological order; the graph must be acyclic
    Dag,
    /// Bellman-Ford; negative weights allowed, negative cycles reported
    BellmanFord,
}

/// Component kinds.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum ComponentKind {
    /// Connected components ignoring edge direction
    #[default]
    Weak,
    /// Strongly connected components of a directed graph
    Strong,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Breadth-first traversal
    Bfs {
        /// Path to the graph file
        input: PathBuf,

        /// Start vertex; the whole graph when omitted
        #[arg(long)]
        root: Option<String>,
    },

    /// Depth-first traversal with discover and finish times
    Dfs {
        /// Path to the graph file
        input: PathBuf,

        /// Start vertex; the whole graph when omitted
        #[arg(long)]
        root: Option<String>,
    },

    /// Single-source shortest paths
    ShortestPath {
        /// Path to the graph file
        input: PathBuf,

        /// Source vertex
        #[arg(long)]
        root: String,

        /// Only report the path to this vertex
        #[arg(long)]
        target: Option<String>,

        /// Algorithm to run
        #[arg(long, short, default_value = "dijkstra")]
        algorithm: PathAlgorithm,
    },

    /// Distances between every pair of vertices (Floyd-Warshall)
    AllPairs {
        /// Path to the graph file
        input: PathBuf,
    },

    /// Connected components
    Components {
        /// Path to the graph file
        input: PathBuf,

        /// Which components to compute
        #[arg(long, short, default_value = "weak")]
        kind: ComponentKind,
    },

    /// Topological order of an acyclic graph
    TopoSort {
        /// Path to the graph file
        input: PathBuf,

        /// Order by repeatedly removing vertices without in-edges
        #[arg(long)]
        source_first: bool,
    },

    /// Maximum flow; edge weights are capacities
    MaxFlow {
        /// Path to the graph file
        input: PathBuf,

        /// Flow source
        #[arg(long)]
        source: String,

        /// Flow sink
        #[arg(long)]
        sink: String,
    },

    /// Maximum bipartite matching; edges run from left to right
    Matching {
        /// Path to the graph file
        input: PathBuf,

        /// Left partition
        #[arg(long, value_delimiter = ',', required = true)]
        left: Vec<String>,

        /// Right partition
        #[arg(long, value_delimiter = ',', required = true)]
        right: Vec<String>,
    },
}

impl Commands {
    fn input(&self) -> &PathBuf {
        match self {
            Commands::Bfs { input, .. }
            | Commands::Dfs { input, .. }
            | Commands::ShortestPath { input, .. }
            | Commands::AllPairs { input }
            | Commands::Components { input, .. }
            | Commands::TopoSort { input, .. }
            | Commands::MaxFlow { input, .. }
            | Commands::Matching { input, .. } => input,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    } else if !cli.quiet {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = RunConfig::new(cli.command.input())
        .with_format(cli.format.into())
        .with_quiet(cli.quiet);

    let result = match cli.command {
        Commands::Bfs { root, .. } => commands::traverse::run_bfs(&config, root),
        Commands::Dfs { root, .. } => commands::traverse::run_dfs(&config, root),
        Commands::ShortestPath {
            root,
            target,
            algorithm,
            ..
        } => commands::shortest_path::run(&config, algorithm, root, target),
        Commands::AllPairs { .. } => commands::all_pairs::run(&config),
        Commands::Components { kind, .. } => commands::components::run(&config, kind),
        Commands::TopoSort { source_first, .. } => commands::topo_sort::run(&config, source_first),
        Commands::MaxFlow { source, sink, .. } => commands::max_flow::run(&config, source, sink),
        Commands::Matching { left, right, .. } => commands::matching::run(&config, left, right),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
