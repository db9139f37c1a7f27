//! Per-invocation settings shared by every command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::input::GraphFile;
use crate::output::Format;

/// Settings for one command run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Graph file to load.
    pub input: PathBuf,

    /// How results are printed.
    pub format: Format,

    /// Whether result output is suppressed.
    pub quiet: bool,
}

impl RunConfig {
    /// Creates a configuration reading `input`, printing tables.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            format: Format::Table,
            quiet: false,
        }
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Suppresses result output.
    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// The input path.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Reads and validates the graph file.
    pub fn load(&self) -> Result<GraphFile> {
        let path = self.input();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let file =
            GraphFile::parse(&text).with_context(|| format!("parsing {}", path.display()))?;
        tracing::info!(
            vertices = file.vertex_count(),
            edges = file.edges.len(),
            directed = file.directed,
            "graph loaded"
        );
        Ok(file)
    }
}
