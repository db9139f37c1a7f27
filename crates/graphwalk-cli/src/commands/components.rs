//! Connected components command.

use anyhow::Result;
use graphwalk::{Algorithm, ComponentLabels, StrongComponents, WeakComponents};
use serde::Serialize;

use super::emit;
use crate::ComponentKind;
use crate::config::RunConfig;

/// One component with its members.
#[derive(Serialize)]
struct ComponentRow {
    component: usize,
    size: usize,
    members: Vec<String>,
}

fn rows(labels: &ComponentLabels<String>) -> Vec<ComponentRow> {
    labels
        .groups()
        .into_iter()
        .enumerate()
        .map(|(component, members)| ComponentRow {
            component,
            size: members.len(),
            members: members.into_iter().cloned().collect(),
        })
        .collect()
}

/// Run the components command.
pub fn run(config: &RunConfig, kind: ComponentKind) -> Result<()> {
    let (graph, _) = config.load()?.build()?;

    let rows = match kind {
        ComponentKind::Weak => {
            let mut components = WeakComponents::new(&graph);
            components.compute()?;
            rows(components.labels())
        }
        ComponentKind::Strong => {
            let mut components = StrongComponents::new(&graph);
            components.compute()?;
            rows(components.labels())
        }
    };
    tracing::info!(?kind, count = rows.len(), "components computed");

    emit(config, &rows, &["Component", "Size", "Members"], |row| {
        vec![
            row.component.to_string(),
            row.size.to_string(),
            row.members.join(", "),
        ]
    })
}
