//! Output formatting for CLI commands.

use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde::Serialize;

/// Output format selection.
#[derive(Debug, Clone, Copy)]
pub enum Format {
    Table,
    Json,
}

impl From<crate::OutputFormat> for Format {
    fn from(f: crate::OutputFormat) -> Self {
        match f {
            crate::OutputFormat::Table => Format::Table,
            crate::OutputFormat::Json => Format::Json,
        }
    }
}

/// Prints `data` as pretty JSON unless quiet.
pub fn print_json<T: Serialize>(data: &T, quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        println!("{}", serde_json::to_string_pretty(data)?);
    }
    Ok(())
}

/// An empty table in the shared CLI style.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
    table
}

/// Sets cyan column headers.
pub fn add_header(table: &mut Table, headers: &[&str]) {
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
}

/// Prints rows under `headers` unless quiet.
pub fn print_rows(headers: &[&str], rows: impl IntoIterator<Item = Vec<String>>, quiet: bool) {
    if quiet {
        return;
    }
    let mut table = create_table();
    add_header(&mut table, headers);
    for row in rows {
        table.add_row(row);
    }
    println!("{table}");
}

/// Prints `items` as a two-column property table unless quiet.
pub fn print_key_value_table(items: &[(&str, String)], quiet: bool) {
    if quiet {
        return;
    }
    let mut table = create_table();
    add_header(&mut table, &["Property", "Value"]);
    for (key, value) in items {
        table.add_row(vec![Cell::new(key).fg(Color::Green), Cell::new(value)]);
    }
    println!("{table}");
}

/// Formats an optional distance; unreachable is shown as `-`.
pub fn distance(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |d| d.to_string())
}

/// Joins a vertex path with arrows.
pub fn path(vertices: &[String]) -> String {
    vertices.join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_helpers() {
        assert_eq!(distance(None), "-");
        assert_eq!(distance(Some(2.5)), "2.5");
        assert_eq!(path(&["a".to_string(), "b".to_string()]), "a -> b");
    }
}
