//! Table formatting utilities for CLI output.

use comfy_table::{presets, CellAlignment, ContentArrangement, Table};

/// Coverage of one translation resource against the source.
pub struct ResourceCoverage {
    /// Translation label, taken from the file stem (e.g., "de", "fr").
    pub language: String,
    /// Number of source messages the translation defines.
    pub translated: usize,
    /// Source message ids the translation lacks, in source order.
    pub missing: Vec<String>,
    /// Message ids the translation defines that the source does not.
    pub extra: Vec<String>,
}

/// Format coverage data as a table.
pub fn format_coverage_table(source_count: usize, coverage: &[ResourceCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Language", "Coverage", "Percent", "Missing", "Extra"]);

    for resource in coverage {
        table.add_row(vec![
            resource.language.clone(),
            format!("{}/{}", resource.translated, source_count),
            percent(resource.translated, source_count),
            resource.missing.len().to_string(),
            resource.extra.len().to_string(),
        ]);
    }
    for index in 1..=4 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    table
}

fn percent(translated: usize, total: usize) -> String {
    if total == 0 {
        return "100%".to_string();
    }
    format!("{:.0}%", translated as f64 * 100.0 / total as f64)
}
