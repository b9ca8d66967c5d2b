// fieldstrip/src/ui/summary.rs
//! Tables for removal summaries and rule listings.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use fieldstrip_core::{FieldRule, StripSummaryItem};
use std::io::{self, Write};

fn base_table(headers: &[&str], colored: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if !colored {
        table.force_no_tty();
    }
    table.set_header(
        headers
            .iter()
            .map(|h| {
                let cell = Cell::new(h);
                if colored { cell.add_attribute(Attribute::Bold) } else { cell }
            })
            .collect::<Vec<_>>(),
    );
    table
}

/// Renders the per-rule removal summary for one source.
pub fn render_summary(source: &str, summary: &[StripSummaryItem], colored: bool) -> String {
    if summary.is_empty() {
        return format!("No fields removed from {}.", source);
    }
    let mut table = base_table(&["Rule", "Field", "Removed"], colored);
    for item in summary {
        table.add_row(vec![
            Cell::new(&item.rule_name),
            Cell::new(&item.field),
            Cell::new(item.occurrences).set_alignment(CellAlignment::Right),
        ]);
    }
    let total: usize = summary.iter().map(|s| s.occurrences).sum();
    format!("Removal summary for {} ({} total):\n{}", source, total, table)
}

pub fn print_summary<W: Write>(
    source: &str,
    summary: &[StripSummaryItem],
    writer: &mut W,
    colored: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", render_summary(source, summary, colored))
}

/// Renders the active rule set.
pub fn render_rules(rules: &[FieldRule], colored: bool) -> String {
    if rules.is_empty() {
        return "No active field rules.".to_string();
    }
    let mut table = base_table(&["Rule", "Field", "Kind", "Description"], colored);
    for rule in rules {
        table.add_row(vec![
            Cell::new(&rule.name),
            Cell::new(rule.field_name()),
            Cell::new(rule.value_kind),
            Cell::new(rule.description.as_deref().unwrap_or("")),
        ]);
    }
    table.to_string()
}
