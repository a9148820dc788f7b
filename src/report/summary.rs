//! Import summary report

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{ImportStats, SkippedEntry};

/// Summary of a completed import run
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub rows_read: usize,
    pub group_definitions: usize,
    pub groups_created: usize,
    pub entries_imported: usize,
    pub non_entry_rows: usize,
    pub defaulted_entries: usize,
    pub skipped: Vec<SkippedEntry>,
    pub load_time: Duration,
    pub import_time: Duration,
    pub save_time: Duration,
}

impl ImportSummary {
    pub fn new(rows_read: usize, group_definitions: usize) -> Self {
        Self {
            rows_read,
            group_definitions,
            ..Default::default()
        }
    }

    pub fn add_import_stats(&mut self, stats: ImportStats, groups_created: usize) {
        self.entries_imported = stats.imported;
        self.non_entry_rows = stats.non_entry_rows;
        self.defaulted_entries = stats.defaulted;
        self.skipped = stats.skipped;
        self.groups_created = groups_created;
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = elapsed;
    }

    pub fn set_import_time(&mut self, elapsed: Duration) {
        self.import_time = elapsed;
    }

    pub fn set_save_time(&mut self, elapsed: Duration) {
        self.save_time = elapsed;
    }

    pub fn total_time(&self) -> Duration {
        self.load_time + self.import_time + self.save_time
    }

    /// Build the summary table
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📄 Rows Read"), Cell::new(self.rows_read)]);
        table.add_row(vec![
            Cell::new("🗂️  Group Definitions"),
            Cell::new(self.group_definitions),
        ]);
        table.add_row(vec![
            Cell::new("📁 Groups Created"),
            Cell::new(self.groups_created),
        ]);
        table.add_row(vec![
            Cell::new("✅ Entries Imported"),
            Cell::new(self.entries_imported)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("⏭️  Duplicates Skipped"),
            Cell::new(self.skipped.len()).fg(if self.skipped.is_empty() {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("↪️  Default Group"),
            Cell::new(self.defaulted_entries),
        ]);
        table.add_row(vec![
            Cell::new("🚫 Non-entry Rows"),
            Cell::new(self.non_entry_rows),
        ]);
        table.add_row(vec![
            Cell::new("⏱️  Total Time"),
            Cell::new(format!("{:.2}s", self.total_time().as_secs_f64())),
        ]);

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("IMPORT SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_import_stats() {
        let mut summary = ImportSummary::new(10, 3);
        let stats = ImportStats {
            imported: 5,
            skipped: vec![SkippedEntry {
                title: "Gmail".to_string(),
                group_path: "Mail".to_string(),
            }],
            non_entry_rows: 4,
            defaulted: 1,
        };
        summary.add_import_stats(stats, 2);

        assert_eq!(summary.entries_imported, 5);
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.non_entry_rows, 4);
        assert_eq!(summary.groups_created, 2);
    }

    #[test]
    fn test_table_mentions_counts() {
        let mut summary = ImportSummary::new(7, 2);
        summary.entries_imported = 4;
        let rendered = summary.to_table().to_string();

        assert!(rendered.contains("Entries Imported"));
        assert!(rendered.contains('4'));
    }

    #[test]
    fn test_total_time() {
        let mut summary = ImportSummary::default();
        summary.set_load_time(Duration::from_millis(100));
        summary.set_import_time(Duration::from_millis(200));
        summary.set_save_time(Duration::from_millis(300));
        assert_eq!(summary.total_time(), Duration::from_millis(600));
    }
}
