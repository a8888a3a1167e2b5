//! Render a [`SyncReport`] for the terminal.
//!
//! The engine only classifies entries; this module turns the classification
//! into lines a person can read, naming files the way Xcode does.

use std::fmt::Write as _;

use console::Style;

use crate::output::{paint, OutputConfig};
use crate::project::ProjectDescriptor;
use crate::sync::{PhaseDiff, SyncReport};

/// How much of the report to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Detail {
    /// Every added, removed, and changed file.
    #[default]
    Full,
    /// Counts per phase kind only.
    Summary,
}

/// Render `report`. File names are looked up in `descriptor`.
pub fn render(
    report: &SyncReport,
    descriptor: &ProjectDescriptor,
    output: &OutputConfig,
    detail: Detail,
) -> String {
    let added = Style::new().green();
    let removed = Style::new().red();
    let changed = Style::new().yellow();
    let heading = Style::new().bold();

    let mut text = String::new();
    let _ = writeln!(
        text,
        "{} '{}' -> '{}'",
        paint(output, &heading, "Sync"),
        report.source,
        report.destination
    );

    for (kind, diff) in report.phases() {
        let _ = writeln!(text);
        match detail {
            Detail::Summary => {
                let _ = writeln!(text, "{}: {}", kind, counts(diff));
            }
            Detail::Full => {
                let _ = writeln!(text, "{}:", paint(output, &heading, kind.label()));
                if diff.is_empty() {
                    let _ = writeln!(text, "  (no changes)");
                    continue;
                }
                for entry in &diff.added {
                    let line = format!("+ {}", descriptor.display_name(&entry.file_ref));
                    let _ = writeln!(text, "  {}", paint(output, &added, line));
                }
                for entry in &diff.removed {
                    let line = format!("- {}", descriptor.display_name(&entry.file_ref));
                    let _ = writeln!(text, "  {}", paint(output, &removed, line));
                }
                for entry in &diff.changed {
                    let line = format!("~ {}", descriptor.display_name(&entry.file_ref));
                    let _ = writeln!(text, "  {}", paint(output, &changed, line));
                }
            }
        }
    }

    let (total_added, total_removed, total_changed) =
        report
            .phases()
            .fold((0, 0, 0), |(a, r, c), (_, diff)| {
                (
                    a + diff.added.len(),
                    r + diff.removed.len(),
                    c + diff.changed.len(),
                )
            });
    let _ = writeln!(text);
    let _ = writeln!(
        text,
        "Summary: {} added, {} removed, {} changed",
        total_added, total_removed, total_changed
    );
    text
}

fn counts(diff: &PhaseDiff) -> String {
    format!(
        "{} added, {} removed, {} changed",
        diff.added.len(),
        diff.removed.len(),
        diff.changed.len()
    )
}
