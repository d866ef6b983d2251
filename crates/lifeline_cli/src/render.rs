//! Report rendering for the `check` command.

use lifeline_core::DocumentReport;
use serde_json::json;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Human-readable summary: one header line per file, one line per issue.
pub fn render_text(path: &Path, report: &DocumentReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} records, {} conforming, {} non-conforming",
        path.display(),
        report.records.len(),
        report.conforming_count(),
        report.non_conforming_count()
    );

    for record in report.records.iter().filter(|r| !r.is_conforming()) {
        let label = match &record.id {
            // Ids and issue text echo input; escape them to keep one line per issue.
            Some(id) => format!("[{}] id={id:?}", record.index),
            None => format!("[{}]", record.index),
        };
        for issue in &record.issues {
            let _ = writeln!(out, "  {label}: {}", issue.to_string().escape_debug());
        }
    }
    out
}

/// Machine-readable output covering every checked file.
pub fn render_json(reports: &[(PathBuf, DocumentReport)]) -> serde_json::Result<String> {
    let files = reports
        .iter()
        .map(|(path, report)| -> serde_json::Result<serde_json::Value> {
            let records = serde_json::to_value(&report.records)?;
            Ok(json!({
                "file": path.display().to_string(),
                "conforming": report.is_conforming(),
                "records": records,
            }))
        })
        .collect::<serde_json::Result<Vec<_>>>()?;

    serde_json::to_string_pretty(&json!({ "files": files }))
}
