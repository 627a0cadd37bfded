//! Report rendering for finished pipeline runs.
//!
//! The [`Reporter`] is a pure output side effect: it gets the final state and
//! returns nothing the pipeline depends on. Write failures are logged, never
//! propagated.

use std::io::Write;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use intelscout_shared::{PipelineState, Snippet};
use serde::Serialize;
use tracing::warn;

/// Width of the closing rule under the report.
const RULE_WIDTH: usize = 60;

/// Label column width for the summary rows.
const LABEL_WIDTH: usize = 12;

/// Renders a finished run for a human or a machine.
pub trait Reporter: Send + Sync {
    fn render(&self, state: &PipelineState);
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Prints the text report to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn render(&self, state: &PipelineState) {
        let text = render_text(state, Local::now().naive_local());
        write_stdout(&text);
    }
}

/// Build the human-readable report for `state` scanned at `scanned_at`.
pub fn render_text(state: &PipelineState, scanned_at: NaiveDateTime) -> String {
    let subject = state.subject().as_str();
    let mut out = String::new();

    out.push_str(&format!(
        "COMPETITIVE INTELLIGENCE REPORT - {}\n",
        subject.to_uppercase()
    ));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    let rows = [
        ("Target", subject.to_string()),
        ("Scan Time", scanned_at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ("Jobs Found", state.jobs().len().to_string()),
        ("News Found", state.news().len().to_string()),
    ];
    for (label, value) in rows {
        out.push_str(&format!("{label:<LABEL_WIDTH$} {value}\n"));
    }

    push_section(&mut out, "HIRING ACTIVITY:", "No job data available", state.jobs());
    push_section(&mut out, "RECENT NEWS:", "No news data available", state.news());

    out.push_str("\nKEY INSIGHTS:\n");
    out.push_str(state.insight());
    out.push('\n');

    out.push('\n');
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out
}

fn push_section(out: &mut String, heading: &str, empty: &str, snippets: &[Snippet]) {
    out.push('\n');
    if snippets.is_empty() {
        out.push_str(empty);
        out.push('\n');
        return;
    }
    out.push_str(heading);
    out.push('\n');
    for snippet in snippets {
        out.push_str(&format!("• {}\n", snippet.text()));
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Prints the report as pretty JSON to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn render(&self, state: &PipelineState) {
        match render_json(state, Utc::now()) {
            Ok(json) => write_stdout(&format!("{json}\n")),
            Err(e) => warn!(error = %e, "failed to serialize report"),
        }
    }
}

/// Serialized report: the state's fields plus the scan timestamp.
#[derive(Serialize)]
struct ReportDocument<'a> {
    scanned_at: DateTime<Utc>,
    #[serde(flatten)]
    state: &'a PipelineState,
}

/// Build the JSON report for `state` scanned at `scanned_at`.
pub fn render_json(state: &PipelineState, scanned_at: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ReportDocument { scanned_at, state })
}

fn write_stdout(text: &str) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
        warn!(error = %e, "failed to write report");
    }
}
