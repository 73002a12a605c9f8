//! Console and JSON rendering of a [`Report`].
//!
//! This is the collaborator side of the executor: the runner produces a
//! report, and these functions turn it into colored status lines with
//! expected/actual diffs for humans, or a JSON document for machines.

use std::io::Write;

use difference::{Changeset, Difference};
use serde_json::json;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::report::{Outcome, Report};

/// Output configuration for the console renderer.
pub struct PrintConfig {
    pub colors: ColorChoice,
}

impl Default for PrintConfig {
    fn default() -> Self {
        let colors = if atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self { colors }
    }
}

/// Prints one status line per record, failure detail with diffs, and a
/// summary line.
pub fn print_report(report: &Report, config: &PrintConfig) {
    let mut stdout = StandardStream::stdout(config.colors);

    for record in report.records() {
        match &record.outcome {
            Outcome::Passed => {
                print_status(&mut stdout, "PASS", Color::Green);
                let _ = writeln!(stdout, ": {}", record.id);
            }
            Outcome::Skipped { reason } => {
                print_status(&mut stdout, "SKIP", Color::Yellow);
                let _ = writeln!(stdout, ": {} ({})", record.id, reason);
            }
            Outcome::Failed(fault) => {
                print_status(&mut stdout, "FAIL", Color::Red);
                let _ = writeln!(stdout, ": {}", record.id);
                let _ = writeln!(stdout, "  {}", fault);
                if let Some((expected, actual)) = fault.mismatch() {
                    print_mismatch_diff(&mut stdout, expected, actual);
                }
            }
            Outcome::Errored(fault) => {
                print_status(&mut stdout, "ERROR", Color::Red);
                let _ = writeln!(stdout, ": {}", record.id);
                let _ = writeln!(stdout, "  {}", fault);
                let mut source = std::error::Error::source(fault);
                while let Some(cause) = source {
                    let _ = writeln!(stdout, "  caused by: {}", cause);
                    source = cause.source();
                }
            }
        }
        for suppressed in &record.suppressed {
            let _ = writeln!(stdout, "  suppressed: {}", suppressed);
        }
    }

    let summary = report.summary();
    let _ = writeln!(
        stdout,
        "\nRun summary: total {}, passed {}, failed {}, errored {}, skipped {}",
        summary.total, summary.passed, summary.failed, summary.errored, summary.skipped,
    );
}

fn print_status(stdout: &mut StandardStream, status: &str, color: Color) {
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stdout, "{}", status);
    let _ = stdout.reset();
}

fn print_mismatch_diff(stdout: &mut StandardStream, expected: &str, actual: &str) {
    let changeset = Changeset::new(expected, actual, "\n");
    for diff in &changeset.diffs {
        match diff {
            Difference::Same(x) => {
                let _ = stdout.reset();
                let _ = writeln!(stdout, "   {}", x);
            }
            Difference::Add(x) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                let _ = writeln!(stdout, "  +{}", x);
            }
            Difference::Rem(x) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                let _ = writeln!(stdout, "  -{}", x);
            }
        }
    }
    let _ = stdout.reset();
}

/// Renders the report as a JSON document: summary counts plus one entry per
/// record.
pub fn render_json(report: &Report) -> String {
    let records: Vec<serde_json::Value> = report
        .records()
        .iter()
        .map(|record| {
            json!({
                "id": record.id.to_string(),
                "path": record.id.suite_path(),
                "case": record.id.case_name(),
                "parameter": record.id.parameter(),
                "repetition": record.id.repetition(),
                "status": record.outcome.status(),
                "detail": record.outcome.fault().map(|f| f.to_string()),
                "suppressed": record
                    .suppressed
                    .iter()
                    .map(|f| f.to_string())
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    let document = json!({
        "summary": report.summary(),
        "records": records,
    });
    // json! never produces a map with non-string keys, so this cannot fail
    serde_json::to_string_pretty(&document).unwrap_or_default()
}
