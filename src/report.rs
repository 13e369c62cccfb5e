use std::path::Path;

use chrono::{DateTime, TimeZone};
use owo_colors::{OwoColorize, Stream, Style};

use crate::errors::BenchError;
use crate::types::{BenchmarkReport, Extreme};

fn style_label() -> Style {
    Style::new().cyan().bold()
}

fn run_label(index: usize) -> String {
    format!("Run {:03}", index)
}

fn extreme_line(label: &str, extreme: Extreme) -> String {
    format!(
        "{}: {:.6} ms -> Run({:03})",
        label, extreme.value, extreme.index
    )
}

/// Console output: per-run lines (when the report kept them) then the summary.
pub fn format_console(report: &BenchmarkReport) -> String {
    let mut out = String::new();

    let header = format!("Benchmark: {}", report.command);
    out.push_str(
        &header
            .if_supports_color(Stream::Stdout, |s| s.dimmed())
            .to_string(),
    );
    out.push('\n');

    if let Some(samples) = &report.samples {
        for (i, duration) in samples.iter().enumerate() {
            let label = run_label(i);
            out.push_str(&format!(
                "{}: {} ms\n",
                label.if_supports_color(Stream::Stdout, |s| s.style(style_label())),
                format!("{:.6}", duration).if_supports_color(Stream::Stdout, |s| s.yellow()),
            ));
        }
        out.push('\n');
    }

    let label = style_label();
    out.push_str(&format!(
        "{} {:.6} ms\n",
        "Average:".if_supports_color(Stream::Stdout, |s| s.style(label)),
        report.average()
    ));
    out.push_str(&format!(
        "{} {:.6} ms\n",
        "Median :".if_supports_color(Stream::Stdout, |s| s.style(label)),
        report.median()
    ));
    out.push_str(
        &extreme_line("Fastest", report.fastest())
            .if_supports_color(Stream::Stdout, |s| s.green())
            .to_string(),
    );
    out.push('\n');
    out.push_str(
        &extreme_line("Slowest", report.slowest())
            .if_supports_color(Stream::Stdout, |s| s.red())
            .to_string(),
    );
    out.push('\n');

    out
}

/// Plain-text result file. `target` names what was benchmarked, `now` stamps
/// the header.
pub fn format_text_file<Tz>(report: &BenchmarkReport, target: &str, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    out.push_str(&format!("Benchmark Test Results for {}\n", target));
    out.push_str(&format!("{}\n", now.format("%Y-%m-%d %H:%M:%S %A")));
    out.push_str(&format!("Command: {}\n", report.command));
    out.push_str(&format!("Total Runs: -> {}\n", report.sample_count()));
    out.push_str(&format!("Average: {:.6} ms\n", report.average()));
    out.push_str(&format!("Median : {:.6} ms\n", report.median()));
    out.push_str(&extreme_line("Fastest", report.fastest()));
    out.push('\n');
    out.push_str(&extreme_line("Slowest", report.slowest()));
    out.push('\n');

    if let Some(samples) = &report.samples {
        out.push_str("\n---Details for Each Run---\n");
        for (i, duration) in samples.iter().enumerate() {
            out.push_str(&format!("{}: {:.6} ms\n", run_label(i), duration));
        }
    }

    out
}

pub fn format_json(report: &BenchmarkReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

pub fn write_report(path: &Path, contents: &str) -> Result<(), BenchError> {
    std::fs::write(path, contents).map_err(|source| BenchError::ReportWrite {
        path: path.to_path_buf(),
        source,
    })
}
