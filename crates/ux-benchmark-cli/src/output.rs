//! Text and JSON rendering of analysis results.

use serde::Serialize;
use ux_benchmark::{has_scheme, BenchmarkTable, Diagnostics, ScoreSet, SiteAnalysis, UxFactor};

const ENV_JSON: &str = "UXBENCH_JSON";

/// Whether `--json` output was requested.
pub fn is_json() -> bool {
    std::env::var(ENV_JSON).is_ok()
}

/// Switch all commands to JSON output.
pub fn enable_json() {
    std::env::set_var(ENV_JSON, "1");
}

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("  Error: failed to encode JSON: {e}"),
    }
}

/// Label for the target row: the URL's authority as typed, else the raw
/// input. Userinfo and an explicit port, even a default one, are kept.
pub fn site_label(url: &str) -> String {
    let trimmed = url.trim();
    let authority = trimmed
        .split_once("://")
        .filter(|_| has_scheme(trimmed))
        .and_then(|(_, rest)| rest.split(&['/', '?', '#'][..]).next())
        .filter(|authority| !authority.is_empty());
    authority.map_or_else(|| url.to_string(), str::to_string)
}

/// Step-by-step narration shown while an analysis is presented.
pub fn thinking_steps(diag: &Diagnostics) -> Vec<String> {
    vec![
        format!(
            "Checking structure and colors: found {} colors, cohesion score {}.",
            diag.css_colors_found, diag.palette_cohesion
        ),
        format!(
            "Checking navigation: load time {}s, size {}KB.",
            diag.load_time_secs, diag.html_size_kb
        ),
        "Looking for personality: favicon, custom styles, unique colors.".to_string(),
        "Reviewing speed and responsiveness.".to_string(),
        "Scanning for accessibility signals.".to_string(),
        "Checking for micro-interactions.".to_string(),
        "Compiling final benchmark...".to_string(),
    ]
}

/// Render a benchmark table as aligned text columns.
pub fn render_table(table: &BenchmarkTable) -> String {
    let mut header: Vec<String> = vec!["Product / UX Factor".to_string()];
    header.extend(UxFactor::ALL.iter().map(|f| f.name().to_string()));
    header.push(format!("Total / {}", BenchmarkTable::MAX_TOTAL));
    header.push("Rank".to_string());

    let body: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.label.clone()];
            cells.extend(
                row.scores
                    .iter()
                    .map(|s| s.map_or_else(|| "-".to_string(), |v| v.to_string())),
            );
            cells.push(row.total.to_string());
            cells.push(row.rank.to_string());
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            body.iter()
                .map(|cells| cells[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                if col == 0 {
                    format!("{cell:<w$}", w = widths[col])
                } else {
                    format!("{cell:>w$}", w = widths[col])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_line(&header));
    out.push('\n');
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for cells in &body {
        out.push_str(&format_line(cells));
        out.push('\n');
    }
    out
}

/// Render factor scores one per line.
pub fn render_scores(scores: &ScoreSet) -> String {
    scores
        .iter()
        .map(|(factor, value)| format!("  {:<28} {value:>2}\n", factor.name()))
        .collect()
}

/// Render the diagnostics bundle one field per line.
pub fn render_diagnostics(diag: &Diagnostics) -> String {
    let fields = [
        ("Final URL", diag.final_url.clone()),
        ("HTTP Status", diag.http_status.to_string()),
        ("Load Time (s)", diag.load_time_secs.to_string()),
        ("HTML Size (KB)", diag.html_size_kb.to_string()),
        ("CSS Colors Found", diag.css_colors_found.to_string()),
        ("Palette Cohesion Score", diag.palette_cohesion.to_string()),
    ];
    fields
        .iter()
        .map(|(name, value)| format!("  {name:<24} {value}\n"))
        .collect()
}

/// JSON document for a completed analysis.
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub label: &'a str,
    pub scores: &'a ScoreSet,
    pub diagnostics: &'a Diagnostics,
    pub table: &'a BenchmarkTable,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(label: &'a str, analysis: &'a SiteAnalysis, table: &'a BenchmarkTable) -> Self {
        Self {
            label,
            scores: &analysis.scores,
            diagnostics: &analysis.diagnostics,
            table,
        }
    }
}
