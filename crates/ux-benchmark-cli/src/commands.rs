//! Subcommand implementations shared by the binary and the REPL.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use ux_benchmark::{build_table, reference_table, Analyzer, ScoreSet, UxFactor};

use crate::output::{self, AnalysisReport};

/// `ux-benchmark analyze <url>`: analyze a site and rank it.
pub async fn analyze(analyzer: &Analyzer, url: &str, narrate_delay: Duration) -> Result<()> {
    if !output::is_json() {
        eprintln!("Analyzing {url}...");
    }

    let analysis = analyzer
        .analyze(url)
        .await
        .map_err(|e| anyhow!("Could not analyze. Error: {e}"))?;

    let label = output::site_label(url);
    let table = build_table(&label, &analysis.scores);

    if output::is_json() {
        output::print_json(&AnalysisReport::new(&label, &analysis, &table));
        return Ok(());
    }

    println!();
    println!("UX Designer Agent - Thinking Process");
    println!();
    for step in output::thinking_steps(&analysis.diagnostics) {
        println!("  {step}");
        if !narrate_delay.is_zero() {
            tokio::time::sleep(narrate_delay).await;
        }
    }

    println!();
    println!("Benchmark Table");
    println!();
    print!("{}", output::render_table(&table));

    println!();
    println!("Target Site Scores ({label})");
    println!();
    print!("{}", output::render_scores(&analysis.scores));

    println!();
    println!("Diagnostics");
    println!();
    print!("{}", output::render_diagnostics(&analysis.diagnostics));

    Ok(())
}

/// `ux-benchmark references`: show the reference products alone.
pub fn references() -> Result<()> {
    let table = reference_table();
    if output::is_json() {
        output::print_json(&table);
    } else {
        print!("{}", output::render_table(&table));
    }
    Ok(())
}

/// `ux-benchmark table <label> --scores <json>`: rank user-supplied scores.
pub fn table(label: &str, scores_json: &str) -> Result<()> {
    let scores = parse_scores(scores_json)?;
    let table = build_table(label, &scores);
    if output::is_json() {
        output::print_json(&table);
    } else {
        print!("{}", output::render_table(&table));
    }
    Ok(())
}

/// Parse a JSON object mapping factor names to scores. Factors may be omitted.
pub fn parse_scores(scores_json: &str) -> Result<ScoreSet> {
    let raw: BTreeMap<String, u8> =
        serde_json::from_str(scores_json).context("scores must be a JSON object of 1-10 values")?;

    let mut scores = BTreeMap::new();
    for (name, value) in raw {
        let factor = UxFactor::from_name(&name).ok_or_else(|| {
            let known: Vec<&str> = UxFactor::ALL.iter().map(|f| f.name()).collect();
            anyhow!("unknown factor '{name}' (expected one of: {})", known.join(", "))
        })?;
        scores.insert(factor, value);
    }

    Ok(ScoreSet::from_partial(scores)?)
}
