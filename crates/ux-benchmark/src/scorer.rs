//! Heuristic UX scoring of a fetched page.
//!
//! Every factor is a fixed formula over palette cohesion, a few structural
//! checks on the markup, and the page load time. The pipeline is strictly
//! sequential: page, then stylesheets, then scoring.

use crate::colors::{cohesion_from_colors, count_colors};
use crate::config::AnalyzerConfig;
use crate::fetch::{Fetcher, PageFetch};
use crate::types::{BenchResult, Diagnostics, ScoreSet, SiteAnalysis, MAX_SCORE, MIN_SCORE};
use scraper::{Html, Selector};
use std::time::Duration;

/// Pages loading faster than this get the top speed score.
const FAST_LOAD: Duration = Duration::from_secs(1);

/// Structural signals read from the page markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageSignals {
    /// A `<nav>` element exists.
    pub has_nav: bool,
    /// A `<link rel="icon">` element exists.
    pub has_favicon: bool,
    /// Some element carries an `aria-label` attribute.
    pub has_aria_label: bool,
}

impl PageSignals {
    /// Parse markup leniently and read the structural signals.
    ///
    /// Malformed markup never fails; it just yields fewer signals.
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        Self {
            has_nav: matches_any(&document, "nav"),
            has_favicon: matches_any(&document, r#"link[rel~="icon"]"#),
            has_aria_label: matches_any(&document, "[aria-label]"),
        }
    }
}

fn matches_any(document: &Html, selector: &str) -> bool {
    match Selector::parse(selector) {
        Ok(sel) => document.select(&sel).next().is_some(),
        Err(_) => false,
    }
}

/// Signals read from the concatenated stylesheet text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSignals {
    pub color_count: usize,
    pub cohesion: u8,
    /// `:hover` appears anywhere in the text.
    pub has_hover: bool,
}

impl StyleSignals {
    pub fn from_css(css_text: &str) -> Self {
        let color_count = count_colors(css_text);
        Self {
            color_count,
            cohesion: cohesion_from_colors(color_count),
            has_hover: css_text.contains(":hover"),
        }
    }
}

/// Round half away from zero and saturate to [1, 10].
pub fn clamp_score(x: f64) -> u8 {
    x.round().clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Derive the seven factor scores.
pub fn compute_scores(page: &PageSignals, style: &StyleSignals, elapsed: Duration) -> ScoreSet {
    let cohesion = f64::from(style.cohesion);
    let speed = if elapsed < FAST_LOAD { 10.0 } else { 7.0 };

    ScoreSet::new([
        clamp_score((cohesion + 8.0) / 2.0),
        clamp_score(5.0 + flag(page.has_nav)),
        clamp_score((cohesion + flag(page.has_favicon) + 6.0) / 2.0),
        clamp_score(5.0 + flag(style.has_hover)),
        clamp_score(6.0 + flag(page.has_aria_label)),
        clamp_score(speed),
        clamp_score((cohesion + 8.0) / 2.0),
    ])
}

/// Build the display-only diagnostics bundle.
pub fn diagnostics(page: &PageFetch, style: &StyleSignals) -> Diagnostics {
    Diagnostics {
        final_url: page.final_url.clone(),
        http_status: page.status,
        load_time_secs: round_to(page.elapsed_secs(), 3),
        html_size_kb: round_to(page.size as f64 / 1024.0, 1),
        css_colors_found: style.color_count,
        palette_cohesion: style.cohesion,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Runs the fetch → analyze → score pipeline for one URL at a time.
pub struct Analyzer {
    fetcher: Fetcher,
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create an analyzer with its own fetcher and memo cache.
    pub fn new(config: AnalyzerConfig) -> BenchResult<Self> {
        let fetcher = Fetcher::new(&config.user_agent, config.stylesheet_byte_cap)?;
        Ok(Self { fetcher, config })
    }

    /// Analyze one URL.
    ///
    /// Only the page fetch can fail; stylesheet problems just leave less CSS
    /// to score. The error's message is suitable for display as-is.
    pub async fn analyze(&self, url: &str) -> BenchResult<SiteAnalysis> {
        let page = match self.fetcher.fetch_page(url, self.config.page_timeout).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("analysis of {url} failed: {e}");
                return Err(e);
            }
        };

        let signals = PageSignals::from_html(&page.html);
        let css_text = self
            .fetcher
            .fetch_stylesheets(
                &page.html,
                &page.final_url,
                self.config.stylesheet_limit,
                self.config.stylesheet_timeout,
            )
            .await;
        let style = StyleSignals::from_css(&css_text);

        let scores = compute_scores(&signals, &style, page.elapsed);
        let diagnostics = diagnostics(&page, &style);

        tracing::info!(
            "analyzed {}: {} colors, cohesion {}, {:.3}s",
            diagnostics.final_url,
            diagnostics.css_colors_found,
            diagnostics.palette_cohesion,
            diagnostics.load_time_secs
        );

        Ok(SiteAnalysis {
            scores,
            diagnostics,
        })
    }

    /// The fetcher backing this analyzer.
    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }
}
