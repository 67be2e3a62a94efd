//! Tunables for the fetch and scoring pipeline.

use std::time::Duration;

/// User agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; UXBenchmark/1.0)";

/// Default timeout for the main page fetch.
pub const DEFAULT_PAGE_TIMEOUT_MS: u64 = 6_000;

/// Default timeout for each stylesheet fetch.
pub const DEFAULT_STYLESHEET_TIMEOUT_MS: u64 = 4_000;

/// Default number of linked stylesheets to fetch.
pub const DEFAULT_STYLESHEET_LIMIT: usize = 3;

/// Maximum bytes kept from each stylesheet body.
pub const STYLESHEET_BYTE_CAP: usize = 50_000;

/// Settings for one [`Analyzer`](crate::Analyzer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    pub page_timeout: Duration,
    pub stylesheet_timeout: Duration,
    pub stylesheet_limit: usize,
    pub stylesheet_byte_cap: usize,
    pub user_agent: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            page_timeout: Duration::from_millis(DEFAULT_PAGE_TIMEOUT_MS),
            stylesheet_timeout: Duration::from_millis(DEFAULT_STYLESHEET_TIMEOUT_MS),
            stylesheet_limit: DEFAULT_STYLESHEET_LIMIT,
            stylesheet_byte_cap: STYLESHEET_BYTE_CAP,
            user_agent: USER_AGENT.to_string(),
        }
    }
}
