//! Configuration loading and resolution.
//!
//! Each setting resolves as: explicit flag > environment variable > default.

use std::str::FromStr;
use std::time::Duration;

use ux_benchmark::config::{
    DEFAULT_PAGE_TIMEOUT_MS, DEFAULT_STYLESHEET_LIMIT, DEFAULT_STYLESHEET_TIMEOUT_MS,
};
use ux_benchmark::AnalyzerConfig;

pub const ENV_PAGE_TIMEOUT_MS: &str = "UXBENCH_PAGE_TIMEOUT_MS";
pub const ENV_CSS_TIMEOUT_MS: &str = "UXBENCH_CSS_TIMEOUT_MS";
pub const ENV_CSS_LIMIT: &str = "UXBENCH_CSS_LIMIT";

/// Settings given explicitly on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigOverrides {
    pub page_timeout_ms: Option<u64>,
    pub css_timeout_ms: Option<u64>,
    pub css_limit: Option<usize>,
}

/// Resolve the analyzer configuration from flags and the environment.
pub fn resolve_config(overrides: &ConfigOverrides) -> AnalyzerConfig {
    let page_ms = resolve_value(
        overrides.page_timeout_ms,
        std::env::var(ENV_PAGE_TIMEOUT_MS).ok(),
        DEFAULT_PAGE_TIMEOUT_MS,
    );
    let css_ms = resolve_value(
        overrides.css_timeout_ms,
        std::env::var(ENV_CSS_TIMEOUT_MS).ok(),
        DEFAULT_STYLESHEET_TIMEOUT_MS,
    );
    let css_limit = resolve_value(
        overrides.css_limit,
        std::env::var(ENV_CSS_LIMIT).ok(),
        DEFAULT_STYLESHEET_LIMIT,
    );

    AnalyzerConfig {
        page_timeout: Duration::from_millis(page_ms),
        stylesheet_timeout: Duration::from_millis(css_ms),
        stylesheet_limit: css_limit,
        ..AnalyzerConfig::default()
    }
}

/// Pick the explicit value, else a parsable env value, else the default.
fn resolve_value<T: FromStr>(explicit: Option<T>, env_value: Option<String>, default: T) -> T {
    if let Some(value) = explicit {
        return value;
    }

    match env_value.map(|raw| raw.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            tracing::warn!("ignoring unparsable config value from environment");
            default
        }
        None => default,
    }
}
