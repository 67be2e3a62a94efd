//! UX Benchmark CLI: analyze a site and rank it against reference products.

pub mod commands;
pub mod config;
pub mod output;
pub mod repl;

pub use config::{resolve_config, ConfigOverrides};
