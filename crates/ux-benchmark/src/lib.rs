//! UX Benchmark: heuristic UX scoring of a single web page, ranked against
//! fixed reference products.

pub mod benchmark;
pub mod colors;
pub mod config;
pub mod fetch;
pub mod scorer;
pub mod types;

pub use benchmark::{
    build_table, reference_table, BenchmarkTable, ReferenceRow, TableRow, REFERENCE_BENCHMARKS,
};
pub use colors::{cohesion_from_colors, count_colors};
pub use config::AnalyzerConfig;
pub use fetch::{has_scheme, Fetcher, PageFetch};
pub use scorer::{clamp_score, compute_scores, Analyzer, PageSignals, StyleSignals};
pub use types::*;
