//! Reference products and ranked benchmark tables.

use crate::types::{ScoreSet, UxFactor};
use serde::{Deserialize, Serialize};

/// A fixed comparison product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRow {
    pub label: &'static str,
    /// Scores in [`UxFactor::ALL`] order.
    pub scores: [u8; 7],
}

/// The compiled-in reference products.
pub static REFERENCE_BENCHMARKS: [ReferenceRow; 5] = [
    ReferenceRow {
        label: "Apple iOS",
        scores: [9, 9, 9, 8, 8, 9, 9],
    },
    ReferenceRow {
        label: "Airbnb",
        scores: [9, 9, 8, 8, 9, 9, 8],
    },
    ReferenceRow {
        label: "Notion",
        scores: [8, 8, 9, 8, 8, 8, 9],
    },
    ReferenceRow {
        label: "Tesla UI",
        scores: [8, 9, 9, 9, 7, 9, 9],
    },
    ReferenceRow {
        label: "Figma",
        scores: [8, 9, 8, 9, 8, 10, 8],
    },
];

/// One ranked row of a benchmark table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    /// Scores in [`UxFactor::ALL`] order; `None` when the factor was missing.
    pub scores: [Option<u8>; 7],
    /// Sum of present scores; a missing factor contributes 0.
    pub total: u32,
    /// 1-based rank by descending total. Ties share the lowest rank number.
    pub rank: usize,
    /// Whether this row is the analyzed site rather than a reference.
    pub is_target: bool,
}

impl TableRow {
    fn new(label: String, scores: [Option<u8>; 7], is_target: bool) -> Self {
        let total = scores.iter().flatten().map(|&s| u32::from(s)).sum();
        Self {
            label,
            scores,
            total,
            rank: 0,
            is_target,
        }
    }

    /// Score for a factor, if present.
    pub fn score(&self, factor: UxFactor) -> Option<u8> {
        self.scores[factor.index()]
    }
}

/// Rows sorted by descending total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkTable {
    pub rows: Vec<TableRow>,
}

impl BenchmarkTable {
    /// Maximum possible total.
    pub const MAX_TOTAL: u32 = 70;

    /// The analyzed site's row, if any.
    pub fn target(&self) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.is_target)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn reference_rows() -> Vec<TableRow> {
    REFERENCE_BENCHMARKS
        .iter()
        .map(|r| TableRow::new(r.label.to_string(), r.scores.map(Some), false))
        .collect()
}

/// Merge a target site with the reference products and rank them.
///
/// Sorting is stable, so tied rows keep reference order with the target last.
pub fn build_table(label: &str, scores: &ScoreSet) -> BenchmarkTable {
    let mut rows = reference_rows();
    rows.push(TableRow::new(
        label.to_string(),
        UxFactor::ALL.map(|f| scores.get(f)),
        true,
    ));
    rank_rows(rows)
}

/// Rank the reference products alone.
pub fn reference_table() -> BenchmarkTable {
    rank_rows(reference_rows())
}

fn rank_rows(mut rows: Vec<TableRow>) -> BenchmarkTable {
    rows.sort_by(|a, b| b.total.cmp(&a.total));

    // Competition ranking: 1, 2, 2, 2, 5, ...
    let mut rank = 0;
    let mut prev_total = None;
    for (i, row) in rows.iter_mut().enumerate() {
        if prev_total != Some(row.total) {
            rank = i + 1;
            prev_total = Some(row.total);
        }
        row.rank = rank;
    }

    BenchmarkTable { rows }
}
