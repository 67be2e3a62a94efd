//! Core data types for UX factor scores and analysis results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lowest score any factor can take.
pub const MIN_SCORE: u8 = 1;

/// Highest score any factor can take.
pub const MAX_SCORE: u8 = 10;

/// One of the seven fixed UX dimensions, each scored on a 1–10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UxFactor {
    #[serde(rename = "Simplicity")]
    Simplicity,
    #[serde(rename = "Navigation Ease")]
    NavigationEase,
    #[serde(rename = "Personality")]
    Personality,
    #[serde(rename = "Delight/Micro-Interactions")]
    Delight,
    #[serde(rename = "Accessibility")]
    Accessibility,
    #[serde(rename = "Speed & Responsiveness")]
    Speed,
    #[serde(rename = "Emotional Resonance")]
    EmotionalResonance,
}

impl UxFactor {
    /// All factors in display (column) order.
    pub const ALL: [UxFactor; 7] = [
        UxFactor::Simplicity,
        UxFactor::NavigationEase,
        UxFactor::Personality,
        UxFactor::Delight,
        UxFactor::Accessibility,
        UxFactor::Speed,
        UxFactor::EmotionalResonance,
    ];

    /// Human-readable factor name, as used in tables and JSON keys.
    pub fn name(self) -> &'static str {
        match self {
            UxFactor::Simplicity => "Simplicity",
            UxFactor::NavigationEase => "Navigation Ease",
            UxFactor::Personality => "Personality",
            UxFactor::Delight => "Delight/Micro-Interactions",
            UxFactor::Accessibility => "Accessibility",
            UxFactor::Speed => "Speed & Responsiveness",
            UxFactor::EmotionalResonance => "Emotional Resonance",
        }
    }

    /// Look up a factor by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Column position of this factor.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for UxFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Factor scores for one site.
///
/// Sets produced by the scorer always carry all seven factors. Sets built
/// from user input through [`ScoreSet::from_partial`] may leave some out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreSet {
    scores: BTreeMap<UxFactor, u8>,
}

impl ScoreSet {
    /// Build a complete set from scores given in [`UxFactor::ALL`] order.
    pub fn new(scores: [u8; 7]) -> Self {
        Self {
            scores: UxFactor::ALL.into_iter().zip(scores).collect(),
        }
    }

    /// Build a possibly incomplete set, rejecting values outside 1–10.
    pub fn from_partial(scores: BTreeMap<UxFactor, u8>) -> BenchResult<Self> {
        if let Some((factor, value)) = scores
            .iter()
            .find(|(_, v)| !(MIN_SCORE..=MAX_SCORE).contains(*v))
        {
            return Err(BenchError::InvalidScore {
                factor: *factor,
                value: *value,
            });
        }
        Ok(Self { scores })
    }

    /// Score for a factor, if present.
    pub fn get(&self, factor: UxFactor) -> Option<u8> {
        self.scores.get(&factor).copied()
    }

    /// Whether all seven factors are present.
    pub fn is_complete(&self) -> bool {
        UxFactor::ALL.iter().all(|f| self.scores.contains_key(f))
    }

    /// Number of factors present.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no factor is present.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Iterate present factors in column order.
    pub fn iter(&self) -> impl Iterator<Item = (UxFactor, u8)> + '_ {
        self.scores.iter().map(|(f, v)| (*f, *v))
    }
}

/// Auxiliary metadata about an analysis, surfaced for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// URL after redirects.
    #[serde(rename = "Final URL")]
    pub final_url: String,
    /// HTTP status of the page response.
    #[serde(rename = "HTTP Status")]
    pub http_status: u16,
    /// Page load time in seconds, rounded to 3 decimals.
    #[serde(rename = "Load Time (s)")]
    pub load_time_secs: f64,
    /// Page size in KiB, rounded to 1 decimal.
    #[serde(rename = "HTML Size (KB)")]
    pub html_size_kb: f64,
    /// Distinct color tokens found in the stylesheet bundle.
    #[serde(rename = "CSS Colors Found")]
    pub css_colors_found: usize,
    /// Cohesion score derived from the color count.
    #[serde(rename = "Palette Cohesion Score")]
    pub palette_cohesion: u8,
}

/// Successful outcome of analyzing one site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteAnalysis {
    pub scores: ScoreSet,
    pub diagnostics: Diagnostics,
}

/// Errors that can occur while analyzing a site.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BenchError {
    #[error("{0}")]
    Network(String),

    #[error("{status} {}: {reason} for url: {url}", status_class(.status))]
    Http {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid score for {factor}: {value} (expected 1-10)")]
    InvalidScore { factor: UxFactor, value: u8 },
}

impl From<reqwest::Error> for BenchError {
    fn from(e: reqwest::Error) -> Self {
        use std::error::Error;

        // reqwest's top-level message hides the cause (DNS, refused, timeout).
        let mut message = e.to_string();
        let mut source = e.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        BenchError::Network(message)
    }
}

/// Error class of a failing status, as shown in HTTP error messages.
fn status_class(status: &u16) -> &'static str {
    match status {
        400..=499 => "Client Error",
        500..=599 => "Server Error",
        _ => "HTTP Error",
    }
}

/// Convenience result type.
pub type BenchResult<T> = Result<T, BenchError>;
