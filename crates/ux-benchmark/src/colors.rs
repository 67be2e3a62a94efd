//! Color token counting over stylesheet text.
//!
//! Tokens are deduplicated as literal strings: `#fff` and `#ffffff` count
//! as two colors, and so do `rgb(0,0,0)` and `rgb(0, 0, 0)`.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn hex_color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#[0-9a-fA-F]{3,8}").expect("hex color regex is valid"))
}

fn rgb_color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"rgb\(\s*\d+,\s*\d+,\s*\d+\s*\)").expect("rgb color regex is valid")
    })
}

/// Count distinct hex and `rgb(r,g,b)` color tokens in CSS text.
pub fn count_colors(css_text: &str) -> usize {
    let hex = hex_color_regex().find_iter(css_text);
    let rgb = rgb_color_regex().find_iter(css_text);

    hex.chain(rgb)
        .map(|m| m.as_str())
        .collect::<HashSet<&str>>()
        .len()
}

/// Map a color count to a palette cohesion score.
///
/// Fewer distinct colors reads as a tighter palette.
pub fn cohesion_from_colors(color_count: usize) -> u8 {
    match color_count {
        0..=6 => 10,
        7..=12 => 8,
        13..=24 => 6,
        25..=48 => 4,
        _ => 2,
    }
}
