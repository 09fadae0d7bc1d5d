//! Bullet extraction.
//!
//! Pulls candidate line-items out of a block of roadmap text.

use std::collections::HashSet;

use super::types::Bullet;

/// Words that mark a line as structural metadata rather than content.
pub const DEFAULT_NOISE: &[&str] = &["phase", "weeks"];

/// Items must be strictly longer than this many characters.
const MIN_BULLET_CHARS: usize = 10;

/// Items must be strictly shorter than this many characters.
const MAX_BULLET_CHARS: usize = 150;

/// Extract bullets using the default noise words.
pub fn extract_bullets(text: &str) -> Vec<Bullet> {
    let noise: Vec<String> = DEFAULT_NOISE.iter().map(|s| (*s).to_string()).collect();
    extract_bullets_with(text, &noise)
}

/// Extract bullets, dropping any item that contains one of `noise` (case-insensitive).
///
/// Lines whose first non-space character is `-` or `•` are list items. Items are
/// de-duplicated case-insensitively in first-seen order.
pub fn extract_bullets_with(text: &str, noise: &[String]) -> Vec<Bullet> {
    let mut seen = HashSet::new();
    let mut bullets = Vec::new();

    for line in text.lines() {
        let Some(item) = strip_marker(line) else {
            continue;
        };

        let len = item.chars().count();
        if len <= MIN_BULLET_CHARS || len >= MAX_BULLET_CHARS {
            continue;
        }

        let lower = item.to_lowercase();
        if noise.iter().any(|word| lower.contains(&word.to_lowercase())) {
            continue;
        }

        if seen.insert(lower) {
            bullets.push(item.to_string());
        }
    }

    bullets
}

/// Strip a leading `-` or `•` marker, returning the trimmed item.
fn strip_marker(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('•'))
        .map(str::trim)
}
