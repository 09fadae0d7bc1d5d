//! Text segmentation.
//!
//! Splits raw roadmap text into per-phase chunks. Two strategies are available:
//!
//! - **Header-anchored** follows `Phase N:` markers and keeps each phase's own text.
//! - **Uniform-bucket** ignores headers and spreads every bullet of the text
//!   evenly over a fixed number of phases.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::bullets::extract_bullets_with;
use super::input::{RawInput, StructuredPhase};
use super::types::{Bullet, Difficulty};

static H2_PHASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)##\s*Phase\s*\d+:").expect("valid heading regex"));

static BOLD_PHASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\*\*Phase\s*\d+:.*?\*\*").expect("valid bold heading regex"));

static BARE_PHASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Phase\s*\d+:").expect("valid bare heading regex"));

static TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:##|\*\*)?\s*Phase\s*\d+:\s*(.*?)(?:\(|\*\*|\n|$)")
        .expect("valid title regex")
});

static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\(([^)]*(?:month|week|day)[^)]*)\)").expect("valid duration regex")
});

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph regex"));

/// Paragraphs must be strictly longer than this to stand in for a phase.
const MIN_PARAGRAPH_CHARS: usize = 50;

/// Paragraph fallback needs at least this many paragraphs.
const PARAGRAPH_PHASES: usize = 3;

/// Titles for uniform buckets, in order.
const PROGRESSION_TITLES: &[&str] = &[
    "Foundation Building",
    "Core Development",
    "Advanced Concepts",
    "System Design",
    "Professional Skills",
    "Specialization",
];

/// Skill name used when the caller supplies none.
const DEFAULT_SKILL: &str = "Your Career";

/// How raw text is split into phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "header")]
    HeaderAnchored,
    #[serde(rename = "uniform")]
    UniformBucket,
}

impl Default for Strategy {
    fn default() -> Self {
        Self::HeaderAnchored
    }
}

/// How short uniform buckets are padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopUp {
    /// Repeat pool items in order after the bucket's own items
    Cyclic,
    /// Sample pool items with repetition from a seeded generator
    Random { seed: u64 },
}

impl Default for TopUp {
    fn default() -> Self {
        Self::Cyclic
    }
}

/// Segmentation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentOptions {
    pub strategy: Strategy,
    pub bucket_count: usize,
    pub bucket_min: usize,
    pub top_up: TopUp,
    pub max_phases: Option<usize>,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::HeaderAnchored,
            bucket_count: 6,
            bucket_min: 3,
            top_up: TopUp::Cyclic,
            max_phases: None,
        }
    }
}

/// One phase-sized piece of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Source text of the phase
    pub chunk: String,
    /// Phase title
    pub title: String,
    /// Phase duration
    pub duration: String,
    /// Phase difficulty
    pub difficulty: Difficulty,
    /// Candidate items for classification
    pub pool: Vec<Bullet>,
}

/// Split input into segments.
///
/// `noise` lists the words that disqualify a bullet.
pub fn segment(
    raw: &RawInput,
    skill: &str,
    options: &SegmentOptions,
    noise: &[String],
) -> Vec<Segment> {
    match raw {
        RawInput::Empty => canned_segments(skill),
        RawInput::Text(text) if text.trim().is_empty() => canned_segments(skill),
        RawInput::Text(text) => match options.strategy {
            Strategy::HeaderAnchored => header_segments(text, options.max_phases, noise),
            Strategy::UniformBucket => uniform_segments(text, options, noise),
        },
        RawInput::Structured(phases) => phases
            .iter()
            .enumerate()
            .map(|(index, phase)| structured_segment(index, phase))
            .collect(),
    }
}

/// Header-anchored segmentation of non-empty text.
pub fn header_segments(text: &str, max_phases: Option<usize>, noise: &[String]) -> Vec<Segment> {
    let mut named: Vec<(String, String)> = match header_blocks(text) {
        Some(blocks) => blocks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| (extract_title(&chunk, index), chunk))
            .collect(),
        None => paragraph_blocks(text),
    };

    if let Some(max) = max_phases {
        named.truncate(max.max(1));
    }

    named
        .into_iter()
        .enumerate()
        .map(|(index, (title, chunk))| Segment {
            duration: extract_duration(&chunk, index),
            difficulty: Difficulty::for_phase_index(index),
            pool: extract_bullets_with(&chunk, noise),
            title,
            chunk,
        })
        .collect()
}

/// Chunks delimited by the first header pattern that matches.
///
/// Patterns are tried in order: `## Phase N:`, `**Phase N: ...**`, bare `Phase N:`.
pub fn header_blocks(text: &str) -> Option<Vec<String>> {
    [&*H2_PHASE, &*BOLD_PHASE, &*BARE_PHASE].into_iter().find_map(|pattern| {
        let starts: Vec<usize> = pattern.find_iter(text).map(|m| m.start()).collect();
        if starts.is_empty() {
            return None;
        }

        let blocks = starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(text.len());
                text[start..end].to_string()
            })
            .collect();
        Some(blocks)
    })
}

/// Headerless text: the first three long paragraphs, or the whole text as one phase.
fn paragraph_blocks(text: &str) -> Vec<(String, String)> {
    let paragraphs: Vec<&str> = PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| p.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect();

    if paragraphs.len() >= PARAGRAPH_PHASES {
        tracing::debug!(paragraphs = paragraphs.len(), "No phase headers, using paragraphs");
        paragraphs
            .into_iter()
            .take(PARAGRAPH_PHASES)
            .enumerate()
            .map(|(index, p)| (format!("Learning Stage {}", index + 1), p.to_string()))
            .collect()
    } else {
        tracing::debug!("No phase headers, wrapping text as a single phase");
        vec![("Complete Learning Program".to_string(), text.to_string())]
    }
}

/// Three placeholder phases for empty input.
pub fn canned_segments(skill: &str) -> Vec<Segment> {
    let skill = if skill.trim().is_empty() { DEFAULT_SKILL } else { skill.trim() };
    tracing::debug!(skill, "Empty roadmap input, using placeholder phases");

    ["Foundation", "Development", "Mastery"]
        .iter()
        .enumerate()
        .map(|(index, stage)| Segment {
            chunk: String::new(),
            title: format!("{skill} {stage}"),
            duration: default_duration(index),
            difficulty: Difficulty::for_phase_index(index),
            pool: Vec::new(),
        })
        .collect()
}

/// Title from a `Phase N: Title` header, or `Phase <n>`.
pub fn extract_title(chunk: &str, index: usize) -> String {
    TITLE
        .captures(chunk)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace('*', "").trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| format!("Phase {}", index + 1))
}

/// Duration from a parenthetical such as `(4-6 weeks)`, or a synthesized range.
pub fn extract_duration(chunk: &str, index: usize) -> String {
    DURATION
        .captures(chunk)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| default_duration(index))
}

/// Synthesized duration for the phase at `index`.
pub fn default_duration(index: usize) -> String {
    format!("{}-{} weeks", index * 2 + 4, index * 2 + 6)
}

/// Uniform-bucket segmentation of non-empty text.
pub fn uniform_segments(text: &str, options: &SegmentOptions, noise: &[String]) -> Vec<Segment> {
    let pool = extract_bullets_with(text, noise);
    let buckets = bucket_pool(&pool, options.bucket_count, options.bucket_min, options.top_up);

    buckets
        .into_iter()
        .enumerate()
        .map(|(index, items)| Segment {
            chunk: items.join("\n"),
            title: PROGRESSION_TITLES
                .get(index)
                .map_or_else(|| format!("Phase {}", index + 1), |t| (*t).to_string()),
            duration: default_duration(index),
            difficulty: Difficulty::for_bucket_index(index),
            pool: items,
        })
        .collect()
}

/// Partition `pool` into `count` buckets of `ceil(len / count)` items.
///
/// Buckets shorter than `min` are padded from the whole pool. An empty pool
/// yields empty buckets.
pub fn bucket_pool(pool: &[Bullet], count: usize, min: usize, top_up: TopUp) -> Vec<Vec<Bullet>> {
    let count = count.max(1);
    let total = pool.len();
    let size = total.div_ceil(count);

    let mut rng = match top_up {
        TopUp::Random { seed } => Some(StdRng::seed_from_u64(seed)),
        TopUp::Cyclic => None,
    };

    (0..count)
        .map(|index| {
            let start = (index * size).min(total);
            let end = ((index + 1) * size).min(total);
            let mut bucket = pool[start..end].to_vec();

            if total > 0 && bucket.len() < min {
                let own = bucket.len();
                let mut offset = index * size + own;
                while bucket.len() < min {
                    let pick = match rng.as_mut() {
                        Some(rng) => rng.gen_range(0..total),
                        None => offset % total,
                    };
                    bucket.push(pool[pick].clone());
                    offset += 1;
                }
                tracing::debug!(bucket = index, own, padded = bucket.len() - own, "Topped up bucket");
            }

            bucket
        })
        .collect()
}

fn structured_segment(index: usize, phase: &StructuredPhase) -> Segment {
    let mut pool: Vec<Bullet> = phase.goals.clone();
    for topic in &phase.topics {
        let name = topic.name();
        if !pool.iter().any(|existing| existing.eq_ignore_ascii_case(name)) {
            pool.push(name.to_string());
        }
    }

    Segment {
        chunk: phase.overview.clone(),
        title: phase.title.clone().unwrap_or_else(|| format!("Phase {}", index + 1)),
        duration: phase.duration.clone().unwrap_or_else(|| default_duration(index)),
        difficulty: phase.difficulty.unwrap_or_else(|| Difficulty::for_phase_index(index)),
        pool,
    }
}
