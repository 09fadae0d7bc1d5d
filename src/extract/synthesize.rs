//! Phase assembly.

use super::classify::{section_items, synthetic_items, ClassifiedFields, FieldClassifier, Section};
use super::input::StructuredPhase;
use super::segment::{default_duration, Segment};
use super::types::{Difficulty, LearningItem, Phase};

/// Default summary length in characters.
pub const DEFAULT_SUMMARY_CHARS: usize = 300;

/// First `max_chars` characters of `chunk`, with `...` appended when truncated.
pub fn summarize(chunk: &str, max_chars: usize) -> String {
    match chunk.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &chunk[..cut]),
        None => chunk.to_string(),
    }
}

/// Build a phase from a segment and its classified fields.
pub fn synthesize(
    segment: &Segment,
    fields: ClassifiedFields,
    resources: Vec<String>,
    summary_chars: usize,
) -> Phase {
    let ClassifiedFields { mut goals, mut topics, extra_topics, projects, tools } = fields;

    if goals.is_empty() || topics.is_empty() {
        let synthetic = synthetic_items(&segment.title);
        if goals.is_empty() {
            goals.clone_from(&synthetic);
        }
        if topics.is_empty() {
            topics = synthetic;
        }
    }

    let mut phase = Phase {
        title: segment.title.clone(),
        duration: segment.duration.clone(),
        goals,
        topics: topics.into_iter().map(LearningItem::from).collect(),
        extra_topics: extra_topics.into_iter().map(LearningItem::from).collect(),
        projects: projects.into_iter().map(LearningItem::from).collect(),
        tools,
        resources,
        difficulty: segment.difficulty,
        raw_content: segment.chunk.clone(),
        summary: summarize(&segment.chunk, summary_chars),
        has_details: false,
    };
    phase.refresh_details();
    phase
}

/// Build a phase from a pre-parsed record, classifying only what it lacks.
pub fn synthesize_structured(
    index: usize,
    record: &StructuredPhase,
    classifier: &FieldClassifier,
    summary_chars: usize,
) -> Phase {
    let title = record.title.clone().unwrap_or_else(|| format!("Phase {}", index + 1));
    let mut goals = record.goals.clone();
    let mut topics = record.topics.clone();

    if goals.is_empty() || topics.is_empty() {
        let mut pool = record.goals.clone();
        pool.extend(record.topics.iter().map(|t| t.name().to_string()));
        let fields = classifier.classify(&pool, &record.overview, &title);
        if goals.is_empty() {
            goals = fields.goals;
        }
        if topics.is_empty() {
            topics = fields.topics.into_iter().map(LearningItem::from).collect();
        }
    }

    let resources = if record.resources.is_empty() {
        section_items(&record.overview, Section::Resources, classifier.limits().max_tools)
    } else {
        record.resources.clone()
    };

    let mut phase = Phase {
        duration: record.duration.clone().unwrap_or_else(|| default_duration(index)),
        difficulty: record.difficulty.unwrap_or_else(|| Difficulty::for_phase_index(index)),
        goals,
        topics,
        extra_topics: Vec::new(),
        projects: record.projects.clone(),
        tools: record.tools.clone(),
        resources,
        raw_content: record.overview.clone(),
        summary: summarize(&record.overview, summary_chars),
        has_details: false,
        title,
    };
    phase.refresh_details();
    phase
}
