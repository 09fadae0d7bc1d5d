//! Roadmap extraction pipeline.
//!
//! Turns roadmap generator output into an ordered list of [`Phase`] records:
//!
//! ```text
//! RawInput -> segment -> classify -> synthesize -> Vec<Phase>
//! ```
//!
//! Extraction never fails. Empty input yields placeholder phases and every
//! phase leaves with non-empty goals and topics.

mod bullets;
mod classify;
mod input;
mod segment;
mod synthesize;
mod types;

pub use bullets::{extract_bullets, extract_bullets_with, DEFAULT_NOISE};
pub use classify::{
    section_items, sentence_items, synthetic_items, Classification, ClassifiedFields,
    ClassifyLimits, FieldClassifier, KeywordTables, Section, DEFAULT_PROJECT_KEYWORDS,
    DEFAULT_TOOL_KEYWORDS,
};
pub use input::{RawInput, StructuredPhase};
pub use segment::{
    bucket_pool, canned_segments, default_duration, extract_duration, extract_title,
    header_blocks, header_segments, segment, uniform_segments, Segment, SegmentOptions, Strategy,
    TopUp,
};
pub use synthesize::{summarize, synthesize, synthesize_structured, DEFAULT_SUMMARY_CHARS};
pub use types::{item_names, Bullet, Difficulty, LearningItem, Phase};

/// Settings for a full extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Segmentation strategy and bucket settings
    pub segment: SegmentOptions,
    /// Classifier vocabularies
    pub tables: KeywordTables,
    /// Classifier caps
    pub limits: ClassifyLimits,
    /// Summary length in characters
    pub summary_chars: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            segment: SegmentOptions::default(),
            tables: KeywordTables::default(),
            limits: ClassifyLimits::default(),
            summary_chars: DEFAULT_SUMMARY_CHARS,
        }
    }
}

impl ExtractOptions {
    /// Same options with a different strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.segment.strategy = strategy;
        self
    }
}

/// Extract phases with the default header-anchored options.
pub fn extract_phases(raw: &RawInput, skill: &str) -> Vec<Phase> {
    extract_phases_with(raw, skill, &ExtractOptions::default())
}

/// Extract phases with the uniform-bucket strategy.
pub fn extract_overview(raw: &RawInput, skill: &str) -> Vec<Phase> {
    let options = ExtractOptions::default().with_strategy(Strategy::UniformBucket);
    extract_phases_with(raw, skill, &options)
}

/// Extract phases with explicit options.
///
/// Structured input bypasses segmentation regardless of strategy.
pub fn extract_phases_with(raw: &RawInput, skill: &str, options: &ExtractOptions) -> Vec<Phase> {
    let classifier = FieldClassifier::new(options.tables.clone(), options.limits);

    let phases: Vec<Phase> = match raw {
        RawInput::Structured(records) => records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                synthesize_structured(index, record, &classifier, options.summary_chars)
            })
            .collect(),
        _ => segment(raw, skill, &options.segment, &options.tables.noise)
            .into_iter()
            .map(|seg| {
                let fields = classifier.classify(&seg.pool, &seg.chunk, &seg.title);
                let resources =
                    section_items(&seg.chunk, Section::Resources, options.limits.max_tools);
                synthesize(&seg, fields, resources, options.summary_chars)
            })
            .collect(),
    };

    tracing::debug!(
        skill,
        strategy = ?options.segment.strategy,
        phases = phases.len(),
        "Extracted phases"
    );
    phases
}
