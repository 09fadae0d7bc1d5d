//! Field classification.
//!
//! Buckets candidate items into goals, topics, projects and tools through a
//! chain of tiers. Each tier runs only for fields the previous tiers left empty:
//!
//! 1. keyword tier over the bullet pool
//! 2. `### Goals` / `### Topics` / `### Tools` sub-sections of the chunk
//! 3. sentences of the chunk
//! 4. synthetic statements built from the phase title
//!
//! The synthetic tier always produces content, so goals and topics are never empty.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::bullets::DEFAULT_NOISE;
use super::types::Bullet;

/// Words that mark an item as a project.
pub const DEFAULT_PROJECT_KEYWORDS: &[&str] = &["project", "build", "develop", "create"];

/// Words that mark an item as a tool or technology.
pub const DEFAULT_TOOL_KEYWORDS: &[&str] = &[
    "tool",
    "software",
    "platform",
    "environment",
    "html",
    "css",
    "javascript",
    "python",
    "react",
    "node",
    "git",
    "api",
    "framework",
    "library",
    "figma",
    "sketch",
    "vs code",
    "vscode",
    "github",
    "npm",
    "webpack",
    "babel",
    "typescript",
    "angular",
    "vue",
    "docker",
    "aws",
    "azure",
    "firebase",
    "mongodb",
    "mysql",
    "postgresql",
];

/// Items taken from a `### Topics` section.
pub const SECTION_TOPICS_MAX: usize = 4;

static SECTION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)###\s*(goals?|topics?|tools?|resources?)").expect("valid section regex")
});

static NUMBERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("valid numbered item regex"));

/// Label assigned to a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Goal,
    Topic,
    Project,
    Tool,
    Noise,
}

/// Keyword vocabularies driving the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    /// Words that mark a project
    pub project: Vec<String>,

    /// Words that mark a tool or technology
    pub tool: Vec<String>,

    /// Words that mark structural noise
    pub noise: Vec<String>,
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            project: to_owned_list(DEFAULT_PROJECT_KEYWORDS),
            tool: to_owned_list(DEFAULT_TOOL_KEYWORDS),
            noise: to_owned_list(DEFAULT_NOISE),
        }
    }
}

impl KeywordTables {
    /// Whether the item names a project.
    pub fn is_project(&self, item: &str) -> bool {
        contains_any(item, &self.project)
    }

    /// Whether the item names a tool.
    pub fn is_tool(&self, item: &str) -> bool {
        contains_any(item, &self.tool)
    }

    /// Whether the item is structural noise.
    pub fn is_noise(&self, item: &str) -> bool {
        contains_any(item, &self.noise)
    }

    /// Primary label of a single line.
    ///
    /// Unclaimed lines are `Topic`; the pool classifier promotes the first few to `Goal`.
    pub fn classify_line(&self, line: &str) -> Classification {
        if self.is_noise(line) {
            Classification::Noise
        } else if self.is_project(line) {
            Classification::Project
        } else if self.is_tool(line) {
            Classification::Tool
        } else {
            Classification::Topic
        }
    }
}

/// Output caps applied by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyLimits {
    pub max_goals: usize,
    pub max_topics: usize,
    pub max_projects: usize,
    pub max_tools: usize,
    pub max_sentences: usize,
}

impl Default for ClassifyLimits {
    fn default() -> Self {
        Self { max_goals: 4, max_topics: 5, max_projects: 3, max_tools: 5, max_sentences: 4 }
    }
}

/// Markdown sub-sections the classifier can read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Goals,
    Topics,
    Tools,
    Resources,
}

impl Section {
    fn matches(self, header: &str) -> bool {
        let header = header.to_lowercase();
        let stem = match self {
            Self::Goals => "goal",
            Self::Topics => "topic",
            Self::Tools => "tool",
            Self::Resources => "resource",
        };
        header.trim_end_matches('s') == stem
    }

    /// Items must be strictly longer than this.
    pub fn min_chars(self) -> usize {
        match self {
            Self::Goals | Self::Topics => 10,
            Self::Tools | Self::Resources => 2,
        }
    }
}

/// Goals, topics, projects and tools for one phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedFields {
    pub goals: Vec<String>,
    pub topics: Vec<String>,
    pub extra_topics: Vec<String>,
    pub projects: Vec<String>,
    pub tools: Vec<String>,
}

/// Tiered classifier over a bullet pool.
#[derive(Debug, Clone, Default)]
pub struct FieldClassifier {
    tables: KeywordTables,
    limits: ClassifyLimits,
}

impl FieldClassifier {
    /// Create a classifier with the given vocabularies and caps.
    pub fn new(tables: KeywordTables, limits: ClassifyLimits) -> Self {
        Self { tables, limits }
    }

    /// The keyword tables in use.
    pub fn tables(&self) -> &KeywordTables {
        &self.tables
    }

    /// The caps in use.
    pub fn limits(&self) -> ClassifyLimits {
        self.limits
    }

    /// Label every item of the pool.
    ///
    /// Project and tool items keep their label; the first `max_goals` unclaimed
    /// items become goals and the rest stay topics.
    pub fn label_pool(&self, pool: &[Bullet]) -> Vec<(Bullet, Classification)> {
        let mut goals = 0;
        pool.iter()
            .map(|item| {
                let mut label = self.tables.classify_line(item);
                if label == Classification::Topic && goals < self.limits.max_goals {
                    goals += 1;
                    label = Classification::Goal;
                }
                (item.clone(), label)
            })
            .collect()
    }

    /// Keyword tier: fill fields straight from the pool.
    ///
    /// An item may land in both `projects` and `tools`; every item is a topic.
    pub fn keyword_tier(&self, pool: &[Bullet]) -> ClassifiedFields {
        let projects = pool
            .iter()
            .filter(|item| self.tables.is_project(item))
            .take(self.limits.max_projects)
            .cloned()
            .collect();

        let tools = pool
            .iter()
            .filter(|item| self.tables.is_tool(item))
            .take(self.limits.max_tools)
            .cloned()
            .collect();

        let goals = self
            .label_pool(pool)
            .into_iter()
            .filter(|(_, label)| *label == Classification::Goal)
            .map(|(item, _)| item)
            .collect();

        let split = pool.len().min(self.limits.max_topics);
        let topics = pool[..split].to_vec();
        let extra_topics = pool[split..].to_vec();

        ClassifiedFields { goals, topics, extra_topics, projects, tools }
    }

    /// Run every tier and return complete fields.
    pub fn classify(&self, pool: &[Bullet], chunk: &str, title: &str) -> ClassifiedFields {
        let mut fields = self.keyword_tier(pool);

        if fields.goals.is_empty() {
            fields.goals = section_items(chunk, Section::Goals, self.limits.max_goals);
        }
        if fields.topics.is_empty() {
            fields.topics = section_items(chunk, Section::Topics, SECTION_TOPICS_MAX);
        }
        if fields.tools.is_empty() {
            fields.tools = section_items(chunk, Section::Tools, self.limits.max_tools);
        }

        if fields.goals.is_empty() || fields.topics.is_empty() {
            let sentences = sentence_items(chunk, self.limits.max_sentences);
            if !sentences.is_empty() {
                tracing::debug!(title, count = sentences.len(), "Using sentence tier");
            }
            fill_if_empty(&mut fields.goals, &sentences);
            fill_if_empty(&mut fields.topics, &sentences);
        }

        if fields.goals.is_empty() || fields.topics.is_empty() {
            tracing::debug!(title, "Using synthetic tier");
            let synthetic = synthetic_items(title);
            fill_if_empty(&mut fields.goals, &synthetic);
            fill_if_empty(&mut fields.topics, &synthetic);
        }

        fields
    }
}

/// Section tier: list items under a `### <Section>` header.
///
/// Collection stops at the next `###` header or the first blank line.
pub fn section_items(chunk: &str, section: Section, max: usize) -> Vec<String> {
    let Some(header) = SECTION_HEADER.captures_iter(chunk).find(|caps| section.matches(&caps[1]))
    else {
        return Vec::new();
    };

    let Some(whole) = header.get(0) else {
        return Vec::new();
    };
    let after = &chunk[whole.end()..];

    // The remainder of the header line is not part of the list.
    let body = after.split_once('\n').map_or("", |(_, rest)| rest);

    let mut items = Vec::new();
    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("###") {
            break;
        }
        if let Some(item) = strip_list_marker(trimmed) {
            if item.chars().count() > section.min_chars() {
                items.push(item.to_string());
            }
        }
        if items.len() >= max {
            break;
        }
    }

    items
}

/// Sentence tier: mid-length sentences that are not headers or structural lines.
pub fn sentence_items(chunk: &str, max: usize) -> Vec<String> {
    chunk
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| {
            let len = sentence.chars().count();
            len > 20
                && len < 120
                && !sentence.contains("**")
                && !sentence.to_lowercase().contains("phase")
        })
        .take(max)
        .map(str::to_string)
        .collect()
}

/// Synthetic tier: four fixed statements built from the phase title.
pub fn synthetic_items(title: &str) -> Vec<String> {
    let subject = title.trim().to_lowercase();
    vec![
        format!("Master {subject} fundamentals"),
        format!("Build practical {subject} skills"),
        format!("Apply {subject} in real projects"),
        format!("Develop {subject} expertise"),
    ]
}

fn strip_list_marker(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('•')) {
        return Some(rest.trim());
    }
    NUMBERED_ITEM.find(line).map(|m| line[m.end()..].trim())
}

fn fill_if_empty(field: &mut Vec<String>, source: &[String]) {
    if field.is_empty() {
        field.extend_from_slice(source);
    }
}

fn contains_any(item: &str, words: &[String]) -> bool {
    let lower = item.to_lowercase();
    words.iter().any(|word| lower.contains(&word.to_lowercase()))
}

fn to_owned_list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}
