//! Raw roadmap input.
//!
//! Upstream output arrives either as free text or as already-parsed phase
//! records. Structured records are read field by field so a missing or
//! mistyped field degrades to an empty value instead of failing the whole input.

use serde_json::Value;

use super::types::{Difficulty, LearningItem};

/// Items at or below this length are dropped from structured input.
const MIN_STRUCTURED_ITEM_CHARS: usize = 3;

/// One invocation's worth of roadmap input.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// Missing or blank input
    Empty,
    /// Free text from the roadmap generator
    Text(String),
    /// Pre-parsed phase records
    Structured(Vec<StructuredPhase>),
}

impl RawInput {
    /// Build from text, treating blank text as empty.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(text)
        }
    }

    /// Decode raw content: JSON documents are interpreted, anything else is text.
    pub fn parse(content: &str) -> Self {
        let trimmed = content.trim();
        let looks_like_json =
            trimmed.starts_with('{') || trimmed.starts_with('[') || trimmed == "null";
        if looks_like_json {
            if let Ok(value) = serde_json::from_str::<Value>(content) {
                return Self::from_json(&value);
            }
        }
        Self::text(content)
    }

    /// Interpret a JSON value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::String(text) => Self::text(text.as_str()),
            Value::Array(items) => Self::structured(items),
            Value::Object(map) => {
                let phases = value
                    .pointer("/structured_plan/phases")
                    .or_else(|| map.get("phases"))
                    .and_then(Value::as_array);
                if let Some(phases) = phases {
                    return Self::structured(phases);
                }

                let text = ["final_roadmap", "content"]
                    .iter()
                    .find_map(|key| map.get(*key).and_then(Value::as_str));
                match text {
                    Some(text) => Self::text(text),
                    None => Self::text(value.to_string()),
                }
            }
            other => Self::text(other.to_string()),
        }
    }

    /// Whether the input carries no content.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Structured(phases) => phases.is_empty(),
        }
    }

    fn structured(items: &[Value]) -> Self {
        let phases: Vec<_> = items.iter().map(StructuredPhase::from_value).collect();
        if phases.is_empty() {
            Self::Empty
        } else {
            Self::Structured(phases)
        }
    }
}

impl From<&str> for RawInput {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<Option<&str>> for RawInput {
    fn from(text: Option<&str>) -> Self {
        text.map_or(Self::Empty, Self::text)
    }
}

/// A pre-parsed phase record with every field defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredPhase {
    pub title: Option<String>,
    pub duration: Option<String>,
    pub overview: String,
    pub goals: Vec<String>,
    pub topics: Vec<LearningItem>,
    pub projects: Vec<LearningItem>,
    pub tools: Vec<String>,
    pub resources: Vec<String>,
    pub difficulty: Option<Difficulty>,
}

impl StructuredPhase {
    /// Read a phase record out of an arbitrary JSON value.
    pub fn from_value(value: &Value) -> Self {
        let duration = string_field(value, &["duration"]).or_else(|| {
            value.get("duration_weeks").and_then(|weeks| match weeks {
                Value::Number(n) => Some(format!("{n} weeks")),
                Value::String(s) if !s.trim().is_empty() => Some(format!("{} weeks", s.trim())),
                _ => None,
            })
        });

        Self {
            title: string_field(value, &["name", "title", "phase"]),
            duration,
            overview: string_field(value, &["overview", "description", "summary", "content"])
                .unwrap_or_default(),
            goals: string_list(value, "goals"),
            topics: item_list(value, "topics"),
            projects: item_list(value, "projects"),
            tools: string_list(value, "tools"),
            resources: resource_list(value),
            difficulty: string_field(value, &["difficulty"]).and_then(|d| Difficulty::parse(&d)),
        }
    }
}

fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value.get(key).and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default()
}

fn keep(text: &str) -> bool {
    text.trim().chars().count() > MIN_STRUCTURED_ITEM_CHARS
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    array_field(value, key)
        .iter()
        .filter_map(Value::as_str)
        .filter(|s| keep(s))
        .map(|s| s.trim().to_string())
        .collect()
}

fn item_list(value: &Value, key: &str) -> Vec<LearningItem> {
    array_field(value, key)
        .iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(LearningItem::Text(text.trim().to_string())),
            Value::Object(_) => {
                let name = string_field(item, &["name", "title"])?;
                let description = string_field(item, &["description"]);
                Some(LearningItem::Detailed { name, description })
            }
            _ => None,
        })
        .filter(|item| keep(item.name()))
        .collect()
}

fn resource_list(value: &Value) -> Vec<String> {
    array_field(value, "resources")
        .iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text.trim().to_string()),
            Value::Object(_) => string_field(item, &["title", "url"]),
            _ => None,
        })
        .filter(|s| keep(s))
        .collect()
}
