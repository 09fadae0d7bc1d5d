//! Curriculum data model.
//!
//! Defines the phase records produced by the extraction pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single extracted line-item candidate.
pub type Bullet = String;

/// Difficulty level of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Beginner
    }
}

impl Difficulty {
    /// Difficulty for the n-th header-anchored phase.
    pub fn for_phase_index(index: usize) -> Self {
        match index {
            0 => Self::Beginner,
            1 => Self::Intermediate,
            _ => Self::Advanced,
        }
    }

    /// Difficulty for the n-th uniform bucket.
    pub fn for_bucket_index(index: usize) -> Self {
        if index < 2 {
            Self::Beginner
        } else if index < 4 {
            Self::Intermediate
        } else {
            Self::Advanced
        }
    }

    /// Parse a difficulty label, ignoring case.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "beginner" | "basic" | "easy" => Some(Self::Beginner),
            "intermediate" | "medium" => Some(Self::Intermediate),
            "advanced" | "expert" | "hard" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A topic or project, either plain text or named with its own description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LearningItem {
    Text(String),
    Detailed {
        #[serde(alias = "title")]
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl LearningItem {
    /// The item's display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Detailed { name, .. } => name,
        }
    }

    /// The item's own description, if it carries one.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Detailed { description, .. } => {
                description.as_deref().filter(|d| !d.trim().is_empty())
            }
        }
    }
}

impl From<&str> for LearningItem {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for LearningItem {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Names of a list of learning items.
pub fn item_names(items: &[LearningItem]) -> Vec<&str> {
    items.iter().map(LearningItem::name).collect()
}

/// One curriculum stage.
///
/// `goals` and `topics` are never empty once a phase leaves the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    /// Phase title
    pub title: String,

    /// Human-readable duration such as "4-6 weeks"
    pub duration: String,

    /// Learning goals
    pub goals: Vec<String>,

    /// Primary topics
    pub topics: Vec<LearningItem>,

    /// Topics beyond the primary cap
    #[serde(default)]
    pub extra_topics: Vec<LearningItem>,

    /// Hands-on projects
    #[serde(default)]
    pub projects: Vec<LearningItem>,

    /// Tools and technologies
    #[serde(default)]
    pub tools: Vec<String>,

    /// Learning resources
    #[serde(default)]
    pub resources: Vec<String>,

    /// Difficulty level
    pub difficulty: Difficulty,

    /// Full source text of the phase
    pub raw_content: String,

    /// Truncated preview of the source text
    pub summary: String,

    /// Whether the phase has more than the collapsed view shows
    pub has_details: bool,
}

impl Phase {
    /// Recompute `has_details` from the current contents.
    pub fn refresh_details(&mut self) {
        self.has_details = self.topics.len() + self.extra_topics.len() > 5
            || !self.projects.is_empty()
            || !self.tools.is_empty();
    }

    /// Topic names in order.
    pub fn topic_names(&self) -> Vec<&str> {
        item_names(&self.topics)
    }

    /// Project names in order.
    pub fn project_names(&self) -> Vec<&str> {
        item_names(&self.projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_by_index() {
        assert_eq!(Difficulty::for_phase_index(0), Difficulty::Beginner);
        assert_eq!(Difficulty::for_phase_index(1), Difficulty::Intermediate);
        assert_eq!(Difficulty::for_phase_index(7), Difficulty::Advanced);

        assert_eq!(Difficulty::for_bucket_index(1), Difficulty::Beginner);
        assert_eq!(Difficulty::for_bucket_index(3), Difficulty::Intermediate);
        assert_eq!(Difficulty::for_bucket_index(4), Difficulty::Advanced);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse(" ADVANCED "), Some(Difficulty::Advanced));
        assert_eq!(Difficulty::parse("unknown"), None);
    }

    #[test]
    fn test_learning_item_untagged() {
        let items: Vec<LearningItem> = serde_json::from_str(
            r#"["Ownership", {"name": "Todo CLI", "description": "A small CLI"}, {"title": "Web server"}]"#,
        )
        .unwrap();

        assert_eq!(items[0], LearningItem::from("Ownership"));
        assert_eq!(items[1].name(), "Todo CLI");
        assert_eq!(items[1].description(), Some("A small CLI"));
        assert_eq!(items[2].name(), "Web server");
        assert_eq!(items[2].description(), None);

        let json = serde_json::to_string(&items[0]).unwrap();
        assert_eq!(json, r#""Ownership""#);
    }

    #[test]
    fn test_refresh_details() {
        let mut phase = Phase {
            title: "Basics".to_string(),
            duration: "4 weeks".to_string(),
            goals: vec!["Learn syntax".to_string()],
            topics: vec!["Learn syntax".into()],
            extra_topics: Vec::new(),
            projects: Vec::new(),
            tools: Vec::new(),
            resources: Vec::new(),
            difficulty: Difficulty::Beginner,
            raw_content: String::new(),
            summary: String::new(),
            has_details: true,
        };

        phase.refresh_details();
        assert!(!phase.has_details);

        phase.tools.push("Cargo".to_string());
        phase.refresh_details();
        assert!(phase.has_details);
    }

    #[test]
    fn test_refresh_details_counts_extra_topics() {
        let names = ["Syntax", "Types", "Modules", "Traits", "Generics"];
        let mut phase = Phase {
            title: "Basics".to_string(),
            duration: "4 weeks".to_string(),
            goals: Vec::new(),
            topics: names.iter().map(|n| LearningItem::from(*n)).collect(),
            extra_topics: Vec::new(),
            projects: Vec::new(),
            tools: Vec::new(),
            resources: Vec::new(),
            difficulty: Difficulty::Beginner,
            raw_content: String::new(),
            summary: String::new(),
            has_details: false,
        };

        phase.refresh_details();
        assert!(!phase.has_details);

        phase.extra_topics.push("Macros".into());
        phase.refresh_details();
        assert!(phase.has_details);
    }
}
