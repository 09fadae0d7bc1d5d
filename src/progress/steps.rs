//! Step flattening.
//!
//! Expands phases into a single ordered walkthrough. Each phase contributes one
//! phase step, up to two topic steps and at most one project step, in that order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::extract::{LearningItem, Phase};

const DEFAULT_PHASE_DURATION: &str = "4-6 weeks";
const TOPIC_DURATION: &str = "1-2 weeks";
const PROJECT_DURATION: &str = "2-3 weeks";

/// Topics considered for topic steps.
const TOPIC_STEPS_PER_PHASE: usize = 2;

/// Topics shorter than this are not worth a step of their own.
const MIN_TOPIC_STEP_CHARS: usize = 3;

/// Where a step came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Phase,
    Topic,
    Project,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Phase => "phase",
            Self::Topic => "topic",
            Self::Project => "project",
        };
        f.write_str(label)
    }
}

/// One unit of the linear walkthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Position in the flattened sequence
    pub index: usize,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub resources: Vec<String>,
    /// Index of the phase that produced this step
    pub source_phase_index: usize,
    pub kind: StepKind,
}

/// Flatten phases into steps with sequential indices.
pub fn flatten(phases: &[Phase]) -> Vec<Step> {
    let mut steps = Vec::new();

    for (phase_index, phase) in phases.iter().enumerate() {
        let mut push = |kind, title, description, duration: &str, resources| {
            let index = steps.len();
            steps.push(Step {
                index,
                title,
                description,
                duration: duration.to_string(),
                resources,
                source_phase_index: phase_index,
                kind,
            });
        };

        push(
            StepKind::Phase,
            phase.title.clone(),
            phase_description(phase),
            if phase.duration.trim().is_empty() { DEFAULT_PHASE_DURATION } else { phase.duration.as_str() },
            phase.topics.iter().take(3).map(|t| t.name().to_string()).collect(),
        );

        for topic in phase
            .topics
            .iter()
            .take(TOPIC_STEPS_PER_PHASE)
            .filter(|t| t.name().chars().count() > MIN_TOPIC_STEP_CHARS)
        {
            let name = topic.name();
            push(
                StepKind::Topic,
                format!("Learn {name}"),
                own_description(topic).unwrap_or_else(|| format!("Master {name} fundamentals")),
                TOPIC_DURATION,
                vec![name.to_string()],
            );
        }

        if let Some(project) = phase.projects.first() {
            let name = project.name();
            push(
                StepKind::Project,
                format!("Build {name}"),
                own_description(project)
                    .unwrap_or_else(|| format!("Build {name} to demonstrate your skills")),
                PROJECT_DURATION,
                phase.tools.iter().take(3).cloned().collect(),
            );
        }
    }

    tracing::debug!(phases = phases.len(), steps = steps.len(), "Flattened phases");
    steps
}

fn phase_description(phase: &Phase) -> String {
    if !phase.goals.is_empty() {
        phase.goals.iter().take(3).map(String::as_str).collect::<Vec<_>>().join(", ")
    } else if !phase.summary.trim().is_empty() {
        phase.summary.clone()
    } else {
        "Complete this learning phase".to_string()
    }
}

fn own_description(item: &LearningItem) -> Option<String> {
    item.description().map(str::to_string)
}
