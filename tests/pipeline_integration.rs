//! Extraction and flattening integration tests.
//!
//! Exercises the public pipeline from raw text to steps.

use trailmap::extract::{
    extract_overview, extract_phases, extract_phases_with, synthetic_items, ExtractOptions,
    RawInput, Strategy, TopUp,
};
use trailmap::progress::{flatten, StepKind};
use trailmap::Difficulty;

const HEADER_ROADMAP: &str = "## Phase 1: Basics (4 weeks)\n- Learn syntax\n- Learn variables\n## Phase 2: Advanced (6 weeks)\n- Learn closures";

const FULL_ROADMAP: &str = r#"# Backend Engineering Roadmap

## Phase 1: Foundations (4-6 weeks)
- Understand HTTP request and response cycles
- Learn relational data modelling
- Build a small REST API for a todo list
- Set up Git and GitHub for version control

## Phase 2: Services (2 months)
### Goals
- Design service boundaries deliberately
### Resources
- The Twelve-Factor App

## Phase 3: Operations
Running production systems requires monitoring everything you deploy. Alerts should be actionable and rare.
"#;

// ============================================================================
// Completeness
// ============================================================================

#[test]
fn test_every_phase_has_goals_and_topics() {
    let inputs = [
        HEADER_ROADMAP,
        FULL_ROADMAP,
        "just one line of prose",
        "- a\n- b",
        "**Phase 1: Bold**\n\n**Phase 2: Also bold**",
        "Phase 1:\nPhase 2:\nPhase 3:",
    ];

    for input in inputs {
        for strategy in [Strategy::HeaderAnchored, Strategy::UniformBucket] {
            let options = ExtractOptions::default().with_strategy(strategy);
            let phases = extract_phases_with(&RawInput::text(input), "Backend", &options);
            assert!(!phases.is_empty(), "no phases for {input:?}");
            for phase in &phases {
                assert!(!phase.goals.is_empty(), "empty goals in {:?}", phase.title);
                assert!(!phase.topics.is_empty(), "empty topics in {:?}", phase.title);
            }
        }
    }
}

// ============================================================================
// Empty Input
// ============================================================================

#[test]
fn test_empty_input_yields_three_canned_phases() {
    for raw in [RawInput::text(""), RawInput::from(None), RawInput::parse("null")] {
        let phases = extract_phases(&raw, "Cloud");
        let titles: Vec<_> = phases.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Cloud Foundation", "Cloud Development", "Cloud Mastery"]);
        assert_eq!(phases[0].goals, synthetic_items("Cloud Foundation"));
    }
}

// ============================================================================
// Header-Anchored Strategy
// ============================================================================

#[test]
fn test_header_fidelity() {
    let phases = extract_phases(&RawInput::text(HEADER_ROADMAP), "Rust");

    assert_eq!(phases.len(), 2);
    assert_eq!(phases[0].duration, "4 weeks");
    assert_eq!(phases[0].topic_names(), vec!["Learn syntax", "Learn variables"]);
    assert_eq!(phases[1].topic_names(), vec!["Learn closures"]);
    assert_eq!(phases[1].duration, "6 weeks");
}

#[test]
fn test_full_roadmap_fields() {
    let phases = extract_phases(&RawInput::text(FULL_ROADMAP), "Backend");
    assert_eq!(phases.len(), 3);

    let first = &phases[0];
    assert_eq!(first.title, "Foundations");
    assert_eq!(first.duration, "4-6 weeks");
    assert_eq!(first.difficulty, Difficulty::Beginner);
    assert_eq!(first.project_names(), vec!["Build a small REST API for a todo list"]);
    assert!(first.tools.contains(&"Set up Git and GitHub for version control".to_string()));
    assert!(first.has_details);

    let second = &phases[1];
    assert_eq!(second.duration, "2 months");
    assert_eq!(second.goals[0], "Design service boundaries deliberately");
    assert_eq!(second.resources, vec!["The Twelve-Factor App"]);

    let third = &phases[2];
    assert_eq!(third.difficulty, Difficulty::Advanced);
    assert_eq!(third.duration, "8-10 weeks");
    // The first sentence shares a line with the phase header and is skipped.
    assert_eq!(third.goals, vec!["Alerts should be actionable and rare"]);
}

#[test]
fn test_many_topics_enable_details() {
    let text = "## Phase 1: Basics\n- Read chapters on ownership\n- Practise borrowing rules daily\n- Study pattern matching\n- Understand trait objects\n- Learn lifetimes thoroughly\n- Review error handling idioms";
    let phases = extract_phases(&RawInput::text(text), "Rust");

    let phase = &phases[0];
    assert_eq!(phase.topics.len(), 5);
    assert_eq!(phase.extra_topics.len(), 1);
    assert!(phase.projects.is_empty());
    assert!(phase.tools.is_empty());
    assert!(phase.has_details);
}

#[test]
fn test_summary_truncation() {
    let body = "x".repeat(400);
    let text = format!("## Phase 1: Long\n{body}");
    let phases = extract_phases(&RawInput::text(text), "Rust");
    assert!(phases[0].summary.ends_with("..."));
    assert_eq!(phases[0].summary.chars().count(), 303);
    assert!(phases[0].raw_content.len() > 400);
}

// ============================================================================
// Uniform-Bucket Strategy
// ============================================================================

#[test]
fn test_uniform_bucket_minimum() {
    let text = "Some intro text.\n- Learn the basic syntax\n- Write small programs daily";
    let phases = extract_overview(&RawInput::text(text), "Rust");

    assert_eq!(phases.len(), 6);
    assert_eq!(phases[0].topics.len(), 3);
    assert!(phases.iter().all(|p| p.topics.len() == 3));
    assert_eq!(phases[0].title, "Foundation Building");
    assert_eq!(phases[3].duration, "10-12 weeks");
}

#[test]
fn test_uniform_random_top_up_is_seeded() {
    let text = "- Learn the basic syntax\n- Write small programs daily\n- Read other people's code";
    let mut options = ExtractOptions::default().with_strategy(Strategy::UniformBucket);
    options.segment.top_up = TopUp::Random { seed: 11 };

    let first = extract_phases_with(&RawInput::text(text), "Rust", &options);
    let second = extract_phases_with(&RawInput::text(text), "Rust", &options);
    assert_eq!(first, second);
}

// ============================================================================
// Structured Input
// ============================================================================

#[test]
fn test_structured_input() {
    let json = r#"{"structured_plan": {"phases": [
        {"name": "Foundations", "duration": "3 weeks", "topics": ["Ownership", "Borrowing"],
         "projects": [{"name": "Todo CLI", "description": "A command line todo manager"}]},
        {"name": "Async", "overview": "Futures let you describe work that completes later."}
    ]}}"#;

    let phases = extract_phases(&RawInput::parse(json), "Rust");
    assert_eq!(phases.len(), 2);
    assert_eq!(phases[0].topic_names(), vec!["Ownership", "Borrowing"]);
    assert_eq!(phases[0].goals, vec!["Ownership", "Borrowing"]);
    assert_eq!(phases[1].goals, vec!["Futures let you describe work that completes later"]);

    let steps = flatten(&phases);
    let project = steps.iter().find(|s| s.kind == StepKind::Project).unwrap();
    assert_eq!(project.title, "Build Todo CLI");
    assert_eq!(project.description, "A command line todo manager");
}

// ============================================================================
// Flattening
// ============================================================================

#[test]
fn test_flattening_order() {
    let phases = extract_phases(&RawInput::text(FULL_ROADMAP), "Backend");
    let steps = flatten(&phases);

    assert!(steps.windows(2).all(|w| w[0].source_phase_index <= w[1].source_phase_index));
    assert!(steps.iter().enumerate().all(|(i, s)| s.index == i));

    for phase_index in 0..phases.len() {
        let first = steps.iter().find(|s| s.source_phase_index == phase_index).unwrap();
        assert_eq!(first.kind, StepKind::Phase);
    }
}

#[test]
fn test_header_roadmap_steps() {
    let steps = flatten(&extract_phases(&RawInput::text(HEADER_ROADMAP), "Rust"));
    let titles: Vec<_> = steps.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Basics", "Learn Learn syntax", "Learn Learn variables", "Advanced", "Learn Learn closures"]
    );
    assert_eq!(steps[0].description, "Learn syntax, Learn variables");
}
