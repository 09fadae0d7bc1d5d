#![allow(clippy::needless_collect)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::unnecessary_lazy_evaluations)]
#![allow(clippy::should_implement_trait)]

//! # Trailmap
//!
//! Turn AI-generated learning roadmaps into structured phases and a gated,
//! step-by-step learning path.
//!
//! Roadmap generators emit loosely formatted markdown: `Phase N:` headers,
//! bullet lists, prose. Trailmap extracts an ordered list of phases from that
//! text where every phase carries goals, topics, projects and tools, then
//! flattens the phases into steps that unlock one after another.
//!
//! ## Features
//!
//! - **Tiered extraction**: keyword, section, sentence and synthetic fallbacks,
//!   so no phase is ever left empty
//! - **Two segmentation strategies**: follow the roadmap's own headers, or spread
//!   its bullets evenly over six phases
//! - **Sequential progress**: completion is persisted per skill
//!
//! ## Quick Start
//!
//! ```bash
//! # Show phases for a roadmap file
//! trailmap phases roadmap.md --skill Rust
//!
//! # Walk through the steps
//! trailmap progress toggle 0 --skill Rust roadmap.md
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::redundant_else)]
#![allow(clippy::if_not_else)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::derivable_impls)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::map_unwrap_or)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::use_self)]

pub mod core;
pub mod extract;
pub mod progress;

// Re-export commonly used types
pub use crate::core::Config;
pub use extract::{
    extract_overview, extract_phases, extract_phases_with, Difficulty, ExtractOptions,
    LearningItem, Phase, RawInput, Strategy,
};
pub use progress::{flatten, FileStore, MemoryStore, ProgressStore, ProgressTracker, Step, StepKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "trailmap";
