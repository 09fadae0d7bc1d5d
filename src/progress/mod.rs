//! Linear progression over extracted phases.
//!
//! [`flatten`] turns phases into ordered steps and [`ProgressTracker`] records
//! which of them are completed.

mod steps;
mod store;
mod tracker;

pub use steps::{flatten, Step, StepKind};
pub use store::{
    progress_key, FileStore, MemoryStore, ProgressStore, StoreError, StoreResult,
    DEFAULT_NAMESPACE,
};
pub use tracker::{
    is_unlocked, load_completed, progress_message, progress_percent, reduce, toggle, Action,
    Effect, ProgressState, ProgressTracker,
};
