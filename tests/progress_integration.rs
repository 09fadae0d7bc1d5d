//! Progress tracking integration tests.
//!
//! Covers the unlock rules and file-backed persistence.

use std::collections::BTreeSet;

use tempfile::TempDir;
use trailmap::extract::{extract_phases, RawInput};
use trailmap::progress::{
    flatten, is_unlocked, load_completed, progress_key, toggle, FileStore, MemoryStore,
    ProgressStore, ProgressTracker, DEFAULT_NAMESPACE,
};

fn set(items: &[usize]) -> BTreeSet<usize> {
    items.iter().copied().collect()
}

// ============================================================================
// Unlock Rules
// ============================================================================

#[test]
fn test_unlock_invariant() {
    let states = [set(&[]), set(&[0]), set(&[0, 1, 2]), set(&[3, 7])];
    for state in &states {
        assert!(is_unlocked(state, 0));
        for i in 1..10 {
            assert_eq!(is_unlocked(state, i), state.contains(&(i - 1)), "index {i} in {state:?}");
        }
    }
}

#[test]
fn test_toggle_off_keeps_later_steps() {
    let mut state = set(&[0, 1, 2]);
    toggle(&mut state, 1, false);
    assert_eq!(state, set(&[0, 2]));
}

#[test]
fn test_cannot_skip_ahead() {
    let mut tracker = ProgressTracker::load(MemoryStore::new(), DEFAULT_NAMESPACE, "Go");
    assert!(!tracker.toggle(1));
    assert!(tracker.toggle(0));
    assert!(!tracker.toggle(2));
    assert!(tracker.toggle(1));
    assert!(tracker.toggle(2));
    assert_eq!(tracker.state().completed, set(&[0, 1, 2]));
}

#[test]
fn test_cascade_option() {
    let mut tracker =
        ProgressTracker::load(MemoryStore::new(), DEFAULT_NAMESPACE, "Go").with_cascade(true);
    for i in 0..4 {
        tracker.toggle(i);
    }
    tracker.toggle(1);
    assert_eq!(tracker.state().completed, set(&[0]));
    assert_eq!(tracker.next_step(4), Some(1));
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_progress_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("progress.json");

    let steps = flatten(&extract_phases(&RawInput::Empty, "Go"));
    let total = steps.len();

    {
        let mut tracker = ProgressTracker::load(FileStore::open(&path), DEFAULT_NAMESPACE, "Go");
        tracker.toggle(0);
        tracker.toggle(1);
        assert_eq!(tracker.percent(total), ((2.0 / total as f64) * 100.0).round() as u32);
    }

    let tracker = ProgressTracker::load(FileStore::open(&path), DEFAULT_NAMESPACE, "Go");
    assert_eq!(tracker.state().completed, set(&[0, 1]));

    let content = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["completedSteps_Go"], "[0,1]");
}

#[test]
fn test_skills_are_isolated() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("progress.json");

    let mut go = ProgressTracker::load(FileStore::open(&path), DEFAULT_NAMESPACE, "Go");
    go.toggle(0);

    let rust = ProgressTracker::load(FileStore::open(&path), DEFAULT_NAMESPACE, "Rust");
    assert!(rust.state().completed.is_empty());
}

#[test]
fn test_reset_removes_persisted_entry() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("progress.json");

    let mut tracker = ProgressTracker::load(FileStore::open(&path), DEFAULT_NAMESPACE, "Go");
    tracker.toggle(0);
    tracker.reset();

    let store = FileStore::open(&path);
    assert!(store.get(&progress_key(DEFAULT_NAMESPACE, "Go")).unwrap().is_none());
}

#[test]
fn test_corrupt_store_file_is_empty_progress() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("progress.json");
    std::fs::write(&path, "{{{ definitely not json").unwrap();

    let mut tracker = ProgressTracker::load(FileStore::open(&path), DEFAULT_NAMESPACE, "Go");
    assert!(tracker.state().completed.is_empty());

    // The next write replaces the corrupt file.
    assert!(tracker.toggle(0));
    let reopened = FileStore::open(&path);
    assert_eq!(load_completed(&reopened, "completedSteps_Go"), vec![0]);
}

#[test]
fn test_malformed_entry_is_empty_progress() {
    let mut store = MemoryStore::new();
    store.set("completedSteps_Go", "[\"zero\"]").unwrap();
    assert!(load_completed(&store, "completedSteps_Go").is_empty());
}
