//! Progress tracking.
//!
//! Completion state is a set of step indices under a sequential-unlock rule:
//! step `i` can be completed only once step `i - 1` is. State changes go through
//! [`reduce`], which reports the persistence effect for the caller to apply.
//! [`ProgressTracker`] applies those effects to a [`ProgressStore`] and treats
//! persistence failures as non-fatal.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::store::{progress_key, ProgressStore};

/// Completed step indices for one persistence key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub key: String,
    pub completed: BTreeSet<usize>,
}

impl ProgressState {
    /// Empty state for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), completed: BTreeSet::new() }
    }

    /// Number of completed steps.
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Whether step `index` is completed.
    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }
}

/// A change to progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Complete or uncomplete a step
    ToggleStep(usize),
    /// Clear all progress
    Reset,
    /// Replace the state with previously persisted indices
    LoadCache(Vec<usize>),
}

/// Persistence required after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Write the completed set
    Persist,
    /// Delete the persisted entry
    Remove,
}

/// Whether step `index` may be completed.
pub fn is_unlocked(completed: &BTreeSet<usize>, index: usize) -> bool {
    index == 0 || completed.contains(&(index - 1))
}

/// Toggle step `index`, returning whether the set changed.
///
/// Locked steps are left alone. Removing a step keeps later steps unless `cascade` is set.
pub fn toggle(completed: &mut BTreeSet<usize>, index: usize, cascade: bool) -> bool {
    if completed.remove(&index) {
        if cascade {
            completed.retain(|&i| i < index);
        }
        true
    } else if is_unlocked(completed, index) {
        completed.insert(index)
    } else {
        false
    }
}

/// Rounded completion percentage; zero when there are no steps.
pub fn progress_percent(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u32
}

/// Encouragement for the current completion level.
pub fn progress_message(completed: usize, total: usize) -> &'static str {
    let percent = progress_percent(completed, total);
    if completed == 0 {
        "Start your journey by completing the first step"
    } else if completed >= total {
        "Congratulations! You've completed your entire learning path"
    } else if percent >= 75 {
        "Almost there! Just a few more steps to go"
    } else if percent >= 50 {
        "You're halfway there! Keep going"
    } else {
        "Keep going, you're making progress"
    }
}

/// Apply `action` to `state`.
pub fn reduce(mut state: ProgressState, action: Action, cascade: bool) -> (ProgressState, Option<Effect>) {
    match action {
        Action::ToggleStep(index) => {
            let changed = toggle(&mut state.completed, index, cascade);
            (state, changed.then_some(Effect::Persist))
        }
        Action::Reset => {
            state.completed.clear();
            (state, Some(Effect::Remove))
        }
        Action::LoadCache(indices) => {
            state.completed = indices.into_iter().collect();
            (state, None)
        }
    }
}

/// Read persisted indices for `key`. Absent or unparseable values are empty.
pub fn load_completed<S: ProgressStore>(store: &S, key: &str) -> Vec<usize> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read progress");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<usize>>(&raw) {
        Ok(indices) => indices,
        Err(e) => {
            tracing::warn!(key, error = %e, "Ignoring malformed progress entry");
            Vec::new()
        }
    }
}

/// Progress for one skill, backed by a store.
#[derive(Debug)]
pub struct ProgressTracker<S: ProgressStore> {
    store: S,
    state: ProgressState,
    cascade: bool,
}

impl<S: ProgressStore> ProgressTracker<S> {
    /// Load progress for `<namespace>_<skill>` from `store`.
    pub fn load(store: S, namespace: &str, skill: &str) -> Self {
        let key = progress_key(namespace, skill);
        let indices = load_completed(&store, &key);
        let (state, _) = reduce(ProgressState::new(key), Action::LoadCache(indices), false);
        Self { store, state, cascade: false }
    }

    /// Clear later steps when a step is uncompleted.
    pub fn with_cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    /// Toggle step `index`, returning whether anything changed.
    pub fn toggle(&mut self, index: usize) -> bool {
        self.dispatch(Action::ToggleStep(index))
    }

    /// Clear all progress.
    pub fn reset(&mut self) {
        self.dispatch(Action::Reset);
    }

    /// Whether step `index` may be completed.
    pub fn is_unlocked(&self, index: usize) -> bool {
        is_unlocked(&self.state.completed, index)
    }

    /// Whether step `index` is completed.
    pub fn is_completed(&self, index: usize) -> bool {
        self.state.is_completed(index)
    }

    /// Rounded completion percentage over `total` steps.
    pub fn percent(&self, total: usize) -> u32 {
        progress_percent(self.state.completed_count(), total)
    }

    /// Encouragement for the current completion level.
    pub fn message(&self, total: usize) -> &'static str {
        progress_message(self.state.completed_count(), total)
    }

    /// First unlocked step that is not yet completed.
    pub fn next_step(&self, total: usize) -> Option<usize> {
        (0..total).find(|&i| !self.is_completed(i) && self.is_unlocked(i))
    }

    /// Current state.
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the tracker, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn dispatch(&mut self, action: Action) -> bool {
        let state = std::mem::take(&mut self.state);
        let (state, effect) = reduce(state, action, self.cascade);
        self.state = state;

        match effect {
            Some(Effect::Persist) => self.persist(),
            Some(Effect::Remove) => {
                if let Err(e) = self.store.remove(&self.state.key) {
                    tracing::warn!(key = %self.state.key, error = %e, "Failed to clear progress");
                }
            }
            None => {}
        }
        effect.is_some()
    }

    fn persist(&mut self) {
        let indices: Vec<usize> = self.state.completed.iter().copied().collect();
        let result = serde_json::to_string(&indices)
            .map_err(Into::into)
            .and_then(|value| self.store.set(&self.state.key, &value));
        if let Err(e) = result {
            tracing::warn!(key = %self.state.key, error = %e, "Failed to save progress");
        }
    }
}
