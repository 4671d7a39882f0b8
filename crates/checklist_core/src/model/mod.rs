use serde::{Deserialize, Serialize};

/// A single to-do entry. A task has no identity beyond its position in the
/// list, so the label is the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub label: String,
}

/// Snapshot of the session's progress counters for rendering.
///
/// `fraction` is completed-to-added, in [0, 1]. It tracks every task the
/// session has ever added, not the currently visible remainder, so it never
/// decreases even though completed tasks leave the list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub added: usize,
    pub completed: usize,
    pub fraction: f64,
}
