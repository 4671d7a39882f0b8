use crate::error::AppError;
use crate::model::{Progress, Task};

/// In-memory task list for one session.
///
/// Holds the ordered sequence of tasks plus two monotone counters: how many
/// tasks were ever added and how many were ever completed. Completing a task
/// removes it from the sequence, but both counters only grow, so the progress
/// ratio is measured against everything the session has seen. The store is
/// created empty and owned by the presentation layer; there is no persistence.
#[derive(Debug, Default, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    added: usize,
    completed: usize,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task and return its zero-based position.
    ///
    /// The label is trimmed; a blank label is rejected so the sequence never
    /// contains entries created from empty input.
    pub fn add_task(&mut self, label: &str) -> Result<usize, AppError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("label is required"));
        }

        self.tasks.push(Task {
            label: trimmed.to_string(),
        });
        self.added += 1;
        Ok(self.tasks.len() - 1)
    }

    /// Remove and return the task at `position`, counting it as completed.
    ///
    /// Later tasks shift down by one; their relative order is unchanged. An
    /// out-of-bounds position fails without touching any state.
    pub fn complete_task(&mut self, position: usize) -> Result<Task, AppError> {
        if position >= self.tasks.len() {
            return Err(AppError::index_out_of_range(position, self.tasks.len()));
        }

        let removed = self.tasks.remove(position);
        self.completed += 1;
        Ok(removed)
    }

    /// Completed-to-added ratio in [0, 1], recomputed on every call.
    /// A fresh store reports 0 rather than dividing by zero.
    pub fn progress(&self) -> f64 {
        if self.added == 0 {
            0.0
        } else {
            self.completed as f64 / self.added as f64
        }
    }

    pub fn progress_report(&self) -> Progress {
        Progress {
            added: self.added,
            completed: self.completed,
            fraction: self.progress(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn added_count(&self) -> usize {
        self.added
    }

    pub fn completed_count(&self) -> usize {
        self.completed
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
