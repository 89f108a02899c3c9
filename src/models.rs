use serde::{Deserialize, Serialize};

/// Unix milliseconds.
pub type Timestamp = i64;

/// A single to-do item. `id` and `created_at` are assigned at creation and never
/// change afterwards; `text` is immutable once the task exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    All,
    Active,
    Completed,
}

impl Default for TaskFilter {
    fn default() -> Self {
        Self::All
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskSort {
    Newest,
    Oldest,
    Alphabetical,
}

impl Default for TaskSort {
    fn default() -> Self {
        Self::Newest
    }
}

/// Counts derived from the current collection; `active + completed == total`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}
