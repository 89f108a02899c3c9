use chrono::Utc;
use uuid::Uuid;

use crate::models::{Stats, Task, TaskFilter, TaskSort};
use crate::storage::KvStore;

/// Storage key for the serialized task array.
pub const TASKS_KEY: &str = "todoTasks";

/// Maximum task text length, counted in characters after trimming.
pub const MAX_TEXT_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateError {
    EmptyInput,
    TooLong,
    DuplicateTask,
}

impl std::fmt::Display for CreateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // User-facing rejection messages; the presentation layer shows them verbatim.
        match self {
            CreateError::EmptyInput => write!(f, "Task cannot be empty"),
            CreateError::TooLong => {
                write!(f, "Task must be less than {MAX_TEXT_CHARS} characters")
            }
            CreateError::DuplicateTask => write!(f, "Task already exists"),
        }
    }
}

impl std::error::Error for CreateError {}

/// Owns the task collection and the persistence handshake around it.
///
/// Every mutation rewrites the full collection to the backing [`KvStore`] under
/// [`TASKS_KEY`], but only once [`TaskStore::load`] has run; until then writes are
/// suppressed so an empty initial state cannot clobber not-yet-read persisted data.
/// Persistence failures are logged and never surfaced to the caller: the in-memory
/// collection stays authoritative for the running view.
pub struct TaskStore<S: KvStore> {
    storage: S,
    tasks: Vec<Task>,
    loaded: bool,
}

impl<S: KvStore> TaskStore<S> {
    /// Creates an empty, not-yet-loaded store. Call [`TaskStore::load`] before
    /// mutating so existing persisted tasks are picked up.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            tasks: Vec::new(),
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Reads the persisted collection. Absent values (including the literal
    /// strings `"undefined"` and `"null"`) leave the store empty; a corrupt value
    /// is discarded from storage and the store starts empty. The store counts as
    /// loaded afterwards either way.
    pub fn load(&mut self) {
        match self.storage.get(TASKS_KEY) {
            Ok(Some(raw)) if !is_absent_value(&raw) => {
                match serde_json::from_str::<Vec<Task>>(&raw) {
                    Ok(tasks) => {
                        log::debug!("store: loaded {} tasks", tasks.len());
                        self.tasks = tasks;
                    }
                    Err(err) => {
                        log::warn!("store: discarding corrupt persisted tasks: {err}");
                        self.tasks.clear();
                        if let Err(err) = self.storage.remove(TASKS_KEY) {
                            log::warn!("store: failed to clear corrupt value: {err}");
                        }
                    }
                }
            }
            Ok(_) => log::debug!("store: no persisted tasks"),
            Err(err) => log::warn!("store: failed to read persisted tasks: {err}"),
        }
        self.loaded = true;
    }

    /// Validates `text` (trimmed) and appends a new task.
    pub fn create(&mut self, text: &str) -> Result<Task, CreateError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CreateError::EmptyInput);
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(CreateError::TooLong);
        }
        let lowered = text.to_lowercase();
        if self.tasks.iter().any(|t| t.text.to_lowercase() == lowered) {
            return Err(CreateError::DuplicateTask);
        }

        let task = Task {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
            created_at: Utc::now().timestamp_millis(),
        };
        self.tasks.push(task.clone());
        self.persist();
        Ok(task)
    }

    /// Flips `completed` on the matching task; unknown ids are a no-op.
    pub fn toggle(&mut self, id: &str) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
            self.persist();
        }
    }

    /// Removes the matching task; unknown ids are a no-op.
    pub fn remove(&mut self, id: &str) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.persist();
        }
    }

    /// Removes every completed task and returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            self.persist();
        }
        removed
    }

    /// Empties the collection and persists an empty array. The caller must have
    /// already obtained user confirmation; the store never prompts.
    pub fn clear_all(&mut self) {
        self.tasks.clear();
        self.persist();
    }

    /// Filtered, sorted read of the collection. Pure: recomputed on every call,
    /// never mutates the store. Sorts are stable, so tied elements keep their
    /// relative order.
    pub fn view(&self, filter: TaskFilter, sort: TaskSort) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| match filter {
                TaskFilter::All => true,
                TaskFilter::Active => !t.completed,
                TaskFilter::Completed => t.completed,
            })
            .cloned()
            .collect();
        match sort {
            TaskSort::Newest => tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            TaskSort::Oldest => tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            TaskSort::Alphabetical => {
                tasks.sort_by(|a, b| a.text.to_lowercase().cmp(&b.text.to_lowercase()))
            }
        }
        tasks
    }

    pub fn stats(&self) -> Stats {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        Stats {
            total,
            active: total - completed,
            completed,
        }
    }

    fn persist(&self) {
        if !self.loaded {
            return;
        }
        let json = match serde_json::to_string(&self.tasks) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("store: failed to serialize tasks: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.set(TASKS_KEY, &json) {
            log::warn!("store: failed to persist tasks: {err}");
        }
    }
}

/// localStorage-style collaborators can hand back stringified absence markers.
fn is_absent_value(raw: &str) -> bool {
    raw.is_empty() || raw == "undefined" || raw == "null"
}
