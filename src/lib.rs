//! Task collection store: create/toggle/delete mutations over an owned list of
//! tasks, a filtered/sorted derived view, and a key-value persistence boundary.
//!
//! The presentation layer is external: it renders [`TaskStore::view`] and
//! [`TaskStore::stats`] output, forwards user actions, and is responsible for
//! obtaining confirmation before [`TaskStore::clear_all`].

pub mod logging;
pub mod models;
pub mod storage;
pub mod store;

pub use models::{Stats, Task, TaskFilter, TaskSort, Timestamp};
pub use storage::{FileKvStore, KvStore, MemoryKvStore, StorageError};
pub use store::{CreateError, TaskStore, MAX_TEXT_CHARS, TASKS_KEY};
