use anyhow::Result;
use async_trait::async_trait;

use crate::types::{Label, Task};

pub mod todoist;

/// Read and write access to a remote task store
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Full snapshot of all labels
    async fn get_all_labels(&self) -> Result<Vec<Label>>;

    /// Full snapshot of all tasks
    async fn get_all_tasks(&self) -> Result<Vec<Task>>;

    /// Submit one update or delete command per task as a single batch.
    ///
    /// Empty input or a task without a label list is answered locally
    /// with a descriptive message and nothing is sent. Otherwise the raw
    /// server response body is returned.
    async fn update_tasks(&self, tasks: &[Task]) -> Result<String>;
}
