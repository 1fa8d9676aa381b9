use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::types::{SpecialLabels, Task};

/// Arguments of an `item_delete` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteArgs {
    pub ids: Vec<i64>,
}

/// Arguments of an `item_update` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateArgs {
    pub id: i64,
    pub priority: i32,
    pub labels: Vec<i64>,
}

/// A single sync command. Every command carries its own uuid so the
/// server can track it idempotently.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Command {
    #[serde(rename = "item_delete")]
    Delete { uuid: Uuid, args: DeleteArgs },
    #[serde(rename = "item_update")]
    Update { uuid: Uuid, args: UpdateArgs },
}

/// Reasons a batch is refused before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchRejection {
    #[error("Empty list of tasks")]
    Empty,
    #[error("List of tasks contains at least one invalid item")]
    InvalidItem,
}

impl Command {
    /// Build the command for one task. A task that is not marked for
    /// deletion must carry a label list, otherwise an update would clear
    /// every label on the server.
    pub fn for_task(task: &Task, special: &SpecialLabels) -> Result<Self, BatchRejection> {
        let uuid = Uuid::new_v4();

        if task.to_be_deleted {
            return Ok(Command::Delete {
                uuid,
                args: DeleteArgs { ids: vec![task.id] },
            });
        }

        let labels = task.labels.as_deref().ok_or(BatchRejection::InvalidItem)?;

        Ok(Command::Update {
            uuid,
            args: UpdateArgs {
                id: task.id,
                priority: task.priority,
                labels: special.strip(labels),
            },
        })
    }

    pub fn uuid(&self) -> Uuid {
        match self {
            Command::Delete { uuid, .. } | Command::Update { uuid, .. } => *uuid,
        }
    }
}

/// Validate `tasks` and build one command per task, in input order.
pub fn build_batch(tasks: &[Task], special: &SpecialLabels) -> Result<Vec<Command>, BatchRejection> {
    if tasks.is_empty() {
        return Err(BatchRejection::Empty);
    }

    // Applies to delete-marked tasks too.
    if tasks.iter().any(|t| t.labels.is_none()) {
        return Err(BatchRejection::InvalidItem);
    }

    tasks.iter().map(|t| Command::for_task(t, special)).collect()
}

/// JSON array sent as the `commands` form parameter
pub fn encode_batch(commands: &[Command]) -> serde_json::Result<String> {
    serde_json::to_string(commands)
}
