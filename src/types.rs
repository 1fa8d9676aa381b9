use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// A label as returned by the sync endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Label {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A task ("item" in the sync protocol)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(default)]
    pub priority: i32,
    /// Label ids attached to the task. `None` is rejected by update submission.
    #[serde(default)]
    pub labels: Option<Vec<i64>>,
    #[serde(default)]
    pub content: String,
    /// Local-only marker; never sent to or read from the server.
    #[serde(skip)]
    pub to_be_deleted: bool,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Body of a `resource_types=["labels"]` sync response
#[derive(Debug, Deserialize)]
pub struct LabelsResponse {
    #[serde(default)]
    pub labels: Vec<Label>,
}

/// Body of a `resource_types=["items"]` sync response
#[derive(Debug, Deserialize)]
pub struct TasksResponse {
    #[serde(default)]
    pub items: Vec<Task>,
}

/// Reserved, system-managed label ids that must never be written back
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecialLabels {
    ids: HashSet<i64>,
}

impl Task {
    pub fn new(id: i64, priority: i32, labels: Vec<i64>) -> Self {
        Self {
            id,
            priority,
            labels: Some(labels),
            content: String::new(),
            to_be_deleted: false,
            extra: HashMap::new(),
        }
    }

    /// Mark the task so the next submission deletes it instead of updating it
    pub fn mark_for_deletion(mut self) -> Self {
        self.to_be_deleted = true;
        self
    }
}

impl SpecialLabels {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Resolve special labels by name against a fetched label list.
    /// Names with no matching label are ignored.
    pub fn from_names<S: AsRef<str>>(labels: &[Label], names: &[S]) -> Self {
        let wanted: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();
        Self::new(
            labels
                .iter()
                .filter(|l| wanted.contains(l.name.as_str()))
                .map(|l| l.id),
        )
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Copy of `labels` with every special id removed, order preserved
    pub fn strip(&self, labels: &[i64]) -> Vec<i64> {
        labels.iter().copied().filter(|id| !self.contains(*id)).collect()
    }
}
