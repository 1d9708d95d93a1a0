//! Task entity, status and inputs.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::patch::Patch;

/// Priority assigned when a create body leaves it out.
pub const DEFAULT_PRIORITY: i64 = 1;

/// Progress of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: i64,
    pub deadline: Option<NaiveDate>,
    pub status: TaskStatus,
}

impl Task {
    /// Apply a validated patch. `id` and `project_id` never change.
    pub fn apply(self, patch: TaskPatch) -> Self {
        Self {
            id: self.id,
            project_id: self.project_id,
            title: patch.title.apply_required(self.title),
            description: patch.description.apply(self.description),
            priority: patch.priority.apply_required(self.priority),
            deadline: patch.deadline.apply(self.deadline),
            status: patch.status.apply_required(self.status),
        }
    }
}

/// Raw create body for a task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i64>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<TaskStatus>,
}

/// A validated task ready to insert under a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: i64,
    pub deadline: Option<NaiveDate>,
    pub status: TaskStatus,
}

/// Partial update body for a task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub priority: Patch<i64>,
    #[serde(default)]
    pub deadline: Patch<NaiveDate>,
    #[serde(default)]
    pub status: Patch<TaskStatus>,
}
