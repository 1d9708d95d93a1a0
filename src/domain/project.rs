//! Project entity and its inputs.

use serde::{Deserialize, Serialize};

use super::patch::Patch;
use super::task::Task;

/// A stored project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl Project {
    /// Apply a validated patch.
    pub fn apply(self, patch: ProjectPatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.apply_required(self.name),
            description: patch.description.apply(self.description),
        }
    }
}

/// A project together with the tasks it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectWithTasks {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<Task>,
}

/// Raw create body. `name` stays optional here so a missing name is reported
/// as a validation error rather than a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A validated project ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update body for a project.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
}
