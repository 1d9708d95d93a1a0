//! Response bodies.
//!
//! # Responsibilities
//! - Wrap entities in the envelopes clients expect (`project`, `task`,
//!   `projects`, `tasks`)
//! - Carry a confirmation `message` on mutations
//! - Define the error body shared by every failure
//!
//! # Design Decisions
//! - Reads return the bare envelope; mutations add `message`
//! - Deletes answer 204 with no body

use serde::Serialize;

use crate::domain::{Project, ProjectWithTasks, Task};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ProjectBody<P> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub project: P,
}

impl ProjectBody<Project> {
    pub fn created(project: Project) -> Self {
        Self {
            message: Some("Project created"),
            project,
        }
    }

    pub fn updated(project: Project) -> Self {
        Self {
            message: Some("Project updated"),
            project,
        }
    }
}

impl ProjectBody<ProjectWithTasks> {
    pub fn detail(project: ProjectWithTasks) -> Self {
        Self {
            message: None,
            project,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize)]
pub struct TaskBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub task: Task,
}

impl TaskBody {
    pub fn created(task: Task) -> Self {
        Self {
            message: Some("Task created"),
            task,
        }
    }

    pub fn updated(task: Task) -> Self {
        Self {
            message: Some("Task updated"),
            task,
        }
    }

    pub fn detail(task: Task) -> Self {
        Self { message: None, task }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub version: &'static str,
}
