//! Typed HTTP client for the TaskHub API.
//!
//! ```no_run
//! # async fn demo() -> Result<(), taskhub_sdk::SdkError> {
//! use taskhub_sdk::{NewProject, NewTask, TaskHubClient};
//!
//! let client = TaskHubClient::new("http://127.0.0.1:5000");
//! let project = client.create_project(&NewProject::named("Launch")).await?;
//! client.create_task(project.id, &NewTask::titled("Write notes")).await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{status} {code}: {message}")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
    },
}

impl SdkError {
    /// HTTP status of an API error response, if that is what this is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SdkError::Api { status, .. } => Some(*status),
            SdkError::Http(e) => e.status(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        })
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(format!(
                "unknown status `{other}` (expected pending, in_progress or completed)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A project together with its tasks, as returned by `GET /projects/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: i64,
    pub deadline: Option<NaiveDate>,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewProject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewProject {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// Partial project update. `None` leaves a field alone; `Some(None)` clears it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial task update. `None` leaves a field alone; `Some(None)` clears it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
}

#[derive(Deserialize)]
struct ProjectEnvelope<P> {
    project: P,
}

#[derive(Deserialize)]
struct ProjectsEnvelope {
    projects: Vec<Project>,
}

#[derive(Deserialize)]
struct TaskEnvelope {
    task: Task,
}

#[derive(Deserialize)]
struct TasksEnvelope {
    tasks: Vec<Task>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: String,
    message: String,
}

pub struct TaskHubClient {
    client: Client,
    base_url: String,
}

impl TaskHubClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<Health, SdkError> {
        let resp = self.client.get(self.url("/health")).send().await?;
        decode(resp).await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, SdkError> {
        let body: ProjectsEnvelope = self.send(self.client.get(self.url("/projects"))).await?;
        Ok(body.projects)
    }

    pub async fn get_project(&self, id: i64) -> Result<ProjectDetail, SdkError> {
        let req = self.client.get(self.url(&format!("/projects/{id}")));
        let body: ProjectEnvelope<ProjectDetail> = self.send(req).await?;
        Ok(body.project)
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<Project, SdkError> {
        let req = self.client.post(self.url("/projects")).json(project);
        let body: ProjectEnvelope<Project> = self.send(req).await?;
        Ok(body.project)
    }

    pub async fn update_project(&self, id: i64, update: &ProjectUpdate) -> Result<Project, SdkError> {
        let req = self
            .client
            .put(self.url(&format!("/projects/{id}")))
            .json(update);
        let body: ProjectEnvelope<Project> = self.send(req).await?;
        Ok(body.project)
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), SdkError> {
        let req = self.client.delete(self.url(&format!("/projects/{id}")));
        self.send_empty(req).await
    }

    pub async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>, SdkError> {
        let req = self
            .client
            .get(self.url(&format!("/projects/{project_id}/tasks")));
        let body: TasksEnvelope = self.send(req).await?;
        Ok(body.tasks)
    }

    pub async fn get_task(&self, project_id: i64, task_id: i64) -> Result<Task, SdkError> {
        let req = self
            .client
            .get(self.url(&format!("/projects/{project_id}/tasks/{task_id}")));
        let body: TaskEnvelope = self.send(req).await?;
        Ok(body.task)
    }

    pub async fn create_task(&self, project_id: i64, task: &NewTask) -> Result<Task, SdkError> {
        let req = self
            .client
            .post(self.url(&format!("/projects/{project_id}/tasks")))
            .json(task);
        let body: TaskEnvelope = self.send(req).await?;
        Ok(body.task)
    }

    pub async fn update_task(
        &self,
        project_id: i64,
        task_id: i64,
        update: &TaskUpdate,
    ) -> Result<Task, SdkError> {
        let req = self
            .client
            .put(self.url(&format!("/projects/{project_id}/tasks/{task_id}")))
            .json(update);
        let body: TaskEnvelope = self.send(req).await?;
        Ok(body.task)
    }

    pub async fn delete_task(&self, project_id: i64, task_id: i64) -> Result<(), SdkError> {
        let req = self
            .client
            .delete(self.url(&format!("/projects/{project_id}/tasks/{task_id}")));
        self.send_empty(req).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, SdkError> {
        decode(req.send().await?).await
    }

    async fn send_empty(&self, req: RequestBuilder) -> Result<(), SdkError> {
        check(req.send().await?).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, SdkError> {
    Ok(check(resp).await?.json().await?)
}

/// Turn a non-2xx response into [`SdkError::Api`].
async fn check(resp: Response) -> Result<Response, SdkError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let text = resp.text().await?;
    let (code, message) = match serde_json::from_str::<ErrorEnvelope>(&text) {
        Ok(body) => (body.error, body.message),
        Err(_) => ("unknown".to_string(), text),
    };
    Err(SdkError::Api {
        status,
        code,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_update_serializes_only_set_fields() {
        let update = TaskUpdate {
            priority: Some(4),
            deadline: Some(None),
            ..TaskUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"priority": 4, "deadline": null}));
    }

    #[test]
    fn test_project_detail_flattens_project() {
        let json = r#"{"id": 2, "name": "Ops", "description": null, "tasks": []}"#;
        let detail: ProjectDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.project.id, 2);
        assert!(detail.tasks.is_empty());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("in_progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = TaskHubClient::new("http://localhost:5000/");
        assert_eq!(client.url("/projects"), "http://localhost:5000/projects");
    }
}
