//! Task endpoints, nested under their project.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::validation::{validate_task, validate_task_patch};
use crate::domain::{TaskInput, TaskPatch};
use crate::http::error::ApiError;
use crate::http::request::{ApiJson, ApiPath};
use crate::http::response::{TaskBody, TaskList};
use crate::http::server::AppState;
use crate::store::{projects, tasks};

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TaskPath {
    pub project_id: i64,
    pub task_id: i64,
}

/// `POST /projects/{project_id}/tasks`
///
/// The body is validated before the parent project is looked up, so a blank
/// title is a 400 even under a project that does not exist.
pub async fn create_task(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(input): ApiJson<TaskInput>,
) -> Result<(StatusCode, Json<TaskBody>), ApiError> {
    let task = validate_task(input)?;
    let created = state
        .store
        .write(move |tx| tasks::insert(tx, project_id, &task))
        .await?;

    tracing::info!(project_id, task_id = created.id, "Task created");
    Ok((StatusCode::CREATED, Json(TaskBody::created(created))))
}

/// `GET /projects/{project_id}/tasks`
pub async fn list_tasks(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
) -> Result<Json<TaskList>, ApiError> {
    let tasks = state
        .store
        .read(move |conn| {
            projects::get(conn, project_id)?;
            tasks::list_for_project(conn, project_id)
        })
        .await?;
    Ok(Json(TaskList { tasks }))
}

/// `GET /projects/{project_id}/tasks/{task_id}`
pub async fn get_task(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<TaskPath>,
) -> Result<Json<TaskBody>, ApiError> {
    let task = state
        .store
        .read(move |conn| tasks::get(conn, path.project_id, path.task_id))
        .await?;
    Ok(Json(TaskBody::detail(task)))
}

/// `PUT|PATCH /projects/{project_id}/tasks/{task_id}`
pub async fn update_task(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<TaskPath>,
    ApiJson(patch): ApiJson<TaskPatch>,
) -> Result<Json<TaskBody>, ApiError> {
    let patch = validate_task_patch(patch)?;
    let updated = state
        .store
        .write(move |tx| tasks::update(tx, path.project_id, path.task_id, patch))
        .await?;

    tracing::info!(project_id = path.project_id, task_id = path.task_id, "Task updated");
    Ok(Json(TaskBody::updated(updated)))
}

/// `DELETE /projects/{project_id}/tasks/{task_id}`
pub async fn delete_task(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<TaskPath>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .write(move |tx| tasks::delete(tx, path.project_id, path.task_id))
        .await?;

    tracing::info!(project_id = path.project_id, task_id = path.task_id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}
