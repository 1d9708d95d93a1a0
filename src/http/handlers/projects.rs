//! Project endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::domain::validation::{validate_project, validate_project_patch};
use crate::domain::{Project, ProjectInput, ProjectPatch, ProjectWithTasks};
use crate::http::error::ApiError;
use crate::http::request::{ApiJson, ApiPath};
use crate::http::response::{ProjectBody, ProjectList};
use crate::http::server::AppState;
use crate::store::projects;

/// `POST /projects`
pub async fn create_project(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ProjectInput>,
) -> Result<(StatusCode, Json<ProjectBody<Project>>), ApiError> {
    let project = validate_project(input)?;
    let created = state
        .store
        .write(move |tx| projects::insert(tx, &project))
        .await?;

    tracing::info!(project_id = created.id, "Project created");
    Ok((StatusCode::CREATED, Json(ProjectBody::created(created))))
}

/// `GET /projects`
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<ProjectList>, ApiError> {
    let projects = state.store.read(projects::list).await?;
    Ok(Json(ProjectList { projects }))
}

/// `GET /projects/{project_id}`, including the project's tasks.
pub async fn get_project(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
) -> Result<Json<ProjectBody<ProjectWithTasks>>, ApiError> {
    let project = state
        .store
        .read(move |conn| projects::get_with_tasks(conn, project_id))
        .await?;
    Ok(Json(ProjectBody::detail(project)))
}

/// `PUT /projects/{project_id}`
pub async fn update_project(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
    ApiJson(patch): ApiJson<ProjectPatch>,
) -> Result<Json<ProjectBody<Project>>, ApiError> {
    let patch = validate_project_patch(patch)?;
    let updated = state
        .store
        .write(move |tx| projects::update(tx, project_id, patch))
        .await?;

    tracing::info!(project_id, "Project updated");
    Ok(Json(ProjectBody::updated(updated)))
}

/// `DELETE /projects/{project_id}`. Owned tasks are deleted with it.
pub async fn delete_project(
    State(state): State<AppState>,
    ApiPath(project_id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .write(move |tx| projects::delete(tx, project_id))
        .await?;

    tracing::info!(project_id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
