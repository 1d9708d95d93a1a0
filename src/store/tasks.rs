//! Task queries. Every lookup is scoped by the owning project.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{NewTask, Task, TaskPatch, TaskStatus};
use crate::store::error::{Entity, StoreError};
use crate::store::projects;

const SELECT_TASKS: &str =
    "SELECT id, project_id, title, description, priority, deadline, status FROM tasks";

impl ToSql for TaskStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TaskStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|err| FromSqlError::Other(Box::new(err)))
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        priority: row.get("priority")?,
        deadline: row.get("deadline")?,
        status: row.get("status")?,
    })
}

/// Insert a task under `project_id`.
///
/// Fails with `NotFound` for the project when it does not exist; nothing is
/// written in that case.
pub fn insert(conn: &Connection, project_id: i64, task: &NewTask) -> Result<Task, StoreError> {
    if !projects::exists(conn, project_id)? {
        return Err(StoreError::not_found(Entity::Project, project_id));
    }

    conn.execute(
        "INSERT INTO tasks (project_id, title, description, priority, deadline, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            project_id,
            task.title,
            task.description,
            task.priority,
            task.deadline,
            task.status,
        ],
    )?;

    Ok(Task {
        id: conn.last_insert_rowid(),
        project_id,
        title: task.title.clone(),
        description: task.description.clone(),
        priority: task.priority,
        deadline: task.deadline,
        status: task.status,
    })
}

/// Tasks of one project in insertion order.
pub fn list_for_project(conn: &Connection, project_id: i64) -> Result<Vec<Task>, StoreError> {
    let mut stmt = conn.prepare(&format!("{} WHERE project_id = ?1 ORDER BY id", SELECT_TASKS))?;
    let tasks = stmt
        .query_map(params![project_id], task_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tasks)
}

pub fn find(conn: &Connection, project_id: i64, task_id: i64) -> Result<Option<Task>, StoreError> {
    let task = conn
        .query_row(
            &format!("{} WHERE id = ?1 AND project_id = ?2", SELECT_TASKS),
            params![task_id, project_id],
            task_from_row,
        )
        .optional()?;
    Ok(task)
}

/// A task that belongs to `project_id`. A task id owned by another project
/// is reported as not found.
pub fn get(conn: &Connection, project_id: i64, task_id: i64) -> Result<Task, StoreError> {
    find(conn, project_id, task_id)?.ok_or_else(|| StoreError::not_found(Entity::Task, task_id))
}

/// Apply a validated patch and return the stored result.
pub fn update(
    conn: &Connection,
    project_id: i64,
    task_id: i64,
    patch: TaskPatch,
) -> Result<Task, StoreError> {
    let task = get(conn, project_id, task_id)?.apply(patch);
    conn.execute(
        "UPDATE tasks
         SET title = ?1, description = ?2, priority = ?3, deadline = ?4, status = ?5
         WHERE id = ?6 AND project_id = ?7",
        params![
            task.title,
            task.description,
            task.priority,
            task.deadline,
            task.status,
            task.id,
            task.project_id,
        ],
    )?;
    Ok(task)
}

pub fn delete(conn: &Connection, project_id: i64, task_id: i64) -> Result<(), StoreError> {
    let removed = conn.execute(
        "DELETE FROM tasks WHERE id = ?1 AND project_id = ?2",
        params![task_id, project_id],
    )?;
    if removed == 0 {
        return Err(StoreError::not_found(Entity::Task, task_id));
    }
    Ok(())
}
