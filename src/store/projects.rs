//! Project queries.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{NewProject, Project, ProjectPatch, ProjectWithTasks};
use crate::store::error::{Entity, StoreError};
use crate::store::tasks;

const SELECT_PROJECTS: &str = "SELECT id, name, description FROM projects";

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}

pub fn insert(conn: &Connection, project: &NewProject) -> Result<Project, StoreError> {
    conn.execute(
        "INSERT INTO projects (name, description) VALUES (?1, ?2)",
        params![project.name, project.description],
    )?;

    Ok(Project {
        id: conn.last_insert_rowid(),
        name: project.name.clone(),
        description: project.description.clone(),
    })
}

/// All projects, oldest first.
pub fn list(conn: &Connection) -> Result<Vec<Project>, StoreError> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_PROJECTS))?;
    let projects = stmt
        .query_map([], project_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(projects)
}

pub fn find(conn: &Connection, id: i64) -> Result<Option<Project>, StoreError> {
    let project = conn
        .query_row(
            &format!("{} WHERE id = ?1", SELECT_PROJECTS),
            params![id],
            project_from_row,
        )
        .optional()?;
    Ok(project)
}

pub fn get(conn: &Connection, id: i64) -> Result<Project, StoreError> {
    find(conn, id)?.ok_or_else(|| StoreError::not_found(Entity::Project, id))
}

pub fn exists(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    let found = conn
        .query_row("SELECT 1 FROM projects WHERE id = ?1", params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

pub fn get_with_tasks(conn: &Connection, id: i64) -> Result<ProjectWithTasks, StoreError> {
    let project = get(conn, id)?;
    let tasks = tasks::list_for_project(conn, id)?;
    Ok(ProjectWithTasks { project, tasks })
}

/// Apply a validated patch and return the stored result.
pub fn update(conn: &Connection, id: i64, patch: ProjectPatch) -> Result<Project, StoreError> {
    let project = get(conn, id)?.apply(patch);
    conn.execute(
        "UPDATE projects SET name = ?1, description = ?2 WHERE id = ?3",
        params![project.name, project.description, project.id],
    )?;
    Ok(project)
}

/// Delete a project. Its tasks go with it (`ON DELETE CASCADE`).
pub fn delete(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let removed = conn.execute("DELETE FROM projects WHERE id = ?1", params![id])?;
    if removed == 0 {
        return Err(StoreError::not_found(Entity::Project, id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewTask, Patch, TaskStatus};
    use crate::store::schema;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        schema::init(&conn).unwrap();
        conn
    }

    fn new_project(name: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let conn = conn();
        let created = insert(&conn, &new_project("Website")).unwrap();
        assert!(created.id > 0);
        assert_eq!(get(&conn, created.id).unwrap(), created);
        assert!(exists(&conn, created.id).unwrap());
        assert!(!exists(&conn, created.id + 1).unwrap());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let conn = conn();
        let first = insert(&conn, &new_project("one")).unwrap();
        delete(&conn, first.id).unwrap();
        let second = insert(&conn, &new_project("two")).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn test_get_missing() {
        let conn = conn();
        let err = get(&conn, 5).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "project 5 not found");
    }

    #[test]
    fn test_update_partial() {
        let conn = conn();
        let created = insert(
            &conn,
            &NewProject {
                name: "Website".to_string(),
                description: Some("marketing".to_string()),
            },
        )
        .unwrap();

        let patch = ProjectPatch {
            name: Patch::Value("Site".to_string()),
            description: Patch::Absent,
        };
        let updated = update(&conn, created.id, patch).unwrap();
        assert_eq!(updated.name, "Site");
        assert_eq!(updated.description.as_deref(), Some("marketing"));
        assert_eq!(get(&conn, created.id).unwrap(), updated);
    }

    #[test]
    fn test_delete_cascades_to_tasks() {
        let conn = conn();
        let project = insert(&conn, &new_project("Doomed")).unwrap();
        let task = NewTask {
            title: "child".to_string(),
            description: None,
            priority: 1,
            deadline: None,
            status: TaskStatus::Pending,
        };
        tasks::insert(&conn, project.id, &task).unwrap();

        delete(&conn, project.id).unwrap();

        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
        assert!(delete(&conn, project.id).unwrap_err().is_not_found());
    }
}
