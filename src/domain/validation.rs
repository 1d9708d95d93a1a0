//! Input validation.
//!
//! # Responsibilities
//! - Reject missing or blank required fields before any store mutation
//! - Trim required text fields
//! - Apply create defaults (priority, status)
//! - Reject `null` for fields that cannot be cleared
//!
//! # Design Decisions
//! - Pure functions: raw input in, validated value or error out
//! - Optional free text (`description`) is stored as given, even when empty

use super::patch::Patch;
use super::project::{NewProject, ProjectInput, ProjectPatch};
use super::task::{NewTask, TaskInput, TaskPatch, DEFAULT_PRIORITY};

/// A request body failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must not be blank")]
    Blank { field: &'static str },

    #[error("{field} cannot be null")]
    Null { field: &'static str },
}

pub fn validate_project(input: ProjectInput) -> Result<NewProject, ValidationError> {
    Ok(NewProject {
        name: required_text("name", input.name)?,
        description: input.description,
    })
}

pub fn validate_task(input: TaskInput) -> Result<NewTask, ValidationError> {
    Ok(NewTask {
        title: required_text("title", input.title)?,
        description: input.description,
        priority: input.priority.unwrap_or(DEFAULT_PRIORITY),
        deadline: input.deadline,
        status: input.status.unwrap_or_default(),
    })
}

pub fn validate_project_patch(patch: ProjectPatch) -> Result<ProjectPatch, ValidationError> {
    Ok(ProjectPatch {
        name: required_patch("name", patch.name)?,
        description: patch.description,
    })
}

pub fn validate_task_patch(patch: TaskPatch) -> Result<TaskPatch, ValidationError> {
    Ok(TaskPatch {
        title: required_patch("title", patch.title)?,
        description: patch.description,
        priority: non_null("priority", patch.priority)?,
        deadline: patch.deadline,
        status: non_null("status", patch.status)?,
    })
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    non_blank(field, &value)
}

fn non_blank(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(trimmed.to_string())
}

fn required_patch(field: &'static str, patch: Patch<String>) -> Result<Patch<String>, ValidationError> {
    match non_null(field, patch)? {
        Patch::Value(value) => non_blank(field, &value).map(Patch::Value),
        other => Ok(other),
    }
}

fn non_null<T>(field: &'static str, patch: Patch<T>) -> Result<Patch<T>, ValidationError> {
    match patch {
        Patch::Null => Err(ValidationError::Null { field }),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;

    #[test]
    fn test_project_name_required() {
        let err = validate_project(ProjectInput::default()).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "name" });
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_project_name_blank() {
        let input = ProjectInput {
            name: Some("   \t".to_string()),
            description: None,
        };
        assert_eq!(
            validate_project(input).unwrap_err(),
            ValidationError::Blank { field: "name" }
        );
    }

    #[test]
    fn test_project_name_trimmed() {
        let input = ProjectInput {
            name: Some("  Website  ".to_string()),
            description: Some(String::new()),
        };
        let project = validate_project(input).unwrap();
        assert_eq!(project.name, "Website");
        assert_eq!(project.description, Some(String::new()));
    }

    #[test]
    fn test_task_defaults() {
        let input = TaskInput {
            title: Some("Review".to_string()),
            ..TaskInput::default()
        };
        let task = validate_task(input).unwrap();
        assert_eq!(task.priority, DEFAULT_PRIORITY);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.deadline, None);
    }

    #[test]
    fn test_task_title_blank() {
        let input = TaskInput {
            title: Some(" ".to_string()),
            priority: Some(3),
            ..TaskInput::default()
        };
        assert_eq!(
            validate_task(input).unwrap_err(),
            ValidationError::Blank { field: "title" }
        );
    }

    #[test]
    fn test_task_patch_rules() {
        let patch: TaskPatch = serde_json::from_str(r#"{"title": null}"#).unwrap();
        assert_eq!(
            validate_task_patch(patch).unwrap_err(),
            ValidationError::Null { field: "title" }
        );

        let patch: TaskPatch = serde_json::from_str(r#"{"priority": null}"#).unwrap();
        assert_eq!(
            validate_task_patch(patch).unwrap_err(),
            ValidationError::Null { field: "priority" }
        );

        let patch: TaskPatch = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert_eq!(
            validate_task_patch(patch).unwrap_err(),
            ValidationError::Blank { field: "title" }
        );

        let patch: TaskPatch =
            serde_json::from_str(r#"{"title": " New ", "description": null}"#).unwrap();
        let patch = validate_task_patch(patch).unwrap();
        assert_eq!(patch.title, Patch::Value("New".to_string()));
        assert_eq!(patch.description, Patch::Null);
        assert!(patch.priority.is_absent());
    }

    #[test]
    fn test_project_patch_rules() {
        let patch: ProjectPatch = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert!(validate_project_patch(patch).is_err());

        let patch: ProjectPatch = serde_json::from_str(r#"{"description": ""}"#).unwrap();
        let patch = validate_project_patch(patch).unwrap();
        assert!(patch.name.is_absent());
        assert_eq!(patch.description, Patch::Value(String::new()));
    }
}
