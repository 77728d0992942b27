use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority")]
pub enum TaskPriority {
    #[sqlx(rename = "Low")]
    Low,
    #[sqlx(rename = "Medium")]
    Medium,
    #[sqlx(rename = "High")]
    High,
}

/// Represents the status of a task on the board.
/// Corresponds to the `task_status` SQL enum; the wire strings ("To Do",
/// "In Progress", "Completed") are what the board client renders as columns.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    #[sqlx(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    #[sqlx(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    #[sqlx(rename = "Completed")]
    Completed,
}

/// Input structure for creating a task.
///
/// `status` and `priority` are validated for enum membership at
/// deserialization; there is no server-side default for `status`, the caller
/// supplies the initial column.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    #[validate(length(min = 3, max = 200, message = "Title must be at least of 3 characters"))]
    pub title: String,

    #[validate(length(
        min = 5,
        max = 1000,
        message = "Description must be at least of 5 characters"
    ))]
    pub description: String,

    pub status: TaskStatus,

    pub priority: Option<TaskPriority>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update payload: fields left out of the request keep their stored
/// values. Provided strings are still held to the creation constraints.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskUpdate {
    #[validate(length(min = 3, max = 200, message = "Title must be at least of 3 characters"))]
    pub title: Option<String>,

    #[validate(length(
        min = 5,
        max = 1000,
        message = "Description must be at least of 5 characters"
    ))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,

    pub priority: Option<TaskPriority>,

    pub due_date: Option<DateTime<Utc>>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    /// Identifier of the user who owns the task. Set from the authenticated
    /// identity at creation, immutable thereafter.
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` from `TaskInput` and the owner's user id.
    /// Sets `created_at` and `updated_at` to the current time and `id` to a
    /// new UUID.
    pub fn new(input: TaskInput, user_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: Some(input.description),
            status: input.status,
            priority: input.priority,
            due_date: input.due_date,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_task_creation_binds_owner() {
        let input = TaskInput {
            title: "Buy milk".to_string(),
            description: "2% milk".to_string(),
            status: TaskStatus::ToDo,
            priority: Some(TaskPriority::Low),
            due_date: None,
        };

        let task = Task::new(input, 7);
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.user_id, 7);
        assert_eq!(task.status, TaskStatus::ToDo);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_task_input_validation() {
        let valid_input = TaskInput {
            title: "Valid Task".to_string(),
            description: "Valid Description".to_string(),
            status: TaskStatus::ToDo,
            priority: Some(TaskPriority::High),
            due_date: None,
        };
        assert!(valid_input.validate().is_ok());

        // Title below the 3 character minimum
        let short_title = TaskInput {
            title: "ab".to_string(),
            description: "Valid Description".to_string(),
            status: TaskStatus::ToDo,
            priority: None,
            due_date: None,
        };
        assert!(short_title.validate().is_err());

        // Description below the 5 character minimum
        let short_description = TaskInput {
            title: "Valid Task".to_string(),
            description: "abcd".to_string(),
            status: TaskStatus::InProgress,
            priority: None,
            due_date: None,
        };
        assert!(short_description.validate().is_err());

        let long_title = TaskInput {
            title: "a".repeat(201),
            description: "Valid Description".to_string(),
            status: TaskStatus::Completed,
            priority: Some(TaskPriority::Medium),
            due_date: None,
        };
        assert!(long_title.validate().is_err());
    }

    #[test]
    fn test_task_update_validation() {
        // Empty update is valid: every field keeps its stored value.
        let empty = TaskUpdate::default();
        assert!(empty.validate().is_ok());

        let valid = TaskUpdate {
            title: Some("New title".to_string()),
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let short_title = TaskUpdate {
            title: Some("ab".to_string()),
            ..Default::default()
        };
        assert!(short_title.validate().is_err());

        let short_description = TaskUpdate {
            description: Some("abcd".to_string()),
            ..Default::default()
        };
        assert!(short_description.validate().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_value(TaskStatus::ToDo).unwrap(),
            serde_json::json!("To Do")
        );
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            serde_json::json!("In Progress")
        );
        assert_eq!(
            serde_json::to_value(TaskStatus::Completed).unwrap(),
            serde_json::json!("Completed")
        );

        let status: TaskStatus = serde_json::from_value(serde_json::json!("In Progress")).unwrap();
        assert_eq!(status, TaskStatus::InProgress);

        // Unknown labels are rejected at deserialization
        assert!(serde_json::from_value::<TaskStatus>(serde_json::json!("Done")).is_err());
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let input = TaskInput {
            title: "Buy milk".to_string(),
            description: "2% milk".to_string(),
            status: TaskStatus::ToDo,
            priority: None,
            due_date: Some(Utc::now()),
        };
        let task = Task::new(input, 1);

        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("dueDate").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("due_date").is_none());
    }
}
