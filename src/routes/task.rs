use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{Task, TaskInput, TaskStatus, TaskUpdate},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Query shape for the endpoints that address a task by `?id=<uuid>`.
/// The id is optional at the deserialization layer so its absence can be
/// reported as a clean 400 instead of a generic parse failure.
#[derive(Debug, Deserialize)]
pub struct TaskIdQuery {
    pub id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<TaskStatus>,
}

/// Envelope for endpoints that return a single task alongside a message.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskResponse {
    pub message: String,
    pub task: Task,
}

/// Envelope for the list endpoint; the board client reads `tasks` and does
/// its own sorting and filtering.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}

fn require_id(query: &TaskIdQuery) -> Result<Uuid, AppError> {
    query
        .id
        .ok_or_else(|| AppError::BadRequest("Task id is required".into()))
}

/// Creates a new task owned by the authenticated user.
///
/// The owner always comes from the verified token, never from the payload.
///
/// ## Responses:
/// - `201 Created`: `{message, task}` with the persisted task and its generated id.
/// - `401 Unauthorized`: missing or invalid token.
/// - `422 Unprocessable Entity`: title or description below minimum length.
/// - `500 Internal Server Error`: database failure.
#[post("/create")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = Task::new(task_data.into_inner(), user.0);

    let created = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (id, title, description, status, priority, due_date, user_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id, title, description, status, priority, due_date, user_id, created_at, updated_at"
    )
    .bind(task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(&task.status)
    .bind(&task.priority)
    .bind(task.due_date)
    .bind(task.user_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(TaskResponse {
        message: "Task Successfully Created!".into(),
        task: created,
    }))
}

/// Lists every task owned by the authenticated user, newest first.
/// No other user's tasks are ever included; ordering is not part of the API
/// contract (the client re-sorts).
#[get("/all")]
pub async fn get_tasks(
    pool: web::Data<PgPool>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, status, priority, due_date, user_id, created_at, updated_at
         FROM tasks WHERE user_id = $1
         ORDER BY created_at DESC",
    )
    .bind(user.0)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(TaskListResponse { tasks }))
}

/// Partially updates a task addressed by `?id=`.
///
/// Fields present in the body replace the stored values; absent fields are
/// kept. The lookup is filtered by owner, so another user's task id reads as
/// not found.
///
/// ## Responses:
/// - `200 OK`: `{message, task}` with the updated task.
/// - `400 Bad Request`: no `id` query parameter.
/// - `404 Not Found`: no matching task for this owner.
/// - `422 Unprocessable Entity`: a provided field fails validation.
#[patch("/update")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    query: web::Query<TaskIdQuery>,
    task_data: web::Json<TaskUpdate>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task_id = require_id(&query)?;
    task_data.validate()?;

    let updated = sqlx::query_as::<_, Task>(
        "UPDATE tasks
         SET title = COALESCE($1, title),
             description = COALESCE($2, description),
             status = COALESCE($3, status),
             priority = COALESCE($4, priority),
             due_date = COALESCE($5, due_date),
             updated_at = NOW()
         WHERE id = $6 AND user_id = $7
         RETURNING id, title, description, status, priority, due_date, user_id, created_at, updated_at"
    )
    .bind(&task_data.title)
    .bind(&task_data.description)
    .bind(&task_data.status)
    .bind(&task_data.priority)
    .bind(task_data.due_date)
    .bind(task_id)
    .bind(user.0)
    .fetch_optional(&**pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Task not found".into()))?;

    Ok(HttpResponse::Ok().json(TaskResponse {
        message: "Task Successfully Updated!".into(),
        task: updated,
    }))
}

/// Sets the status of a task addressed by `?id=` (the board's drag-and-drop
/// move). Requires a `status` value in the body; repeating the same status is
/// idempotent.
#[patch("/update-status")]
pub async fn update_status(
    pool: web::Data<PgPool>,
    query: web::Query<TaskIdQuery>,
    body: web::Json<UpdateStatusRequest>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task_id = require_id(&query)?;
    let status = body
        .into_inner()
        .status
        .ok_or_else(|| AppError::BadRequest("Status is required".into()))?;

    let result =
        sqlx::query("UPDATE tasks SET status = $1, updated_at = NOW() WHERE id = $2 AND user_id = $3")
            .bind(&status)
            .bind(task_id)
            .bind(user.0)
            .execute(&**pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task Status Updated!"
    })))
}

/// Deletes a task addressed by `?id=`. Deletion is permanent and immediate;
/// a missing (or non-owned) id reads as not found.
#[delete("/delete")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    query: web::Query<TaskIdQuery>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let task_id = require_id(&query)?;

    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id)
        .bind(user.0)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task Successfully Deleted!"
    })))
}
