//! Student handlers: add, list, read, update, delete, find by name.

use crate::error::AppError;
use crate::model::Student;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

pub async fn add(
    State(state): State<AppState>,
    Json(student): Json<Student>,
) -> Result<impl IntoResponse, AppError> {
    let saved = state.students.save(&student).await?;
    tracing::info!(id = saved.id, "student added");
    Ok("New Student is added")
}

pub async fn get_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.students.list_all().await?;
    Ok(Json(rows))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let student = state.students.get(id).await?;
    Ok(Json(student))
}

/// Replace a student.
///
/// The path id is only checked for existence; the body is then saved as given. A body whose
/// `id` differs from the path writes to the body's row, not the path's. This is kept as-is
/// pending a product decision on whether the path id should win.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(student): Json<Student>,
) -> Result<impl IntoResponse, AppError> {
    state.students.get(id).await?;
    let saved = state.students.save(&student).await?;
    if saved.id != id {
        tracing::warn!(path_id = id, body_id = saved.id, "update wrote a different row than the path id");
    } else {
        tracing::info!(id, "student updated");
    }
    Ok(StatusCode::OK)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.students.delete(id).await?;
    tracing::info!(id, "student deleted");
    Ok(format!("Deleted Student with id {}", id))
}

pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.students.get_all_by_name(&name).await?;
    if rows.is_empty() {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }
    Ok(Json(rows).into_response())
}
