use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::errors::ApiError;
use crate::api::middleware::ApiJson;
use crate::api::state::AppState;
use crate::domain::NewCourse;

use super::MessageWithData;

/// Request body for creating a course
#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
}

/// Get all courses
///
/// GET /courses
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let courses = state.courses().list().await.map_err(|e| {
        tracing::error!(error = %e, "Error fetching courses");
        ApiError::from(e)
    })?;

    Ok(Json(courses))
}

/// Add a new course
///
/// Responds with the inserted rows rather than a message, unlike students.
///
/// POST /courses
pub async fn create_course(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<Vec<Value>>), ApiError> {
    let course = NewCourse { name: req.name };
    let inserted = state.courses().create(&course).await.map_err(|e| {
        tracing::error!(error = %e, name = %course.name, "Error creating course");
        ApiError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(inserted)))
}

/// Delete a course
///
/// DELETE /courses/:id
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageWithData<Vec<Value>>>, ApiError> {
    let data = state.courses().delete(&id).await.map_err(|e| {
        tracing::error!(error = %e, %id, "Error deleting course");
        ApiError::from(e)
    })?;

    Ok(Json(MessageWithData {
        message: "Course deleted successfully.".to_string(),
        data,
    }))
}
