use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::api::errors::ApiError;
use crate::api::middleware::ApiJson;
use crate::api::state::AppState;
use crate::domain::{NewStudent, StudentChanges, StudentFilter};

use super::{MessageResponse, MessageWithData};

/// Query string accepted by the student listing
#[derive(Debug, Default, Deserialize)]
pub struct ListStudentsQuery {
    pub course: Option<String>,
    pub academic_year: Option<String>,
}

impl From<ListStudentsQuery> for StudentFilter {
    fn from(query: ListStudentsQuery) -> Self {
        Self {
            course: query.course,
            academic_year: query.academic_year,
        }
    }
}

/// Request body for creating a student
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub student_name: String,
    pub cohort: String,
    #[serde(default)]
    pub courses: Vec<String>,
    pub status: Option<String>,
}

/// Request body for updating a student
///
/// Fields left out are written as null; there is no partial update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub student_name: Option<String>,
    pub cohort: Option<String>,
    pub courses: Option<Vec<String>>,
    pub status: Option<String>,
}

impl From<UpdateStudentRequest> for StudentChanges {
    fn from(req: UpdateStudentRequest) -> Self {
        Self {
            student_name: req.student_name,
            cohort: req.cohort,
            courses: req.courses,
            status: req.status,
        }
    }
}

/// List students, optionally filtered by course and academic year
///
/// GET /students
pub async fn list_students(
    State(state): State<AppState>,
    Query(query): Query<ListStudentsQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let filter = StudentFilter::from(query);
    let students = state.students().list(&filter).await.map_err(|e| {
        tracing::error!(error = %e, ?filter, "Error fetching students");
        ApiError::from(e)
    })?;

    Ok(Json(students))
}

/// Get a single student by ID
///
/// GET /students/:id
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let student = state.students().find_by_id(&id).await.map_err(|e| {
        tracing::error!(error = %e, %id, "Error fetching student");
        ApiError::from(e)
    })?;

    Ok(Json(student))
}

/// Add a new student
///
/// POST /students
pub async fn create_student(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateStudentRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let student = NewStudent::enroll(
        req.student_name,
        req.cohort,
        req.courses,
        req.status,
        Utc::now(),
    );

    state.students().create(&student).await.map_err(|e| {
        tracing::error!(error = %e, "Error creating student");
        ApiError::from(e)
    })?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Student details successfully created.".to_string(),
        }),
    ))
}

/// Overwrite a student's name, cohort, courses and status
///
/// PUT /students/:id
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateStudentRequest>,
) -> Result<Json<MessageWithData<Vec<Value>>>, ApiError> {
    let changes = StudentChanges::from(req);
    let data = state
        .students()
        .update(&id, &changes)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %id, "Error updating student");
            ApiError::from(e)
        })?;

    Ok(Json(MessageWithData {
        message: "Student details successfully updated.".to_string(),
        data,
    }))
}

/// Delete a student
///
/// DELETE /students/:id
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageWithData<Vec<Value>>>, ApiError> {
    let data = state.students().delete(&id).await.map_err(|e| {
        tracing::error!(error = %e, %id, "Error deleting student");
        ApiError::from(e)
    })?;

    Ok(Json(MessageWithData {
        message: "Student deleted successfully.".to_string(),
        data,
    }))
}
