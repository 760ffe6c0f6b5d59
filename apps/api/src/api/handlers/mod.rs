// HTTP handlers for the record endpoints

pub mod courses;
pub mod health;
pub mod students;

use serde::Serialize;

/// Confirmation without data
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Confirmation with the rows the store echoed back
#[derive(Debug, Serialize)]
pub struct MessageWithData<T> {
    pub message: String,
    pub data: T,
}
