// Repository implementations (data access layer)
// Map record operations onto queries against the injected record store

pub mod course_repository;
pub mod student_repository;

pub use course_repository::CourseRepository;
pub use student_repository::StudentRepository;

use serde_json::Value;

use crate::domain::store::{StoreError, StoreResult, SINGLE_ROW_MISMATCH};

/// Takes the only row of a single-row query
///
/// Rows are handed back exactly as the store sent them.
fn single_row(rows: Vec<Value>) -> StoreResult<Value> {
    let mut rows = rows.into_iter();
    match (rows.next(), rows.next()) {
        (Some(row), None) => Ok(row),
        _ => Err(StoreError::rejected(406, SINGLE_ROW_MISMATCH)),
    }
}
