use std::sync::Arc;

use serde_json::Value;

use crate::domain::query::{Query, COURSES_TABLE};
use crate::domain::store::{RecordStore, StoreResult};
use crate::domain::NewCourse;

/// Course records backed by the `courses` table of a record store
pub struct CourseRepository {
    store: Arc<dyn RecordStore>,
}

impl CourseRepository {
    /// Creates a new CourseRepository
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> StoreResult<Vec<Value>> {
        self.store.execute(Query::select(COURSES_TABLE)).await
    }

    /// Inserts a course and returns the rows the store reports as inserted
    pub async fn create(&self, course: &NewCourse) -> StoreResult<Vec<Value>> {
        let row = serde_json::to_value(course)?;
        let query = Query::insert(COURSES_TABLE, vec![row]).returning();
        self.store.execute(query).await
    }

    /// Removes the matching rows; no match is not an error
    pub async fn delete(&self, id: &str) -> StoreResult<Vec<Value>> {
        let query = Query::delete(COURSES_TABLE).eq("id", id).returning();
        self.store.execute(query).await
    }
}
