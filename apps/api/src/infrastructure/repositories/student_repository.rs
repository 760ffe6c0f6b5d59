use std::sync::Arc;

use serde_json::Value;

use crate::domain::query::{Query, STUDENTS_TABLE};
use crate::domain::store::{RecordStore, StoreResult};
use crate::domain::{NewStudent, StudentChanges, StudentFilter};

use super::single_row;

/// Student records backed by the `students` table of a record store
///
/// Each method issues exactly one query and awaits it. Rows come back as
/// the store produced them, columns and formatting untouched.
pub struct StudentRepository {
    store: Arc<dyn RecordStore>,
}

impl StudentRepository {
    /// Creates a new StudentRepository
    ///
    /// # Arguments
    /// * `store` - Shared handle to the record store
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Builds the listing query for a filter
    ///
    /// `course` becomes a containment predicate on the course list,
    /// `academic_year` an equality predicate on the cohort. Empty values
    /// are treated as absent.
    pub fn list_query(filter: &StudentFilter) -> Query {
        let mut query = Query::select(STUDENTS_TABLE);

        if let Some(course) = filter.course.as_deref().filter(|c| !c.is_empty()) {
            query = query.contains("courses", [course]);
        }
        if let Some(year) = filter.academic_year.as_deref().filter(|y| !y.is_empty()) {
            query = query.eq("cohort", year);
        }

        query
    }

    pub async fn list(&self, filter: &StudentFilter) -> StoreResult<Vec<Value>> {
        self.store.execute(Self::list_query(filter)).await
    }

    /// Fetches exactly one student; zero or several matches is an error
    pub async fn find_by_id(&self, id: &str) -> StoreResult<Value> {
        let query = Query::select(STUDENTS_TABLE).eq("id", id).single();
        let rows = self.store.execute(query).await?;
        single_row(rows)
    }

    /// Inserts a student without asking for the row back
    pub async fn create(&self, student: &NewStudent) -> StoreResult<()> {
        let row = serde_json::to_value(student)?;
        self.store
            .execute(Query::insert(STUDENTS_TABLE, vec![row]))
            .await?;
        Ok(())
    }

    /// Overwrites name, cohort, courses and status of the matching rows
    pub async fn update(&self, id: &str, changes: &StudentChanges) -> StoreResult<Vec<Value>> {
        let payload = serde_json::to_value(changes)?;
        let query = Query::update(STUDENTS_TABLE, payload)
            .eq("id", id)
            .returning();
        self.store.execute(query).await
    }

    /// Removes the matching rows; no match is not an error
    pub async fn delete(&self, id: &str) -> StoreResult<Vec<Value>> {
        let query = Query::delete(STUDENTS_TABLE).eq("id", id).returning();
        self.store.execute(query).await
    }

    /// Reads at most one row, used to check connectivity
    pub async fn ping(&self) -> StoreResult<()> {
        self.store
            .execute(Query::select(STUDENTS_TABLE).limit(1))
            .await?;
        Ok(())
    }
}
