use std::sync::Arc;

use crate::domain::RecordStore;
use crate::infrastructure::repositories::{CourseRepository, StudentRepository};

/// Shared router state: the process-wide record store handle
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<dyn RecordStore> {
        Arc::clone(&self.store)
    }

    pub fn students(&self) -> StudentRepository {
        StudentRepository::new(self.store())
    }

    pub fn courses(&self) -> CourseRepository {
        CourseRepository::new(self.store())
    }
}
