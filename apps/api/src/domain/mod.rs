// Domain layer module exports
// Write payloads and the query port of the external record store

pub mod course;
pub mod query;
pub mod store;
pub mod student;

// Re-export main types for convenience
pub use course::NewCourse;
pub use store::{RecordStore, StoreError, StoreResult};
pub use student::{NewStudent, StudentChanges, StudentFilter};
