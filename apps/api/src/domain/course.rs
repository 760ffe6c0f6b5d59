use serde::Serialize;

/// Row payload for inserting a course
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCourse {
    pub name: String,
}
