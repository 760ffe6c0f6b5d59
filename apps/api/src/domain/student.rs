use chrono::{DateTime, Utc};
use serde::Serialize;

/// Row payload for inserting a student
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStudent {
    pub student_name: String,
    pub cohort: String,
    pub courses: Vec<String>,
    pub date_joined: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
    pub status: Option<String>,
}

impl NewStudent {
    /// Builds the insert payload, stamping both timestamps with `now`
    ///
    /// There is no login tracking, so `last_login` starts out equal to
    /// `date_joined`.
    pub fn enroll(
        student_name: String,
        cohort: String,
        courses: Vec<String>,
        status: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            student_name,
            cohort,
            courses,
            date_joined: now,
            last_login: now,
            status,
        }
    }
}

/// Column overwrite for an existing student
///
/// All four columns are always sent; `None` becomes null in storage.
/// Timestamps are not part of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StudentChanges {
    pub student_name: Option<String>,
    pub cohort: Option<String>,
    pub courses: Option<Vec<String>>,
    pub status: Option<String>,
}

/// Optional narrowing for a student listing, combined with logical AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    /// Keep students whose course list contains this name
    pub course: Option<String>,
    /// Keep students whose cohort equals this label
    pub academic_year: Option<String>,
}
