use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rating {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub lecturer_id: i64,
    pub academic_year: String,
    pub semester: i16,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-course aggregate of a lecturer's ratings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseRatingSummary {
    pub course_id: i64,
    pub course_name: String,
    pub count: i64,
    pub average: f64,
}
