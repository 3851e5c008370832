//! Course aggregates served by `/app/course-count` and `/app/avg-completion`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Number of assignments per course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CourseCount {
    #[serde(rename = "courseID", deserialize_with = "super::string_or_number")]
    pub course_id: String,
    #[serde(rename = "Course_Count")]
    pub course_count: i64,
}

/// Average completion percentage per course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CourseCompletion {
    #[serde(
        rename = "courseID",
        alias = "course_name",
        alias = "name",
        deserialize_with = "super::string_or_number"
    )]
    pub course_id: String,
    pub completion_percentage: f64,
}
