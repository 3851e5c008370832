//! Read-only analytics queries backing the `/app/*` endpoints.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::course::{CourseCompletion, CourseCount};
use crate::models::employee::Employee;

/// All employees, including the `EMP000` aggregate row, ordered by id.
pub async fn list_employees(pool: &PgPool) -> Result<Vec<Employee>, AppError> {
    let rows = sqlx::query_as::<_, Employee>(
        r#"
        SELECT emp_id, name, performance_rate::float8 AS performance_rate
        FROM employees
        ORDER BY emp_id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Assignment count per course, most assigned first.
pub async fn course_counts(pool: &PgPool) -> Result<Vec<CourseCount>, AppError> {
    let rows = sqlx::query_as::<_, CourseCount>(
        r#"
        SELECT course_id, COUNT(*)::bigint AS course_count
        FROM course_assignments
        GROUP BY course_id
        ORDER BY course_count DESC, course_id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Average completion percentage per course.
pub async fn average_completion(pool: &PgPool) -> Result<Vec<CourseCompletion>, AppError> {
    let rows = sqlx::query_as::<_, CourseCompletion>(
        r#"
        SELECT course_id, COALESCE(AVG(completion_percentage), 0)::float8 AS completion_percentage
        FROM course_assignments
        GROUP BY course_id
        ORDER BY course_id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
