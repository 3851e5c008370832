//! Analytics data routes consumed by the dashboard.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::course::{CourseCompletion, CourseCount};
use crate::models::employee::Employee;
use crate::services::catalog;
use crate::AppState;

/// GET /app/employee — every employee with their performance rate.
pub async fn employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(catalog::list_employees(&state.db).await?))
}

/// GET /app/course-count — assignment count per course.
pub async fn course_counts(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseCount>>, AppError> {
    Ok(Json(catalog::course_counts(&state.db).await?))
}

/// GET /app/avg-completion — average completion rate per course.
pub async fn average_completion(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseCompletion>>, AppError> {
    Ok(Json(catalog::average_completion(&state.db).await?))
}
