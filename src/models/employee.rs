//! Employee record as served by `/app/employee`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// Placeholder row the data source uses for aggregates; never a real person.
pub const SENTINEL_EMP_ID: &str = "EMP000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    #[serde(rename = "empID", deserialize_with = "super::string_or_number")]
    pub emp_id: String,
    pub name: String,
    /// Percentage, nominally 0..=100.
    pub performance_rate: f64,
    /// Columns the dashboard does not interpret but passes through.
    #[serde(flatten, default)]
    #[sqlx(skip)]
    pub extra: Map<String, Value>,
}

impl Employee {
    pub fn new(emp_id: impl Into<String>, name: impl Into<String>, performance_rate: f64) -> Self {
        Self {
            emp_id: emp_id.into(),
            name: name.into(),
            performance_rate,
            extra: Map::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.emp_id == SENTINEL_EMP_ID
    }
}
