//! Where the dashboard gets its three datasets from.

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::config::DashboardConfig;
use crate::models::course::{CourseCompletion, CourseCount};
use crate::models::employee::Employee;

pub const EMPLOYEE_PATH: &str = "/app/employee";
pub const COURSE_COUNT_PATH: &str = "/app/course-count";
pub const COMPLETION_PATH: &str = "/app/avg-completion";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[cfg(test)]
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to the analytics datasets.
pub trait DataSource: Send + Sync {
    fn employees(&self) -> impl Future<Output = Result<Vec<Employee>, FetchError>> + Send;

    fn course_counts(&self) -> impl Future<Output = Result<Vec<CourseCount>, FetchError>> + Send;

    fn completion(&self) -> impl Future<Output = Result<Vec<CourseCompletion>, FetchError>> + Send;
}

/// Fetches datasets from a running learnboard API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSource {
    pub fn new(config: &DashboardConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let mut request = self.http.get(format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

impl DataSource for HttpSource {
    async fn employees(&self) -> Result<Vec<Employee>, FetchError> {
        self.get_json(EMPLOYEE_PATH).await
    }

    async fn course_counts(&self) -> Result<Vec<CourseCount>, FetchError> {
        self.get_json(COURSE_COUNT_PATH).await
    }

    async fn completion(&self) -> Result<Vec<CourseCompletion>, FetchError> {
        self.get_json(COMPLETION_PATH).await
    }
}
