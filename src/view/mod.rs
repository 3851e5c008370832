//! Analytics view: loads the three dashboard datasets once and derives the
//! employee rankings from them.
//!
//! Each dataset has its own [`DatasetState`] slot. [`AnalyticsView::activate`]
//! polls the three fetches concurrently on the calling task; each fetch writes
//! only its own slot, so completion order does not matter and a failure in one
//! leaves the others untouched.

pub mod render;
pub mod source;

use crate::models::course::{CourseCompletion, CourseCount};
use crate::models::employee::Employee;
use crate::services::ranking;

pub use render::render;
pub use source::{DataSource, FetchError, HttpSource};

/// Lifecycle of one dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> DatasetState<T> {
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Failed(_))
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

impl<E> DatasetState<Vec<E>> {
    /// Rows to display; anything but `Loaded` shows as empty.
    pub fn rows(&self) -> &[E] {
        match self.loaded() {
            Some(rows) => rows,
            None => &[],
        }
    }
}

/// Whether the dashboard can be drawn yet. Only the employee dataset gates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Loaded,
}

pub struct AnalyticsView<S> {
    source: S,
    employees: DatasetState<Vec<Employee>>,
    course_counts: DatasetState<Vec<CourseCount>>,
    completion: DatasetState<Vec<CourseCompletion>>,
    top: Vec<Employee>,
    bottom: Vec<Employee>,
}

impl<S: DataSource> AnalyticsView<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            employees: DatasetState::Idle,
            course_counts: DatasetState::Idle,
            completion: DatasetState::Idle,
            top: Vec::new(),
            bottom: Vec::new(),
        }
    }

    /// Fetch all three datasets. Returns once every slot has settled.
    ///
    /// Runs at most once per view; later calls return immediately. Build a
    /// new view to load fresh data.
    pub async fn activate(&mut self) {
        if !matches!(self.employees, DatasetState::Idle) {
            return;
        }

        let Self {
            source,
            employees,
            course_counts,
            completion,
            top,
            bottom,
        } = self;
        let source = &*source;

        *employees = DatasetState::Loading;
        *course_counts = DatasetState::Loading;
        *completion = DatasetState::Loading;

        tokio::join!(
            async {
                *employees = settle("employee", source.employees().await);
                if let DatasetState::Loaded(list) = &*employees {
                    *top = ranking::top_employees(list);
                    *bottom = ranking::bottom_employees(list);
                }
            },
            async {
                *course_counts = settle("course count", source.course_counts().await);
            },
            async {
                *completion = settle("completion rate", source.completion().await);
            },
        );

        tracing::debug!(
            employees = self.employees.rows().len(),
            courses = self.course_counts.rows().len(),
            completion = self.completion.rows().len(),
            "analytics view settled"
        );
    }
}

impl<S> AnalyticsView<S> {
    pub fn phase(&self) -> Phase {
        if self.employees.is_settled() {
            Phase::Loaded
        } else {
            Phase::Loading
        }
    }

    /// True once every dataset has either loaded or failed.
    pub fn is_settled(&self) -> bool {
        self.employees.is_settled()
            && self.course_counts.is_settled()
            && self.completion.is_settled()
    }

    pub fn employees(&self) -> &DatasetState<Vec<Employee>> {
        &self.employees
    }

    pub fn course_counts(&self) -> &DatasetState<Vec<CourseCount>> {
        &self.course_counts
    }

    pub fn completion(&self) -> &DatasetState<Vec<CourseCompletion>> {
        &self.completion
    }

    pub fn top_employees(&self) -> &[Employee] {
        &self.top
    }

    pub fn bottom_employees(&self) -> &[Employee] {
        &self.bottom
    }
}

fn settle<T>(dataset: &'static str, result: Result<T, FetchError>) -> DatasetState<T> {
    match result {
        Ok(value) => DatasetState::Loaded(value),
        Err(e) => {
            tracing::error!(dataset, error = %e, "Error fetching {} data", dataset);
            DatasetState::Failed(e.to_string())
        }
    }
}
