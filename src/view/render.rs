//! Plain-text rendering of the analytics view.

use std::fmt;

use crate::models::employee::Employee;
use crate::services::ranking::{self, format_rate};

use super::{AnalyticsView, Phase};

/// Width of a full bar in characters.
const BAR_WIDTH: usize = 40;

/// Labels longer than this are truncated.
const MAX_LABEL: usize = 24;

pub const LOADING: &str = "Loading...";

/// Render the whole dashboard, or the loading placeholder while the employee
/// dataset is still outstanding.
pub fn render<S>(view: &AnalyticsView<S>) -> String {
    Dashboard(view).to_string()
}

struct Dashboard<'a, S>(&'a AnalyticsView<S>);

impl<S> fmt::Display for Dashboard<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        if view.phase() == Phase::Loading {
            return writeln!(f, "{LOADING}");
        }

        // Highest performers first, same as the top ranking.
        let employees = ranking::by_rate_descending(view.employees().rows());
        let rows: Vec<Bar> = employees
            .iter()
            .map(|e| Bar::new(&e.name, e.performance_rate, format_rate(e.performance_rate)))
            .collect();
        panel(f, "Employee Performance Analytics", &rows, percent_scale(&rows))?;

        let rows: Vec<Bar> = view
            .course_counts()
            .rows()
            .iter()
            .map(|c| Bar::new(&c.course_id, c.course_count as f64, c.course_count.to_string()))
            .collect();
        let max = rows.iter().map(|r| r.value).fold(0.0, f64::max);
        panel(f, "Most Assigned Courses", &rows, max)?;

        let rows: Vec<Bar> = view
            .completion()
            .rows()
            .iter()
            .map(|c| {
                Bar::new(
                    &c.course_id,
                    c.completion_percentage,
                    format_rate(c.completion_percentage),
                )
            })
            .collect();
        panel(f, "Completion Rate of Courses", &rows, percent_scale(&rows))?;

        ranked_list(f, "Top 5 Employees by Performance", view.top_employees())?;
        ranked_list(f, "Bottom 5 Employees by Performance", view.bottom_employees())
    }
}

struct Bar {
    label: String,
    value: f64,
    display: String,
}

impl Bar {
    fn new(label: &str, value: f64, display: String) -> Self {
        Self {
            label: label.chars().take(MAX_LABEL).collect(),
            value,
            display,
        }
    }
}

/// Percentages are drawn against 100 unless some value overshoots it.
fn percent_scale(rows: &[Bar]) -> f64 {
    rows.iter().map(|r| r.value).fold(100.0, f64::max)
}

fn panel(f: &mut fmt::Formatter<'_>, title: &str, rows: &[Bar], max: f64) -> fmt::Result {
    writeln!(f, "{title}")?;
    if rows.is_empty() {
        writeln!(f, "  (no data)")?;
        return writeln!(f);
    }

    let width = rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
    for row in rows {
        let filled = bar_length(row.value, max);
        writeln!(
            f,
            "  {label:<width$} |{bar:<BAR_WIDTH$}| {display}",
            label = row.label,
            bar = "█".repeat(filled),
            display = row.display,
        )?;
    }
    writeln!(f)
}

fn bar_length(value: f64, max: f64) -> usize {
    if max.is_nan() || value.is_nan() || max <= 0.0 || value <= 0.0 {
        return 0;
    }
    let scaled = (value / max * BAR_WIDTH as f64).round();
    (scaled as usize).min(BAR_WIDTH)
}

fn ranked_list(f: &mut fmt::Formatter<'_>, title: &str, employees: &[Employee]) -> fmt::Result {
    writeln!(f, "{title}")?;
    for employee in employees {
        writeln!(
            f,
            "  - {} - Performance Rate: {}",
            employee.name,
            format_rate(employee.performance_rate)
        )?;
    }
    writeln!(f)
}
