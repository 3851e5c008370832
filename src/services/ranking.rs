//! Top/bottom employee rankings derived from the fetched employee list.

use std::cmp::Ordering;

use crate::models::employee::Employee;

/// Number of entries in each ranked list.
pub const RANK_SIZE: usize = 5;

/// Best performers first. Ties keep fetch order; the sentinel row is included.
pub fn top_employees(employees: &[Employee]) -> Vec<Employee> {
    let mut ranked = sorted_by_rate(employees.iter(), descending);
    ranked.truncate(RANK_SIZE);
    ranked
}

/// Weakest performers first, excluding the `EMP000` sentinel.
pub fn bottom_employees(employees: &[Employee]) -> Vec<Employee> {
    let mut ranked = sorted_by_rate(employees.iter().filter(|e| !e.is_sentinel()), ascending);
    ranked.truncate(RANK_SIZE);
    ranked
}

/// Stable sort of all employees by rate, highest first.
pub fn by_rate_descending(employees: &[Employee]) -> Vec<Employee> {
    sorted_by_rate(employees.iter(), descending)
}

/// Percentage rendered with two decimals, e.g. `83.46%`.
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.2}%")
}

fn sorted_by_rate<'a>(
    employees: impl Iterator<Item = &'a Employee>,
    order: fn(f64, f64) -> Ordering,
) -> Vec<Employee> {
    let mut list: Vec<Employee> = employees.cloned().collect();
    // `sort_by` is stable, which is what keeps equal rates in fetch order.
    list.sort_by(|a, b| order(a.performance_rate, b.performance_rate));
    list
}

fn ascending(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

fn descending(a: f64, b: f64) -> Ordering {
    ascending(b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emp(id: &str, name: &str, rate: f64) -> Employee {
        Employee::new(id, name, rate)
    }

    fn names(list: &[Employee]) -> Vec<&str> {
        list.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn sentinel_counts_for_top_but_not_bottom() {
        let employees = vec![
            emp("E1", "A", 90.0),
            emp("EMP000", "Agg", 50.0),
            emp("E2", "B", 10.0),
        ];

        assert_eq!(names(&top_employees(&employees)), vec!["A", "Agg", "B"]);
        assert_eq!(names(&bottom_employees(&employees)), vec!["B", "A"]);
    }

    #[test]
    fn rankings_are_capped_and_ordered() {
        let employees: Vec<Employee> = (0..12)
            .map(|i| emp(&format!("E{i}"), &format!("N{i}"), ((i * 37) % 100) as f64))
            .collect();

        let top = top_employees(&employees);
        assert_eq!(top.len(), RANK_SIZE);
        assert!(top
            .windows(2)
            .all(|w| w[0].performance_rate >= w[1].performance_rate));
        let max = employees
            .iter()
            .map(|e| e.performance_rate)
            .fold(f64::MIN, f64::max);
        assert_eq!(top[0].performance_rate, max);

        let bottom = bottom_employees(&employees);
        assert_eq!(bottom.len(), RANK_SIZE);
        assert!(bottom
            .windows(2)
            .all(|w| w[0].performance_rate <= w[1].performance_rate));
    }

    #[test]
    fn ties_keep_fetch_order() {
        let employees = vec![
            emp("E1", "first", 70.0),
            emp("E2", "second", 70.0),
            emp("E3", "third", 80.0),
            emp("E4", "fourth", 70.0),
        ];

        assert_eq!(
            names(&top_employees(&employees)),
            vec!["third", "first", "second", "fourth"]
        );
        assert_eq!(
            names(&bottom_employees(&employees)),
            vec!["first", "second", "fourth", "third"]
        );
    }

    #[test]
    fn nan_rate_sorts_to_a_fixed_end() {
        let employees = vec![
            emp("E1", "mid", 50.0),
            emp("E2", "broken", f64::NAN),
            emp("E3", "high", 90.0),
            emp("E4", "low", 10.0),
        ];

        assert_eq!(
            names(&top_employees(&employees)),
            vec!["broken", "high", "mid", "low"]
        );
        assert_eq!(
            names(&bottom_employees(&employees)),
            vec!["low", "mid", "high", "broken"]
        );
    }

    #[test]
    fn only_sentinel_gives_empty_bottom() {
        let employees = vec![emp("EMP000", "Agg", 42.0)];
        assert_eq!(top_employees(&employees).len(), 1);
        assert!(bottom_employees(&employees).is_empty());
    }

    #[test]
    fn empty_input() {
        assert!(top_employees(&[]).is_empty());
        assert!(bottom_employees(&[]).is_empty());
    }

    #[test]
    fn input_is_not_reordered() {
        let employees = vec![emp("E1", "low", 1.0), emp("E2", "high", 99.0)];
        let _ = top_employees(&employees);
        assert_eq!(names(&employees), vec!["low", "high"]);
    }

    #[test]
    fn rate_formatting() {
        assert_eq!(format_rate(83.456), "83.46%");
        assert_eq!(format_rate(90.0), "90.00%");
        assert_eq!(format_rate(0.5), "0.50%");
    }
}
