//! Seed script for development — populates a fresh database with sample data
//! and prints a bearer token for the dashboard.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` and `JWT_SECRET` (or `JWT_SECRETS_FILE`) environment
//! variables (reads .env). Set `SEED_EMPLOYEES_CSV` to load employees from a
//! CSV file with an `empID,name,performance_rate` header instead of the
//! built-in sample.

use anyhow::Context;
use chrono::{Duration, Utc};
use learnboard::config::SecretSource;
use learnboard::services::auth::{Claims, KeyRing};
use serde::Deserialize;
use serde_json::{json, Map};
use sqlx::PgPool;

/// Lifetime of the printed development token.
const DEV_TOKEN_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
struct EmployeeRow {
    #[serde(rename = "empID")]
    emp_id: String,
    name: String,
    performance_rate: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    learnboard::db::migrate(&pool).await?;

    println!("=== learnboard Seed Script ===");

    let employees = match std::env::var("SEED_EMPLOYEES_CSV") {
        Ok(path) => read_employees_csv(&path)?,
        Err(_) => sample_employees(),
    };
    seed_employees(&pool, &employees).await?;
    seed_courses(&pool).await?;
    seed_assignments(&pool).await?;

    let token = dev_token()?;

    println!("\n=== Seed complete! ===");
    println!("Dashboard token (valid {DEV_TOKEN_HOURS}h):");
    println!("DASHBOARD_TOKEN={token}");

    Ok(())
}

fn sample_employees() -> Vec<EmployeeRow> {
    [
        // Aggregate row: shows up in the top ranking, never in the bottom one.
        ("EMP000", "All Staff (aggregate)", 61.25),
        ("EMP001", "Amara Okafor", 92.40),
        ("EMP002", "Bruno Teixeira", 78.15),
        ("EMP003", "Chen Wei", 88.00),
        ("EMP004", "Dara Lindqvist", 45.60),
        ("EMP005", "Elif Yilmaz", 67.33),
        ("EMP006", "Farid Haddad", 33.90),
        ("EMP007", "Greta Novak", 71.05),
        ("EMP008", "Hiro Tanaka", 55.50),
        ("EMP009", "Ines Duarte", 96.75),
        ("EMP010", "Jonas Berg", 40.10),
    ]
    .into_iter()
    .map(|(id, name, rate)| EmployeeRow {
        emp_id: id.to_string(),
        name: name.to_string(),
        performance_rate: rate,
    })
    .collect()
}

fn read_employees_csv(path: &str) -> anyhow::Result<Vec<EmployeeRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<EmployeeRow>, csv::Error>>()?;
    println!("[read] {} employees from {path}", rows.len());
    Ok(rows)
}

async fn seed_employees(pool: &PgPool, employees: &[EmployeeRow]) -> anyhow::Result<()> {
    for emp in employees {
        sqlx::query(
            "INSERT INTO employees (emp_id, name, performance_rate)
             VALUES ($1, $2, $3::float8::numeric)
             ON CONFLICT (emp_id) DO UPDATE
             SET name = EXCLUDED.name, performance_rate = EXCLUDED.performance_rate",
        )
        .bind(&emp.emp_id)
        .bind(&emp.name)
        .bind(emp.performance_rate)
        .execute(pool)
        .await?;
    }

    println!("[done] Upserted {} employees", employees.len());
    Ok(())
}

async fn seed_courses(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Courses already exist ({count})");
        return Ok(());
    }

    let courses = [
        ("CRS101", "Workplace Safety"),
        ("CRS102", "Data Privacy Essentials"),
        ("CRS201", "Effective Feedback"),
        ("CRS202", "Project Estimation"),
        ("CRS301", "Incident Response"),
        ("CRS302", "Leading Remote Teams"),
    ];

    for (id, name) in courses {
        sqlx::query("INSERT INTO courses (course_id, course_name) VALUES ($1, $2)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await?;
    }

    println!("[done] Created {} sample courses", courses.len());
    Ok(())
}

/// Assign a deterministic subset of courses to every real employee.
async fn seed_assignments(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM course_assignments")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Assignments already exist ({count})");
        return Ok(());
    }

    let emp_ids: Vec<String> =
        sqlx::query_scalar("SELECT emp_id FROM employees WHERE emp_id <> 'EMP000' ORDER BY emp_id")
            .fetch_all(pool)
            .await?;
    let course_ids: Vec<String> = sqlx::query_scalar("SELECT course_id FROM courses ORDER BY course_id")
        .fetch_all(pool)
        .await?;

    let mut inserted = 0u64;
    for (i, emp_id) in emp_ids.iter().enumerate() {
        for (j, course_id) in course_ids.iter().enumerate() {
            if (i + j) % 3 == 0 {
                continue;
            }
            let completion = ((i * 31 + j * 17) % 101) as f64;
            inserted += sqlx::query(
                "INSERT INTO course_assignments (course_id, emp_id, completion_percentage)
                 VALUES ($1, $2, $3::float8::numeric)
                 ON CONFLICT DO NOTHING",
            )
            .bind(course_id)
            .bind(emp_id)
            .bind(completion)
            .execute(pool)
            .await?
            .rows_affected();
        }
    }

    println!("[done] Created {inserted} course assignments");
    Ok(())
}

fn dev_token() -> anyhow::Result<String> {
    let keys = KeyRing::load(SecretSource::from_env()?, 0)?;
    let now = Utc::now();
    let mut claims = Map::new();
    claims.insert("sub".to_string(), json!("seed-admin"));
    claims.insert("role".to_string(), json!("admin"));
    claims.insert("iat".to_string(), json!(now.timestamp()));
    claims.insert(
        "exp".to_string(),
        json!((now + Duration::hours(DEV_TOKEN_HOURS)).timestamp()),
    );
    Ok(keys.sign(&Claims::from(claims))?)
}
