//! Course catalogue reads used to ground AI answers.
//!
//! Courses are owned and edited by the host course-management app; this
//! service only reads them for the signed-in user.

use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Semesters shown on the dashboard.
pub const SEMESTERS: std::ops::RangeInclusive<i32> = 1..=8;

/// The prompt-relevant columns of one `courses` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub semester: i32,
    pub name: String,
    pub description: Option<String>,
    pub credits: i32,
}

fn course_from_row(row: &sqlx::postgres::PgRow) -> Result<Course, sqlx::Error> {
    Ok(Course {
        semester: row.try_get("semester")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        credits: row.try_get("credits")?,
    })
}

/// All of a user's courses, ordered by semester then name.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_courses(pool: &PgPool, user_id: Uuid) -> Result<Vec<Course>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT semester, name, description, credits
         FROM courses
         WHERE user_id = $1
         ORDER BY semester, name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    rows.iter().map(course_from_row).collect()
}

/// A user's courses for one semester, ordered by name.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_semester_courses(pool: &PgPool, user_id: Uuid, semester: i32) -> Result<Vec<Course>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT semester, name, description, credits
         FROM courses
         WHERE user_id = $1 AND semester = $2
         ORDER BY name",
    )
    .bind(user_id)
    .bind(semester)
    .fetch_all(pool)
    .await?;
    rows.iter().map(course_from_row).collect()
}

/// Parse a semester form value, accepting only dashboard semesters.
#[must_use]
pub fn parse_semester(raw: &str) -> Option<i32> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|n| SEMESTERS.contains(n))
}

#[cfg(test)]
#[path = "courses_test.rs"]
mod tests;
