//! Session lookup.
//!
//! ARCHITECTURE
//! ============
//! Sessions are issued by the host app at login and stored in the shared
//! `sessions` table. The chat endpoints only validate the cookie token and
//! never create or extend sessions.

use sqlx::{PgPool, Row};
use uuid::Uuid;

/// User row returned from session validation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionUser {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login email.
    pub email: String,
}

/// Validate a session token and return the associated user.
///
/// Expired sessions are treated as absent.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT u.id, u.email
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    row.map(|r| Ok(SessionUser { id: r.try_get("id")?, email: r.try_get("email")? }))
        .transpose()
}
