use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,                      // monotonic surrogate key
    pub username: String,             // unique, exact match
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 hash, not exposed in JSON
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub tutor_name: Option<String>,   // only written by select-subject
    pub created_at: OffsetDateTime,
}

/// Fields written together by profile selection.
#[derive(Debug, Clone, Copy)]
pub struct ProfileUpdate<'a> {
    pub grade: &'a str,
    pub subject: &'a str,
    pub tutor_name: &'a str,
}
