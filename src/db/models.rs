use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The `user_role` enumerated type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    Builder,
}

/// A row of the `users` table, as surfaced after seeding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Account {
    pub id: i32,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Row counts reported after a successful bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    pub accounts: i64,
    pub parts: i64,
    pub builds: i64,
}
