use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum MarketError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Password hashing error: {0}")]
    HashingError(#[from] bcrypt::BcryptError),

    #[error("Seed template contains unresolved placeholder: {0}")]
    UnresolvedPlaceholder(String),
}
