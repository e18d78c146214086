pub mod config;
pub mod db;
pub mod error;

pub use db::{MarketStore, PgPool};
pub use error::MarketError;
