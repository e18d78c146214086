//! Database module: schema, seed data and bootstrap for the marketplace.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL creating and dropping the schema (PostgreSQL)
//! - `seed.rs`: seed statement template, default credentials and rendering
//! - `postgres.rs`: the bootstrap orchestrator running against a pool

pub mod models;
pub mod postgres;
pub mod schema;
pub mod seed;

pub use models::{Account, SeedSummary, UserRole};
pub use postgres::{MarketStore, PgPool};
pub use schema::{SCHEMA_DROP, SCHEMA_INIT};
