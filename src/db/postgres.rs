use sqlx::{Pool, Postgres, Transaction};
use tracing::info;

use crate::db::models::{Account, SeedSummary};
use crate::db::schema::{SCHEMA_DROP, SCHEMA_INIT};
use crate::db::seed::{SEED_TEMPLATE, render_seed, seed_hashes};
use crate::error::MarketError;

pub type PgPool = Pool<Postgres>;

/// Table whose presence in the catalog marks the schema as initialized.
const MARKER_TABLE: &str = "users";

const MARKER_EXISTS_QUERY: &str = "SELECT EXISTS (
    SELECT FROM information_schema.tables
    WHERE table_schema = 'public' AND table_name = $1
)";

#[derive(Clone)]
pub struct MarketStore {
    pool: PgPool,
}

impl MarketStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the schema and insert seed data unless the marker table
    /// already exists, in which case this is a no-op. The whole call runs
    /// inside one transaction, so a failure partway leaves nothing behind.
    pub async fn initialize(&self) -> Result<(), MarketError> {
        let mut tx = self.pool.begin().await?;

        if marker_exists(&mut tx).await? {
            info!("database tables already exist, skipping init");
            return Ok(());
        }

        info!("no tables found, initializing database");
        create_and_seed(&mut tx).await?;
        tx.commit().await?;

        self.log_summary().await?;
        Ok(())
    }

    /// Unconditionally drop every table and enumerated type, then recreate
    /// and reseed. Same single-transaction guarantee as `initialize`.
    pub async fn reset(&self) -> Result<(), MarketError> {
        let mut tx = self.pool.begin().await?;

        info!("dropping all tables");
        run_batch(&mut tx, SCHEMA_DROP).await?;
        info!("all tables dropped");

        create_and_seed(&mut tx).await?;
        tx.commit().await?;

        self.log_summary().await?;
        info!("database reset complete");
        Ok(())
    }

    /// Whether the existence marker is present in the catalog.
    pub async fn is_initialized(&self) -> Result<bool, MarketError> {
        let exists: bool = sqlx::query_scalar(MARKER_EXISTS_QUERY)
            .bind(MARKER_TABLE)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// The seeded accounts, ordered by email.
    pub async fn accounts(&self) -> Result<Vec<Account>, MarketError> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT id, email, display_name, role, created_at FROM users ORDER BY email",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(accounts)
    }

    /// Row counts for the tables reported after seeding.
    pub async fn seed_summary(&self) -> Result<SeedSummary, MarketError> {
        let accounts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        let parts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parts")
            .fetch_one(&self.pool)
            .await?;
        let builds: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM builds")
            .fetch_one(&self.pool)
            .await?;
        Ok(SeedSummary {
            accounts,
            parts,
            builds,
        })
    }

    async fn log_summary(&self) -> Result<(), MarketError> {
        for account in self.accounts().await? {
            info!(
                id = account.id,
                email = %account.email,
                role = ?account.role,
                "seeded account"
            );
        }
        let summary = self.seed_summary().await?;
        info!(
            accounts = summary.accounts,
            parts = summary.parts,
            builds = summary.builds,
            "seed row counts"
        );
        Ok(())
    }
}

/// Shared tail of both bootstrap paths: schema creation, then the rendered
/// seed batch, in that order and in the same session.
async fn create_and_seed(tx: &mut Transaction<'_, Postgres>) -> Result<(), MarketError> {
    run_batch(tx, SCHEMA_INIT).await?;
    info!("schema created");

    let rendered = render_seed(SEED_TEMPLATE, &seed_hashes()?)?;
    run_batch(tx, &rendered).await?;
    info!("seed data inserted");
    Ok(())
}

async fn marker_exists(tx: &mut Transaction<'_, Postgres>) -> Result<bool, MarketError> {
    let exists: bool = sqlx::query_scalar(MARKER_EXISTS_QUERY)
        .bind(MARKER_TABLE)
        .fetch_one(&mut **tx)
        .await?;
    Ok(exists)
}

/// Execute a multi-statement batch one statement at a time, aborting on
/// the first failure. sqlx prepares single statements only, so the batch
/// is split on `;` here (none of our batches embed `;` in literals).
async fn run_batch(tx: &mut Transaction<'_, Postgres>, sql: &str) -> Result<(), MarketError> {
    for stmt in statements(sql) {
        sqlx::query(stmt).execute(&mut **tx).await?;
    }
    Ok(())
}

/// Split a batch into executable statements, skipping fragments that are
/// empty or contain only `--` comments.
fn statements(sql: &str) -> impl Iterator<Item = &str> {
    sql.split(';').map(str::trim).filter(|stmt| {
        stmt.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with("--")
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statements_skips_empty_and_comment_only_fragments() {
        let sql = "CREATE TABLE a (id INT);\n\n-- trailing note\n;CREATE TABLE b (id INT);\n";
        let stmts: Vec<&str> = statements(sql).collect();
        assert_eq!(stmts, vec!["CREATE TABLE a (id INT)", "CREATE TABLE b (id INT)"]);
    }

    #[test]
    fn schema_batches_split_into_expected_counts() {
        assert_eq!(statements(SCHEMA_INIT).count(), 22);
        assert_eq!(statements(SCHEMA_DROP).count(), 22);
    }

    #[test]
    fn seed_template_splits_without_losing_inserts() {
        let inserts = statements(crate::db::seed::SEED_TEMPLATE)
            .filter(|stmt| stmt.starts_with("INSERT INTO"))
            .count();
        assert_eq!(inserts, 7);
    }
}
