use mimalloc::MiMalloc;
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use rigmarket::db::MarketStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cfg = &rigmarket::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let reset = std::env::args()
        .skip(1)
        .any(|arg| arg == "--reset" || arg == "-r");

    info!(
        database_url = %cfg.database_url,
        loglevel = %cfg.loglevel,
        reset,
        "starting database bootstrap"
    );

    let pool = match PgPoolOptions::new()
        .max_connections(5)
        .connect(&cfg.database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "failed to connect to database");
            std::process::exit(1);
        }
    };

    let store = MarketStore::new(pool.clone());
    let outcome = if reset {
        store.reset().await
    } else {
        store.initialize().await
    };

    pool.close().await;

    if let Err(e) = outcome {
        error!(error = %e, "database bootstrap failed");
        std::process::exit(1);
    }
}
