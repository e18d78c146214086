use std::sync::LazyLock;

use figment::{Figment, providers::Env};
use serde::Deserialize;

/// Runtime configuration, extracted once from the process environment.
///
/// `DATABASE_URL` is required; `LOGLEVEL` falls back to `info`.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

fn default_loglevel() -> String {
    "info".to_string()
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::new()
        .merge(Env::raw())
        .extract()
        .expect("invalid configuration: DATABASE_URL must be set")
});
