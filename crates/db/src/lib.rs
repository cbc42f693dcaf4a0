//! Persistence layer: connection pool, migrations, models, and repositories.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Database connection settings.
///
/// | Env var              | Default     |
/// |----------------------|-------------|
/// | `DATABASE_URL`       | (assembled) |
/// | `DB_HOST`            | `localhost` |
/// | `DB_PORT`            | `5432`      |
/// | `DB_USER`            | `postgres`  |
/// | `DB_PASSWORD`        | (empty)     |
/// | `DB_NAME`            | `petstore`  |
/// | `DB_MAX_CONNECTIONS` | `20`        |
///
/// `DATABASE_URL` wins when set; otherwise the URL is assembled from the
/// individual `DB_*` parts.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            let host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".into());
            let port = std::env::var("DB_PORT").unwrap_or_else(|_| "5432".into());
            let user = std::env::var("DB_USER").unwrap_or_else(|_| "postgres".into());
            let password = std::env::var("DB_PASSWORD").unwrap_or_default();
            let name = std::env::var("DB_NAME").unwrap_or_else(|_| "petstore".into());
            build_url(&host, &port, &user, &password, &name)
        });

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            url,
            max_connections,
        }
    }
}

fn build_url(host: &str, port: &str, user: &str, password: &str, name: &str) -> String {
    if password.is_empty() {
        format!("postgres://{user}@{host}:{port}/{name}")
    } else {
        format!("postgres://{user}:{password}@{host}:{port}/{name}")
    }
}

/// Create a connection pool from the given settings.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
