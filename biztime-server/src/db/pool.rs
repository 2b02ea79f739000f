//! Database gateway: connection pool lifecycle and repository access
//!
//! `Database` is created once at startup, cloned into router state,
//! and closed explicitly on shutdown.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::repos::{CompanyRepo, InvoiceRepo};

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a request waits for a free connection before failing.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the Postgres pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Shared handle to the database. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect eagerly, failing if the database is unreachable.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let db = Database::connect(&DatabaseConfig::new("postgres://localhost/biztime")).await?;
    /// ```
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = config.pool_options().connect(&config.url).await?;
        tracing::info!(
            max_connections = config.max_connections,
            "database pool ready"
        );
        Ok(Self { pool })
    }

    /// Build the pool without opening a connection.
    ///
    /// Connections are established on first use.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = config.pool_options().connect_lazy(&config.url)?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn companies(&self) -> CompanyRepo<'_> {
        CompanyRepo::new(&self.pool)
    }

    pub fn invoices(&self) -> InvoiceRepo<'_> {
        InvoiceRepo::new(&self.pool)
    }

    /// Round-trip a trivial query to confirm the database answers.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Wait for in-flight queries, then close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = DatabaseConfig::new("postgres://localhost/biztime");
        assert_eq!(config.url, "postgres://localhost/biztime");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
    }

    fn test_database_url() -> String {
        std::env::var("TEST_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .expect("TEST_DATABASE_URL or DATABASE_URL required")
    }

    #[tokio::test]
    async fn lazy_pool_opens_no_connections() {
        let config = DatabaseConfig::new("postgres://localhost:1/biztime_unreachable");
        let db = Database::connect_lazy(&config).expect("lazy pool");
        assert_eq!(db.pool().size(), 0);
    }

    #[tokio::test]
    async fn ping_fails_when_database_is_unreachable() {
        let config = DatabaseConfig {
            acquire_timeout: Duration::from_millis(200),
            ..DatabaseConfig::new("postgres://localhost:1/biztime_unreachable")
        };
        let db = Database::connect_lazy(&config).expect("lazy pool");
        assert!(db.ping().await.is_err());
    }

    // Integration tests require a real database
    // Run with: TEST_DATABASE_URL=postgres://... cargo test -p biztime-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let db = Database::connect(&DatabaseConfig::new(test_database_url()))
            .await
            .expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(db.pool())
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
        db.ping().await.expect("ping failed");
        db.close().await;
        assert!(db.pool().is_closed());
    }
}
