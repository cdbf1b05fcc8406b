//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  Process Startup                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Open pool, ping, create schema          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ Concurrent access from request handlers                        │
//! │       ▼                                                                 │
//! │  Request 1 ──► uses Conn1                                              │
//! │  Request 2 ──► uses Conn2                                              │
//! │                                                                         │
//! │  Process Shutdown ──► Database::close().await                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers
//! - Writers don't block readers

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::product::ProductRepository;
use crate::schema;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("./database.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Maximum lifetime of a single connection. `None` keeps connections
    /// forever, which an in-memory database needs to keep its data.
    pub max_lifetime: Option<Duration>,

    /// Whether to create the schema on connect.
    /// Default: true
    pub initialize_schema: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Some(Duration::from_secs(1800)),
            initialize_schema: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to create the schema on connect.
    pub fn initialize_schema(mut self, initialize: bool) -> Self {
        self.initialize_schema = initialize;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            max_lifetime: None,
            initialize_schema: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Process-wide database handle.
///
/// Built once at startup and handed to the HTTP layer through router state.
/// Cloning is cheap: the pool is reference counted and safe to share across
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Opens the database.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite:
    ///    - WAL mode for concurrent reads
    ///    - NORMAL synchronous (balance of safety/speed)
    /// 3. Creates the connection pool
    /// 4. Verifies the store answers `SELECT 1`
    /// 5. Creates the products table (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError::ConnectionFailed)` - Store unreachable
    /// * `Err(DbError::SchemaFailed)` - Table could not be created
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        // sqlite://path creates file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .max_lifetime(config.max_lifetime)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        // Ping: the pool may connect lazily, so prove the store answers.
        sqlx::query("SELECT 1")
            .execute(&db.pool)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!("Database connection established");

        if config.initialize_schema {
            db.initialize().await?;
        }

        Ok(db)
    }

    /// Creates the schema if it is missing.
    ///
    /// ## When To Call
    /// - Automatically called by `new()` if `initialize_schema` is true
    /// - Manually call when bootstrap is disabled in config
    pub async fn initialize(&self) -> DbResult<()> {
        schema::initialize(&self.pool).await
    }

    /// Returns a reference to the connection pool.
    ///
    /// ## Usage
    /// For advanced queries not covered by the repository.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let products = db.products().search("cola").await?;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// Waits for checked-out connections to be returned. Never fails the
    /// caller; after this, every repository call returns `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
        info!("Database connection closed");
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        assert!(schema::products_table_exists(db.pool()).await.unwrap());
    }

    #[tokio::test]
    async fn test_schema_bootstrap_can_be_skipped() {
        let config = DbConfig::in_memory().initialize_schema(false);
        let db = Database::new(config).await.unwrap();

        assert!(!schema::products_table_exists(db.pool()).await.unwrap());

        db.initialize().await.unwrap();
        assert!(schema::products_table_exists(db.pool()).await.unwrap());
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.initialize().await.unwrap();
        db.initialize().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stockroom.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let draft = stockroom_core::validation::validate_draft(stockroom_core::ProductPayload {
            name: Some("Kept".to_string()),
            price: Some(1.5),
            stock: Some(2),
        })
        .unwrap();
        let created = db.products().create(&draft).await.unwrap();
        db.close().await;

        // Reopening runs the bootstrap again and must keep existing rows.
        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let found = db.products().get_by_id(created.id).await.unwrap();
        assert_eq!(found.name, "Kept");
        db.close().await;
    }

    #[tokio::test]
    async fn test_closed_pool_reports_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_unreachable_path_fails_to_connect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("stockroom.db");

        let err = Database::new(DbConfig::new(path).connect_timeout(Duration::from_secs(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(config.initialize_schema);
    }
}
