//! Database handle built on sqlx's `Any` driver.
//!
//! The pool is created lazily so the process can start while the database
//! is still coming up; the startup readiness gate probes it afterwards.
//! Every statement runs inside a scoped cursor (a pooled connection held
//! in a transaction) that is committed explicitly and rolled back and
//! returned to the pool when dropped.

pub mod queries;
pub mod users;

use async_trait::async_trait;
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::{Any, AnyPool, Transaction};

use crate::config::DatabaseConfig;
use crate::startup::SchemaTarget;

pub use users::User;

/// Scoped cursor: rolls back and releases its connection unless committed.
pub type Cursor = Transaction<'static, Any>;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Unsupported database URL scheme: {0}")]
    UnsupportedUrl(String),
}

/// SQL dialect, decided by the URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    MySql,
    Sqlite,
}

impl DatabaseKind {
    pub fn from_url(url: &str) -> Result<Self, DbError> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Self::MySql),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(DbError::UnsupportedUrl(scheme.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Sqlite => "sqlite",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Database {
    pool: AnyPool,
    kind: DatabaseKind,
}

impl Database {
    /// Create a lazily connecting pool. No connection is attempted here.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, DbError> {
        let kind = DatabaseKind::from_url(&config.url)?;
        install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_lazy(&config.url)?;

        Ok(Self { pool, kind })
    }

    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    /// Lightweight connectivity check.
    pub async fn probe(&self) -> Result<(), DbError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(queries::PING).execute(&mut *conn).await?;
        Ok(())
    }

    /// Open a scoped cursor.
    pub async fn cursor(&self) -> Result<Cursor, DbError> {
        Ok(self.pool.begin().await?)
    }

    /// Create the users table if it does not exist yet.
    pub async fn create_users_table(&self) -> Result<(), DbError> {
        let mut cursor = self.cursor().await?;
        sqlx::query(queries::create_users_table(self.kind))
            .execute(&mut *cursor)
            .await?;
        cursor.commit().await?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl SchemaTarget for Database {
    async fn probe(&self) -> Result<(), DbError> {
        Database::probe(self).await
    }

    async fn create_schema(&self) -> Result<(), DbError> {
        self.create_users_table().await
    }
}
