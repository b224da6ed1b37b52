//! SeaORM storage backend
//!
//! Durable link storage over SeaORM, supporting SQLite, MySQL/MariaDB,
//! and PostgreSQL. Short code uniqueness is enforced by the database
//! schema, not by application-level checks.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use sea_orm::DatabaseConnection;

use crate::errors::{Result, LinkletError};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::model_to_link;

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(LinkletError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported URL schemes: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    /// 重试配置
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    /// Connect to the database, run migrations, and return a ready handle.
    ///
    /// Schema creation is idempotent and safe to run on every startup.
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        let db = match backend_name {
            "sqlite" => connect_sqlite(database_url).await?,
            other => connect_generic(database_url, other).await?,
        };

        run_migrations(&db).await?;

        let config = crate::config::get_config();
        let retry_config = retry::RetryConfig {
            max_retries: config.database.retry_count,
            base_delay_ms: config.database.retry_base_delay_ms,
            max_delay_ms: config.database.retry_max_delay_ms,
        };

        Ok(Self {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        })
    }

    /// Wrap an existing connection (used by tests with temp databases).
    pub fn from_connection(db: DatabaseConnection, backend_name: &str) -> Self {
        Self {
            db,
            backend_name: backend_name.to_string(),
            retry_config: retry::RetryConfig::default(),
        }
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
