//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations.

use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, ExprTrait, QueryFilter, sea_query::Expr};
use tracing::info;

use super::converters::{model_to_link, new_link_active_model};
use super::{SeaOrmStorage, retry};
use crate::errors::{LinkletError, Result};
use crate::storage::Link;

use migration::entities::link;

impl SeaOrmStorage {
    /// Atomically insert a new link row.
    ///
    /// The database UNIQUE constraint on `short_code` is the authority on
    /// uniqueness: a concurrent creation race surfaces here as
    /// `DuplicateCode`, distinct from all other storage errors so the
    /// caller can retry with a fresh candidate.
    pub async fn insert(&self, short_code: &str, original_url: &str) -> Result<Link> {
        let db = &self.db;
        let created_at = Utc::now();
        let active = new_link_active_model(short_code, original_url, created_at);

        let model = retry::with_retry(
            &format!("insert({})", short_code),
            self.retry_config,
            || async {
                link::Entity::insert(active.clone())
                    .exec_with_returning(db)
                    .await
            },
        )
        .await
        .map_err(|e| {
            if matches!(
                e.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) {
                LinkletError::duplicate_code(format!("Short code already exists: {}", short_code))
            } else {
                LinkletError::database_operation(format!(
                    "Failed to insert short link '{}': {}",
                    short_code, e
                ))
            }
        })?;

        info!("Short link created: {} -> {}", short_code, original_url);

        Ok(model_to_link(model))
    }

    /// Atomic click increment: `UPDATE links SET clicks = clicks + 1`.
    ///
    /// A single SQL statement, never read-modify-write, so concurrent
    /// resolves of the same code cannot lose updates. Returns false when
    /// no row matched the code.
    pub async fn increment_clicks(&self, code: &str) -> Result<bool> {
        let db = &self.db;
        let code_owned = code.to_string();

        let result = retry::with_retry(
            &format!("increment_clicks({})", code),
            self.retry_config,
            || async {
                link::Entity::update_many()
                    .col_expr(
                        link::Column::Clicks,
                        Expr::col(link::Column::Clicks).add(1),
                    )
                    .filter(link::Column::ShortCode.eq(&code_owned))
                    .exec(db)
                    .await
            },
        )
        .await
        .map_err(|e| {
            LinkletError::database_operation(format!(
                "Failed to increment clicks for '{}': {}",
                code, e
            ))
        })?;

        Ok(result.rows_affected > 0)
    }
}
