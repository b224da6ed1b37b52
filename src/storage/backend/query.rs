//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations.

use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::error;

use super::{SeaOrmStorage, retry};
use crate::errors::Result;
use crate::storage::{Link, LinkTotals};

use migration::entities::link;

use super::converters::model_to_link;

/// 聚合查询结果（DSL 聚合查询）
#[derive(Debug, FromQueryResult)]
struct TotalsRow {
    total_links: i64,
    total_clicks: Option<i64>,
}

impl SeaOrmStorage {
    /// Look up a link by its short code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Link>> {
        let db = &self.db;
        let code_owned = code.to_string();

        let model = retry::with_retry(
            &format!("find_by_code({})", code),
            self.retry_config,
            || async {
                link::Entity::find()
                    .filter(link::Column::ShortCode.eq(&code_owned))
                    .one(db)
                    .await
            },
        )
        .await
        .inspect_err(|e| error!("Short link lookup failed: {}", e))?;

        Ok(model.map(model_to_link))
    }

    /// Load one page of links, newest first.
    ///
    /// `page` is 1-based. Page 0 and pages past the end yield an empty
    /// vec together with the true total count; clamping is the caller's
    /// concern, not an error here.
    pub async fn list_page(&self, page: u64, page_size: u64) -> Result<(Vec<Link>, u64)> {
        let db = &self.db;
        let per_page = page_size.max(1);

        let total = retry::with_retry("list_page.count", self.retry_config, || async {
            link::Entity::find().paginate(db, per_page).num_items().await
        })
        .await?;

        let Some(zero_based) = page.checked_sub(1) else {
            return Ok((Vec::new(), total));
        };

        let models = retry::with_retry("list_page.fetch", self.retry_config, || async {
            link::Entity::find()
                .order_by_desc(link::Column::CreatedAt)
                .order_by_desc(link::Column::Id)
                .paginate(db, per_page)
                .fetch_page(zero_based)
                .await
        })
        .await?;

        Ok((models.into_iter().map(model_to_link).collect(), total))
    }

    /// Store-wide aggregates: link count and click sum, in one query.
    pub async fn totals(&self) -> Result<LinkTotals> {
        let db = &self.db;

        let row = retry::with_retry("totals", self.retry_config, || async {
            link::Entity::find()
                .select_only()
                .column_as(link::Column::Id.count(), "total_links")
                .column_as(link::Column::Clicks.sum(), "total_clicks")
                .into_model::<TotalsRow>()
                .one(db)
                .await
        })
        .await?;

        // 无 GROUP BY 的聚合恒返回一行；空表时 SUM 为 NULL
        Ok(row
            .map(|r| LinkTotals {
                total_links: r.total_links.max(0) as u64,
                total_clicks: r.total_clicks.unwrap_or(0).max(0) as u64,
            })
            .unwrap_or_default())
    }
}
