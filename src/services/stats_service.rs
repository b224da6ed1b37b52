//! Read-only usage statistics
//!
//! Paginated listing with aggregate totals, and single-link detail with
//! the derived short URL. No mutation happens on these paths.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::get_config;
use crate::errors::Result;
use crate::storage::{Link, SeaOrmStorage};

/// One page of the stats listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsPage {
    pub links: Vec<Link>,
    pub total_links: u64,
    pub total_clicks: u64,
    pub page: u64,
    pub total_pages: u64,
    pub page_size: u64,
}

/// A single link plus its derived short URL.
///
/// `short_url` is computed at the boundary from the configured origin;
/// it is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDetail {
    #[serde(flatten)]
    pub link: Link,
    pub short_url: String,
}

pub struct StatsService {
    storage: Arc<SeaOrmStorage>,
}

impl StatsService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// One page of links, newest first, with store-wide totals.
    ///
    /// `page` is 1-based; out-of-range pages come back empty with the
    /// true totals intact.
    pub async fn page(&self, page: u64) -> Result<StatsPage> {
        let page_size = get_config().features.page_size.max(1);

        let (links, total_links) = self.storage.list_page(page, page_size).await?;
        let totals = self.storage.totals().await?;

        Ok(StatsPage {
            links,
            total_links,
            total_clicks: totals.total_clicks,
            page,
            total_pages: total_links.div_ceil(page_size),
            page_size,
        })
    }

    /// Detail for one link, with `short_url = origin + "/" + code`.
    pub async fn detail(&self, code: &str, origin: &str) -> Result<Option<LinkDetail>> {
        let Some(link) = self.storage.find_by_code(code).await? else {
            return Ok(None);
        };

        let short_url = format!("{}/{}", origin.trim_end_matches('/'), link.short_code);
        Ok(Some(LinkDetail { link, short_url }))
    }
}
