//! Link creation and redirect resolution
//!
//! `LinkService` owns the two mutating paths of the engine: the
//! validation + collision-retry creation flow, and resolution with
//! atomic click accounting.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::get_config;
use crate::errors::{LinkletError, Result};
use crate::storage::{Link, SeaOrmStorage};
use crate::utils::url_validator::validate_url;
use crate::utils::{generate_random_code, is_valid_short_code};

/// Request to create a new link
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    /// Target URL (must be an absolute http/https URL)
    pub url: String,
    /// Custom short code; a random one is generated when absent
    pub custom_code: Option<String>,
}

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
}

impl LinkService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Create a new short link.
    ///
    /// Custom codes are validated then inserted; randomly generated codes
    /// go through a bounded generate-insert loop that absorbs the rare
    /// collision. Uniqueness itself is always decided by the database
    /// constraint inside `insert`, never by check-then-write.
    pub async fn create(&self, req: CreateLinkRequest) -> Result<Link> {
        validate_url(&req.url)
            .map_err(|e| LinkletError::validation(format!("invalid url: {}", e)))?;

        match req.custom_code.filter(|c| !c.is_empty()) {
            Some(code) => self.create_with_custom_code(&code, &req.url).await,
            None => self.create_with_generated_code(&req.url).await,
        }
    }

    async fn create_with_custom_code(&self, code: &str, url: &str) -> Result<Link> {
        if !is_valid_short_code(code) {
            return Err(LinkletError::validation(format!(
                "invalid code format: '{}' must be 3-12 characters from [0-9a-zA-Z-_]",
                code
            )));
        }

        // 先查一次以便给出友好的提示；真正的唯一性仍由 INSERT 的约束裁决，
        // 并发竞争输掉的一方同样落在 DuplicateCode 分支
        if self.storage.find_by_code(code).await?.is_some() {
            return Err(LinkletError::validation(format!("code taken: {}", code)));
        }

        match self.storage.insert(code, url).await {
            Err(LinkletError::DuplicateCode(_)) => {
                Err(LinkletError::validation(format!("code taken: {}", code)))
            }
            other => other,
        }
    }

    async fn create_with_generated_code(&self, url: &str) -> Result<Link> {
        let config = get_config();
        let length = config.features.random_code_length;
        let max_attempts = config.features.max_generate_attempts;

        for attempt in 1..=max_attempts {
            let candidate = generate_random_code(length);

            match self.storage.insert(&candidate, url).await {
                Ok(link) => return Ok(link),
                Err(LinkletError::DuplicateCode(_)) => {
                    debug!(
                        "Generated code '{}' collided (attempt {}/{})",
                        candidate, attempt, max_attempts
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(LinkletError::collision_exhausted(format!(
            "Could not find a free short code after {} attempts",
            max_attempts
        )))
    }

    /// Resolve a short code to its destination URL.
    ///
    /// `Ok(None)` for an unknown code is a normal outcome and touches no
    /// counter. On a hit the click counter is bumped with a single atomic
    /// UPDATE before the destination is returned; an increment failure is
    /// logged but does not fail the redirect (best-effort counting). The
    /// stored URL is returned verbatim, with no canonicalization.
    pub async fn resolve(&self, code: &str) -> Result<Option<String>> {
        let Some(link) = self.storage.find_by_code(code).await? else {
            return Ok(None);
        };

        match self.storage.increment_clicks(code).await {
            Ok(true) => {}
            Ok(false) => debug!("Click increment matched no row for '{}'", code),
            Err(e) => warn!("Click increment failed for '{}': {}", code, e),
        }

        Ok(Some(link.original_url))
    }
}
