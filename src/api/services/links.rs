//! Link creation and statistics handlers

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;

use crate::api::response::{ErrorCode, error_from_linklet, json_response, success_response};
use crate::config::get_config;
use crate::services::{CreateLinkRequest, LinkDetail, LinkService, StatsService};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    pub url: String,
    #[serde(default)]
    pub custom_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_page() -> u64 {
    1
}

pub struct LinksService {}

impl LinksService {
    /// POST /api/shorten — create a new short link.
    ///
    /// Reached only through the CSRF gate. Returns 201 with the created
    /// link and its derived short URL.
    pub async fn post_shorten(
        payload: web::Json<ShortenRequest>,
        links: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let req = payload.into_inner();

        match links
            .create(CreateLinkRequest {
                url: req.url,
                custom_code: req.custom_code,
            })
            .await
        {
            Ok(link) => {
                let origin = get_config().server.public_origin.clone();
                let short_url =
                    format!("{}/{}", origin.trim_end_matches('/'), link.short_code);
                json_response(
                    StatusCode::CREATED,
                    ErrorCode::Success,
                    "Created",
                    Some(LinkDetail { link, short_url }),
                )
            }
            Err(e) => error_from_linklet(&e),
        }
    }

    /// GET /api/urls?page=N — one stats page, newest first.
    pub async fn get_urls(
        query: web::Query<PageQuery>,
        stats: web::Data<Arc<StatsService>>,
    ) -> impl Responder {
        match stats.page(query.page).await {
            Ok(page) => success_response(page),
            Err(e) => error_from_linklet(&e),
        }
    }

    /// GET /api/urls/{code} — detail for a single link.
    pub async fn get_url_detail(
        path: web::Path<String>,
        stats: web::Data<Arc<StatsService>>,
    ) -> impl Responder {
        let code = path.into_inner();
        let origin = get_config().server.public_origin.clone();

        match stats.detail(&code, &origin).await {
            Ok(Some(detail)) => success_response(detail),
            Ok(None) => json_response::<()>(
                StatusCode::NOT_FOUND,
                ErrorCode::NotFound,
                format!("Short code not found: {}", code),
                None,
            ),
            Err(e) => error_from_linklet(&e),
        }
    }
}
