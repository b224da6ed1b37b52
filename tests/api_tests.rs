//! HTTP boundary tests
//!
//! Full actix request/response round trips: 302 redirects, 404 paths,
//! the CSRF gate on creation, and the JSON API surface.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::json;
use tempfile::TempDir;

use linklet::api::middleware::CsrfGuard;
use linklet::api::response::ApiResponse;
use linklet::api::services::{CsrfToken, LinksService, RedirectService, TokenService};
use linklet::config::init_config;
use linklet::services::{LinkDetail, LinkService, StatsPage, StatsService};
use linklet::storage::SeaOrmStorage;
use linklet::storage::backend::{connect_sqlite, run_migrations};

async fn setup_storage(name: &str) -> (TempDir, Arc<SeaOrmStorage>) {
    init_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join(format!("{}.db", name));
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let db = connect_sqlite(&db_url)
        .await
        .expect("Failed to connect to SQLite");
    run_migrations(&db).await.expect("Failed to run migrations");

    (temp_dir, Arc::new(SeaOrmStorage::from_connection(db, "sqlite")))
}

macro_rules! test_app {
    ($storage:expr) => {{
        let link_service = Arc::new(LinkService::new($storage.clone()));
        let stats_service = Arc::new(StatsService::new($storage.clone()));

        test::init_service(
            App::new()
                .app_data(web::Data::new(link_service))
                .app_data(web::Data::new(stats_service))
                .service(
                    web::scope("/api")
                        .wrap(CsrfGuard)
                        .route("/csrf", web::get().to(TokenService::issue_csrf))
                        .route("/shorten", web::post().to(LinksService::post_shorten))
                        .route("/urls", web::get().to(LinksService::get_urls))
                        .route("/urls/{code}", web::get().to(LinksService::get_url_detail)),
                )
                .route("/{code}", web::get().to(RedirectService::handle_redirect)),
        )
        .await
    }};
}

fn shorten_request(body: serde_json::Value) -> TestRequest {
    // 双提交：cookie 与 header 携带同一 token
    TestRequest::post()
        .uri("/api/shorten")
        .cookie(Cookie::new("csrf_token", "test-token"))
        .insert_header(("X-CSRF-Token", "test-token"))
        .set_json(body)
}

#[actix_rt::test]
async fn test_redirect_found() {
    let (_dir, storage) = setup_storage("redirect_found").await;
    storage
        .insert("go1", "https://example.com/target")
        .await
        .unwrap();

    let app = test_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/go1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com/target"
    );

    // 成功跳转计入一次点击
    let link = storage.find_by_code("go1").await.unwrap().unwrap();
    assert_eq!(link.clicks, 1);
}

#[actix_rt::test]
async fn test_redirect_not_found() {
    let (_dir, storage) = setup_storage("redirect_404").await;
    let app = test_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/nope1").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_redirect_rejects_invalid_code_shape() {
    let (_dir, storage) = setup_storage("redirect_invalid").await;
    let app = test_app!(storage);

    // 过短的 code 不可能存在，直接 404
    let resp = test::call_service(&app, TestRequest::get().uri("/ab").to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_shorten_requires_csrf() {
    let (_dir, storage) = setup_storage("csrf_missing").await;
    let app = test_app!(storage);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(json!({"url": "https://example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_shorten_rejects_mismatched_csrf() {
    let (_dir, storage) = setup_storage("csrf_mismatch").await;
    let app = test_app!(storage);

    let req = TestRequest::post()
        .uri("/api/shorten")
        .cookie(Cookie::new("csrf_token", "cookie-token"))
        .insert_header(("X-CSRF-Token", "different-token"))
        .set_json(json!({"url": "https://example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_csrf_issue_sets_cookie() {
    let (_dir, storage) = setup_storage("csrf_issue").await;
    let app = test_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/api/csrf").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "csrf_token")
        .expect("csrf cookie should be set");
    let cookie_value = cookie.value().to_string();

    let body: ApiResponse<CsrfToken> = test::read_body_json(resp).await;
    assert_eq!(body.data.unwrap().token, cookie_value);
}

#[actix_rt::test]
async fn test_shorten_creates_link() {
    let (_dir, storage) = setup_storage("shorten_ok").await;
    let app = test_app!(storage);

    let req = shorten_request(json!({
        "url": "https://example.com/page",
        "customCode": "mylink"
    }))
    .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: ApiResponse<LinkDetail> = test::read_body_json(resp).await;
    let detail = body.data.unwrap();
    assert_eq!(detail.link.short_code, "mylink");
    assert_eq!(detail.link.original_url, "https://example.com/page");
    assert!(detail.short_url.ends_with("/mylink"));
}

#[actix_rt::test]
async fn test_shorten_validation_errors() {
    let (_dir, storage) = setup_storage("shorten_bad").await;
    let app = test_app!(storage);

    // 非法 URL
    let resp = test::call_service(
        &app,
        shorten_request(json!({"url": "not a url"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 非法短码
    let resp = test::call_service(
        &app,
        shorten_request(json!({"url": "https://example.com", "customCode": "ab"})).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 已占用的短码
    let resp = test::call_service(
        &app,
        shorten_request(json!({"url": "https://example.com", "customCode": "taken1"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        shorten_request(json!({"url": "https://example.com", "customCode": "taken1"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_stats_endpoints() {
    let (_dir, storage) = setup_storage("stats_api").await;

    storage.insert("api001", "https://example.com/a").await.unwrap();
    storage.insert("api002", "https://example.com/b").await.unwrap();
    storage.increment_clicks("api002").await.unwrap();

    let app = test_app!(storage);

    let resp = test::call_service(&app, TestRequest::get().uri("/api/urls").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ApiResponse<StatsPage> = test::read_body_json(resp).await;
    let page = body.data.unwrap();
    assert_eq!(page.total_links, 2);
    assert_eq!(page.total_clicks, 1);
    assert_eq!(page.links[0].short_code, "api002");

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/api/urls/api001").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ApiResponse<LinkDetail> = test::read_body_json(resp).await;
    assert!(body.data.unwrap().short_url.ends_with("/api001"));

    let resp = test::call_service(
        &app,
        TestRequest::get().uri("/api/urls/ghost1").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
