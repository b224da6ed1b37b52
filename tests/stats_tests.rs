//! Stats reader tests
//!
//! Pagination math, ordering, aggregate totals, and the derived short
//! URL on the detail view.

use std::sync::Arc;

use linklet::config::init_config;
use linklet::services::StatsService;
use linklet::storage::SeaOrmStorage;
use linklet::storage::backend::{connect_sqlite, run_migrations};
use tempfile::TempDir;

async fn setup_stats(name: &str) -> (TempDir, Arc<SeaOrmStorage>, StatsService) {
    init_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join(format!("{}.db", name));
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let db = connect_sqlite(&db_url)
        .await
        .expect("Failed to connect to SQLite");
    run_migrations(&db).await.expect("Failed to run migrations");

    let storage = Arc::new(SeaOrmStorage::from_connection(db, "sqlite"));
    let stats = StatsService::new(storage.clone());
    (temp_dir, storage, stats)
}

#[tokio::test]
async fn test_empty_store_page() {
    let (_dir, _storage, stats) = setup_stats("empty").await;

    let page = stats.page(1).await.unwrap();
    assert!(page.links.is_empty());
    assert_eq!(page.total_links, 0);
    assert_eq!(page.total_clicks, 0);
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn test_page_size_and_total_pages() {
    let (_dir, storage, stats) = setup_stats("pages").await;

    // 默认每页 5 条；12 条应分 3 页
    for i in 0..12 {
        storage
            .insert(&format!("st{:03}", i), &format!("https://example.com/{}", i))
            .await
            .unwrap();
    }

    let page = stats.page(1).await.unwrap();
    assert_eq!(page.page_size, 5);
    assert_eq!(page.links.len(), 5);
    assert_eq!(page.total_links, 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 1);

    // 最新的排最前
    assert_eq!(page.links[0].short_code, "st011");

    let last = stats.page(3).await.unwrap();
    assert_eq!(last.links.len(), 2);

    let beyond = stats.page(4).await.unwrap();
    assert!(beyond.links.is_empty());
    assert_eq!(beyond.total_links, 12);
}

#[tokio::test]
async fn test_totals_include_clicks() {
    let (_dir, storage, stats) = setup_stats("totals").await;

    storage.insert("agg001", "https://example.com/a").await.unwrap();
    storage.insert("agg002", "https://example.com/b").await.unwrap();
    storage.increment_clicks("agg001").await.unwrap();
    storage.increment_clicks("agg001").await.unwrap();
    storage.increment_clicks("agg002").await.unwrap();

    let page = stats.page(1).await.unwrap();
    assert_eq!(page.total_links, 2);
    assert_eq!(page.total_clicks, 3);
}

#[tokio::test]
async fn test_detail_short_url_derivation() {
    let (_dir, storage, stats) = setup_stats("detail").await;

    storage
        .insert("det001", "https://example.com/target")
        .await
        .unwrap();

    let detail = stats
        .detail("det001", "https://lnk.example.com")
        .await
        .unwrap()
        .expect("detail should exist");

    assert_eq!(detail.short_url, "https://lnk.example.com/det001");
    assert_eq!(detail.link.original_url, "https://example.com/target");

    // origin 末尾斜杠不会产生双斜杠
    let detail = stats
        .detail("det001", "https://lnk.example.com/")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.short_url, "https://lnk.example.com/det001");
}

#[tokio::test]
async fn test_detail_unknown_code() {
    let (_dir, _storage, stats) = setup_stats("detail_none").await;

    let detail = stats
        .detail("missing", "https://lnk.example.com")
        .await
        .unwrap();
    assert!(detail.is_none());
}
