use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use tracing::info;

use linklet::api::middleware::CsrfGuard;
use linklet::api::services::{LinksService, RedirectService, TokenService};
use linklet::config::{get_config, init_config};
use linklet::services::{LinkService, StatsService};
use linklet::storage::StorageFactory;
use linklet::system::init_logging;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    init_config();
    let config = get_config();
    init_logging(&config.logging);

    // 单一存储句柄：启动时构建一次，显式注入各服务
    let storage = match StorageFactory::create().await {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("Failed to create storage: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    info!("Using storage backend: {}", storage.backend_name());

    let link_service = Arc::new(LinkService::new(storage.clone()));
    let stats_service = Arc::new(StatsService::new(storage.clone()));

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(link_service.clone()))
            .app_data(web::Data::new(stats_service.clone()))
            .service(
                web::scope("/api")
                    .wrap(CsrfGuard)
                    .route("/csrf", web::get().to(TokenService::issue_csrf))
                    .route("/shorten", web::post().to(LinksService::post_shorten))
                    .route("/urls", web::get().to(LinksService::get_urls))
                    .route("/urls/{code}", web::get().to(LinksService::get_url_detail)),
            )
            .route("/{code}", web::get().to(RedirectService::handle_redirect))
            .route("/{code}", web::head().to(RedirectService::handle_redirect))
    })
    .bind(&bind_address)?
    .run()
    .await
}
