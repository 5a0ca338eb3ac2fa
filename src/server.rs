use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};
use tracing::info;

use crate::application::auth_service::AuthService;
use crate::application::content_service::ContentService;
use crate::infrastructure::config::AppConfig;
use crate::presentation::handlers;
use crate::presentation::middleware::{RequestIdMiddleware, SessionMiddleware};

/// Full route table. Shared between the real server and the test
/// harness so both exercise the same surface.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::post::index)
        .service(handlers::post::show_post)
        .service(handlers::post::add_comment)
        .service(handlers::post::new_post_form)
        .service(handlers::post::create_post)
        .service(handlers::post::edit_post_form)
        .service(handlers::post::edit_post)
        .service(handlers::post::delete_post)
        .service(handlers::auth::register_form)
        .service(handlers::auth::register)
        .service(handlers::auth::login_form)
        .service(handlers::auth::login)
        .service(handlers::auth::logout)
        .service(handlers::pages::about)
        .service(handlers::pages::contact)
        .service(handlers::pages::health);
}

pub fn default_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("Referrer-Policy", "no-referrer"))
        .add(("Permissions-Policy", "geolocation=()"))
        .add(("Cross-Origin-Opener-Policy", "same-origin"))
}

pub async fn run(
    config: AppConfig,
    auth_service: AuthService,
    content_service: ContentService,
) -> anyhow::Result<()> {
    let bind_address = (config.host.clone(), config.port);
    info!(host = %bind_address.0, port = bind_address.1, "http server starting");

    HttpServer::new(move || {
        App::new()
            .wrap(default_headers())
            .wrap(SessionMiddleware)
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(content_service.clone()))
            .configure(routes)
    })
    .bind(bind_address)?
    .run()
    .await
    .map_err(anyhow::Error::new)
}
