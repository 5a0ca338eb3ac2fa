use std::sync::Arc;

use anyhow::Context;

use minipress::application::auth_service::AuthService;
use minipress::application::content_service::ContentService;
use minipress::data::comment_repository::{CommentRepository, PostgresCommentRepository};
use minipress::data::post_repository::{PostRepository, PostgresPostRepository};
use minipress::data::user_repository::{PostgresUserRepository, UserRepository};
use minipress::infrastructure::config::AppConfig;
use minipress::infrastructure::database::{create_pool, run_migrations};
use minipress::infrastructure::logging::init_logging;
use minipress::infrastructure::security::SessionKeys;
use minipress::server;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let pool = create_pool(&config.database_url)
        .await
        .context("failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(pool.clone()));
    let comments: Arc<dyn CommentRepository> = Arc::new(PostgresCommentRepository::new(pool));

    let auth_service = AuthService::new(
        users,
        SessionKeys::new(config.session_secret.clone(), config.session_ttl_secs),
    );
    let content_service = ContentService::new(posts, comments);

    server::run(config, auth_service, content_service).await
}
