use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use restaurant_reviews::app::{configure, AppState};
use restaurant_reviews::config::Config;
use restaurant_reviews::db::Database;
use restaurant_reviews::recaptcha::RecaptchaClient;
use restaurant_reviews::render::LeptosRenderer;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "restaurant_reviews=debug,actix_web=info".into()),
        )
        .init();

    // Load configuration
    let config = Config::load()?;
    if config.recaptcha_secret_key.is_empty() {
        warn!("RECAPTCHA_SECRET_KEY is not set; every review submission will be rejected");
    }

    // Open the store; it stays open for the lifetime of the server
    let db = Arc::new(Database::open(&config.database_path)?);
    db.create_schema().await?;
    info!("Initiated database connection.");

    let recaptcha = RecaptchaClient::from_config(&config)?;
    let state = AppState::new(db.clone(), recaptcha, Arc::new(LeptosRenderer), &config);

    let static_dir = config.static_dir.clone();
    let addr = config.bind_address();
    info!("Server started on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .configure(configure)
            // Static assets are the fallback after every route
            .service(Files::new("/", &static_dir))
    })
    .bind(&addr)?
    .run()
    .await?;

    db.close().await?;
    info!("Server stopped");
    Ok(())
}
