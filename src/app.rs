//! Route table and the state every handler receives.
use actix_web::web;
use std::sync::Arc;

use crate::api;
use crate::config::Config;
use crate::db::Database;
use crate::pages;
use crate::recaptcha::RecaptchaClient;
use crate::render::Renderer;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub recaptcha: RecaptchaClient,
    pub renderer: Arc<dyn Renderer>,
    pub recaptcha_site_key: String,
    pub require_existing_restaurant: bool,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        recaptcha: RecaptchaClient,
        renderer: Arc<dyn Renderer>,
        config: &Config,
    ) -> Self {
        Self {
            db,
            recaptcha,
            renderer,
            recaptcha_site_key: config.recaptcha_site_key.clone(),
            require_existing_restaurant: config.require_existing_restaurant,
        }
    }
}

// Unreadable bodies on the HTML routes get the error view
fn page_body_config() -> (web::JsonConfig, web::FormConfig) {
    (
        web::JsonConfig::default().error_handler(pages::body_error),
        web::FormConfig::default().error_handler(pages::body_error),
    )
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    let (contact_json, contact_form) = page_body_config();
    let (review_json, review_form) = page_body_config();

    cfg.service(
        web::resource("/")
            .app_data(contact_json)
            .app_data(contact_form)
            .route(web::get().to(pages::home))
            .route(web::post().to(pages::submit_contact)),
    )
    .route("/restaurants", web::get().to(pages::list_restaurants))
    .route("/restaurants/{id}/reviews", web::get().to(pages::reviews))
    .service(
        web::resource("/restaurants/{id}/reviews/create")
            .app_data(review_json)
            .app_data(review_form)
            .route(web::get().to(pages::review_form))
            .route(web::post().to(pages::submit_review)),
    )
    .service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(api::body_error))
            .app_data(web::FormConfig::default().error_handler(api::body_error))
            .route("/restaurants", web::get().to(api::get_restaurants)) // GET /api/restaurants
            .route("/restaurants", web::post().to(api::create_restaurant)) // POST /api/restaurants
            .route("/restaurants/{id}", web::get().to(api::get_restaurant)) // GET /api/restaurants/{id}
            .route("/restaurants/{id}", web::delete().to(api::delete_restaurant)), // DELETE /api/restaurants/{id}
    );
}
