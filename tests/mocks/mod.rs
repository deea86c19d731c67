// Shared fixtures for the route tests
#![allow(dead_code)]

use actix_web::web;
use restaurant_reviews::app::AppState;
use restaurant_reviews::db::Database;
use restaurant_reviews::models::restaurant::{NewRestaurant, Restaurant};
use restaurant_reviews::recaptcha::RecaptchaClient;
use restaurant_reviews::render::{Page, Renderer};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders a page as `{"view": name, "data": bag}` so tests can inspect
/// exactly what a handler handed to the view layer.
pub struct EchoRenderer;

impl Renderer for EchoRenderer {
    fn render(&self, page: &Page) -> String {
        json!({ "view": page.name(), "data": page.data() }).to_string()
    }
}

pub async fn test_state(verify_url: &str, require_existing_restaurant: bool) -> AppState {
    let db = Database::open(":memory:").unwrap();
    db.create_schema().await.unwrap();
    AppState {
        db: Arc::new(db),
        recaptcha: RecaptchaClient::new("test-secret", verify_url, Duration::from_secs(2)).unwrap(),
        renderer: Arc::new(EchoRenderer),
        recaptcha_site_key: "test-site-key".to_string(),
        require_existing_restaurant,
    }
}

// Verification endpoint answering every call with `body`
pub async fn verification_server(body: serde_json::Value, expected_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/siteverify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(&server)
        .await;
    server
}

pub fn verify_url(server: &MockServer) -> String {
    format!("{}/siteverify", server.uri())
}

pub async fn seed_restaurants(state: &web::Data<AppState>, count: usize) -> Vec<Restaurant> {
    let mut created = Vec::new();
    for n in 0..count {
        let restaurant = state
            .db
            .create_restaurant(NewRestaurant {
                title: format!("Restaurant {}", n),
                description: format!("Dishes from kitchen {}", n),
                image_url: format!("/img/{}.jpg", n),
                rating: 4.0,
            })
            .await
            .unwrap();
        created.push(restaurant);
    }
    created
}
