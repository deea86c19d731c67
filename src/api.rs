use actix_web::{web, Either, HttpRequest, HttpResponse};
use serde_json::json;
use std::fmt::Display;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::restaurant::NewRestaurant;

// Extractor failures on the JSON routes answer with the `{"error": ...}` object
pub fn body_error<E: Display>(err: E, _req: &HttpRequest) -> actix_web::Error {
    ApiError::InvalidBody(err.to_string()).into()
}

pub async fn get_restaurants(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let restaurants = state.db.list_restaurants().await?;
    info!(count = restaurants.len(), "[API] Returning restaurants");
    Ok(HttpResponse::Ok().json(restaurants))
}

// Accepts the same fields as JSON or as a form-encoded body
pub async fn create_restaurant(
    state: web::Data<AppState>,
    body: Either<web::Json<NewRestaurant>, web::Form<NewRestaurant>>,
) -> Result<HttpResponse, ApiError> {
    let restaurant = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    let restaurant = state.db.create_restaurant(restaurant).await?;
    Ok(HttpResponse::Ok().json(restaurant))
}

pub async fn get_restaurant(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let restaurant = state.db.get_restaurant(&id).await?;
    Ok(HttpResponse::Ok().json(restaurant))
}

// An id that matches nothing still deletes "successfully"
pub async fn delete_restaurant(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let removed = state.db.delete_restaurant(&id).await?;
    if !removed {
        info!(id = %id.as_str(), "[API] Delete matched no restaurant");
    }
    Ok(HttpResponse::Ok().json(json!({ "status": "success" })))
}
