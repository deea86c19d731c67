//! Handlers behind the HTML routes.
use actix_web::error::InternalError;
use actix_web::http::{header, StatusCode};
use actix_web::{web, Either, HttpRequest, HttpResponse};
use chrono::Utc;
use std::fmt::{Debug, Display};
use tracing::{debug, error, info, warn};

use crate::app::AppState;
use crate::models::contact::ContactForm;
use crate::models::restaurant::{Restaurant, RestaurantId};
use crate::models::review::ReviewForm;
use crate::render::Page;

// The listing page shows at most this many restaurants
pub const LISTING_LIMIT: usize = 6;

pub const RESTAURANT_NOT_FOUND: &str = "Restaurant doesn't exist";
pub const RECAPTCHA_FAILED: &str = "Failed to verify recaptcha. Please try again.";
pub const REVIEW_NOT_POSTED: &str = "Failed to post review";
const RESTAURANTS_UNAVAILABLE: &str = "Failed to load restaurants";
const MESSAGE_NOT_SENT: &str = "Failed to send your message";
pub const UNREADABLE_SUBMISSION: &str = "Failed to read the submitted form";

fn render(state: &AppState, status: StatusCode, page: Page) -> HttpResponse {
    let body = state.renderer.render(&page);
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn render_error(state: &AppState, status: StatusCode, message: &str) -> HttpResponse {
    render(state, status, Page::error(message))
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Extractor error handler for the HTML routes: a body that is neither valid
/// JSON nor a valid form gets the error view with 400.
pub fn body_error<E>(err: E, req: &HttpRequest) -> actix_web::Error
where
    E: Debug + Display + 'static,
{
    debug!(error = %err, path = req.path(), "Unreadable submission");
    let response = match req.app_data::<web::Data<AppState>>() {
        Some(state) => render_error(state, StatusCode::BAD_REQUEST, UNREADABLE_SUBMISSION),
        None => HttpResponse::BadRequest().body(UNREADABLE_SUBMISSION),
    };
    InternalError::from_response(err, response).into()
}

// Resolve the restaurant named in the path, or the response to send instead
async fn find_restaurant(state: &AppState, id: &str) -> Result<Restaurant, HttpResponse> {
    match state.db.get_restaurant(id).await {
        Ok(restaurant) => Ok(restaurant),
        Err(err) if err.is_not_found() => {
            info!(id, "Restaurant not found");
            Err(render_error(state, StatusCode::NOT_FOUND, RESTAURANT_NOT_FOUND))
        }
        Err(err) => {
            error!(id, error = %err, "Failed to load restaurant");
            Err(render_error(
                state,
                StatusCode::INTERNAL_SERVER_ERROR,
                RESTAURANTS_UNAVAILABLE,
            ))
        }
    }
}

pub async fn home(state: web::Data<AppState>) -> HttpResponse {
    match state.db.list_restaurants().await {
        Ok(restaurants) => {
            info!(count = restaurants.len(), "Rendering home page");
            render(&state, StatusCode::OK, Page::home(restaurants))
        }
        Err(err) => {
            error!(error = %err, "Failed to list restaurants");
            render_error(&state, StatusCode::INTERNAL_SERVER_ERROR, RESTAURANTS_UNAVAILABLE)
        }
    }
}

pub async fn submit_contact(
    state: web::Data<AppState>,
    body: Either<web::Json<ContactForm>, web::Form<ContactForm>>,
) -> HttpResponse {
    let form = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    match state.db.create_contact_message(form).await {
        Ok(_) => redirect("/"),
        Err(err) => {
            error!(error = %err, "Failed to store contact message");
            render_error(&state, StatusCode::INTERNAL_SERVER_ERROR, MESSAGE_NOT_SENT)
        }
    }
}

pub async fn list_restaurants(state: web::Data<AppState>) -> HttpResponse {
    match state.db.list_restaurants().await {
        Ok(mut restaurants) => {
            restaurants.truncate(LISTING_LIMIT);
            render(&state, StatusCode::OK, Page::list(restaurants))
        }
        Err(err) => {
            error!(error = %err, "Failed to list restaurants");
            render_error(&state, StatusCode::INTERNAL_SERVER_ERROR, RESTAURANTS_UNAVAILABLE)
        }
    }
}

pub async fn reviews(state: web::Data<AppState>, id: web::Path<String>) -> HttpResponse {
    let restaurant = match find_restaurant(&state, &id).await {
        Ok(restaurant) => restaurant,
        Err(response) => return response,
    };

    match state.db.list_reviews_for_restaurant(restaurant.id).await {
        Ok(reviews) => render(&state, StatusCode::OK, Page::reviews(restaurant, reviews)),
        Err(err) => {
            error!(id = %restaurant.id, error = %err, "Failed to list reviews");
            render_error(&state, StatusCode::INTERNAL_SERVER_ERROR, RESTAURANTS_UNAVAILABLE)
        }
    }
}

pub async fn review_form(state: web::Data<AppState>, id: web::Path<String>) -> HttpResponse {
    match find_restaurant(&state, &id).await {
        Ok(restaurant) => render(
            &state,
            StatusCode::OK,
            Page::review_form(restaurant, state.recaptcha_site_key.clone()),
        ),
        Err(response) => response,
    }
}

/// Review submission: resolve the restaurant, verify the reCAPTCHA token,
/// then store the review with the fixed rating and the current time.
///
/// A failed verification stops here; nothing is stored.
pub async fn submit_review(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: Either<web::Json<ReviewForm>, web::Form<ReviewForm>>,
) -> HttpResponse {
    let restaurant_id = if state.require_existing_restaurant {
        match find_restaurant(&state, &id).await {
            Ok(restaurant) => restaurant.id,
            Err(response) => return response,
        }
    } else {
        match RestaurantId::parse(&id) {
            Some(restaurant_id) => restaurant_id,
            None => return render_error(&state, StatusCode::NOT_FOUND, RESTAURANT_NOT_FOUND),
        }
    };

    let form = match body {
        Either::Left(json) => json.into_inner(),
        Either::Right(form) => form.into_inner(),
    };
    if let Err(err) = state.recaptcha.verify(form.recaptcha_response.as_deref()).await {
        let status = if err.is_service_failure() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::BAD_REQUEST
        };
        warn!(%restaurant_id, error = %err, "Review rejected by reCAPTCHA check");
        return render_error(&state, status, RECAPTCHA_FAILED);
    }

    match state
        .db
        .create_review(form.into_review(restaurant_id, Utc::now()))
        .await
    {
        Ok(review) => {
            info!(id = %review.id, %restaurant_id, "Review posted");
            redirect(&format!("/restaurants/{}/reviews", restaurant_id))
        }
        Err(err) => {
            error!(%restaurant_id, error = %err, "Failed to store review");
            render_error(&state, StatusCode::INTERNAL_SERVER_ERROR, REVIEW_NOT_POSTED)
        }
    }
}
