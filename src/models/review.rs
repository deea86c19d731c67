// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lenient;
use super::restaurant::RestaurantId;

/// Rating stored for every review submitted through the review form. Whatever
/// rating the visitor sends is ignored.
pub const SUBMITTED_REVIEW_RATING: i32 = 5;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub restaurant_id: RestaurantId, // Restaurant the review is about
    pub title: String,
    pub content: String,
    pub rating: i32,
    pub author_name: String,
    pub date_posted: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub restaurant_id: RestaurantId,
    pub title: String,
    pub content: String,
    pub rating: i32,
    pub author_name: String,
    pub date_posted: DateTime<Utc>,
}

impl NewReview {
    pub fn into_review(self, id: Uuid) -> Review {
        Review {
            id,
            restaurant_id: self.restaurant_id,
            title: self.title,
            content: self.content,
            rating: self.rating,
            author_name: self.author_name,
            date_posted: self.date_posted,
        }
    }
}

// Fields posted by the review form. Any `rating` sent along is not read.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ReviewForm {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub content: String,
    #[serde(deserialize_with = "lenient::text")]
    pub author: String,
    #[serde(rename = "g-recaptcha-response")]
    pub recaptcha_response: Option<String>,
}

impl ReviewForm {
    pub fn into_review(self, restaurant_id: RestaurantId, date_posted: DateTime<Utc>) -> NewReview {
        NewReview {
            restaurant_id,
            title: self.title,
            content: self.content,
            rating: SUBMITTED_REVIEW_RATING,
            author_name: self.author,
            date_posted,
        }
    }
}
