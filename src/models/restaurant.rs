use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::lenient;

/// Store-assigned identifier of a restaurant document.
///
/// Reviews hold one of these as a soft reference; nothing in the store keeps
/// it pointing at a live restaurant.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct RestaurantId(Uuid);

impl RestaurantId {
    pub fn generate() -> Self {
        RestaurantId(Uuid::new_v4())
    }

    // Anything that is not a UUID can never name a stored restaurant
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(RestaurantId)
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Restaurant {
    #[serde(rename = "_id")]
    pub id: RestaurantId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub rating: f64,
}

// Body of the restaurant creation API; absent fields are stored empty and a
// numeric string is accepted for the rating
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct NewRestaurant {
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub image_url: String,
    #[serde(deserialize_with = "lenient::rating")]
    pub rating: f64,
}

impl NewRestaurant {
    pub fn into_restaurant(self, id: RestaurantId) -> Restaurant {
        Restaurant {
            id,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            rating: self.rating,
        }
    }
}
