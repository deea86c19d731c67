//! View rendering. Handlers describe *what* to show as a [`Page`]; a
//! [`Renderer`] turns it into markup.
use leptos::*;
use serde::Serialize;

use crate::components::{
    contact_form::ContactUs, error_panel::ErrorPanel, layout::Layout,
    restaurant_card::RestaurantCard, review_form::ReviewForm, reviews_list::ReviewsList,
};
use crate::models::restaurant::Restaurant;
use crate::models::review::Review;

/// A named view together with its data bag.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Page {
    Home {
        title: String,
        restaurants: Vec<Restaurant>,
    },
    List {
        title: String,
        restaurants: Vec<Restaurant>,
    },
    Reviews {
        title: String,
        current: Restaurant,
        reviews: Vec<Review>,
    },
    ReviewForm {
        title: String,
        current: Restaurant,
        site_key: String,
    },
    Error {
        error: String,
    },
}

impl Page {
    pub fn home(restaurants: Vec<Restaurant>) -> Self {
        Page::Home {
            title: "Home Page".to_string(),
            restaurants,
        }
    }

    pub fn list(restaurants: Vec<Restaurant>) -> Self {
        Page::List {
            title: "List of Restaurants".to_string(),
            restaurants,
        }
    }

    pub fn reviews(current: Restaurant, reviews: Vec<Review>) -> Self {
        Page::Reviews {
            title: format!("{} Reviews", current.title),
            current,
            reviews,
        }
    }

    pub fn review_form(current: Restaurant, site_key: impl Into<String>) -> Self {
        Page::ReviewForm {
            title: format!("{} Review", current.title),
            current,
            site_key: site_key.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Page::Error {
            error: message.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::Home { .. } => "index",
            Page::List { .. } => "list",
            Page::Reviews { .. } => "reviews",
            Page::ReviewForm { .. } => "post-review",
            Page::Error { .. } => "error",
        }
    }

    // The data bag as a JSON object
    pub fn data(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub trait Renderer: Send + Sync {
    fn render(&self, page: &Page) -> String;
}

/// Renders full HTML documents with server-side leptos components.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeptosRenderer;

impl Renderer for LeptosRenderer {
    fn render(&self, page: &Page) -> String {
        let page = page.clone();
        let html = leptos::ssr::render_to_string(move || page_view(page));
        format!("<!DOCTYPE html>{}", html)
    }
}

fn page_view(page: Page) -> View {
    match page {
        Page::Home { title, restaurants } => view! {
            <Layout title=title>
                <section class="restaurants">
                    <h1>{ "Restaurants" }</h1>
                    <div class="cards">
                        {restaurants
                            .into_iter()
                            .map(|restaurant| view! { <RestaurantCard restaurant=restaurant /> })
                            .collect::<Vec<_>>()}
                    </div>
                </section>
                <ContactUs />
            </Layout>
        }
        .into_view(),
        Page::List { title, restaurants } => view! {
            <Layout title={title.clone()}>
                <h1>{ title }</h1>
                <div class="cards">
                    {restaurants
                        .into_iter()
                        .map(|restaurant| view! { <RestaurantCard restaurant=restaurant /> })
                        .collect::<Vec<_>>()}
                </div>
            </Layout>
        }
        .into_view(),
        Page::Reviews { title, current, reviews } => {
            let create_href = format!("/restaurants/{}/reviews/create", current.id);
            view! {
                <Layout title={title.clone()}>
                    <h1>{ title }</h1>
                    <p class="description">{ current.description }</p>
                    <a class="button" href=create_href>{ "Write a review" }</a>
                    <ReviewsList reviews=reviews />
                </Layout>
            }
            .into_view()
        }
        Page::ReviewForm { title, current, site_key } => view! {
            <Layout title={title.clone()}>
                <h1>{ title }</h1>
                <ReviewForm restaurant=current site_key=site_key />
            </Layout>
        }
        .into_view(),
        Page::Error { error } => view! {
            <Layout title={"Error".to_string()}>
                <ErrorPanel message=error />
            </Layout>
        }
        .into_view(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::restaurant::{NewRestaurant, RestaurantId};
    use serde_json::json;

    fn blue_door() -> Restaurant {
        NewRestaurant {
            title: "Blue Door Bistro".into(),
            description: "Small plates by the harbour".into(),
            image_url: "/img/blue-door.jpg".into(),
            rating: 4.5,
        }
        .into_restaurant(RestaurantId::generate())
    }

    #[test]
    fn view_names_follow_templates() {
        assert_eq!(Page::home(vec![]).name(), "index");
        assert_eq!(Page::list(vec![]).name(), "list");
        assert_eq!(Page::reviews(blue_door(), vec![]).name(), "reviews");
        assert_eq!(Page::review_form(blue_door(), "key").name(), "post-review");
        assert_eq!(Page::error("boom").name(), "error");
    }

    #[test]
    fn data_bags_carry_documented_fields() {
        let current = blue_door();
        let data = Page::reviews(current.clone(), vec![]).data();
        assert_eq!(data["title"], "Blue Door Bistro Reviews");
        assert_eq!(data["current"]["_id"], current.id.to_string());
        assert_eq!(data["reviews"], json!([]));

        assert_eq!(Page::error("boom").data(), json!({ "error": "boom" }));
        assert_eq!(Page::review_form(current, "site").data()["title"], "Blue Door Bistro Review");
    }

    #[test]
    fn leptos_renders_restaurant_cards() {
        let html = LeptosRenderer.render(&Page::list(vec![blue_door()]));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("List of Restaurants"));
        assert!(html.contains("Blue Door Bistro"));
        assert!(html.contains("/reviews"));
    }

    #[test]
    fn leptos_renders_review_form_with_site_key() {
        let current = blue_door();
        let html = LeptosRenderer.render(&Page::review_form(current.clone(), "site-key-1"));
        assert!(html.contains("site-key-1"));
        assert!(html.contains(&format!("/restaurants/{}/reviews/create", current.id)));
        assert!(html.contains("g-recaptcha"));
    }

    #[test]
    fn leptos_renders_error_message() {
        let html = LeptosRenderer.render(&Page::error("Failed to post review"));
        assert!(html.contains("Failed to post review"));
    }
}
