use leptos::*;
use crate::models::restaurant::Restaurant;

#[component]
pub fn RestaurantCard(restaurant: Restaurant) -> impl IntoView {
    let reviews_href = format!("/restaurants/{}/reviews", restaurant.id);
    let create_href = format!("/restaurants/{}/reviews/create", restaurant.id);
    let alt = restaurant.title.clone();

    view! {
        <article class="card">
            <img src={restaurant.image_url} alt=alt />
            <h2>{ restaurant.title }</h2>
            <p>{ restaurant.description }</p>
            <p class="rating">{ format!("Rating: {:.1}", restaurant.rating) }</p>
            <a href=reviews_href>{ "Reviews" }</a>
            <a href=create_href>{ "Write a review" }</a>
        </article>
    }
}
