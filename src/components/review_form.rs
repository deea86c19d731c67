use leptos::*;
use crate::models::restaurant::Restaurant;

// Plain POST form; the reCAPTCHA widget adds the `g-recaptcha-response` field
#[component]
pub fn ReviewForm(restaurant: Restaurant, site_key: String) -> impl IntoView {
    let action = format!("/restaurants/{}/reviews/create", restaurant.id);

    view! {
        <div>
            <h3>{ format!("Review {}", restaurant.title) }</h3>
            <form method="post" action=action>
                <label>{ "Title" }
                    <input type="text" name="title" required=true />
                </label>
                <label>{ "Your name" }
                    <input type="text" name="author" required=true />
                </label>
                <label>{ "Review" }
                    <textarea name="content" placeholder="Write your review here" required=true></textarea>
                </label>
                <div class="g-recaptcha" data-sitekey=site_key></div>
                <button type="submit">{ "Submit Review" }</button>
            </form>
            <script src="https://www.google.com/recaptcha/api.js"></script>
        </div>
    }
}
