use leptos::*;
use crate::models::review::Review;

#[component]
pub fn ReviewsList(reviews: Vec<Review>) -> impl IntoView {
    if reviews.is_empty() {
        return view! { <p class="empty">{ "No reviews yet." }</p> }.into_view();
    }

    view! {
        <div class="reviews">
            <h3>{ "Reviews" }</h3>
            <ul>
                {
                    reviews.into_iter().map(|review| {
                        view! {
                            <li>
                                <h4>{ review.title }</h4>
                                <p>{ review.content }</p>
                                <p class="byline">
                                    { format!(
                                        "{} stars by {} on {}",
                                        review.rating,
                                        review.author_name,
                                        review.date_posted.format("%Y-%m-%d")
                                    ) }
                                </p>
                            </li>
                        }
                    }).collect::<Vec<_>>()
                }
            </ul>
        </div>
    }
    .into_view()
}
