use leptos::*;

#[component]
pub fn ErrorPanel(message: String) -> impl IntoView {
    view! {
        <section class="error">
            <h1>{ "Something went wrong" }</h1>
            <p>{ message }</p>
            <a href="/">{ "Back to the home page" }</a>
        </section>
    }
}
