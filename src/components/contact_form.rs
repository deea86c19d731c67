use leptos::*;

// Posts back to the home route
#[component]
pub fn ContactUs() -> impl IntoView {
    view! {
        <section class="contact">
            <h2>{ "Contact Us" }</h2>
            <form method="post" action="/">
                <input type="text" name="name" placeholder="Name" />
                <input type="email" name="email" placeholder="Email" />
                <input type="tel" name="phone" placeholder="Phone" />
                <textarea name="message" placeholder="Message"></textarea>
                <button type="submit">{ "Send" }</button>
            </form>
        </section>
    }
}
