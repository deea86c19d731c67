//! Page shell shared by every view: document head, navigation and footer.
use leptos::*;

#[component]
pub fn Layout(title: String, children: Children) -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>{ title }</title>
                <link rel="stylesheet" href="/css/style.css" />
            </head>
            <body>
                <nav>
                    <a href="/">{ "Home" }</a>
                    <a href="/restaurants">{ "Restaurants" }</a>
                </nav>
                <main>{ children() }</main>
            </body>
        </html>
    }
}
