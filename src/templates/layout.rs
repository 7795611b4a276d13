//! Page shell shared by every rendered page

use maud::{html, Markup, DOCTYPE};

pub fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
            }
            body {
                nav {
                    a href="/" { "All posts" }
                    " | "
                    a href="/new" { "New post" }
                }
                (body)
            }
        }
    }
}

/// One-shot messages shown above the page content
pub fn notices(messages: &[String]) -> Markup {
    html! {
        @if !messages.is_empty() {
            ul class="notices" {
                @for message in messages {
                    li { (message) }
                }
            }
        }
    }
}
