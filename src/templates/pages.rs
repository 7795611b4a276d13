//! # Pages
//!
//! Entry content is authored HTML and is emitted unescaped. Everything
//! else goes through maud's escaping.

use maud::{html, Markup, PreEscaped};

use crate::blog::{BackgroundColor, BlogEntry, EntryFields, TextColor, ValidationErrors};

use super::layout::{notices, page};

/// Listing of every entry, in document order
pub fn list_page(entries: &[BlogEntry], messages: &[String]) -> Markup {
    page(
        "Blogs",
        html! {
            h1 { "Blogs" }
            (notices(messages))
            @if entries.is_empty() {
                p { "No posts yet." }
            } @else {
                ul class="posts" {
                    @for entry in entries {
                        li {
                            a href=(format!("/blog/{}", entry.slug)) { (entry.title) }
                            " "
                            a class="edit" href=(format!("/edit/{}", entry.id)) { "edit" }
                        }
                    }
                }
            }
        },
    )
}

/// A single entry. Also used for the static snapshot files.
pub fn blog_page(entry: &BlogEntry) -> Markup {
    let style = format!(
        "color: {}; background-color: {};",
        entry.text_color, entry.background_color
    );
    page(
        &entry.title,
        html! {
            article style=(style) data-id=(entry.id) {
                h1 { (entry.title) }
                @if let Some(image) = &entry.image {
                    img src=(format!("/uploads/{}", image)) alt=(entry.title);
                }
                @if let Some(video) = &entry.video {
                    video src=(format!("/uploads/{}", video)) controls {}
                }
                div class="content" { (PreEscaped(&entry.content)) }
            }
            p { a href=(format!("/edit/{}", entry.id)) { "Edit this post" } }
        },
    )
}

/// Values needed to draw the create/edit form
#[derive(Debug)]
pub struct FormPage<'a> {
    pub heading: &'a str,
    pub action: String,
    pub fields: &'a EntryFields,
    pub errors: &'a ValidationErrors,
    pub current_image: Option<&'a str>,
    pub current_video: Option<&'a str>,
}

pub fn form_page(form: &FormPage<'_>) -> Markup {
    let fields = form.fields;
    page(
        form.heading,
        html! {
            h1 { (form.heading) }
            form method="post" action=(form.action) enctype="multipart/form-data" {
                p {
                    label for="title" { "Title" }
                    input type="text" id="title" name="title" value=(fields.title);
                    (field_errors(form.errors, "title"))
                }
                p {
                    label for="content" { "Content" }
                    textarea id="content" name="content" { (fields.content) }
                    (field_errors(form.errors, "content"))
                }
                p {
                    label for="image" { "Image" }
                    input type="file" id="image" name="image";
                    @if let Some(image) = form.current_image {
                        small { "Current: " (image) }
                    }
                }
                p {
                    label for="video" { "Video" }
                    input type="file" id="video" name="video";
                    @if let Some(video) = form.current_video {
                        small { "Current: " (video) }
                    }
                }
                p {
                    label for="text_color" { "Text Color" }
                    select id="text_color" name="text_color" {
                        @for color in TextColor::ALL {
                            option value=(color.as_str()) selected[fields.text_color == color.as_str()] {
                                (color.label())
                            }
                        }
                    }
                    (field_errors(form.errors, "text_color"))
                }
                p {
                    label for="background_color" { "Background Color" }
                    select id="background_color" name="background_color" {
                        @for color in BackgroundColor::ALL {
                            option value=(color.as_str()) selected[fields.background_color == color.as_str()] {
                                (color.label())
                            }
                        }
                    }
                    (field_errors(form.errors, "background_color"))
                }
                button type="submit" { "Save" }
            }
        },
    )
}

fn field_errors(errors: &ValidationErrors, field: &str) -> Markup {
    html! {
        @for reason in errors.for_field(field) {
            span class="error" { (reason) }
        }
    }
}

pub fn error_page(status: u16, message: &str) -> Markup {
    page(
        "Error",
        html! {
            h1 { "Error " (status) }
            p { (message) }
            p { a href="/" { "Back to all posts" } }
        },
    )
}
