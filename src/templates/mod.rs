//! # HTML Templates
//!
//! Pages are built with maud. The same entry page backs both the live
//! `/blog/{slug}` view and the static snapshot files.

mod layout;
pub mod pages;

pub use pages::{blog_page, error_page, form_page, list_page, FormPage};
