//! # Blog Module
//!
//! Entries, slugs, form validation and the JSON document store.

pub mod entry;
pub mod errors;
pub mod slug;
pub mod store;
pub mod validation;

pub use entry::{next_id, BackgroundColor, BlogEntry, EntryDraft, TextColor};
pub use errors::{BlogError, BlogResult};
pub use slug::generate_slug;
pub use store::BlogStore;
pub use validation::{EntryFields, FieldError, ValidationErrors};
