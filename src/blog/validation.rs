//! # Form Validation
//!
//! Raw submitted values are checked once and turned into either an
//! [`EntryDraft`] or a list of `{field, reason}` failures for the form view.

use super::entry::{BackgroundColor, BlogEntry, EntryDraft, TextColor};
use crate::media::{snapshot_file_name, MAX_FILE_NAME_BYTES};

/// A single failed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

/// All failures for one submission, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, reason: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Reasons reported for one field
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.reason.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

/// Text values exactly as submitted by the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFields {
    pub title: String,
    pub content: String,
    pub text_color: String,
    pub background_color: String,
}

impl EntryFields {
    /// Pre-populate from an existing entry
    pub fn from_entry(entry: &BlogEntry) -> Self {
        Self {
            title: entry.title.clone(),
            content: entry.content.clone(),
            text_color: entry.text_color.as_str().to_string(),
            background_color: entry.background_color.as_str().to_string(),
        }
    }

    /// Validate against the current collection.
    ///
    /// `editing` is the id of the entry being edited; its own slug does not
    /// count as a collision.
    pub fn validate(
        &self,
        entries: &[BlogEntry],
        editing: Option<u64>,
    ) -> Result<EntryDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.title.trim().is_empty() {
            errors.push("title", "This field is required.");
        }
        if self.content.trim().is_empty() {
            errors.push("content", "This field is required.");
        }

        let text_color = TextColor::parse(&self.text_color);
        if text_color.is_none() {
            errors.push("text_color", "Not a valid choice.");
        }
        let background_color = BackgroundColor::parse(&self.background_color);
        if background_color.is_none() {
            errors.push("background_color", "Not a valid choice.");
        }

        let (Some(text_color), Some(background_color)) = (text_color, background_color) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let draft = EntryDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            text_color,
            background_color,
        };

        let slug = draft.slug();
        if slug.is_empty() {
            errors.push("title", "Title must contain at least one letter or digit.");
        } else if snapshot_file_name(&slug).len() > MAX_FILE_NAME_BYTES {
            errors.push("title", "Title is too long to use as a page address.");
        } else if entries
            .iter()
            .any(|e| e.slug == slug && Some(e.id) != editing)
        {
            errors.push("title", format!("Another post already uses the address '{}'.", slug));
        }

        if errors.is_empty() {
            Ok(draft)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, content: &str, text: &str, background: &str) -> EntryFields {
        EntryFields {
            title: title.to_string(),
            content: content.to_string(),
            text_color: text.to_string(),
            background_color: background.to_string(),
        }
    }

    fn existing(id: u64, title: &str) -> BlogEntry {
        let draft = fields(title, "x", "black", "white").validate(&[], None).unwrap();
        BlogEntry::from_draft(id, draft)
    }

    #[test]
    fn test_valid_submission() {
        let draft = fields("Hello", "<b>hi</b>", "red", "green")
            .validate(&[], None)
            .unwrap();
        assert_eq!(draft.title, "Hello");
        assert_eq!(draft.text_color, TextColor::Red);
        assert_eq!(draft.background_color, BackgroundColor::Green);
    }

    #[test]
    fn test_required_fields() {
        let errors = fields("   ", "", "black", "white")
            .validate(&[], None)
            .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.for_field("title").count(), 1);
        assert_eq!(errors.for_field("content").count(), 1);
    }

    #[test]
    fn test_invalid_color_choices() {
        let errors = fields("t", "c", "purple", "red")
            .validate(&[], None)
            .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["text_color", "background_color"]);
    }

    #[test]
    fn test_title_without_word_characters() {
        let errors = fields("?!", "c", "black", "white")
            .validate(&[], None)
            .unwrap_err();
        assert_eq!(errors.for_field("title").count(), 1);
    }

    #[test]
    fn test_title_too_long_for_page_file() {
        let errors = fields(&"a".repeat(300), "c", "black", "white")
            .validate(&[], None)
            .unwrap_err();
        let reason = errors.for_field("title").next().unwrap();
        assert!(reason.contains("too long"));

        // Three bytes per character in UTF-8
        assert!(fields(&"漢".repeat(100), "c", "black", "white")
            .validate(&[], None)
            .is_err());
        assert!(fields(&"a".repeat(250), "c", "black", "white")
            .validate(&[], None)
            .is_ok());
    }

    #[test]
    fn test_slug_collision_rejected() {
        let entries = vec![existing(1, "Hello World")];
        let errors = fields("hello   world!", "c", "black", "white")
            .validate(&entries, None)
            .unwrap_err();
        let reason = errors.for_field("title").next().unwrap();
        assert!(reason.contains("hello-world"));
    }

    #[test]
    fn test_slug_collision_ignores_self_on_edit() {
        let entries = vec![existing(1, "Hello World"), existing(2, "Other")];
        assert!(fields("Hello World", "new body", "blue", "black")
            .validate(&entries, Some(1))
            .is_ok());
        assert!(fields("Hello World", "new body", "blue", "black")
            .validate(&entries, Some(2))
            .is_err());
    }

    #[test]
    fn test_from_entry_round_trips() {
        let entry = existing(7, "Round Trip");
        let prefilled = EntryFields::from_entry(&entry);
        assert_eq!(prefilled.text_color, "black");
        let draft = prefilled.validate(&[entry.clone()], Some(entry.id)).unwrap();
        assert_eq!(draft.title, entry.title);
    }
}
