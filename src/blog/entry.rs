//! # Blog Entries

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{BlogError, BlogResult};
use super::slug::generate_slug;

/// Text color choices offered by the authoring form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    Black,
    White,
    Red,
    Blue,
}

impl TextColor {
    /// All choices, in the order the form lists them
    pub const ALL: [TextColor; 4] = [
        TextColor::Black,
        TextColor::White,
        TextColor::Red,
        TextColor::Blue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextColor::Black => "black",
            TextColor::White => "white",
            TextColor::Red => "red",
            TextColor::Blue => "blue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TextColor::Black => "Black",
            TextColor::White => "White",
            TextColor::Red => "Red",
            TextColor::Blue => "Blue",
        }
    }

    /// Parse a submitted form value. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Background color choices offered by the authoring form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundColor {
    White,
    Black,
    Yellow,
    Green,
}

impl BackgroundColor {
    pub const ALL: [BackgroundColor; 4] = [
        BackgroundColor::White,
        BackgroundColor::Black,
        BackgroundColor::Yellow,
        BackgroundColor::Green,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundColor::White => "white",
            BackgroundColor::Black => "black",
            BackgroundColor::Yellow => "yellow",
            BackgroundColor::Green => "green",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BackgroundColor::White => "White",
            BackgroundColor::Black => "Black",
            BackgroundColor::Yellow => "Yellow",
            BackgroundColor::Green => "Green",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated field values for a new or edited entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub content: String,
    pub text_color: TextColor,
    pub background_color: BackgroundColor,
}

impl EntryDraft {
    pub fn slug(&self) -> String {
        generate_slug(&self.title)
    }
}

/// A single blog entry as stored in the document.
///
/// `id` is a stable key assigned at creation. Documents written before ids
/// existed deserialize with `id == 0`; the store assigns ids on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogEntry {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub text_color: TextColor,
    pub background_color: BackgroundColor,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
}

impl BlogEntry {
    /// Build a new entry from a draft, deriving its slug
    pub fn from_draft(id: u64, draft: EntryDraft) -> Self {
        let slug = draft.slug();
        Self {
            id,
            title: draft.title,
            slug,
            content: draft.content,
            text_color: draft.text_color,
            background_color: draft.background_color,
            image: None,
            video: None,
        }
    }

    /// Overwrite the editable fields, re-deriving the slug.
    ///
    /// Media fields are left untouched.
    pub fn apply_draft(&mut self, draft: EntryDraft) {
        self.slug = draft.slug();
        self.title = draft.title;
        self.content = draft.content;
        self.text_color = draft.text_color;
        self.background_color = draft.background_color;
    }
}

/// Next free id for a collection.
///
/// Fails when the highest id in use is already `u64::MAX`.
pub fn next_id(entries: &[BlogEntry]) -> BlogResult<u64> {
    id_after(entries.iter().map(|e| e.id).max().unwrap_or(0))
}

pub(crate) fn id_after(id: u64) -> BlogResult<u64> {
    id.checked_add(1)
        .ok_or_else(|| BlogError::Malformed(format!("no id left after {}", id)))
}
