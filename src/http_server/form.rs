//! Multipart form parsing for the create and edit pages

use axum::body::Bytes;
use axum::extract::Multipart;

use super::errors::HttpResult;
use crate::blog::EntryFields;

/// A file part of the form. Empty file inputs are not represented.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub data: Bytes,
}

/// Everything submitted by the blog form
#[derive(Debug, Clone, Default)]
pub struct BlogForm {
    pub fields: EntryFields,
    pub image: Option<Upload>,
    pub video: Option<Upload>,
}

impl BlogForm {
    /// Read the whole multipart body before anything is acted on.
    ///
    /// Unknown parts are drained and ignored. A body over the configured
    /// limit fails here with `PayloadTooLarge`.
    pub async fn from_multipart(mut multipart: Multipart) -> HttpResult<Self> {
        let mut form = BlogForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.fields.title = field.text().await?,
                "content" => form.fields.content = field.text().await?,
                "text_color" => form.fields.text_color = field.text().await?,
                "background_color" => form.fields.background_color = field.text().await?,
                "image" | "video" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let data = field.bytes().await?;
                    let upload = (!file_name.is_empty() || !data.is_empty())
                        .then_some(Upload { file_name, data });
                    if name == "image" {
                        form.image = upload;
                    } else {
                        form.video = upload;
                    }
                }
                _ => {
                    field.bytes().await?;
                }
            }
        }

        Ok(form)
    }
}
