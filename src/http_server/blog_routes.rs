//! Blog HTTP Routes
//!
//! List, view, create and edit. Every handler works on a fresh copy of the
//! document; create and edit run validation, uploads and the document write
//! inside one [`BlogStore::update`] cycle and write the snapshot afterwards.
//! Uploads that created new files are removed again when the cycle fails.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use maud::Markup;
use serde::Deserialize;
use tracing::{info, warn};

use super::config::ServerConfig;
use super::errors::{HttpError, HttpResult};
use super::form::BlogForm;
use crate::blog::{next_id, BlogEntry, BlogError, BlogStore, EntryFields, ValidationErrors};
use crate::media::{LocalBackend, MediaError, SnapshotWriter, StoredUpload, UploadHandler};
use crate::templates::{blog_page, form_page, list_page, FormPage};

// ==================
// Shared State
// ==================

/// Blog state shared across handlers
#[derive(Debug)]
pub struct BlogState {
    pub store: BlogStore,
    pub uploads: UploadHandler<LocalBackend>,
    pub snapshots: SnapshotWriter<LocalBackend>,
}

impl BlogState {
    pub fn new(
        store: BlogStore,
        uploads: UploadHandler<LocalBackend>,
        snapshots: SnapshotWriter<LocalBackend>,
    ) -> Self {
        Self {
            store,
            uploads,
            snapshots,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            BlogStore::new(&config.data_file),
            UploadHandler::new(
                LocalBackend::new(&config.upload_dir),
                &config.allowed_extensions,
            ),
            SnapshotWriter::new(LocalBackend::new(&config.sites_dir)),
        )
    }

    /// Store the form's uploads on the entry.
    ///
    /// A field is only replaced by an accepted upload, which is also recorded
    /// in `written`. Returns the names of fields whose upload was rejected.
    fn store_uploads(
        &self,
        form: &BlogForm,
        entry: &mut BlogEntry,
        written: &mut Vec<StoredUpload>,
    ) -> Result<Vec<&'static str>, MediaError> {
        let mut skipped = Vec::new();
        let slots = [
            ("image", &form.image, &mut entry.image),
            ("video", &form.video, &mut entry.video),
        ];
        for (field, upload, slot) in slots {
            let Some(upload) = upload else { continue };
            match self.uploads.accept(&upload.file_name, &upload.data)? {
                Some(stored) => {
                    *slot = Some(stored.name.clone());
                    written.push(stored);
                }
                None => skipped.push(field),
            }
        }
        Ok(skipped)
    }

    /// Remove uploads written by a submission that was not saved
    fn discard_uploads(&self, written: &[StoredUpload]) {
        for upload in written {
            if let Err(e) = self.uploads.discard(upload) {
                warn!(file = %upload.name, error = %e, "failed to discard upload");
            }
        }
    }

    /// Write the snapshot for a saved entry, removing the one left behind
    /// by a slug change.
    fn publish(&self, saved: &Saved) -> Result<(), MediaError> {
        self.snapshots.write_snapshot(&saved.entry)?;
        if let Some(stale) = saved.stale_slug.as_deref() {
            self.snapshots.remove_snapshot(stale)?;
        }
        Ok(())
    }
}

// ==================
// Notices
// ==================

/// One-shot message carried on the redirect back to the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Created,
    Updated,
    NotFound,
}

impl Notice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Notice::Created => "created",
            Notice::Updated => "updated",
            Notice::NotFound => "not-found",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [Notice::Created, Notice::Updated, Notice::NotFound]
            .into_iter()
            .find(|n| n.as_str() == value)
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notice::Created => "Blog created successfully!",
            Notice::Updated => "Blog updated successfully!",
            Notice::NotFound => "Blog not found!",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub notice: Option<String>,
    /// Comma-separated form fields whose upload was rejected
    #[serde(default)]
    pub skipped: Option<String>,
}

impl ListQuery {
    fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if let Some(notice) = self.notice.as_deref().and_then(Notice::parse) {
            messages.push(notice.message().to_string());
        }
        let skipped: Vec<&str> = self
            .skipped
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter(|f| matches!(*f, "image" | "video"))
            .collect();
        if !skipped.is_empty() {
            messages.push(format!(
                "Unsupported file type, upload skipped for: {}",
                skipped.join(", ")
            ));
        }
        messages
    }
}

fn list_redirect(notice: Notice, skipped: &[&str]) -> Redirect {
    let mut location = format!("/?notice={}", notice.as_str());
    if !skipped.is_empty() {
        location.push_str("&skipped=");
        location.push_str(&skipped.join(","));
    }
    Redirect::to(&location)
}

// ==================
// Submission Outcomes
// ==================

#[derive(Debug)]
struct Saved {
    entry: BlogEntry,
    /// Former slug that no entry uses any more
    stale_slug: Option<String>,
    skipped: Vec<&'static str>,
}

#[derive(Debug)]
enum Rejected {
    Invalid {
        errors: ValidationErrors,
        current: Option<BlogEntry>,
    },
    Failed(HttpError),
}

impl From<BlogError> for Rejected {
    fn from(err: BlogError) -> Self {
        Rejected::Failed(err.into())
    }
}

impl From<MediaError> for Rejected {
    fn from(err: MediaError) -> Self {
        Rejected::Failed(err.into())
    }
}

impl From<HttpError> for Rejected {
    fn from(err: HttpError) -> Self {
        Rejected::Failed(err)
    }
}

// ==================
// Blog Routes
// ==================

/// Create blog routes
pub fn blog_routes(state: Arc<BlogState>) -> Router {
    Router::new()
        .route("/", get(list_handler))
        .route("/blog/:slug", get(view_handler))
        .route("/new", get(new_form_handler).post(create_handler))
        .route("/edit/:id", get(edit_form_handler).post(edit_handler))
        .with_state(state)
}

fn render_form(
    heading: &str,
    action: String,
    fields: &EntryFields,
    errors: &ValidationErrors,
    current: Option<&BlogEntry>,
) -> Markup {
    form_page(&FormPage {
        heading,
        action,
        fields,
        errors,
        current_image: current.and_then(|e| e.image.as_deref()),
        current_video: current.and_then(|e| e.video.as_deref()),
    })
}

fn edit_heading(id: u64) -> (String, String) {
    (format!("Edit post {}", id), format!("/edit/{}", id))
}

// ==================
// Handlers
// ==================

async fn list_handler(
    State(state): State<Arc<BlogState>>,
    Query(query): Query<ListQuery>,
) -> HttpResult<Markup> {
    let entries = state.store.load()?;
    Ok(list_page(&entries, &query.messages()))
}

async fn view_handler(
    State(state): State<Arc<BlogState>>,
    Path(slug): Path<String>,
) -> HttpResult<Response> {
    let entries = state.store.load()?;

    match entries.iter().find(|e| e.slug == slug) {
        Some(entry) => Ok(blog_page(entry).into_response()),
        None => {
            info!(slug = %slug, "blog not found");
            Ok(list_redirect(Notice::NotFound, &[]).into_response())
        }
    }
}

async fn new_form_handler() -> Markup {
    render_form(
        "New post",
        "/new".to_string(),
        &EntryFields::default(),
        &ValidationErrors::new(),
        None,
    )
}

async fn create_handler(
    State(state): State<Arc<BlogState>>,
    multipart: Multipart,
) -> HttpResult<Response> {
    let form = BlogForm::from_multipart(multipart).await?;

    let mut written = Vec::new();
    let result = state.store.update(|entries| -> Result<Saved, Rejected> {
        let draft = form
            .fields
            .validate(entries, None)
            .map_err(|errors| Rejected::Invalid {
                errors,
                current: None,
            })?;

        let mut entry = BlogEntry::from_draft(next_id(entries)?, draft);
        let skipped = state.store_uploads(&form, &mut entry, &mut written)?;
        entries.push(entry.clone());

        Ok(Saved {
            entry,
            stale_slug: None,
            skipped,
        })
    });

    match result {
        Ok(saved) => {
            info!(id = saved.entry.id, slug = %saved.entry.slug, "created blog");
            state.publish(&saved)?;
            Ok(list_redirect(Notice::Created, &saved.skipped).into_response())
        }
        Err(Rejected::Invalid { errors, .. }) => {
            info!(errors = errors.len(), "create form rejected");
            let page = render_form("New post", "/new".to_string(), &form.fields, &errors, None);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(Rejected::Failed(err)) => {
            state.discard_uploads(&written);
            Err(err)
        }
    }
}

async fn edit_form_handler(
    State(state): State<Arc<BlogState>>,
    Path(id): Path<u64>,
) -> HttpResult<Markup> {
    let entries = state.store.load()?;
    let entry = entries
        .iter()
        .find(|e| e.id == id)
        .ok_or(HttpError::EntryNotFound(id))?;

    let (heading, action) = edit_heading(id);
    Ok(render_form(
        &heading,
        action,
        &EntryFields::from_entry(entry),
        &ValidationErrors::new(),
        Some(entry),
    ))
}

async fn edit_handler(
    State(state): State<Arc<BlogState>>,
    Path(id): Path<u64>,
    multipart: Multipart,
) -> HttpResult<Response> {
    let form = BlogForm::from_multipart(multipart).await?;

    let mut written = Vec::new();
    let result = state.store.update(|entries| -> Result<Saved, Rejected> {
        let index = entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(HttpError::EntryNotFound(id))?;

        let draft = form
            .fields
            .validate(entries, Some(id))
            .map_err(|errors| Rejected::Invalid {
                errors,
                current: Some(entries[index].clone()),
            })?;

        let entry = &mut entries[index];
        let previous_slug = entry.slug.clone();
        entry.apply_draft(draft);
        let skipped = state.store_uploads(&form, entry, &mut written)?;
        let entry = entry.clone();

        // Older documents may hold several entries with one slug
        let stale_slug = Some(previous_slug).filter(|old| entries.iter().all(|e| e.slug != *old));

        Ok(Saved {
            entry,
            stale_slug,
            skipped,
        })
    });

    match result {
        Ok(saved) => {
            info!(id = saved.entry.id, slug = %saved.entry.slug, "updated blog");
            state.publish(&saved)?;
            Ok(list_redirect(Notice::Updated, &saved.skipped).into_response())
        }
        Err(Rejected::Invalid { errors, current }) => {
            info!(id, errors = errors.len(), "edit form rejected");
            let (heading, action) = edit_heading(id);
            let page = render_form(&heading, action, &form.fields, &errors, current.as_ref());
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
        Err(Rejected::Failed(err)) => {
            state.discard_uploads(&written);
            Err(err)
        }
    }
}
