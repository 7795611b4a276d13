//! # HTTP Server Module
//!
//! Axum server for the blog authoring pages.
//!
//! # Endpoints
//!
//! - `/` - List all posts
//! - `/blog/{slug}` - View one post
//! - `/new` - Create form and submission
//! - `/edit/{id}` - Edit form and submission
//! - `/uploads/*` - Uploaded media
//! - `/health` - Health check

pub mod blog_routes;
pub mod config;
pub mod errors;
pub mod form;
pub mod health_routes;
pub mod server;

pub use blog_routes::BlogState;
pub use config::{ConfigError, ServerConfig};
pub use errors::{HttpError, HttpResult};
pub use server::HttpServer;
