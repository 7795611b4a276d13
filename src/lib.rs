//! blogsmith - a small blog authoring server
//!
//! Posts are kept in one JSON document, uploaded media in a flat upload
//! directory, and every saved post is also rendered to a static HTML file.

pub mod blog;
pub mod cli;
pub mod http_server;
pub mod media;
pub mod templates;
