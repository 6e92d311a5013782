//! Exporter for Qiita articles - writes static-site page bundles
//!
//! Pages through the authenticated user's Qiita items, rewrites embedded
//! image references to local paths, downloads the images next to each
//! article, and renders the article with Hugo front matter.

pub mod app;
pub mod error;
pub mod fetch;
pub mod images;
pub mod models;
pub mod qiita;
pub mod template;

pub use error::{Error, Result};
