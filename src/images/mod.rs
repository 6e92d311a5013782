//! Embedded image extraction and rewriting
//!
//! Finds image references in an article body, assigns each a local file
//! name, and rewrites the body to point at the local copy. Everything in
//! this module is pure text processing; downloading lives in [`crate::fetch`].

pub mod locator;
pub mod rewriter;
pub mod tag;

pub use locator::{ImageLocator, ImageMatch};
pub use rewriter::{ImageRewriter, DEFAULT_PATH_PREFIX};
pub use tag::parse_image_tag;

use std::fmt;
use std::str::FromStr;

/// How image references are recognised in an article body.
///
/// Older Qiita articles embed `<img>` tags, newer ones reference the image
/// store or its imgix proxy by bare URL. One mode applies per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    #[default]
    Tag,
    Url,
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tag" => Ok(ScanMode::Tag),
            "url" => Ok(ScanMode::Url),
            other => Err(format!(
                "Invalid scan mode '{}'. Expected 'tag' or 'url'",
                other
            )),
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::Tag => f.write_str("tag"),
            ScanMode::Url => f.write_str("url"),
        }
    }
}

/// One image reference discovered in an article body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
    /// Assigned by [`ImageRewriter`]; empty straight out of the tag parser.
    pub local_file_name: String,
}
