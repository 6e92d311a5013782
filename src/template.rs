//! Article document rendering
//!
//! Fills a Hugo front-matter template with item fields. Placeholders look
//! like `{{.Title}}`; substitution is a single pass, so text coming from an
//! article is never itself expanded.

use crate::models::Item;
use crate::Result;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;

pub const DEFAULT_TEMPLATE: &str = r#"+++
date = "{{.Date}}"
title = "{{.Title}}"
slug = "{{.Slug}}"
tags = [{{.AllTags}}]
categories = []
+++

{{.Body}}

*この記事は[Qiita]({{.URL}})の記事をエクスポートしたものです*
"#;

const PLACEHOLDER_PATTERN: &str = r"\{\{\s*\.(\w+)\s*\}\}";

pub struct Template {
    source: String,
    placeholder: Regex,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            placeholder: Regex::new(PLACEHOLDER_PATTERN)
                .expect("Failed to compile template placeholder pattern"),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        tracing::info!("Loaded template from {}", path.display());
        Ok(Self::new(source))
    }

    /// Render `item` with `body` in place of the item's own body, which lets
    /// the caller pass the image-rewritten text.
    pub fn render(&self, item: &Item, body: &str) -> String {
        self.placeholder
            .replace_all(&self.source, |caps: &Captures| match &caps[1] {
                "ID" => item.id.clone(),
                "Title" => item.title.replace('"', "\\\""),
                "Date" => item.date(),
                "Slug" => item.slug(),
                "AllTags" => item.all_tags(),
                "Body" => body.to_string(),
                "URL" => item.url.clone(),
                _ => caps[0].to_string(),
            })
            .into_owned()
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}
