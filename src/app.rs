//! Export orchestration: page through items, localise images, write bundles.

use crate::fetch::{HttpImageFetcher, ImageFetcher};
use crate::images::{ImageRewriter, ScanMode};
use crate::models::{Config, Item};
use crate::qiita::{ItemSource, QiitaClient, MAX_PER_PAGE};
use crate::template::Template;
use crate::{Error, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// File name of the Markdown document inside each article directory.
pub const INDEX_FILE: &str = "index.md";

/// Per-run export settings.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub content_dir: PathBuf,
    pub section: String,
    pub mode: ScanMode,
    pub per_page: usize,
    pub dry_run: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            section: "posts".to_string(),
            mode: ScanMode::Tag,
            per_page: 20,
            dry_run: false,
        }
    }
}

impl ExportOptions {
    pub fn validate(&self) -> Result<()> {
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(Error::Config(format!(
                "per_page must be between 1 and {}, got {}",
                MAX_PER_PAGE, self.per_page
            )));
        }
        if self.section.trim_matches('/').is_empty() {
            return Err(Error::Config("section must not be empty".to_string()));
        }
        Ok(())
    }

    fn section(&self) -> &str {
        self.section.trim_matches('/')
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub articles: usize,
    pub skipped_private: usize,
    pub images: usize,
}

/// Coordinates the Qiita item source, the image rewriter, and the fetcher.
pub struct App {
    items: Box<dyn ItemSource>,
    fetcher: Box<dyn ImageFetcher>,
    rewriter: ImageRewriter,
    template: Template,
    options: ExportOptions,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub items: Box<dyn ItemSource>,
    pub fetcher: Box<dyn ImageFetcher>,
    pub template: Template,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices, options: ExportOptions) -> Result<Self> {
        options.validate()?;

        let rewriter = ImageRewriter::new(format!("/{}/{{slug}}/", options.section()));

        Ok(Self {
            items: services.items,
            fetcher: services.fetcher,
            rewriter,
            template: services.template,
            options,
        })
    }

    /// Construct an app talking to the real Qiita API.
    pub fn new(config: &Config, options: ExportOptions, template: Template) -> Result<Self> {
        // One connection pool for both the API and image downloads.
        let http_client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        info!("Qiita API: {}", config.qiita_base_url);
        info!("Image scan mode: {}", options.mode);

        Self::with_services(
            AppServices {
                items: Box::new(QiitaClient::new_with_client(
                    config.qiita_token.clone(),
                    config.qiita_base_url.clone(),
                    http_client.clone(),
                )),
                fetcher: Box::new(HttpImageFetcher::new_with_client(http_client)),
                template,
            },
            options,
        )
    }

    /// Export every public item, one page at a time. Stops at the first error.
    pub async fn run(&self) -> Result<ExportSummary> {
        let per_page = self.options.per_page;
        let mut summary = ExportSummary::default();
        let mut page = 1;

        if self.options.dry_run {
            info!("Dry run: nothing will be downloaded or written");
        }

        loop {
            let item_page = self.items.fetch_page(page, per_page).await?;
            info!(
                "Fetched page {} ({} items, {} in total)",
                page,
                item_page.items.len(),
                item_page.total_count
            );

            for item in &item_page.items {
                if item.private {
                    info!("Skipping private item {}", item.id);
                    summary.skipped_private += 1;
                    continue;
                }

                summary.images += self.export_item(item).await?;
                summary.articles += 1;
            }

            if !item_page.has_next(page, per_page) {
                break;
            }
            page += 1;
        }

        info!(
            "Exported {} articles with {} images ({} private skipped)",
            summary.articles, summary.images, summary.skipped_private
        );
        Ok(summary)
    }

    pub fn article_dir(&self, slug: &str) -> PathBuf {
        self.options
            .content_dir
            .join(self.options.section())
            .join(slug)
    }

    /// Write one article bundle and return how many images it references.
    async fn export_item(&self, item: &Item) -> Result<usize> {
        item.validate_id()?;
        let slug = item.slug();
        let (body, images) = self.rewriter.rewrite(&item.body, &slug, self.options.mode);
        let article_dir = self.article_dir(&slug);

        info!("[{}] {} ({} images)", slug, item.title, images.len());

        if self.options.dry_run {
            for image in &images {
                info!("[{}] would download {} -> {}", slug, image.src, image.local_file_name);
            }
            return Ok(images.len());
        }

        fs::create_dir_all(&article_dir)?;

        for image in &images {
            let data = self.fetcher.fetch(&image.src).await?;
            if data.is_empty() {
                warn!("[{}] {} returned an empty body", slug, image.src);
            }

            let path = article_dir.join(&image.local_file_name);
            fs::write(&path, &data)?;
            info!("[{}] saved {} ({} bytes)", slug, path.display(), data.len());
        }

        let document = self.template.render(item, &body);
        fs::write(article_dir.join(INDEX_FILE), document)?;

        Ok(images.len())
    }
}
