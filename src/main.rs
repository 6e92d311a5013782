use anyhow::Result;
use clap::Parser;
use qiita_exporter::app::{App, ExportOptions};
use qiita_exporter::images::ScanMode;
use qiita_exporter::models::Config;
use qiita_exporter::template::Template;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "qiita-exporter")]
#[command(about = "Export Qiita articles and their images as Hugo page bundles")]
struct CliArgs {
    /// How image references are found: `tag` for <img> tags, `url` for bare
    /// Qiita image-store URLs.
    #[arg(long, default_value = "tag", value_parser = parse_mode_arg)]
    mode: ScanMode,

    /// Root of the site's content tree.
    #[arg(long, default_value = "content")]
    content_dir: PathBuf,

    /// Section under the content root; also the first segment of image paths.
    #[arg(long, default_value = "posts")]
    section: String,

    /// Template file replacing the built-in front-matter template.
    #[arg(long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Items requested per API page (1-100).
    #[arg(long, default_value_t = 20)]
    per_page: usize,

    /// Rewrite and log only; download and write nothing.
    #[arg(long)]
    dry_run: bool,
}

fn parse_mode_arg(input: &str) -> std::result::Result<ScanMode, String> {
    input.parse()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qiita_exporter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting qiita-exporter");

    let args = CliArgs::parse();

    let template = match &args.template {
        Some(path) => match Template::from_file(path) {
            Ok(template) => template,
            Err(e) => {
                error!("Failed to load template {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Template::default(),
    };

    let options = ExportOptions {
        content_dir: args.content_dir,
        section: args.section,
        mode: args.mode,
        per_page: args.per_page,
        dry_run: args.dry_run,
    };

    let app = match Config::from_env().and_then(|config| App::new(&config, options, template)) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize exporter: {}", e);
            std::process::exit(1);
        }
    };

    match app.run().await {
        Ok(summary) => {
            info!(
                "Export completed: {} articles, {} images",
                summary.articles, summary.images
            );
            Ok(())
        }
        Err(e) => {
            error!("Export failed: {}", e);
            std::process::exit(1);
        }
    }
}
