use super::{parse_image_tag, Image, ImageLocator, ScanMode};
use url::Url;

/// Image path prefix used when none is configured. `{slug}` is replaced with
/// the article slug.
pub const DEFAULT_PATH_PREFIX: &str = "/posts/{slug}/";

/// Quotes never appear unencoded in a URL; a URL-mode match that contains
/// one has run into the surrounding markup.
const QUOTES: [char; 2] = ['"', '\''];

/// Rewrites image references in article bodies to local paths.
#[derive(Debug, Clone)]
pub struct ImageRewriter {
    locator: ImageLocator,
    path_prefix: String,
}

impl ImageRewriter {
    pub fn new(path_prefix: impl Into<String>) -> Self {
        Self {
            locator: ImageLocator::new(),
            path_prefix: path_prefix.into(),
        }
    }

    /// Replace every image reference in `body` with a path under the slug's
    /// prefix and return the rewritten body with the images to download, in
    /// body order.
    ///
    /// Local file names are `{n}{ext}` where `n` is the 1-based position of
    /// the match in the body, counting matches that had no usable source.
    /// Tag-mode references become Markdown images; URL-mode references are
    /// swapped for the bare path so the surrounding markup is left as the
    /// author wrote it.
    pub fn rewrite(&self, body: &str, slug: &str, mode: ScanMode) -> (String, Vec<Image>) {
        let mut rewritten = String::with_capacity(body.len());
        let mut images = Vec::new();
        let mut occurrence = 0;
        let mut last = 0;

        for m in self.locator.locate(body, mode) {
            rewritten.push_str(&body[last..m.start]);
            last = m.end;
            occurrence += 1;

            let (mut image, trailing) = match mode {
                ScanMode::Tag => (parse_image_tag(m.text), ""),
                ScanMode::Url => {
                    let (src, trailing) = match m.text.find(QUOTES) {
                        Some(quote) => m.text.split_at(quote),
                        None => (m.text, ""),
                    };
                    let image = Image {
                        src: src.to_string(),
                        ..Image::default()
                    };
                    (image, trailing)
                }
            };

            if image.src.is_empty() {
                tracing::warn!("Skipping image reference without a source: {}", m.text);
                rewritten.push_str(m.text);
                continue;
            }

            image.local_file_name = format!("{}{}", occurrence, extension(&image.src));
            let local_path = self.local_path(slug, &image.local_file_name);
            tracing::debug!("Image {} -> {}", image.src, local_path);

            match mode {
                ScanMode::Tag => {
                    rewritten.push_str(&format!("![{}]({})", image.alt, local_path));
                }
                ScanMode::Url => {
                    rewritten.push_str(&local_path);
                    rewritten.push_str(trailing);
                }
            }
            images.push(image);
        }

        rewritten.push_str(&body[last..]);
        (rewritten, images)
    }

    fn local_path(&self, slug: &str, file_name: &str) -> String {
        let prefix = self.path_prefix.replace("{slug}", slug);
        format!("{}/{}", prefix.trim_end_matches('/'), file_name)
    }
}

impl Default for ImageRewriter {
    fn default() -> Self {
        Self::new(DEFAULT_PATH_PREFIX)
    }
}

/// Extension (with the dot) of the last segment of `src`'s URL path, or an
/// empty string. Encoded slashes count as separators so imgix proxy URLs
/// resolve to the wrapped object's extension.
fn extension(src: &str) -> String {
    let path = match Url::parse(src) {
        Ok(url) => url.path().to_string(),
        Err(_) => src.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    let path = path.replace("%2F", "/").replace("%2f", "/");

    let file_name = path.rsplit('/').next().unwrap_or_default();
    match file_name.rfind('.') {
        Some(dot) => file_name[dot..].to_string(),
        None => String::new(),
    }
}
