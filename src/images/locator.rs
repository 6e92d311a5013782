use super::ScanMode;
use regex::Regex;

/// Shortest `<img ... >` run on a single line.
const TAG_PATTERN: &str = r"<img.*?>";

/// Bare image-store URL or imgix proxy URL wrapping one, up to the first
/// whitespace, `]`, `)` or `>`.
const URL_PATTERN: &str = concat!(
    r"(?:https://qiita-image-store\.s3\.amazonaws\.com/",
    r"|https://qiita-user-contents\.imgix\.net/https%3A%2F%2Fqiita-image-store\.s3\.amazonaws\.com)",
    r"[^\s\])>]*",
);

/// A located image reference: byte offsets into the body plus the matched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMatch<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// Holds the compiled reference patterns for both scan modes.
#[derive(Debug, Clone)]
pub struct ImageLocator {
    tag: Regex,
    url: Regex,
}

impl ImageLocator {
    pub fn new() -> Self {
        Self {
            tag: Regex::new(TAG_PATTERN).expect("Failed to compile img tag pattern"),
            url: Regex::new(URL_PATTERN).expect("Failed to compile image URL pattern"),
        }
    }

    pub fn pattern(&self, mode: ScanMode) -> &Regex {
        match mode {
            ScanMode::Tag => &self.tag,
            ScanMode::Url => &self.url,
        }
    }

    /// All non-overlapping references in `body`, left to right.
    pub fn locate<'a>(&self, body: &'a str, mode: ScanMode) -> Vec<ImageMatch<'a>> {
        self.pattern(mode)
            .find_iter(body)
            .map(|m| ImageMatch {
                start: m.start(),
                end: m.end(),
                text: m.as_str(),
            })
            .collect()
    }
}

impl Default for ImageLocator {
    fn default() -> Self {
        Self::new()
    }
}
