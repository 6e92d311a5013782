//! Lenient `<img>` attribute scanner.
//!
//! This is a single linear pass over the tag text, not an HTML parser:
//! markup a strict parser would reject still yields whatever attributes can
//! be read from it.

use super::Image;
use std::iter::Peekable;
use std::str::Chars;

/// Parse one `<img ...>` tag into an [`Image`] with `local_file_name` unset.
///
/// `tag` must end with `>`, which [`super::ImageLocator`] guarantees.
/// Unknown attributes are skipped and non-numeric `width`/`height` read as 0.
pub fn parse_image_tag(tag: &str) -> Image {
    debug_assert!(tag.ends_with('>'), "unterminated image tag: {}", tag);

    let mut chars = tag.chars().peekable();
    let mut image = Image::default();

    // Tag name
    if !chars.by_ref().any(char::is_whitespace) {
        return image;
    }

    loop {
        skip_whitespace(&mut chars);
        match chars.peek() {
            None | Some('>') => break,
            Some(_) => {}
        }

        let Some(name) = read_attribute_name(&mut chars) else {
            // Valueless attribute or the `/` of a self-closing tag.
            continue;
        };

        skip_whitespace(&mut chars);
        let value = match chars.peek().copied() {
            // Only reachable when the caller broke the `>` contract.
            None => break,
            Some(quote @ ('"' | '\'')) => {
                chars.next();
                read_until(&mut chars, |c| c == quote || c == '>')
            }
            Some(_) => read_until(&mut chars, |c| c.is_whitespace() || c == '>'),
        };

        match name.to_lowercase().as_str() {
            "src" => image.src = value,
            "alt" => image.alt = value,
            "width" => image.width = parse_dimension(&value),
            "height" => image.height = parse_dimension(&value),
            _ => {}
        }
    }

    image
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

/// Reads up to and including `=`, dropping embedded whitespace. Returns
/// `None` when `>` or the end of input comes first; `>` is left unread.
fn read_attribute_name(chars: &mut Peekable<Chars<'_>>) -> Option<String> {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        match c {
            '>' => return None,
            '=' => {
                chars.next();
                return Some(name);
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            c => {
                chars.next();
                name.push(c);
            }
        }
    }
    None
}

/// Reads until `end` matches; the terminating character is consumed.
fn read_until(chars: &mut Peekable<Chars<'_>>, end: impl Fn(char) -> bool) -> String {
    let mut value = String::new();
    for c in chars.by_ref() {
        if end(c) {
            break;
        }
        value.push(c);
    }
    value
}

fn parse_dimension(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_quoted_attributes() {
        let image = parse_image_tag(
            r#"<img src="https://cdn.example/a.png" alt="shot" width="10" height="20">"#,
        );

        assert_eq!(image.src, "https://cdn.example/a.png");
        assert_eq!(image.alt, "shot");
        assert_eq!(image.width, 10);
        assert_eq!(image.height, 20);
        assert!(image.local_file_name.is_empty());
    }

    #[test]
    fn test_attribute_order_does_not_matter() {
        let expected = parse_image_tag(r#"<img src="x.png" alt="A" width="3" height="4">"#);

        for tag in [
            r#"<img width="3" alt="A" height="4" src="x.png">"#,
            r#"<img height="4" src="x.png" width="3" alt="A">"#,
            r#"<img alt="A" height="4" width="3" src="x.png">"#,
        ] {
            assert_eq!(parse_image_tag(tag), expected, "tag: {}", tag);
        }
    }

    #[test]
    fn test_unquoted_values_match_quoted_values() {
        let quoted = parse_image_tag(r#"<img width="100" height="50" src="a.png">"#);
        let unquoted = parse_image_tag(r#"<img width=100 height=50 src=a.png>"#);

        assert_eq!(quoted, unquoted);
        assert_eq!(unquoted.width, 100);
        assert_eq!(unquoted.src, "a.png");
    }

    #[test]
    fn test_malformed_dimensions_default_to_zero() {
        let image = parse_image_tag(r#"<img src="a.png" width="abc" height="12px">"#);

        assert_eq!(image.src, "a.png");
        assert_eq!(image.width, 0);
        assert_eq!(image.height, 0);
    }

    #[test]
    fn test_attribute_names_are_case_insensitive() {
        let image = parse_image_tag(r#"<img SRC="a.png" Alt="hello" WIDTH="7">"#);

        assert_eq!(image.src, "a.png");
        assert_eq!(image.alt, "hello");
        assert_eq!(image.width, 7);
    }

    #[test]
    fn test_unknown_attributes_are_skipped() {
        let image = parse_image_tag(
            r#"<img class="screenshot" data-id=42 src="a.png" style="border: 1px" alt="a">"#,
        );

        assert_eq!(image.src, "a.png");
        assert_eq!(image.alt, "a");
    }

    #[test]
    fn test_alt_with_spaces_and_multibyte_text() {
        let image = parse_image_tag(
            r#"<img width="156" alt="スクリーンショット 2019-03-15 12.04.43.png" src="https://qiita-image-store.s3.amazonaws.com/0/21341/5dbb4305.png">"#,
        );

        assert_eq!(image.width, 156);
        assert_eq!(image.alt, "スクリーンショット 2019-03-15 12.04.43.png");
        assert_eq!(
            image.src,
            "https://qiita-image-store.s3.amazonaws.com/0/21341/5dbb4305.png"
        );
    }

    #[test]
    fn test_spaces_around_equals() {
        let image = parse_image_tag(r#"<img src = "a.png"  width =  8 >"#);

        assert_eq!(image.src, "a.png");
        assert_eq!(image.width, 8);
    }

    #[test]
    fn test_self_closing_tag() {
        let image = parse_image_tag(r#"<img src="a.png" alt="x" />"#);

        assert_eq!(image.src, "a.png");
        assert_eq!(image.alt, "x");
    }

    #[test]
    fn test_unterminated_quote_stops_at_closing_bracket() {
        let image = parse_image_tag(r#"<img alt="oops src="a.png">"#);

        assert_eq!(image.alt, "oops src=");
        assert!(image.src.is_empty());
    }

    #[test]
    fn test_tag_without_attributes() {
        assert_eq!(parse_image_tag("<img>"), Image::default());
        assert_eq!(parse_image_tag("<img >"), Image::default());
    }

    #[test]
    fn test_single_quoted_value() {
        let image = parse_image_tag("<img src='a b.png' width='4'>");

        assert_eq!(image.src, "a b.png");
        assert_eq!(image.width, 4);
    }
}
