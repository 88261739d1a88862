//! Plain-text excerpts extracted from markdown source
//!
//! The extractor works on the raw markup with a fixed sequence of regex
//! passes and never goes through the renderer, so a post whose body fails
//! to render still gets a preview.

use lazy_static::lazy_static;
use regex::Regex;

/// Default excerpt length, in characters
pub const DEFAULT_EXCERPT_LENGTH: usize = 150;

/// Appended to truncated excerpts
pub const ELLIPSIS: &str = "...";

lazy_static! {
    static ref FENCED_CODE: Regex = Regex::new(r"(?s)```.*?(?:```|\z)").unwrap();
    static ref INLINE_CODE: Regex = Regex::new(r"`[^`]*`").unwrap();
    static ref HEADING: Regex = Regex::new(r"(?m)^#{1,6}\s+").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*(.*?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*(.*?)\*").unwrap();
    static ref IMAGE: Regex = Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap();
    static ref NEWLINES: Regex = Regex::new(r"\n+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip markdown syntax and return the plain text, whitespace collapsed.
pub fn strip_markdown(markdown: &str) -> String {
    let text = FENCED_CODE.replace_all(markdown, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = HEADING.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    // Images go before links, otherwise the link pass would leave "!alt" behind
    let text = IMAGE.replace_all(&text, "");
    let text = LINK.replace_all(&text, "$1");
    let text = NEWLINES.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Extract an excerpt of at most `max_length` characters (plus ellipsis).
///
/// Truncation prefers the last space inside the window, unless that space
/// sits before 70% of `max_length`; then the text is cut mid-word at
/// exactly `max_length`.
///
/// # Examples
/// ```
/// use blogfront::content::extract_excerpt;
///
/// assert_eq!(extract_excerpt("# Hi\n\nSome **bold** text", 150), "Hi Some bold text");
/// ```
pub fn extract_excerpt(markdown: &str, max_length: usize) -> String {
    let plain = strip_markdown(markdown);
    truncate_at_word(&plain, max_length)
}

/// Truncate plain text to `max_length` characters at a word boundary.
pub fn truncate_at_word(plain: &str, max_length: usize) -> String {
    if plain.chars().count() <= max_length {
        return plain.to_string();
    }

    let truncated: String = plain.chars().take(max_length).collect();
    let cut = match truncated.rfind(' ') {
        Some(byte_pos) => {
            let char_pos = truncated[..byte_pos].chars().count();
            if char_pos * 10 >= max_length * 7 {
                byte_pos
            } else {
                truncated.len()
            }
        }
        None => truncated.len(),
    };

    format!("{}{}", &truncated[..cut], ELLIPSIS)
}
