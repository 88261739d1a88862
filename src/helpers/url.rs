//! URL helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Join `path` under the base path `root`
///
/// # Examples
/// ```ignore
/// join_root("/blog/", "/posts/hello-world") // -> "/blog/posts/hello-world"
/// ```
pub fn join_root(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Strip the base path from an incoming URL path.
///
/// Returns `None` when the path lies outside the base path. The result
/// always starts with `/`.
pub fn strip_root<'a>(root: &str, path: &'a str) -> Option<&'a str> {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return Some(path);
    }

    let rest = path.strip_prefix(root)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        // "/blogging" is not under "/blog"
        None
    }
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Decode a percent-encoded path segment
pub fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_root() {
        assert_eq!(join_root("/blog/", "/posts/a"), "/blog/posts/a");
        assert_eq!(join_root("/blog", "about"), "/blog/about");
        assert_eq!(join_root("/blog/", "/"), "/blog/");
        assert_eq!(join_root("/", "/posts"), "/posts");
        assert_eq!(join_root("/", ""), "/");
    }

    #[test]
    fn test_strip_root() {
        assert_eq!(strip_root("/blog/", "/blog/posts"), Some("/posts"));
        assert_eq!(strip_root("/blog/", "/blog/"), Some("/"));
        assert_eq!(strip_root("/blog", "/blog"), Some("/"));
        assert_eq!(strip_root("/blog/", "/blogging"), None);
        assert_eq!(strip_root("/blog/", "/posts"), None);
        assert_eq!(strip_root("/", "/posts"), Some("/posts"));
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(encode_segment("hello world"), "hello%20world");
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_eq!(encode_segment("你好"), "%E4%BD%A0%E5%A5%BD");
        assert_eq!(decode_segment("%E4%BD%A0%E5%A5%BD"), "你好");
        assert_eq!(decode_segment("hello%20world"), "hello world");
        assert_eq!(decode_segment("100%"), "100%");
    }
}
