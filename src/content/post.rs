//! Post model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::excerpt::extract_excerpt;

/// Date format used by post records
pub const POST_DATE_FORMAT: &str = "%Y-%m-%d";

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Slug (URL-friendly name), used as the routing key
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date, `YYYY-MM-DD`
    pub date: String,

    /// Raw markdown content
    pub content: String,

    /// Precomputed excerpt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Post tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PostRecord {
    /// Create a new post with the required fields
    pub fn new(slug: &str, title: &str, date: &str, content: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            content: content.to_string(),
            excerpt: None,
            tags: Vec::new(),
        }
    }

    pub fn with_excerpt(mut self, excerpt: &str) -> Self {
        self.excerpt = Some(excerpt.to_string());
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Parse the publication date.
    ///
    /// Records held by a [`Catalog`](super::Catalog) were validated on
    /// construction, so this only returns `None` for free-standing records.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, POST_DATE_FORMAT).ok()
    }

    /// The precomputed excerpt, or one extracted from the content
    pub fn summary(&self, max_length: usize) -> String {
        match &self.excerpt {
            Some(excerpt) => excerpt.clone(),
            None => extract_excerpt(&self.content, max_length),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Check that a slug is a URL-safe token: lowercase alphanumerics
/// separated by single hyphens.
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty() && slug::slugify(slug) == slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_date() {
        let post = PostRecord::new("a", "A", "2025-10-22", "");
        assert_eq!(
            post.parsed_date(),
            NaiveDate::from_ymd_opt(2025, 10, 22)
        );
        assert_eq!(PostRecord::new("a", "A", "22/10/2025", "").parsed_date(), None);
    }

    #[test]
    fn test_url_safe_slug() {
        assert!(is_url_safe_slug("hello-world"));
        assert!(is_url_safe_slug("vue3-composition-api"));
        assert!(!is_url_safe_slug(""));
        assert!(!is_url_safe_slug("Hello-World"));
        assert!(!is_url_safe_slug("hello world"));
        assert!(!is_url_safe_slug("hello--world"));
        assert!(!is_url_safe_slug("-hello"));
    }

    #[test]
    fn test_builders() {
        let post = PostRecord::new("a", "A", "2025-01-01", "body")
            .with_excerpt("short")
            .with_tags(&["Vue", "Vite"]);
        assert_eq!(post.excerpt.as_deref(), Some("short"));
        assert!(post.has_tag("Vue"));
        assert!(!post.has_tag("vue"));
    }

    #[test]
    fn test_summary() {
        let post = PostRecord::new("a", "A", "2025-01-01", "## Intro\n\nSome `code` and **bold** words here");
        assert_eq!(post.summary(150), "Intro Some and bold words here");
        assert_eq!(post.summary(12), "Intro Some...");

        // A precomputed excerpt is returned as is, never truncated
        let post = post.with_excerpt("Hand written");
        assert_eq!(post.summary(3), "Hand written");
    }
}
