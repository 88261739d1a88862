//! Content module - posts, the post catalog, markdown rendering and excerpts

pub mod catalog;
mod excerpt;
mod markdown;
mod post;

pub use catalog::{Catalog, CatalogError, TagCount};
pub use excerpt::{extract_excerpt, strip_markdown, DEFAULT_EXCERPT_LENGTH, ELLIPSIS};
pub use markdown::{MarkdownRenderer, RenderError, RENDER_FALLBACK};
pub use post::{is_url_safe_slug, PostRecord, POST_DATE_FORMAT};
