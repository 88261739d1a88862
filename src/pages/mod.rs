//! Page views - what each routed page displays
//!
//! A view is plain data built from a navigation event and the catalog; the
//! UI layer only has to lay it out.

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{Catalog, MarkdownRenderer, PostRecord, TagCount};
use crate::helpers::format_date;
use crate::router::{NavigationEvent, PageId, RouteTable};

/// A post as shown in lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub href: String,
}

/// Link to an adjacent post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostLink {
    pub title: String,
    pub href: String,
}

/// A full post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetail {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub tags: Vec<String>,
    /// Rendered body, or the render fallback notice
    pub html: String,
    pub newer: Option<PostLink>,
    pub older: Option<PostLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "kebab-case")]
pub enum PageView {
    Home {
        recent: Vec<PostSummary>,
        tags: Vec<TagCount>,
    },
    Posts {
        posts: Vec<PostSummary>,
    },
    Post(PostDetail),
    About {
        post_count: usize,
        tags: Vec<TagCount>,
    },
    NotFound {
        path: String,
    },
}

/// Builds page views from navigation events
pub struct PageBuilder<'a> {
    config: &'a SiteConfig,
    catalog: &'a Catalog,
    renderer: &'a MarkdownRenderer,
    table: &'a RouteTable,
}

impl<'a> PageBuilder<'a> {
    pub fn new(
        config: &'a SiteConfig,
        catalog: &'a Catalog,
        renderer: &'a MarkdownRenderer,
        table: &'a RouteTable,
    ) -> Self {
        Self {
            config,
            catalog,
            renderer,
            table,
        }
    }

    /// View for a completed navigation
    pub fn build(&self, event: &NavigationEvent) -> PageView {
        match event.page {
            PageId::Home => PageView::Home {
                recent: self
                    .catalog
                    .all()
                    .iter()
                    .take(self.config.home_posts)
                    .map(|p| self.summary(p))
                    .collect(),
                tags: self.catalog.tags(),
            },
            PageId::Posts => PageView::Posts {
                posts: self.catalog.all().iter().map(|p| self.summary(p)).collect(),
            },
            PageId::Post => match event.param("slug") {
                Some(slug) => self.post(slug).unwrap_or_else(|| self.not_found(&event.path)),
                None => self.not_found(&event.path),
            },
            PageId::About => PageView::About {
                post_count: self.catalog.len(),
                tags: self.catalog.tags(),
            },
            PageId::NotFound => self.not_found(&event.path),
        }
    }

    fn post(&self, slug: &str) -> Option<PageView> {
        let post = match self.catalog.get_by_slug(slug) {
            Ok(post) => post,
            Err(e) => {
                tracing::debug!("{}", e);
                return None;
            }
        };
        let (newer, older) = self.catalog.neighbors(slug).ok()?;

        Some(PageView::Post(PostDetail {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: self.date(post),
            tags: post.tags.clone(),
            html: self.renderer.render(&post.content),
            newer: newer.map(|p| self.link(p)),
            older: older.map(|p| self.link(p)),
        }))
    }

    fn summary(&self, post: &PostRecord) -> PostSummary {
        PostSummary {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: self.date(post),
            excerpt: post.summary(self.config.excerpt_length),
            tags: post.tags.clone(),
            href: self.href(post),
        }
    }

    fn link(&self, post: &PostRecord) -> PostLink {
        PostLink {
            title: post.title.clone(),
            href: self.href(post),
        }
    }

    fn href(&self, post: &PostRecord) -> String {
        self.table
            .href(PageId::Post, &[("slug", post.slug.as_str())])
            .unwrap_or_default()
    }

    fn date(&self, post: &PostRecord) -> String {
        post.parsed_date()
            .map(|d| format_date(&d, &self.config.date_format))
            .unwrap_or_else(|| post.date.clone())
    }

    fn not_found(&self, path: &str) -> PageView {
        PageView::NotFound {
            path: path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RENDER_FALLBACK;
    use crate::router::{DocumentTitle, Navigator, ScrollPosition};

    struct Fixture {
        config: SiteConfig,
        catalog: Catalog,
        renderer: MarkdownRenderer,
    }

    impl Fixture {
        fn new() -> Self {
            let config = SiteConfig {
                root: "/blog/".to_string(),
                ..SiteConfig::default()
            };
            let renderer = MarkdownRenderer::from_config(&config.highlight);
            Self {
                config,
                catalog: Catalog::builtin(),
                renderer,
            }
        }

        fn view(&self, path: &str) -> PageView {
            let mut nav = Navigator::from_config(&self.config, DocumentTitle::new());
            let event = nav.push(path, ScrollPosition::TOP);
            PageBuilder::new(&self.config, &self.catalog, &self.renderer, nav.table()).build(&event)
        }
    }

    #[test]
    fn test_home_view() {
        let fixture = Fixture::new();
        match fixture.view("/blog/") {
            PageView::Home { recent, tags } => {
                assert_eq!(recent.len(), 3);
                assert_eq!(recent[0].slug, "hello-world");
                assert_eq!(recent[0].href, "/blog/posts/hello-world");
                assert_eq!(recent[0].date, "2025-10-22");
                assert!(!tags.is_empty());
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_posts_view_uses_precomputed_excerpts() {
        let fixture = Fixture::new();
        match fixture.view("/blog/posts") {
            PageView::Posts { posts } => {
                assert_eq!(posts.len(), 4);
                assert_eq!(posts[1].excerpt, "深入探讨 Vue 3 中 Composition API 的使用方法和最佳实践。");
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_posts_view_extracts_missing_excerpts() {
        let config = SiteConfig::default();
        let catalog = Catalog::new(vec![PostRecord::new(
            "plain",
            "Plain",
            "2025-01-01",
            "# Plain\n\n```js\nhidden()\n```\n\nVisible **text**",
        )])
        .unwrap();
        let renderer = MarkdownRenderer::from_config(&config.highlight);
        let mut nav = Navigator::from_config(&config, DocumentTitle::new());
        let event = nav.push("/posts", ScrollPosition::TOP);

        let view = PageBuilder::new(&config, &catalog, &renderer, nav.table()).build(&event);
        match view {
            PageView::Posts { posts } => assert_eq!(posts[0].excerpt, "Plain Visible text"),
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_post_view() {
        let fixture = Fixture::new();
        match fixture.view("/blog/posts/vue3-composition-api") {
            PageView::Post(detail) => {
                assert_eq!(detail.title, "Vue 3 Composition API 深度解析");
                assert!(detail.html.contains("<h1>Vue 3 Composition API 深度解析</h1>"));
                assert_ne!(detail.html, RENDER_FALLBACK);
                assert_eq!(detail.newer.unwrap().href, "/blog/posts/hello-world");
                assert_eq!(detail.older.unwrap().title, "2025年现代CSS技巧合集");
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_unknown_post_is_not_found() {
        let fixture = Fixture::new();
        assert_eq!(
            fixture.view("/blog/posts/missing"),
            PageView::NotFound {
                path: "/posts/missing".to_string()
            }
        );
    }

    #[test]
    fn test_unmatched_path_is_not_found() {
        let fixture = Fixture::new();
        assert!(matches!(
            fixture.view("/blog/nonexistent/path"),
            PageView::NotFound { .. }
        ));
    }

    #[test]
    fn test_about_view() {
        let fixture = Fixture::new();
        match fixture.view("/blog/about") {
            PageView::About { post_count, .. } => assert_eq!(post_count, 4),
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_view_serializes_with_page_tag() {
        let view = PageView::NotFound {
            path: "/x".to_string(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["page"], "not-found");
        assert_eq!(json["path"], "/x");
    }
}
