//! Post catalog - the fixed, ordered set of posts compiled into the binary
//!
//! The catalog is built once and never mutated. A process-wide instance is
//! installed with [`init`] (or lazily with the built-in posts by [`global`])
//! and handed out as `&'static Catalog`, so readers need no locking.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use super::post::{is_url_safe_slug, PostRecord, POST_DATE_FORMAT};

static GLOBAL: OnceLock<Catalog> = OnceLock::new();

/// Catalog construction and lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Duplicate slug: {0}")]
    DuplicateSlug(String),

    #[error("Slug is not URL-safe: {0:?}")]
    InvalidSlug(String),

    #[error("Post {0} has an empty title")]
    EmptyTitle(String),

    #[error("Post {slug} has an invalid date: {date:?}")]
    InvalidDate { slug: String, date: String },

    #[error("Catalog already initialized")]
    AlreadyInitialized,
}

/// A tag with the number of posts carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// Immutable, ordered collection of posts
#[derive(Debug, Clone)]
pub struct Catalog {
    posts: Vec<PostRecord>,
    /// slug -> position in `posts`
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, validating every record
    pub fn new(posts: Vec<PostRecord>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(posts.len());

        for (pos, post) in posts.iter().enumerate() {
            if !is_url_safe_slug(&post.slug) {
                return Err(CatalogError::InvalidSlug(post.slug.clone()));
            }
            if post.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle(post.slug.clone()));
            }
            if NaiveDate::parse_from_str(&post.date, POST_DATE_FORMAT).is_err() {
                return Err(CatalogError::InvalidDate {
                    slug: post.slug.clone(),
                    date: post.date.clone(),
                });
            }
            if index.insert(post.slug.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateSlug(post.slug.clone()));
            }
        }

        Ok(Self { posts, index })
    }

    /// The posts shipped with the site, newest first
    pub fn builtin() -> Self {
        let posts = builtin_posts();
        // Known-good data; checked by test_builtin_posts_are_valid
        let index = posts
            .iter()
            .enumerate()
            .map(|(pos, post)| (post.slug.clone(), pos))
            .collect();
        Self { posts, index }
    }

    /// All posts in catalog order
    pub fn all(&self) -> &[PostRecord] {
        &self.posts
    }

    /// Exact, case-sensitive lookup by slug
    pub fn get_by_slug(&self, slug: &str) -> Result<&PostRecord, CatalogError> {
        self.index
            .get(slug)
            .map(|&pos| &self.posts[pos])
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))
    }

    /// The posts directly before (newer) and after (older) `slug`
    pub fn neighbors(
        &self,
        slug: &str,
    ) -> Result<(Option<&PostRecord>, Option<&PostRecord>), CatalogError> {
        let pos = *self
            .index
            .get(slug)
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))?;
        let newer = pos.checked_sub(1).map(|p| &self.posts[p]);
        let older = self.posts.get(pos + 1);
        Ok((newer, older))
    }

    /// Posts carrying `tag`, in catalog order
    pub fn by_tag(&self, tag: &str) -> Vec<&PostRecord> {
        self.posts.iter().filter(|p| p.has_tag(tag)).collect()
    }

    /// All tags with counts, most used first; ties keep first appearance
    pub fn tags(&self) -> Vec<TagCount> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for post in &self.posts {
            for tag in &post.tags {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }

        let mut tags: Vec<TagCount> = counts
            .into_iter()
            .map(|(name, count)| TagCount {
                name: name.to_string(),
                count,
            })
            .collect();
        tags.sort_by(|a, b| b.count.cmp(&a.count));
        tags
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Install the process-wide catalog. Fails if one is already installed.
pub fn init(catalog: Catalog) -> Result<&'static Catalog, CatalogError> {
    let mut installed = false;
    let global = GLOBAL.get_or_init(|| {
        installed = true;
        catalog
    });

    if installed {
        tracing::debug!("Installed catalog with {} posts", global.len());
        Ok(global)
    } else {
        Err(CatalogError::AlreadyInitialized)
    }
}

/// The process-wide catalog, falling back to the built-in posts
pub fn global() -> &'static Catalog {
    GLOBAL.get_or_init(|| {
        tracing::debug!("Installing built-in catalog");
        Catalog::builtin()
    })
}

fn builtin_posts() -> Vec<PostRecord> {
    vec![
        PostRecord::new(
            "hello-world",
            "你好，博客！",
            "2025-10-22",
            include_str!("posts/hello-world.md"),
        )
        .with_excerpt("这是我的第一篇博客文章，介绍了博客的搭建过程。")
        .with_tags(&["介绍", "Vue", "Vite"]),
        PostRecord::new(
            "vue3-composition-api",
            "Vue 3 Composition API 深度解析",
            "2025-10-20",
            include_str!("posts/vue3-composition-api.md"),
        )
        .with_excerpt("深入探讨 Vue 3 中 Composition API 的使用方法和最佳实践。")
        .with_tags(&["Vue", "Composition API", "前端"]),
        PostRecord::new(
            "modern-css-tricks",
            "2025年现代CSS技巧合集",
            "2025-10-18",
            include_str!("posts/modern-css-tricks.md"),
        )
        .with_excerpt("分享2025年最流行的CSS技巧和最佳实践，让你的页面更美观、更高效。")
        .with_tags(&["CSS", "前端", "设计"]),
        PostRecord::new(
            "vite-performance-optimization",
            "Vite 性能优化完全指南",
            "2025-10-15",
            include_str!("posts/vite-performance-optimization.md"),
        )
        .with_excerpt("详细介绍如何优化 Vite 项目的构建和运行性能，提升开发体验和用户体验。")
        .with_tags(&["Vite", "性能优化", "构建工具"]),
    ]
}
