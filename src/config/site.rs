//! Site configuration (_config.yml)

use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::content::DEFAULT_EXCERPT_LENGTH;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Document title used when a route has none configured
    pub title: String,

    /// Base path the site is deployed under, e.g. "/blog/"
    pub root: String,

    // Listing
    pub excerpt_length: usize,
    pub home_posts: usize,

    // Date format (Moment.js style)
    pub date_format: String,

    #[serde(default)]
    pub highlight: HighlightConfig,

    /// Route name -> document title. IndexMap keeps the YAML order for listings.
    #[serde(default)]
    pub route_titles: IndexMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let route_titles = [
            ("home", "首页 - 我的个人博客"),
            ("posts", "文章列表 - 我的个人博客"),
            ("post", "文章详情 - 我的个人博客"),
            ("about", "关于 - 我的个人博客"),
            ("not-found", "404 - 页面未找到"),
        ]
        .into_iter()
        .map(|(name, title)| (name.to_string(), title.to_string()))
        .collect();

        Self {
            title: "我的个人博客".to_string(),
            root: "/".to_string(),
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            home_posts: 3,
            date_format: "YYYY-MM-DD".to_string(),
            highlight: HighlightConfig::default(),
            route_titles,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::debug!("Loading site config from {:?}", path);
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Configured title for a route name
    pub fn route_title(&self, name: &str) -> Option<&str> {
        self.route_titles.get(name).map(String::as_str)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
