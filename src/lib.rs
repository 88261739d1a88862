//! blogfront: the core of a personal blog front-end
//!
//! This crate provides the logic behind a small client-side blog: a fixed
//! catalog of posts, markdown rendering that never fails its caller,
//! plain-text excerpts for post lists, and a router that resolves paths to
//! pages while keeping the document title and scroll position in sync.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod pages;
pub mod router;

use anyhow::{Context, Result};
use std::path::Path;

use content::{Catalog, MarkdownRenderer};
use pages::{PageBuilder, PageView};
use router::{NavigationEvent, Navigator, RouteTable, TitleSink};

/// The blog application
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Process-wide post catalog
    pub catalog: &'static Catalog,
    renderer: MarkdownRenderer,
}

impl Blog {
    /// Create a blog over the process-wide catalog
    pub fn new(config: config::SiteConfig) -> Self {
        let renderer = MarkdownRenderer::from_config(&config.highlight);
        Self {
            config,
            catalog: content::catalog::global(),
            renderer,
        }
    }

    /// Create a blog from the `_config.yml` in `base_dir`, if any
    pub fn load<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");
        let config = config::SiteConfig::load_or_default(config_path)?;
        Ok(Self::new(config))
    }

    /// Create a blog from an explicit config file, which must exist
    pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config = config::SiteConfig::load(path)
            .with_context(|| format!("Failed to load config {:?}", path))?;
        Ok(Self::new(config))
    }

    /// A navigator over the standard routes
    pub fn navigator<T: TitleSink>(&self, title_sink: T) -> Navigator<T> {
        Navigator::from_config(&self.config, title_sink)
    }

    /// Build the view for a navigation
    pub fn view(&self, table: &RouteTable, event: &NavigationEvent) -> PageView {
        PageBuilder::new(&self.config, self.catalog, &self.renderer, table).build(event)
    }

    /// Render markdown through the fail-soft pipeline
    pub fn render(&self, markdown: &str) -> String {
        self.renderer.render(markdown)
    }
}
