//! Route table: ordered route patterns and path resolution

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::helpers::{decode_segment, encode_segment, join_root, strip_root};

/// Parameter bound by the catch-all route to the unmatched path
pub const PATH_MATCH_PARAM: &str = "path_match";

/// Route table construction errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route table has no catch-all route")]
    MissingCatchAll,

    #[error("Catch-all route for {0} must be the last route")]
    CatchAllNotLast(PageId),

    #[error("Page {0} is routed twice")]
    DuplicatePage(PageId),

    #[error("Invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Logical page a path resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    Home,
    Posts,
    Post,
    About,
    NotFound,
}

impl PageId {
    /// Route name, also the key into `SiteConfig::route_titles`
    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Posts => "posts",
            PageId::Post => "post",
            PageId::About => "about",
            PageId::NotFound => "not-found",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segment of a parameterized pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
}

/// How a route matches a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Matches one normalized path exactly, e.g. "/about"
    Exact(String),
    /// Matches paths segment by segment, e.g. "/posts/:slug"
    Param(Vec<Segment>),
    /// Matches anything; binds [`PATH_MATCH_PARAM`]
    CatchAll,
}

impl RoutePattern {
    /// Parse a pattern string. `*` is the catch-all; `:name` segments are
    /// parameters.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        let invalid = |reason: &str| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if pattern == "*" {
            return Ok(RoutePattern::CatchAll);
        }
        if !pattern.starts_with('/') {
            return Err(invalid("must start with '/'"));
        }

        let normalized = normalize_path(pattern);
        if !normalized.contains("/:") {
            return Ok(RoutePattern::Exact(normalized));
        }

        let mut segments = Vec::new();
        for part in normalized.trim_start_matches('/').split('/') {
            match part.strip_prefix(':') {
                Some("") => return Err(invalid("empty parameter name")),
                Some(name) => {
                    if segments.contains(&Segment::Param(name.to_string())) {
                        return Err(invalid("duplicate parameter name"));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None if part.is_empty() => return Err(invalid("empty segment")),
                None => segments.push(Segment::Static(part.to_string())),
            }
        }

        Ok(RoutePattern::Param(segments))
    }

    /// Match a normalized path, returning the bound parameters.
    ///
    /// Static text compares ignoring ASCII case; parameter values are kept
    /// as written.
    fn matches(&self, path: &str) -> Option<IndexMap<String, String>> {
        match self {
            RoutePattern::Exact(exact) => exact.eq_ignore_ascii_case(path).then(IndexMap::new),
            RoutePattern::Param(segments) => {
                let parts: Vec<&str> = path.trim_start_matches('/').split('/').collect();
                if parts.len() != segments.len() {
                    return None;
                }

                let mut params = IndexMap::new();
                for (segment, part) in segments.iter().zip(parts) {
                    match segment {
                        Segment::Static(s) if s.eq_ignore_ascii_case(part) => {}
                        Segment::Static(_) => return None,
                        Segment::Param(_) if part.is_empty() => return None,
                        Segment::Param(name) => {
                            params.insert(name.clone(), decode_segment(part));
                        }
                    }
                }
                Some(params)
            }
            RoutePattern::CatchAll => {
                let mut params = IndexMap::new();
                params.insert(
                    PATH_MATCH_PARAM.to_string(),
                    path.trim_start_matches('/').to_string(),
                );
                Some(params)
            }
        }
    }
}

/// A route: pattern, target page and optional document title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub page: PageId,
    pub pattern: RoutePattern,
    pub title: Option<String>,
}

impl RouteDefinition {
    pub fn new(page: PageId, pattern: &str) -> Result<Self, RouteError> {
        Ok(Self {
            page,
            pattern: RoutePattern::parse(pattern)?,
            title: None,
        })
    }

    pub fn with_title(mut self, title: Option<&str>) -> Self {
        self.title = title.map(str::to_string);
        self
    }

    /// Parameter names this route binds, in order
    pub fn param_names(&self) -> Vec<&str> {
        match &self.pattern {
            RoutePattern::Param(segments) => segments
                .iter()
                .filter_map(|s| match s {
                    Segment::Param(name) => Some(name.as_str()),
                    Segment::Static(_) => None,
                })
                .collect(),
            RoutePattern::CatchAll => vec![PATH_MATCH_PARAM],
            RoutePattern::Exact(_) => Vec::new(),
        }
    }
}

/// Result of resolving a path against the route table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub page: PageId,
    pub params: IndexMap<String, String>,
    pub title: Option<String>,
    /// Path relative to the base path, without query or fragment
    pub path: String,
}

impl Resolution {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Ordered route table; first match wins, the catch-all comes last
#[derive(Debug, Clone)]
pub struct RouteTable {
    root: String,
    routes: Vec<RouteDefinition>,
}

impl RouteTable {
    /// Build a table, checking that exactly one catch-all exists and is last
    pub fn new(root: &str, routes: Vec<RouteDefinition>) -> Result<Self, RouteError> {
        let mut seen = Vec::with_capacity(routes.len());
        for (i, route) in routes.iter().enumerate() {
            if seen.contains(&route.page) {
                return Err(RouteError::DuplicatePage(route.page));
            }
            seen.push(route.page);

            if route.pattern == RoutePattern::CatchAll && i + 1 != routes.len() {
                return Err(RouteError::CatchAllNotLast(route.page));
            }
        }

        match routes.last() {
            Some(last) if last.pattern == RoutePattern::CatchAll => Ok(Self {
                root: normalize_root(root),
                routes,
            }),
            _ => Err(RouteError::MissingCatchAll),
        }
    }

    /// The blog's routes, titled from the site config
    pub fn standard(config: &SiteConfig) -> Self {
        let route = |page: PageId, pattern: RoutePattern| RouteDefinition {
            page,
            pattern,
            title: config.route_title(page.as_str()).map(str::to_string),
        };

        let routes = vec![
            route(PageId::Home, RoutePattern::Exact("/".to_string())),
            route(PageId::Posts, RoutePattern::Exact("/posts".to_string())),
            route(
                PageId::Post,
                RoutePattern::Param(vec![
                    Segment::Static("posts".to_string()),
                    Segment::Param("slug".to_string()),
                ]),
            ),
            route(PageId::About, RoutePattern::Exact("/about".to_string())),
            route(PageId::NotFound, RoutePattern::CatchAll),
        ];

        Self {
            root: normalize_root(&config.root),
            routes,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    /// Resolve a URL path to a page. Never fails: unmatched paths land on
    /// the catch-all route.
    pub fn resolve(&self, url: &str) -> Resolution {
        let raw = url.split(['?', '#']).next().unwrap_or_default();
        let (path, inside_root) = match strip_root(&self.root, raw) {
            Some(inner) => (normalize_path(inner), true),
            None => (normalize_path(raw), false),
        };

        for route in &self.routes {
            // Paths outside the base path only ever reach the catch-all
            if !inside_root && route.pattern != RoutePattern::CatchAll {
                continue;
            }
            if let Some(params) = route.pattern.matches(&path) {
                tracing::debug!("Resolved {} -> {} {:?}", url, route.page, params);
                return Resolution {
                    page: route.page,
                    params,
                    title: route.title.clone(),
                    path,
                };
            }
        }

        // Unreachable for tables built through `new` or `standard`
        Resolution {
            page: PageId::NotFound,
            params: IndexMap::new(),
            title: None,
            path,
        }
    }

    /// Build the URL of a page under the base path (reverse routing)
    pub fn href(&self, page: PageId, params: &[(&str, &str)]) -> Option<String> {
        let route = self.routes.iter().find(|r| r.page == page)?;
        let path = match &route.pattern {
            RoutePattern::Exact(exact) => exact.clone(),
            RoutePattern::Param(segments) => {
                let mut parts = Vec::with_capacity(segments.len());
                for segment in segments {
                    match segment {
                        Segment::Static(s) => parts.push(s.clone()),
                        Segment::Param(name) => {
                            let (_, value) = params.iter().find(|(k, _)| k == name)?;
                            if value.is_empty() {
                                return None;
                            }
                            parts.push(encode_segment(value));
                        }
                    }
                }
                format!("/{}", parts.join("/"))
            }
            RoutePattern::CatchAll => return None,
        };
        Some(join_root(&self.root, &path))
    }
}

/// Ensure a leading slash and drop a trailing one (except for "/")
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Base paths always start and end with a slash
fn normalize_root(root: &str) -> String {
    let trimmed = root.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}
