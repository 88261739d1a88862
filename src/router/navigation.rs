//! Navigation controller: history, scroll restoration and title sync
//!
//! Each navigation resolves a path synchronously, writes the document title
//! exactly once and decides the scroll offset:
//! - back/forward to an entry with a saved offset restores that offset
//! - everything else scrolls to the top

use indexmap::IndexMap;
use serde::Serialize;

use super::route::{PageId, RouteTable};
use super::title::TitleSink;
use crate::config::SiteConfig;

/// Scroll offset in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScrollPosition {
    pub left: u32,
    pub top: u32,
}

impl ScrollPosition {
    pub const TOP: ScrollPosition = ScrollPosition { left: 0, top: 0 };

    pub fn new(left: u32, top: u32) -> Self {
        Self { left, top }
    }
}

/// How a navigation was triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationKind {
    Push,
    Replace,
    Back,
    Forward,
}

/// Produced by every completed navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationEvent {
    pub page: PageId,
    pub params: IndexMap<String, String>,
    /// Path relative to the base path
    pub path: String,
    /// Title written to the document
    pub title: String,
    pub kind: NavigationKind,
    /// Offset saved on the history entry, only for back/forward
    pub saved_scroll: Option<ScrollPosition>,
    /// Offset to apply
    pub scroll: ScrollPosition,
}

impl NavigationEvent {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Decide where to scroll: a saved offset wins, otherwise the top
pub fn scroll_behavior(saved: Option<ScrollPosition>) -> ScrollPosition {
    saved.unwrap_or(ScrollPosition::TOP)
}

#[derive(Debug, Clone)]
struct HistoryEntry {
    url: String,
    scroll: Option<ScrollPosition>,
}

/// Resolves navigations against a route table and applies their side effects
#[derive(Debug)]
pub struct Navigator<T: TitleSink> {
    table: RouteTable,
    default_title: String,
    title_sink: T,
    entries: Vec<HistoryEntry>,
    /// Index of the current entry; `None` before the first navigation
    current: Option<usize>,
}

impl<T: TitleSink> Navigator<T> {
    pub fn new(table: RouteTable, default_title: &str, title_sink: T) -> Self {
        Self {
            table,
            default_title: default_title.to_string(),
            title_sink,
            entries: Vec::new(),
            current: None,
        }
    }

    /// Navigator over the standard routes of `config`
    pub fn from_config(config: &SiteConfig, title_sink: T) -> Self {
        Self::new(RouteTable::standard(config), &config.title, title_sink)
    }

    /// Navigate to a new entry, dropping any forward history
    pub fn push(&mut self, url: &str, current_scroll: ScrollPosition) -> NavigationEvent {
        if let Some(cur) = self.current {
            self.entries[cur].scroll = Some(current_scroll);
            self.entries.truncate(cur + 1);
        }
        self.entries.push(HistoryEntry {
            url: url.to_string(),
            scroll: None,
        });
        self.current = Some(self.entries.len() - 1);

        self.complete(url, NavigationKind::Push, None)
    }

    /// Replace the current entry
    pub fn replace(&mut self, url: &str) -> NavigationEvent {
        let entry = HistoryEntry {
            url: url.to_string(),
            scroll: None,
        };
        match self.current {
            Some(cur) => self.entries[cur] = entry,
            None => {
                self.entries.push(entry);
                self.current = Some(0);
            }
        }

        self.complete(url, NavigationKind::Replace, None)
    }

    /// Go back one entry. `None` at the start of history.
    pub fn back(&mut self, current_scroll: ScrollPosition) -> Option<NavigationEvent> {
        self.traverse(-1, current_scroll)
    }

    /// Go forward one entry. `None` at the end of history.
    pub fn forward(&mut self, current_scroll: ScrollPosition) -> Option<NavigationEvent> {
        self.traverse(1, current_scroll)
    }

    /// Move `delta` entries through history. `None` (and no side effects)
    /// when the target is out of range or `delta` is zero.
    pub fn go(&mut self, delta: isize, current_scroll: ScrollPosition) -> Option<NavigationEvent> {
        self.traverse(delta, current_scroll)
    }

    fn traverse(&mut self, delta: isize, current_scroll: ScrollPosition) -> Option<NavigationEvent> {
        let cur = self.current?;
        let target = cur.checked_add_signed(delta)?;
        if delta == 0 || target >= self.entries.len() {
            return None;
        }

        self.entries[cur].scroll = Some(current_scroll);
        self.current = Some(target);

        let entry = self.entries[target].clone();
        let kind = if delta < 0 {
            NavigationKind::Back
        } else {
            NavigationKind::Forward
        };
        Some(self.complete(&entry.url, kind, entry.scroll))
    }

    /// Resolve and apply side effects: one title write, scroll decision
    fn complete(
        &mut self,
        url: &str,
        kind: NavigationKind,
        saved_scroll: Option<ScrollPosition>,
    ) -> NavigationEvent {
        let resolution = self.table.resolve(url);
        let title = resolution
            .title
            .unwrap_or_else(|| self.default_title.clone());
        self.title_sink.set_title(&title);

        let scroll = scroll_behavior(saved_scroll);
        tracing::debug!(
            "Navigated ({:?}) to {} [{}], scroll {:?}",
            kind,
            url,
            resolution.page,
            scroll
        );

        NavigationEvent {
            page: resolution.page,
            params: resolution.params,
            path: resolution.path,
            title,
            kind,
            saved_scroll,
            scroll,
        }
    }

    /// URL of the current entry
    pub fn current_url(&self) -> Option<&str> {
        self.current.map(|cur| self.entries[cur].url.as_str())
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.current, Some(cur) if cur > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.current, Some(cur) if cur + 1 < self.entries.len())
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn title_sink(&self) -> &T {
        &self.title_sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::route::{RouteDefinition, PATH_MATCH_PARAM};
    use crate::router::title::DocumentTitle;

    fn navigator() -> Navigator<DocumentTitle> {
        Navigator::from_config(&SiteConfig::default(), DocumentTitle::new())
    }

    #[test]
    fn test_push_resolves_and_sets_title() {
        let mut nav = navigator();
        let event = nav.push("/posts/hello-world", ScrollPosition::TOP);
        assert_eq!(event.page, PageId::Post);
        assert_eq!(event.param("slug"), Some("hello-world"));
        assert_eq!(event.kind, NavigationKind::Push);
        assert_eq!(event.title, "文章详情 - 我的个人博客");
        assert_eq!(nav.title_sink().get(), "文章详情 - 我的个人博客");
        assert_eq!(nav.title_sink().writes(), 1);
    }

    #[test]
    fn test_title_written_once_per_navigation() {
        let mut nav = navigator();
        nav.push("/", ScrollPosition::TOP);
        assert_eq!(nav.title_sink().get(), "首页 - 我的个人博客");
        nav.push("/about", ScrollPosition::TOP);
        assert_eq!(nav.title_sink().get(), "关于 - 我的个人博客");
        nav.replace("/posts");
        assert_eq!(nav.title_sink().get(), "文章列表 - 我的个人博客");
        nav.back(ScrollPosition::TOP);
        assert_eq!(nav.title_sink().get(), "首页 - 我的个人博客");
        assert_eq!(nav.title_sink().writes(), 4);

        // No side effects at the edge of history
        assert!(nav.back(ScrollPosition::TOP).is_none());
        assert_eq!(nav.title_sink().writes(), 4);
    }

    #[test]
    fn test_unmatched_path_goes_to_not_found() {
        let mut nav = navigator();
        let event = nav.push("/nonexistent/path", ScrollPosition::TOP);
        assert_eq!(event.page, PageId::NotFound);
        assert_eq!(event.param(PATH_MATCH_PARAM), Some("nonexistent/path"));
        assert_eq!(nav.title_sink().get(), "404 - 页面未找到");
    }

    #[test]
    fn test_default_title_when_route_has_none() {
        let config = SiteConfig {
            route_titles: Default::default(),
            ..SiteConfig::default()
        };
        let mut nav = Navigator::from_config(&config, DocumentTitle::new());
        let event = nav.push("/about", ScrollPosition::TOP);
        assert_eq!(event.title, "我的个人博客");
        assert_eq!(nav.title_sink().get(), "我的个人博客");
    }

    #[test]
    fn test_custom_table() {
        let routes = vec![
            RouteDefinition::new(PageId::Home, "/")
                .unwrap()
                .with_title(Some("Start")),
            RouteDefinition::new(PageId::NotFound, "*").unwrap(),
        ];
        let table = RouteTable::new("/", routes).unwrap();
        let mut nav = Navigator::new(table, "Fallback", DocumentTitle::new());
        assert_eq!(nav.push("/", ScrollPosition::TOP).title, "Start");
        assert_eq!(nav.push("/x", ScrollPosition::TOP).title, "Fallback");
    }

    #[test]
    fn test_new_navigation_scrolls_to_top() {
        let mut nav = navigator();
        nav.push("/posts", ScrollPosition::TOP);
        let event = nav.push("/posts/hello-world", ScrollPosition::new(0, 640));
        assert_eq!(event.saved_scroll, None);
        assert_eq!(event.scroll, ScrollPosition::TOP);
    }

    #[test]
    fn test_back_and_forward_restore_scroll() {
        let mut nav = navigator();
        nav.push("/posts", ScrollPosition::TOP);
        nav.push("/posts/hello-world", ScrollPosition::new(0, 640));

        let back = nav.back(ScrollPosition::new(0, 1200)).unwrap();
        assert_eq!(back.kind, NavigationKind::Back);
        assert_eq!(back.page, PageId::Posts);
        assert_eq!(back.saved_scroll, Some(ScrollPosition::new(0, 640)));
        assert_eq!(back.scroll, ScrollPosition::new(0, 640));

        let forward = nav.forward(ScrollPosition::new(0, 700)).unwrap();
        assert_eq!(forward.kind, NavigationKind::Forward);
        assert_eq!(forward.page, PageId::Post);
        assert_eq!(forward.scroll, ScrollPosition::new(0, 1200));

        // And back again picks up the offset left on the list page
        let back = nav.back(ScrollPosition::TOP).unwrap();
        assert_eq!(back.scroll, ScrollPosition::new(0, 700));
    }

    #[test]
    fn test_push_drops_forward_history() {
        let mut nav = navigator();
        nav.push("/", ScrollPosition::TOP);
        nav.push("/posts", ScrollPosition::TOP);
        nav.back(ScrollPosition::TOP);
        assert!(nav.can_go_forward());

        nav.push("/about", ScrollPosition::TOP);
        assert!(!nav.can_go_forward());
        assert!(nav.forward(ScrollPosition::TOP).is_none());
        assert_eq!(nav.current_url(), Some("/about"));

        let back = nav.back(ScrollPosition::TOP).unwrap();
        assert_eq!(back.page, PageId::Home);
    }

    #[test]
    fn test_replace_clears_saved_scroll() {
        let mut nav = navigator();
        nav.push("/", ScrollPosition::TOP);
        nav.push("/posts", ScrollPosition::new(0, 300));
        nav.back(ScrollPosition::new(0, 50));
        nav.replace("/about");
        let event = nav.forward(ScrollPosition::TOP).unwrap();
        assert_eq!(event.scroll, ScrollPosition::new(0, 50));

        let back = nav.back(ScrollPosition::TOP).unwrap();
        assert_eq!(back.page, PageId::About);
        assert_eq!(back.scroll, ScrollPosition::TOP);
    }

    #[test]
    fn test_go_out_of_range() {
        let mut nav = navigator();
        assert!(nav.back(ScrollPosition::TOP).is_none());
        nav.push("/", ScrollPosition::TOP);
        nav.push("/posts", ScrollPosition::TOP);
        assert!(nav.go(0, ScrollPosition::TOP).is_none());
        assert!(nav.go(-2, ScrollPosition::TOP).is_none());
        assert!(nav.go(1, ScrollPosition::TOP).is_none());
        assert_eq!(nav.go(-1, ScrollPosition::TOP).unwrap().page, PageId::Home);
        assert_eq!(nav.title_sink().writes(), 3);
    }

    #[test]
    fn test_replace_as_first_navigation() {
        let mut nav = navigator();
        let event = nav.replace("/about");
        assert_eq!(event.kind, NavigationKind::Replace);
        assert_eq!(nav.current_url(), Some("/about"));
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_scroll_behavior() {
        assert_eq!(scroll_behavior(None), ScrollPosition::TOP);
        assert_eq!(
            scroll_behavior(Some(ScrollPosition::new(10, 20))),
            ScrollPosition::new(10, 20)
        );
    }
}
