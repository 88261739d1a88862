//! Router - route table, path resolution and navigation side effects

mod navigation;
mod route;
mod title;

pub use navigation::{
    scroll_behavior, NavigationEvent, NavigationKind, Navigator, ScrollPosition,
};
pub use route::{
    PageId, Resolution, RouteDefinition, RouteError, RoutePattern, RouteTable, Segment,
    PATH_MATCH_PARAM,
};
pub use title::{DocumentTitle, TitleSink};
