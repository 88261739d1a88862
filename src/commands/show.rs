//! Resolve a path and print the page it displays

use anyhow::Result;
use serde::Serialize;

use crate::pages::{PageView, PostSummary};
use crate::router::{DocumentTitle, NavigationEvent, ScrollPosition};
use crate::Blog;

#[derive(Serialize)]
struct ShowOutput<'a> {
    navigation: &'a NavigationEvent,
    view: &'a PageView,
}

/// Navigate to `path` and print the resulting page
pub fn run(blog: &Blog, path: &str, as_json: bool) -> Result<()> {
    let mut navigator = blog.navigator(DocumentTitle::new());
    let event = navigator.push(path, ScrollPosition::TOP);
    let view = blog.view(navigator.table(), &event);

    if as_json {
        let output = ShowOutput {
            navigation: &event,
            view: &view,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", navigator.title_sink().get());
    println!();
    print!("{}", format_view(&view));
    Ok(())
}

/// Plain-text layout of a page view
fn format_view(view: &PageView) -> String {
    let mut out = String::new();
    match view {
        PageView::Home { recent, tags } => {
            out.push_str("Recent posts:\n");
            push_summaries(&mut out, recent);
            let tags: Vec<_> = tags
                .iter()
                .map(|t| format!("{} ({})", t.name, t.count))
                .collect();
            out.push_str(&format!("Tags: {}\n", tags.join(", ")));
        }
        PageView::Posts { posts } => {
            out.push_str(&format!("All posts ({}):\n", posts.len()));
            push_summaries(&mut out, posts);
        }
        PageView::Post(detail) => {
            out.push_str(&format!("{}\n{}\n", detail.title, detail.date));
            if !detail.tags.is_empty() {
                out.push_str(&format!("Tags: {}\n", detail.tags.join(", ")));
            }
            out.push('\n');
            out.push_str(&detail.html);
            out.push('\n');
            if let Some(newer) = &detail.newer {
                out.push_str(&format!("Newer: {} ({})\n", newer.title, newer.href));
            }
            if let Some(older) = &detail.older {
                out.push_str(&format!("Older: {} ({})\n", older.title, older.href));
            }
        }
        PageView::About { post_count, tags } => {
            out.push_str(&format!("{} posts, {} tags\n", post_count, tags.len()));
        }
        PageView::NotFound { path } => {
            out.push_str(&format!("Page not found: {}\n", path));
        }
    }
    out
}

fn push_summaries(out: &mut String, posts: &[PostSummary]) {
    for post in posts {
        out.push_str(&format!(
            "  {} - {} ({})\n    {}\n",
            post.date, post.title, post.href, post.excerpt
        ));
    }
}
