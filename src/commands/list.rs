//! List site content

use anyhow::Result;

use crate::router::{RoutePattern, RouteTable, Segment};
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = blog.catalog.all();
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.date, post.title, post.slug);
            }
        }
        "tag" | "tags" => {
            let tags = blog.catalog.tags();
            println!("Tags ({}):", tags.len());
            for tag in tags {
                println!("  {} ({})", tag.name, tag.count);
            }
        }
        "route" | "routes" => {
            let table = RouteTable::standard(&blog.config);
            println!("Routes ({}):", table.routes().len());
            for route in table.routes() {
                println!(
                    "  {:<10} {:<16} {}",
                    route.page.as_str(),
                    describe_pattern(&route.pattern),
                    route.title.as_deref().unwrap_or(&blog.config.title)
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, route",
                content_type
            );
        }
    }

    Ok(())
}

fn describe_pattern(pattern: &RoutePattern) -> String {
    match pattern {
        RoutePattern::Exact(path) => path.clone(),
        RoutePattern::Param(segments) => segments
            .iter()
            .map(|s| match s {
                Segment::Static(s) => format!("/{}", s),
                Segment::Param(name) => format!("/:{}", name),
            })
            .collect(),
        RoutePattern::CatchAll => "*".to_string(),
    }
}
