//! Render a markdown file through the blog's pipeline

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::content::extract_excerpt;
use crate::Blog;

/// Render `source` (a file, or `-` for stdin) and print the HTML.
/// With `excerpt`, print the plain-text excerpt instead.
pub fn run(blog: &Blog, source: &Path, excerpt: bool) -> Result<()> {
    let markdown = read_source(source)?;

    if excerpt {
        println!(
            "{}",
            extract_excerpt(&markdown, blog.config.excerpt_length)
        );
    } else {
        print!("{}", blog.render(&markdown));
    }

    Ok(())
}

fn read_source(source: &Path) -> Result<String> {
    if source == Path::new("-") {
        let mut markdown = String::new();
        io::stdin().read_to_string(&mut markdown)?;
        Ok(markdown)
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read {:?}", source))
    }
}
