//! Markdown rendering with syntax highlighting
//!
//! [`MarkdownRenderer::render`] is total: conversion errors and panics are
//! caught here and replaced with [`RENDER_FALLBACK`], so one broken post
//! never takes the page down with it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;
use thiserror::Error;

use crate::config::HighlightConfig;
use crate::helpers::html_escape;

/// Static notice shown in place of a post body that failed to render
pub const RENDER_FALLBACK: &str =
    r#"<div class="markdown-error"><p>This post could not be displayed.</p></div>"#;

/// Failures inside the rendering pipeline. Never returned from `render`.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No highlighting theme available (wanted {0})")]
    NoTheme(String),

    #[error("Renderer panicked: {0}")]
    Panicked(String),
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
}

/// Fenced or indented code block being collected
struct PendingCode {
    lang: Option<String>,
    code: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::from_config(&HighlightConfig::default())
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            highlight: true,
            line_numbers,
        }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        let mut renderer = Self::with_options(&config.theme, config.line_number);
        renderer.highlight = config.enable;
        renderer
    }

    /// Render markdown to HTML, falling back to [`RENDER_FALLBACK`] on any failure
    pub fn render(&self, markdown: &str) -> String {
        guarded(|| self.try_render(markdown))
    }

    /// Render markdown to HTML, surfacing conversion errors
    pub fn try_render(&self, markdown: &str) -> Result<String, RenderError> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut pending: Option<PendingCode> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => code_lang(&info),
                        CodeBlockKind::Indented => None,
                    };
                    pending = Some(PendingCode {
                        lang,
                        code: String::new(),
                    });
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = pending.take() {
                        let highlighted = self.highlight_code(&block.code, block.lang.as_deref())?;
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if pending.is_some() => {
                    if let Some(block) = pending.as_mut() {
                        block.code.push_str(&text);
                    }
                }
                event => {
                    if pending.is_none() {
                        events.push(event);
                    }
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> Result<String, RenderError> {
        let lang = lang.unwrap_or("text");

        if !self.highlight {
            return Ok(plain_code_block(code, lang));
        }

        let theme = self.theme()?;

        // Try to find syntax for the language
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => {
                if self.line_numbers {
                    Ok(add_line_numbers(&highlighted, code, lang))
                } else {
                    Ok(format!(
                        r#"<figure class="highlight {}">{}</figure>"#,
                        html_escape(lang),
                        highlighted
                    ))
                }
            }
            Err(e) => {
                tracing::warn!("Highlighting {} block failed, using plain code: {}", lang, e);
                Ok(plain_code_block(code, lang))
            }
        }
    }

    /// Configured theme, or any loaded theme if that one is missing
    fn theme(&self) -> Result<&Theme, RenderError> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
            .ok_or_else(|| RenderError::NoTheme(self.theme_name.clone()))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Run a render step, mapping errors and panics to the fallback notice
fn guarded<F>(render: F) -> String
where
    F: FnOnce() -> Result<String, RenderError>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(render))
        .unwrap_or_else(|payload| Err(RenderError::Panicked(panic_message(payload.as_ref()))));

    match result {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!("Markdown rendering failed: {}", e);
            RENDER_FALLBACK.to_string()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// First token of a fence info string ("rust,ignore" -> "rust")
fn code_lang(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == ',')
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn plain_code_block(code: &str, lang: &str) -> String {
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        html_escape(lang),
        html_escape(code)
    )
}

/// Wrap highlighted code in a table with a line-number gutter
fn add_line_numbers(highlighted: &str, code: &str, lang: &str) -> String {
    let line_count = code.lines().count().max(1);
    let gutter = (1..=line_count)
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        html_escape(lang),
        gutter,
        highlighted
    )
}
