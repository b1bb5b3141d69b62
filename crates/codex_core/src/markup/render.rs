//! Block-level markup pass.
//!
//! # Invariants
//! - One pass over `\r\n`-normalized lines; first matching rule wins.
//! - Consecutive list items share one list block; an open list is always
//!   closed at end of input.
//! - Total over all inputs: never panics, never fails.

use super::inline::render_inline;
use super::link::LinkResolver;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,3})\s+").expect("valid heading regex"));
static LIST_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-\s+").expect("valid list item regex"));

const SPACER_HTML: &str = "<div style='height:10px'></div>";

/// One rendered block. Text payloads are already inline-rendered HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Quote(String),
    Heading { level: u8, html: String },
    List(Vec<String>),
    Spacer,
    Paragraph(String),
}

impl Block {
    fn write_html(&self, out: &mut Vec<String>) {
        match self {
            Self::Quote(html) => out.push(format!("<blockquote>{html}</blockquote>")),
            Self::Heading { level, html } => out.push(format!("<h{level}>{html}</h{level}>")),
            Self::List(items) => {
                out.push("<ul>".to_string());
                out.extend(items.iter().map(|item| format!("<li>{item}</li>")));
                out.push("</ul>".to_string());
            }
            Self::Spacer => out.push(SPACER_HTML.to_string()),
            Self::Paragraph(html) => out.push(format!("<p>{html}</p>")),
        }
    }
}

/// Ordered block output of [`render_markup`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedMarkup {
    pub blocks: Vec<Block>,
}

impl RenderedMarkup {
    /// Joins block markup with newlines, one element per line.
    pub fn to_html(&self) -> String {
        let mut lines = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            block.write_html(&mut lines);
        }
        lines.join("\n")
    }
}

/// Renders the restricted markup dialect into typed blocks.
///
/// Wikilinks are resolved through `resolver` at call time.
pub fn render_markup<R: LinkResolver + ?Sized>(text: &str, resolver: &R) -> RenderedMarkup {
    let normalized = text.replace("\r\n", "\n");
    let mut blocks = Vec::new();
    let mut open_list: Option<Vec<String>> = None;

    for line in normalized.split('\n') {
        let list_item = LIST_ITEM_RE.find(line).map(|marker| &line[marker.end()..]);
        if let Some(rest) = list_item {
            open_list
                .get_or_insert_with(Vec::new)
                .push(render_inline(rest, resolver));
            continue;
        }

        // Any non-list line closes the open list.
        if let Some(items) = open_list.take() {
            blocks.push(Block::List(items));
        }

        if let Some(rest) = line.strip_prefix("> ") {
            blocks.push(Block::Quote(render_inline(rest, resolver)));
        } else if let Some(marker) = HEADING_RE.captures(line) {
            let level = marker[1].len() as u8;
            let rest = &line[marker[0].len()..];
            blocks.push(Block::Heading {
                level,
                html: render_inline(rest, resolver),
            });
        } else if line.trim().is_empty() {
            blocks.push(Block::Spacer);
        } else {
            blocks.push(Block::Paragraph(render_inline(line, resolver)));
        }
    }

    if let Some(items) = open_list.take() {
        blocks.push(Block::List(items));
    }

    RenderedMarkup { blocks }
}

/// Convenience wrapper returning HTML directly.
pub fn render_markup_html<R: LinkResolver + ?Sized>(text: &str, resolver: &R) -> String {
    render_markup(text, resolver).to_html()
}
