//! Inline markup pass: escaping, code spans, emphasis and wikilinks.
//!
//! # Invariants
//! - Input is HTML-escaped before any pattern is applied, so every later pass
//!   only sees literal characters or inert entities.
//! - Passes run in a fixed order: code, bold, italic, wikilink.
//! - Never fails; unmatched markers are left as text.

use super::link::LinkResolver;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid code regex"));
static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold regex"));
static ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*]+)\*").expect("valid italic regex"));
static WIKILINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("valid wikilink regex"));

/// Escapes the five markup-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Reverses [`escape_html`]. `&amp;` is decoded last so it cannot form new
/// entities.
fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

/// Renders one line of inline markup to HTML.
pub fn render_inline<R: LinkResolver + ?Sized>(text: &str, resolver: &R) -> String {
    let escaped = escape_html(text);

    // Code content is escaped a second time.
    let with_code = CODE_RE.replace_all(&escaped, |caps: &Captures<'_>| {
        format!("<code>{}</code>", escape_html(&caps[1]))
    });
    let with_bold = BOLD_RE.replace_all(&with_code, "<b>$1</b>");
    let with_italic = ITALIC_RE.replace_all(&with_bold, "<i>$1</i>");
    let with_links = WIKILINK_RE.replace_all(&with_italic, |caps: &Captures<'_>| {
        render_wikilink(&caps[1], resolver)
    });

    with_links.into_owned()
}

fn render_wikilink<R: LinkResolver + ?Sized>(escaped_title: &str, resolver: &R) -> String {
    let title = unescape_html(escaped_title.trim());
    let title = title.trim();
    let label = escape_html(title);
    match resolver.resolve(title) {
        Some(id) => format!(
            "<a href=\"#\" class=\"wikilink\" data-link=\"{}\">{label}</a>",
            escape_html(id)
        ),
        None => format!("<a href=\"#\" class=\"wikilink\" data-link-missing=\"{label}\">{label}</a>"),
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_html, render_inline, unescape_html};
    use crate::markup::link::NoLinks;
    use crate::model::world::LorePage;

    #[test]
    fn escapes_before_formatting() {
        assert_eq!(
            render_inline("<b>x</b> & \"y\"", &NoLinks),
            "&lt;b&gt;x&lt;/b&gt; &amp; &quot;y&quot;"
        );
    }

    #[test]
    fn code_span_content_is_escaped_again() {
        assert_eq!(render_inline("`a<b`", &NoLinks), "<code>a&amp;lt;b</code>");
        assert_eq!(render_inline("`x` and `y`", &NoLinks), "<code>x</code> and <code>y</code>");
    }

    #[test]
    fn bold_runs_before_italic() {
        assert_eq!(
            render_inline("**strong** and *soft*", &NoLinks),
            "<b>strong</b> and <i>soft</i>"
        );
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(render_inline("**open only", &NoLinks), "**open only");
        assert_eq!(render_inline("a ` b", &NoLinks), "a ` b");
        assert_eq!(render_inline("[[never closed", &NoLinks), "[[never closed");
    }

    #[test]
    fn wikilink_resolves_with_original_title_text() {
        let pages = vec![LorePage {
            id: "lore-1".to_string(),
            title: "Salt & Ash".to_string(),
            ..LorePage::default()
        }];
        assert_eq!(
            render_inline("see [[ salt & ash ]]", &pages),
            "see <a href=\"#\" class=\"wikilink\" data-link=\"lore-1\">salt &amp; ash</a>"
        );
    }

    #[test]
    fn missing_wikilink_keeps_escaped_attempt() {
        assert_eq!(
            render_inline("[[A<B]]", &NoLinks),
            "<a href=\"#\" class=\"wikilink\" data-link-missing=\"A&lt;B\">A&lt;B</a>"
        );
    }

    #[test]
    fn unescape_inverts_escape() {
        let raw = "a&lt;<\"'&amp;";
        assert_eq!(unescape_html(&escape_html(raw)), raw);
    }
}
