//! Lightweight markup dialect with entry cross-links.
//!
//! # Responsibility
//! - Turn untrusted plain text into escaped, structured HTML blocks.
//! - Resolve `[[Title]]` references against the live entry collection.
//!
//! # Invariants
//! - Rendering is total and deterministic for a given resolver state.
//! - No raw `<`, `&` or `"` from the input survives unescaped.

pub mod inline;
pub mod link;
pub mod render;

pub use inline::{escape_html, render_inline};
pub use link::{follow_link, LinkOutcome, LinkResolver, LinkTarget, NoLinks};
pub use render::{render_markup, render_markup_html, Block, RenderedMarkup};
