//! Structured rich-text renderer with a pluggable converter table.
//!
//! Rich-text fields are stored as JSON trees of typed nodes (paragraphs,
//! headings, lists, links, uploads, custom blocks). This crate decodes those
//! trees into [`RichText`] and renders them to HTML with
//! [`RichTextRenderer`].
//!
//! # Architecture
//!
//! - [`Node`]: decoded node tree. Decoding never fails; unrecognized or
//!   malformed nodes become [`Node::Unknown`].
//! - [`RichTextRenderer`]: one exhaustive match over built-in node types plus a
//!   registry of [`BlockConverter`]s keyed by `blockType`.
//! - [`ClassNames`]: per-element CSS class hooks so each page can style the
//!   same document differently.
//!
//! Media is classified by MIME type only ([`MediaKind::from_mime`]).
//!
//! # Example
//!
//! ```
//! use folio_richtext::{RichText, RichTextRenderer};
//! use serde_json::json;
//!
//! let doc: RichText = serde_json::from_value(json!({
//!     "root": {
//!         "children": [
//!             {"type": "paragraph", "children": [
//!                 {"type": "text", "text": "Hello", "format": 1}
//!             ]}
//!         ]
//!     }
//! }))
//! .unwrap();
//!
//! let result = RichTextRenderer::new().render(&doc);
//! assert_eq!(result.html, "<p><strong>Hello</strong></p>");
//! ```

mod block;
mod classes;
mod embed;
mod format;
mod html;
mod media;
mod node;
mod renderer;

pub use block::{BlockContext, BlockConverter, MediaGridBlock};
pub use classes::{ClassNames, Element};
pub use embed::embed_url;
pub use format::{Decoration, TextFormat};
pub use html::escape_html;
pub use media::{Media, MediaKind, MediaRef, UploadSize};
pub use node::{
    BlockNode, Container, EmbedFields, EmbedNode, HeadingNode, LinkFields, LinkNode, ListNode,
    Node, RichText, Root, TextNode, UnknownNode, UploadFields, UploadNode,
};
pub use renderer::{RenderResult, RichTextRenderer};
