//! Custom block converters.
//!
//! Block nodes carry a `fields` payload with a `blockType` discriminator. The
//! renderer looks up a [`BlockConverter`] for that type. A block without a
//! converter renders nothing and records a warning.

use std::fmt::Write;

use serde::Deserialize;
use serde_json::Value;

use crate::classes::{ClassNames, Element};
use crate::html::{close_tag, escape_html, media_element, open_tag, with_modifier};
use crate::media::{Media, MediaRef};

/// Converter for one custom block type.
///
/// # Example
///
/// ```
/// use folio_richtext::{BlockContext, BlockConverter, RichTextRenderer};
/// use serde_json::Value;
///
/// struct QuoteBlock;
///
/// impl BlockConverter for QuoteBlock {
///     fn block_type(&self) -> &str {
///         "pullQuote"
///     }
///
///     fn render(&self, fields: &Value, ctx: &mut BlockContext<'_>) {
///         let text = fields.get("text").and_then(Value::as_str).unwrap_or_default();
///         ctx.push_text(text);
///     }
/// }
///
/// let renderer = RichTextRenderer::new().with_block(QuoteBlock);
/// ```
pub trait BlockConverter: Send + Sync {
    /// The `blockType` this converter handles.
    fn block_type(&self) -> &str;

    /// Render the block payload.
    ///
    /// Must not panic on malformed payloads; report them through
    /// [`BlockContext::warn`] and render what is usable.
    fn render(&self, fields: &Value, ctx: &mut BlockContext<'_>);
}

/// Output sink handed to block converters.
pub struct BlockContext<'a> {
    out: &'a mut String,
    classes: &'a ClassNames,
    warnings: &'a mut Vec<String>,
}

impl<'a> BlockContext<'a> {
    pub(crate) fn new(
        out: &'a mut String,
        classes: &'a ClassNames,
        warnings: &'a mut Vec<String>,
    ) -> Self {
        Self {
            out,
            classes,
            warnings,
        }
    }

    /// Raw output buffer.
    pub fn output(&mut self) -> &mut String {
        self.out
    }

    /// Class configured for an element.
    #[must_use]
    pub fn class(&self, element: Element) -> Option<&str> {
        self.classes.get(element)
    }

    /// Append escaped text.
    pub fn push_text(&mut self, text: &str) {
        self.out.push_str(&escape_html(text));
    }

    /// Render a bare media element. Returns `false` if nothing was written.
    pub fn push_media(&mut self, media: &Media) -> bool {
        media_element(media, self.classes, self.out)
    }

    /// Record a render warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Default number of grid columns.
const DEFAULT_COLUMNS: u8 = 2;

/// Largest accepted column count.
const MAX_COLUMNS: u8 = 6;

/// Grid of images with optional captions (`blockType: "mediaGrid"`).
///
/// Entries whose image does not resolve to a media URL are skipped; the
/// remaining entries keep their stored order.
#[derive(Clone, Copy, Debug, Default)]
pub struct MediaGridBlock;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GridEntry {
    image: MediaRef,
    caption: Option<String>,
}

impl MediaGridBlock {
    /// Column count from the payload (`"3"` or `3`), defaulting to 2.
    fn columns(fields: &Value) -> u8 {
        let parsed = match fields.get("columns") {
            Some(Value::String(s)) => s.trim().parse::<u8>().ok(),
            Some(Value::Number(n)) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
            _ => None,
        };
        parsed
            .filter(|n| (1..=MAX_COLUMNS).contains(n))
            .unwrap_or(DEFAULT_COLUMNS)
    }
}

impl BlockConverter for MediaGridBlock {
    fn block_type(&self) -> &str {
        "mediaGrid"
    }

    fn render(&self, fields: &Value, ctx: &mut BlockContext<'_>) {
        let columns = Self::columns(fields);
        let entries = fields
            .get("images")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut items = String::new();
        for (index, raw) in entries.iter().enumerate() {
            let entry = GridEntry::deserialize(raw).unwrap_or_default();
            let Some(media) = entry.image.resolve() else {
                ctx.warn(format!("media grid entry {index} has no resolvable image"));
                continue;
            };

            let mut element = String::new();
            if !media_element(media, ctx.classes, &mut element) {
                ctx.warn(format!("media grid entry {index} has an unusable image URL"));
                continue;
            }

            open_tag(&mut items, "figure", ctx.class(Element::GridItem));
            items.push_str(&element);
            if let Some(caption) = entry.caption.as_deref().filter(|c| !c.trim().is_empty()) {
                open_tag(&mut items, "figcaption", ctx.class(Element::Caption));
                items.push_str(&escape_html(caption));
                close_tag(&mut items, "figcaption");
            }
            close_tag(&mut items, "figure");
        }

        let class = with_modifier(ctx.class(Element::Grid), &format!("columns-{columns}"));
        write!(
            ctx.output(),
            r#"<div class="{}" data-columns="{columns}">"#,
            escape_html(&class)
        )
        .unwrap();
        ctx.output().push_str(&items);
        ctx.output().push_str("</div>");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn render(fields: &Value) -> (String, Vec<String>) {
        let mut out = String::new();
        let mut warnings = Vec::new();
        let classes = ClassNames::new();
        let mut ctx = BlockContext::new(&mut out, &classes, &mut warnings);
        MediaGridBlock.render(fields, &mut ctx);
        (out, warnings)
    }

    #[test]
    fn test_columns_default() {
        assert_eq!(MediaGridBlock::columns(&json!({})), 2);
        assert_eq!(MediaGridBlock::columns(&json!({"columns": "3"})), 3);
        assert_eq!(MediaGridBlock::columns(&json!({"columns": 4})), 4);
        assert_eq!(MediaGridBlock::columns(&json!({"columns": "0"})), 2);
        assert_eq!(MediaGridBlock::columns(&json!({"columns": "many"})), 2);
    }

    #[test]
    fn test_grid_with_caption() {
        let (html, warnings) = render(&json!({
            "blockType": "mediaGrid",
            "columns": "3",
            "images": [
                {"image": {"url": "/a.jpg", "mimeType": "image/jpeg", "alt": "A"}, "caption": "First"}
            ]
        }));
        assert_eq!(
            html,
            r#"<div class="columns-3" data-columns="3"><figure><img src="/a.jpg" alt="A" loading="lazy"><figcaption>First</figcaption></figure></div>"#
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_grid_skips_unresolved_entries() {
        let (html, warnings) = render(&json!({
            "blockType": "mediaGrid",
            "images": [
                {"image": {"url": "/1.jpg", "mimeType": "image/jpeg"}},
                {"image": 17},
                {"image": {"url": "/3.jpg", "mimeType": "image/jpeg"}}
            ]
        }));
        assert_eq!(
            html,
            r#"<div class="columns-2" data-columns="2"><figure><img src="/1.jpg" alt="" loading="lazy"></figure><figure><img src="/3.jpg" alt="" loading="lazy"></figure></div>"#
        );
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("entry 1"));
    }

    #[test]
    fn test_grid_without_images() {
        let (html, _) = render(&json!({"blockType": "mediaGrid"}));
        assert_eq!(html, r#"<div class="columns-2" data-columns="2"></div>"#);
    }

    #[test]
    fn test_grid_malformed_entry_skipped() {
        let (html, warnings) = render(&json!({
            "images": ["not an object", {"image": {"url": "/ok.jpg"}}]
        }));
        assert!(html.contains("/ok.jpg"));
        assert_eq!(warnings.len(), 1);
    }
}
