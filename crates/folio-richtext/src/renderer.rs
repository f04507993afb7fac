//! Rich-text tree renderer.

use std::fmt::Write;

use crate::block::{BlockContext, BlockConverter, MediaGridBlock};
use crate::classes::{ClassNames, Element};
use crate::embed::embed_url;
use crate::html::{close_tag, escape_html, is_safe_url, media_block, open_tag};
use crate::node::{Node, RichText, TextNode, UnknownNode};

/// Result of rendering a rich-text tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Nodes that were skipped or degraded, in traversal order.
    pub warnings: Vec<String>,
}

/// Converter table for rich-text documents.
///
/// Built-in node types are handled by a single exhaustive match; custom block
/// types are dispatched to registered [`BlockConverter`]s, checked in
/// registration order. Rendering takes `&self`, so the same tree always yields
/// the same output.
///
/// # Example
///
/// ```
/// use folio_richtext::{ClassNames, Element, Node, RichText, RichTextRenderer};
///
/// let doc = RichText::new(vec![Node::text("hi", 3)]);
/// let renderer = RichTextRenderer::new()
///     .with_classes(ClassNames::new().with(Element::Paragraph, "paragraph"));
///
/// let result = renderer.render(&doc);
/// assert_eq!(result.html, "<em><strong>hi</strong></em>");
/// ```
pub struct RichTextRenderer {
    classes: ClassNames,
    blocks: Vec<Box<dyn BlockConverter>>,
}

impl RichTextRenderer {
    /// Create a renderer with the built-in media grid block.
    #[must_use]
    pub fn new() -> Self {
        Self {
            classes: ClassNames::default(),
            blocks: vec![Box::new(MediaGridBlock)],
        }
    }

    /// Set the element class table.
    #[must_use]
    pub fn with_classes(mut self, classes: ClassNames) -> Self {
        self.classes = classes;
        self
    }

    /// Register a converter for a custom block type.
    ///
    /// Converters are checked in order; the first whose
    /// [`block_type`](BlockConverter::block_type) matches wins.
    #[must_use]
    pub fn with_block<B: BlockConverter + 'static>(mut self, converter: B) -> Self {
        self.blocks.push(Box::new(converter));
        self
    }

    /// Render a complete document.
    pub fn render(&self, doc: &RichText) -> RenderResult {
        self.render_nodes(doc.children())
    }

    /// Render a sequence of sibling nodes.
    pub fn render_nodes(&self, nodes: &[Node]) -> RenderResult {
        let mut walker = Walker {
            renderer: self,
            out: String::with_capacity(1024),
            warnings: Vec::new(),
        };
        walker.children(nodes);
        RenderResult {
            html: walker.out,
            warnings: walker.warnings,
        }
    }

    fn block_converter(&self, block_type: &str) -> Option<&dyn BlockConverter> {
        self.blocks
            .iter()
            .find(|converter| converter.block_type() == block_type)
            .map(Box::as_ref)
    }
}

impl Default for RichTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-render traversal state.
struct Walker<'r> {
    renderer: &'r RichTextRenderer,
    out: String,
    warnings: Vec<String>,
}

impl<'r> Walker<'r> {
    fn class(&self, element: Element) -> Option<&'r str> {
        self.renderer.classes.get(element)
    }

    fn warn(&mut self, message: String) {
        tracing::debug!(warning = %message, "Rich-text render warning");
        self.warnings.push(message);
    }

    fn children(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.node(node);
        }
    }

    fn container(&mut self, tag: &str, element: Element, children: &[Node]) {
        let class = self.class(element);
        open_tag(&mut self.out, tag, class);
        self.children(children);
        close_tag(&mut self.out, tag);
    }

    fn node(&mut self, node: &Node) {
        let renderer = self.renderer;
        match node {
            Node::Text(text) => self.text(text),
            Node::LineBreak => self.out.push_str("<br>"),
            Node::Paragraph(p) => self.container("p", Element::Paragraph, &p.children),
            Node::Heading(h) => self.container(h.tag(), Element::Heading, &h.children),
            Node::Quote(q) => self.container("blockquote", Element::Quote, &q.children),
            Node::List(list) => {
                let tag = if list.is_ordered() { "ol" } else { "ul" };
                self.container(tag, Element::List, &list.children);
            }
            Node::ListItem(item) => self.container("li", Element::ListItem, &item.children),
            Node::Link(link) => match link.href().filter(|href| is_safe_url(href)) {
                Some(href) => {
                    write!(self.out, r#"<a href="{}""#, escape_html(href)).unwrap();
                    if let Some(class) = self.class(Element::Link) {
                        write!(self.out, r#" class="{}""#, escape_html(class)).unwrap();
                    }
                    if link.fields.new_tab {
                        self.out
                            .push_str(r#" target="_blank" rel="noopener noreferrer""#);
                    }
                    self.out.push('>');
                    self.children(&link.children);
                    self.out.push_str("</a>");
                }
                None => {
                    self.warn("link without a usable URL".to_owned());
                    self.children(&link.children);
                }
            },
            Node::Upload(upload) => {
                let rendered = upload.value.resolve().is_some_and(|media| {
                    media_block(media, upload.size(), &renderer.classes, &mut self.out)
                });
                if !rendered {
                    self.warn("upload without a resolvable media URL".to_owned());
                }
            }
            Node::Block(block) => {
                let converter = block
                    .block_type()
                    .and_then(|block_type| renderer.block_converter(block_type));
                if let Some(converter) = converter {
                    let mut ctx =
                        BlockContext::new(&mut self.out, &renderer.classes, &mut self.warnings);
                    converter.render(&block.fields, &mut ctx);
                } else {
                    let block_type = block.block_type().unwrap_or_default();
                    self.warn(format!("no converter for block type '{block_type}'"));
                }
            }
            Node::Embed(embed) => match embed.source().filter(|src| is_safe_url(src)) {
                Some(src) => {
                    let class = self.class(Element::Embed);
                    open_tag(&mut self.out, "div", class);
                    write!(
                        self.out,
                        r#"<iframe src="{}" allow="autoplay; fullscreen; picture-in-picture" allowfullscreen loading="lazy" title="Embedded video"></iframe>"#,
                        escape_html(&embed_url(src))
                    )
                    .unwrap();
                    close_tag(&mut self.out, "div");
                }
                None => self.warn("embed without a usable URL".to_owned()),
            },
            Node::HorizontalRule => match self.class(Element::Rule) {
                Some(class) => {
                    let tag = format!(r#"<hr class="{}">"#, escape_html(class));
                    self.out.push_str(&tag);
                }
                None => self.out.push_str("<hr>"),
            },
            Node::Unknown(unknown) => self.unknown(unknown),
        }
    }

    fn text(&mut self, node: &TextNode) {
        let mut html = escape_html(&node.text);
        for decoration in node.format.decorations() {
            let tag = decoration.tag();
            html = format!("<{tag}>{html}</{tag}>");
        }
        self.out.push_str(&html);
    }

    /// Children first, then literal text, then nothing.
    fn unknown(&mut self, node: &UnknownNode) {
        if node.node_type.is_empty() {
            self.warn("node without a type".to_owned());
        } else {
            self.warn(format!("unknown node type '{}'", node.node_type));
        }

        if !node.children.is_empty() {
            self.children(&node.children);
        } else if let Some(text) = &node.text {
            self.out.push_str(&escape_html(text));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;

    fn doc(children: Value) -> RichText {
        serde_json::from_value(json!({"root": {"type": "root", "children": children}})).unwrap()
    }

    fn render(children: Value) -> RenderResult {
        RichTextRenderer::new().render(&doc(children))
    }

    fn text(text: &str) -> Value {
        json!({"type": "text", "text": text, "format": 0})
    }

    #[test]
    fn test_plain_paragraph() {
        let result = render(json!([{"type": "paragraph", "children": [text("Hello")]}]));
        assert_eq!(result.html, "<p>Hello</p>");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_text_is_escaped() {
        let result = render(json!([text("<b>&</b>")]));
        assert_eq!(result.html, "&lt;b&gt;&amp;&lt;/b&gt;");
    }

    #[test]
    fn test_bold_italic_nesting() {
        let result = render(json!([{"type": "text", "text": "hi", "format": 3}]));
        assert_eq!(result.html, "<em><strong>hi</strong></em>");
    }

    #[test]
    fn test_all_format_bits() {
        let result = render(json!([{"type": "text", "text": "x", "format": 127}]));
        assert_eq!(
            result.html,
            "<sup><sub><code><u><s><em><strong>x</strong></em></s></u></code></sub></sup>"
        );
    }

    #[test]
    fn test_every_format_combination_wraps_once_per_bit() {
        let renderer = RichTextRenderer::new();
        for bits in 0..128_u32 {
            let html = renderer
                .render(&RichText::new(vec![Node::text("x", bits)]))
                .html;
            let opening_tags = html.matches('<').count() / 2;
            assert_eq!(opening_tags, bits.count_ones() as usize, "format {bits}: {html}");
            assert!(html.contains('x'));
        }
    }

    #[test]
    fn test_linebreak() {
        let result = render(json!([{"type": "paragraph", "children": [text("a"), {"type": "linebreak"}, text("b")]}]));
        assert_eq!(result.html, "<p>a<br>b</p>");
    }

    #[test]
    fn test_heading_uses_own_tag() {
        let result = render(json!([{"type": "heading", "tag": "h3", "children": [text("Title")]}]));
        assert_eq!(result.html, "<h3>Title</h3>");
    }

    #[test]
    fn test_heading_defaults_to_h2() {
        let result = render(json!([{"type": "heading", "children": [text("Title")]}]));
        assert_eq!(result.html, "<h2>Title</h2>");
    }

    #[test]
    fn test_numbered_list() {
        let result = render(json!([{
            "type": "list",
            "listType": "number",
            "tag": "ol",
            "children": [
                {"type": "listitem", "value": 1, "children": [text("first")]},
                {"type": "listitem", "value": 2, "children": [text("second")]}
            ]
        }]));
        assert_eq!(result.html, "<ol><li>first</li><li>second</li></ol>");
    }

    #[test]
    fn test_bullet_list() {
        let result = render(json!([{
            "type": "list",
            "listType": "bullet",
            "children": [{"type": "listitem", "children": [text("only")]}]
        }]));
        assert_eq!(result.html, "<ul><li>only</li></ul>");
    }

    #[test]
    fn test_link_new_tab() {
        let result = render(json!([{
            "type": "link",
            "fields": {"url": "https://example.com", "newTab": true},
            "children": [text("site")]
        }]));
        assert_eq!(
            result.html,
            r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">site</a>"#
        );
    }

    #[test]
    fn test_link_top_level_url_fallback() {
        let result = render(json!([{
            "type": "link",
            "url": "/about",
            "children": [text("about")]
        }]));
        assert_eq!(result.html, r#"<a href="/about">about</a>"#);
    }

    #[test]
    fn test_link_without_url_renders_children() {
        let result = render(json!([{"type": "link", "fields": {}, "children": [text("orphan")]}]));
        assert_eq!(result.html, "orphan");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_link_with_script_url_is_degraded() {
        let result = render(json!([{
            "type": "link",
            "fields": {"url": "javascript:alert(1)"},
            "children": [text("click")]
        }]));
        assert_eq!(result.html, "click");
    }

    #[test]
    fn test_autolink() {
        let result = render(json!([{
            "type": "autolink",
            "fields": {"url": "https://example.com"},
            "children": [text("https://example.com")]
        }]));
        assert_eq!(
            result.html,
            r#"<a href="https://example.com">https://example.com</a>"#
        );
    }

    #[test]
    fn test_upload_image() {
        let result = render(json!([{
            "type": "upload",
            "relationTo": "media",
            "value": {"url": "/media/a.jpg", "mimeType": "image/jpeg", "alt": "Work"}
        }]));
        assert_eq!(
            result.html,
            r#"<div class="size-full"><img src="/media/a.jpg" alt="Work" loading="lazy"></div>"#
        );
    }

    #[test]
    fn test_upload_video_by_mime_not_extension() {
        let result = render(json!([{
            "type": "upload",
            "value": {"url": "/media/clip.jpg", "mimeType": "video/mp4"},
            "fields": {"size": "medium"}
        }]));
        assert!(result.html.starts_with(r#"<div class="size-medium"><video"#));
        assert!(result.html.contains(r#"controlslist="nodownload""#));
    }

    #[test]
    fn test_upload_audio() {
        let result = render(json!([{
            "type": "upload",
            "value": {"url": "/media/s.mp3", "mimeType": "audio/mpeg"}
        }]));
        assert!(result.html.contains("<audio controls"));
    }

    #[test]
    fn test_upload_unresolved_renders_nothing() {
        let result = render(json!([
            {"type": "upload", "value": 42},
            {"type": "paragraph", "children": [text("after")]}
        ]));
        assert_eq!(result.html, "<p>after</p>");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_media_grid_skips_second_unresolved() {
        let result = render(json!([{
            "type": "block",
            "fields": {
                "blockType": "mediaGrid",
                "images": [
                    {"image": {"url": "/1.jpg", "mimeType": "image/jpeg"}},
                    {"image": {"id": 2}},
                    {"image": {"url": "/3.jpg", "mimeType": "image/jpeg"}}
                ]
            }
        }]));
        let first = result.html.find("/1.jpg").unwrap();
        let third = result.html.find("/3.jpg").unwrap();
        assert!(first < third);
        assert_eq!(result.html.matches("<figure>").count(), 2);
    }

    #[test]
    fn test_unregistered_block_type_renders_nothing() {
        let result = render(json!([
            {"type": "block", "fields": {"blockType": "carousel"}},
            text("next")
        ]));
        assert_eq!(result.html, "next");
        assert_eq!(result.warnings, vec!["no converter for block type 'carousel'"]);
    }

    #[test]
    fn test_custom_block_converter() {
        struct Banner;
        impl BlockConverter for Banner {
            fn block_type(&self) -> &str {
                "banner"
            }
            fn render(&self, fields: &Value, ctx: &mut BlockContext<'_>) {
                ctx.output().push_str("<aside>");
                ctx.push_text(fields["text"].as_str().unwrap_or_default());
                ctx.output().push_str("</aside>");
            }
        }

        let renderer = RichTextRenderer::new().with_block(Banner);
        let result = renderer.render(&doc(json!([
            {"type": "block", "fields": {"blockType": "banner", "text": "Open <now>"}}
        ])));
        assert_eq!(result.html, "<aside>Open &lt;now&gt;</aside>");
    }

    #[test]
    fn test_embed_rewrites_watch_url() {
        let result = render(json!([{
            "type": "embed",
            "fields": {"url": "https://www.youtube.com/watch?v=abc"}
        }]));
        assert!(result.html.contains(r#"src="https://www.youtube.com/embed/abc""#));
        assert!(result.html.starts_with("<div><iframe"));
    }

    #[test]
    fn test_horizontal_rule() {
        let result = render(json!([{"type": "horizontalrule"}]));
        assert_eq!(result.html, "<hr>");

        let renderer = RichTextRenderer::new().with_classes(ClassNames::new().with(Element::Rule, "hr"));
        let result = renderer.render(&doc(json!([{"type": "horizontalrule"}])));
        assert_eq!(result.html, r#"<hr class="hr">"#);
    }

    #[test]
    fn test_unknown_with_children_is_flattened() {
        let result = render(json!([{
            "type": "callout",
            "children": [{"type": "paragraph", "children": [text("inside")]}]
        }]));
        assert_eq!(result.html, "<p>inside</p>");
        assert_eq!(result.warnings, vec!["unknown node type 'callout'"]);
    }

    #[test]
    fn test_unknown_with_text_only() {
        let result = render(json!([{"type": "mention", "text": "@ursula"}]));
        assert_eq!(result.html, "@ursula");
    }

    #[test]
    fn test_unknown_empty_renders_nothing() {
        let result = render(json!([{"type": "mystery"}, text("sibling")]));
        assert_eq!(result.html, "sibling");
    }

    #[test]
    fn test_unknown_children_take_priority_over_text() {
        let result = render(json!([{
            "type": "wrapper",
            "text": "ignored",
            "children": [text("kept")]
        }]));
        assert_eq!(result.html, "kept");
    }

    #[test]
    fn test_classes_applied() {
        let classes = ClassNames::new()
            .with(Element::Paragraph, "paragraph")
            .with(Element::List, "list")
            .with(Element::ListItem, "listItem")
            .with(Element::Link, "link");
        let renderer = RichTextRenderer::new().with_classes(classes);
        let result = renderer.render(&doc(json!([
            {"type": "paragraph", "children": [
                {"type": "link", "fields": {"url": "/x"}, "children": [text("x")]}
            ]},
            {"type": "list", "listType": "bullet", "children": [
                {"type": "listitem", "children": [text("y")]}
            ]}
        ])));
        assert_eq!(
            result.html,
            r#"<p class="paragraph"><a href="/x" class="link">x</a></p><ul class="list"><li class="listItem">y</li></ul>"#
        );
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let document = doc(json!([
            {"type": "heading", "tag": "h1", "children": [text("T")]},
            {"type": "weird", "children": [text("w")]},
            {"type": "upload", "value": null},
            {"type": "paragraph", "children": [{"type": "text", "text": "b", "format": 1}]}
        ]));
        let renderer = RichTextRenderer::new();
        let first = renderer.render(&document);
        let second = renderer.render(&document);
        assert_eq!(first, second);
    }

    #[test]
    fn test_depth_first_order_preserved() {
        let result = render(json!([
            {"type": "paragraph", "children": [text("1"), {"type": "text", "text": "2", "format": 2}]},
            {"type": "quote", "children": [text("3")]},
            {"type": "paragraph", "children": [text("4")]}
        ]));
        assert_eq!(
            result.html,
            "<p>1<em>2</em></p><blockquote>3</blockquote><p>4</p>"
        );
    }
}
