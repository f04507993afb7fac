//! HTML views.
//!
//! Views are plain functions from resolved page data to markup. Each page
//! styles rich text through its own [`ClassNames`] table. Interactive state
//! (filter drawer, accordion, mobile menu) is expressed with native
//! `<details>` and form elements so no script is needed.

mod detail;
mod grid;
mod impressum;
mod info;
mod layout;
mod news;
mod not_found;

use folio_richtext::{ClassNames, Element, RenderResult, RichText, RichTextRenderer};

pub(crate) use detail::detail;
pub(crate) use grid::grid;
pub(crate) use impressum::impressum;
pub(crate) use info::info;
pub(crate) use layout::{Shell, document};
pub(crate) use news::news;
pub(crate) use not_found::not_found;

/// Rich-text renderers per page style.
pub(crate) struct Renderers {
    pub detail: RichTextRenderer,
    pub news: RichTextRenderer,
    pub info: RichTextRenderer,
}

impl Renderers {
    pub(crate) fn new() -> Self {
        Self {
            detail: RichTextRenderer::new().with_classes(detail_classes()),
            news: RichTextRenderer::new().with_classes(news_classes()),
            info: RichTextRenderer::new().with_classes(info_classes()),
        }
    }
}

fn detail_classes() -> ClassNames {
    ClassNames::new()
        .with(Element::Paragraph, "paragraph")
        .with(Element::Heading, "heading")
        .with(Element::Quote, "quote")
        .with(Element::List, "list")
        .with(Element::ListItem, "list-item")
        .with(Element::Link, "link")
        .with(Element::MediaContainer, "media-container")
        .with(Element::Image, "content-image")
        .with(Element::Video, "video-player")
        .with(Element::Audio, "audio-player")
        .with(Element::Grid, "media-grid")
        .with(Element::GridItem, "media-grid-item")
        .with(Element::Caption, "caption")
        .with(Element::Embed, "embed-container")
        .with(Element::Rule, "hr")
}

fn news_classes() -> ClassNames {
    ClassNames::new()
        .with(Element::Paragraph, "paragraph")
        .with(Element::Heading, "heading")
        .with(Element::List, "list")
        .with(Element::ListItem, "list-item")
        .with(Element::Link, "link")
        .with(Element::MediaContainer, "image-wrapper")
        .with(Element::Image, "inline-image")
}

fn info_classes() -> ClassNames {
    ClassNames::new()
        .with(Element::Paragraph, "paragraph")
        .with(Element::List, "list")
        .with(Element::ListItem, "list-item")
        .with(Element::Link, "link")
        .with(Element::MediaContainer, "image-wrapper")
        .with(Element::Image, "inline-image")
        .with(Element::Embed, "embed-container")
        .with(Element::Rule, "hr")
}

/// Output buffer of a view plus the rich-text warnings it collected.
#[derive(Default)]
pub(crate) struct Fragment {
    pub html: String,
    pub warnings: Vec<String>,
}

impl Fragment {
    /// Render a rich-text field into the buffer.
    pub(crate) fn rich_text(&mut self, renderer: &RichTextRenderer, doc: &RichText) {
        let RenderResult { html, warnings } = renderer.render(doc);
        self.html.push_str(&html);
        self.warnings.extend(warnings);
    }

    pub(crate) fn push(&mut self, s: &str) {
        self.html.push_str(s);
    }
}
