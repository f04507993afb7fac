//! Project detail page.

use std::fmt::Write;

use folio_content::{Language, Post};
use folio_richtext::{RichTextRenderer, escape_html};

use super::Fragment;
use crate::i18n::labels;

/// Render a project: meta line, title, rich-text body and the
/// language-switch footer.
///
/// The footer is shown whenever the post links an alternate version, even
/// when the relation was not expanded; `alternate_path` then points at the
/// other language's home.
pub(crate) fn detail(
    post: &Post,
    language: Language,
    alternate_path: &str,
    renderer: &RichTextRenderer,
) -> Fragment {
    let mut fragment = Fragment::default();

    let categories: Vec<&str> = post
        .expanded_categories()
        .map(|category| category.name(language))
        .collect();

    write!(
        fragment.html,
        r#"<article class="article"><header class="header"><div class="meta"><time class="date">{}</time><span class="separator">—</span><div class="categories">{}</div></div><h1 class="title">{}</h1></header><div class="content-wrapper"><section class="rich-text-body">"#,
        escape_html(post.display_year.as_deref().unwrap_or_default()),
        escape_html(&categories.join(", ")),
        escape_html(&post.title),
    )
    .unwrap();
    fragment.rich_text(renderer, &post.content);
    fragment.push("</section>");

    if post.alternate_version.is_some() {
        write!(
            fragment.html,
            r#"<footer class="footer"><div class="divider"></div><a href="{}" class="lang-switch" hreflang="{}">{}</a></footer>"#,
            escape_html(alternate_path),
            language.other().code(),
            labels(language).read_other_language,
        )
        .unwrap();
    }

    fragment.push("</div></article>");
    fragment
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn post(value: serde_json::Value) -> Post {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_meta_and_title() {
        let post = post(json!({
            "title": "Turnstile",
            "displayYear": "2023",
            "categories": [
                {"id": 1, "name_en": "Video", "name_de": "Video"},
                {"id": 2, "name_en": "Installation", "name_de": "Installation DE"}
            ],
        }));

        let html = detail(&post, Language::De, "/", &RichTextRenderer::new()).html;

        assert!(html.contains(r#"<time class="date">2023</time><span class="separator">—</span><div class="categories">Video, Installation DE</div>"#));
        assert!(html.contains(r#"<h1 class="title">Turnstile</h1>"#));
        assert!(!html.contains(r#"class="lang-switch""#));
    }

    #[test]
    fn test_body_uses_renderer() {
        let post = post(json!({
            "title": "T",
            "content": {"root": {"children": [
                {"type": "paragraph", "children": [{"type": "text", "text": "hi", "format": 1}]}
            ]}},
        }));
        let renderer = RichTextRenderer::new()
            .with_classes(folio_richtext::ClassNames::new().with(folio_richtext::Element::Paragraph, "paragraph"));

        let fragment = detail(&post, Language::En, "/", &renderer);

        assert!(fragment.html.contains(
            r#"<section class="rich-text-body"><p class="paragraph"><strong>hi</strong></p></section>"#
        ));
        assert!(fragment.warnings.is_empty());
    }

    #[test]
    fn test_language_switch_footer() {
        let post = post(json!({"title": "T", "alternateVersion": {"id": 2, "slug": "drehkreuz"}}));

        let html = detail(&post, Language::En, "/de/drehkreuz", &RichTextRenderer::new()).html;

        assert!(html.contains(r#"<a href="/de/drehkreuz" class="lang-switch" hreflang="de">Read in German →</a>"#));
    }

    #[test]
    fn test_language_switch_footer_german() {
        let post = post(json!({"title": "T", "alternateVersion": 2}));

        let html = detail(&post, Language::De, "/", &RichTextRenderer::new()).html;

        assert!(html.contains(r#"<a href="/" class="lang-switch" hreflang="en">Auf Deutsch lesen →</a>"#));
    }

    #[test]
    fn test_unknown_nodes_collect_warnings() {
        let post = post(json!({
            "title": "T",
            "content": {"root": {"children": [{"type": "mystery", "text": "kept"}]}},
        }));

        let fragment = detail(&post, Language::En, "/", &RichTextRenderer::new());

        assert!(fragment.html.contains("kept"));
        assert_eq!(fragment.warnings.len(), 1);
    }
}
