//! HTML emission helpers shared by the renderer and block converters.

use std::fmt::Write;

use crate::classes::{ClassNames, Element};
use crate::media::{Media, MediaKind, UploadSize};

/// Escape special HTML characters.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Whether a URL may be used as a link or media source.
///
/// Script and data URLs are rejected.
pub(crate) fn is_safe_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    !(lower.starts_with("javascript:") || lower.starts_with("vbscript:") || lower.starts_with("data:"))
}

/// Write an opening tag with an optional class attribute.
pub(crate) fn open_tag(out: &mut String, tag: &str, class: Option<&str>) {
    match class {
        Some(class) => write!(out, r#"<{tag} class="{}">"#, escape_html(class)).unwrap(),
        None => write!(out, "<{tag}>").unwrap(),
    }
}

/// Write a closing tag.
pub(crate) fn close_tag(out: &mut String, tag: &str) {
    write!(out, "</{tag}>").unwrap();
}

/// Join a base class with a modifier.
pub(crate) fn with_modifier(base: Option<&str>, modifier: &str) -> String {
    match base {
        Some(base) => format!("{base} {modifier}"),
        None => modifier.to_owned(),
    }
}

/// Render a bare media element (image, video or audio) without a container.
///
/// Returns `false` without writing anything when the media has no URL.
pub(crate) fn media_element(media: &Media, classes: &ClassNames, out: &mut String) -> bool {
    let Some(src) = media.url().filter(|src| is_safe_url(src)) else {
        return false;
    };
    let src = escape_html(src);

    match media.kind() {
        MediaKind::Video => {
            out.push_str("<video controls playsinline controlslist=\"nodownload\"");
            push_class(out, classes.get(Element::Video));
            out.push('>');
            push_source(out, &src, media.mime_type());
            out.push_str("</video>");
        }
        MediaKind::Audio => {
            out.push_str("<audio controls controlslist=\"nodownload\"");
            push_class(out, classes.get(Element::Audio));
            out.push('>');
            push_source(out, &src, media.mime_type());
            out.push_str("</audio>");
        }
        MediaKind::Image => {
            write!(out, r#"<img src="{src}" alt="{}""#, escape_html(media.alt())).unwrap();
            if let (Some(width), Some(height)) = (media.width, media.height) {
                write!(out, r#" width="{width}" height="{height}""#).unwrap();
            }
            push_class(out, classes.get(Element::Image));
            out.push_str(r#" loading="lazy">"#);
        }
    }
    true
}

/// Render media wrapped in a sized container.
pub(crate) fn media_block(
    media: &Media,
    size: UploadSize,
    classes: &ClassNames,
    out: &mut String,
) -> bool {
    let mut inner = String::new();
    if !media_element(media, classes, &mut inner) {
        return false;
    }
    let class = with_modifier(classes.get(Element::MediaContainer), size.class());
    open_tag(out, "div", Some(&class));
    out.push_str(&inner);
    close_tag(out, "div");
    true
}

fn push_class(out: &mut String, class: Option<&str>) {
    if let Some(class) = class {
        write!(out, r#" class="{}""#, escape_html(class)).unwrap();
    }
}

fn push_source(out: &mut String, src: &str, mime: &str) {
    if mime.is_empty() {
        write!(out, r#"<source src="{src}">"#).unwrap();
    } else {
        write!(out, r#"<source src="{src}" type="{}">"#, escape_html(mime)).unwrap();
    }
}
