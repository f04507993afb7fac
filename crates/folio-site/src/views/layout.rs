//! Document shell, navbar and footer.

use std::fmt::Write;

use chrono::Datelike;
use folio_content::Language;
use folio_richtext::escape_html;

use crate::i18n::labels;
use crate::route::RouteKind;

/// Page-independent parts of the document.
pub(crate) struct Shell<'a> {
    pub title: &'a str,
    pub brand: &'a str,
    pub language: Language,
    /// Canonical path of the current page.
    pub path: &'a str,
    /// Path of the current page in the other language.
    pub alternate_path: &'a str,
}

/// Wrap page content in the full HTML document.
pub(crate) fn document(shell: &Shell<'_>, main: &str) -> String {
    let mut out = String::with_capacity(main.len() + 2048);

    write!(
        out,
        r#"<!DOCTYPE html><html lang="{lang}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title}</title><link rel="stylesheet" href="/static/styles.css"></head><body>"#,
        lang = shell.language.code(),
        title = escape_html(shell.title),
    )
    .unwrap();
    navbar(shell, &mut out);
    write!(out, r#"<main class="font-ia">{main}</main>"#).unwrap();
    footer(shell.brand, &mut out);
    out.push_str("</body></html>");
    out
}

fn navbar(shell: &Shell<'_>, out: &mut String) {
    let labels = labels(shell.language);
    let home = RouteKind::Home.path(shell.language);

    write!(
        out,
        r#"<nav class="navbar"><a class="logo" href="{home}">{brand}</a><div class="desktop-menu">"#,
        brand = escape_html(shell.brand),
    )
    .unwrap();
    nav_links(shell.language, out);
    out.push_str(r#"<div class="lang-switch">"#);
    lang_switch(shell, out);
    out.push_str("</div></div>");

    write!(
        out,
        r#"<details class="mobile-menu"><summary class="mobile-toggle" aria-label="{menu}"></summary><div class="mobile-menu-overlay">"#,
        menu = labels.menu,
    )
    .unwrap();
    nav_links(shell.language, out);
    out.push_str(r#"<div class="mobile-lang">"#);
    lang_switch(shell, out);
    out.push_str("</div></div></details></nav>");
}

fn nav_links(language: Language, out: &mut String) {
    let labels = labels(language);
    for (kind, label) in [
        (RouteKind::Home, labels.artworks),
        (RouteKind::Info, labels.info),
        (RouteKind::News, labels.news),
    ] {
        write!(out, r#"<a href="{}">{label}</a>"#, kind.path(language)).unwrap();
    }
}

/// EN / DE switch. The active language links to the current page.
fn lang_switch(shell: &Shell<'_>, out: &mut String) {
    for (i, language) in [Language::En, Language::De].into_iter().enumerate() {
        if i > 0 {
            out.push_str(r#"<span class="separator">/</span>"#);
        }
        let (href, class) = if language == shell.language {
            (shell.path, r#" class="active-lang""#)
        } else {
            (shell.alternate_path, "")
        };
        write!(
            out,
            r#"<a href="{}" hreflang="{code}"{class}>{label}</a>"#,
            escape_html(href),
            code = language.code(),
            label = language.code().to_ascii_uppercase(),
        )
        .unwrap();
    }
}

fn footer(brand: &str, out: &mut String) {
    write!(
        out,
        r#"<footer class="footer"><div class="container"><div class="column"><span class="brand">{}</span><p class="copyright">© {}</p></div></div></footer>"#,
        escape_html(brand),
        chrono::Utc::now().year(),
    )
    .unwrap();
}
