//! Info page: an accordion of entries with labelled sections.

use std::fmt::Write;

use folio_content::{InfoEntry, Language};
use folio_richtext::{RichTextRenderer, escape_html};

use super::Fragment;
use crate::i18n::labels;

/// Render info entries as an exclusive `<details>` accordion, all closed.
///
/// Entries share a `name`, so opening one closes the others.
/// Both status labels are emitted; the stylesheet shows the one matching the
/// open state.
pub(crate) fn info(entries: &[InfoEntry], language: Language, renderer: &RichTextRenderer) -> Fragment {
    let labels = labels(language);
    let mut fragment = Fragment::default();
    fragment.push(r#"<div class="container">"#);

    for entry in entries {
        write!(
            fragment.html,
            r#"<details class="doc-group" name="info"><summary class="header"><h1 class="title">{}</h1><span class="status status-closed">{}</span><span class="status status-open">{}</span></summary><div class="content">"#,
            escape_html(&entry.title),
            labels.open,
            labels.close,
        )
        .unwrap();
        for section in &entry.sections {
            write!(
                fragment.html,
                r#"<div class="section"><h2 class="section-label">{}</h2><div class="details">"#,
                escape_html(&section.label),
            )
            .unwrap();
            fragment.rich_text(renderer, &section.details);
            fragment.push("</div></div>");
        }
        fragment.push("</div></details>");
    }

    fragment.push("</div>");
    fragment
}
