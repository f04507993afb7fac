//! Impressum page.

use std::fmt::Write;

use folio_content::Language;
use folio_richtext::escape_html;

use crate::i18n::labels;

pub(crate) fn impressum(language: Language, contact_email: &str) -> String {
    let labels = labels(language);
    let email = escape_html(contact_email);
    let mut out = String::new();
    write!(
        out,
        r#"<div class="container impressum"><h1 class="title">{}</h1><p>{}: <a href="mailto:{email}">{email}</a></p></div>"#,
        labels.impressum, labels.email,
    )
    .unwrap();
    out
}
