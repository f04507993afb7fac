//! Localized not-found page.

use std::fmt::Write;

use folio_content::Language;

use crate::i18n::labels;
use crate::route::RouteKind;

pub(crate) fn not_found(language: Language) -> String {
    let labels = labels(language);
    let mut out = String::new();
    write!(
        out,
        r#"<div class="container not-found"><h1 class="title">{}</h1><p><a href="{}">{}</a></p></div>"#,
        labels.not_found,
        RouteKind::Home.path(language),
        labels.not_found_hint,
    )
    .unwrap();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_localized() {
        assert!(not_found(Language::En).contains("Page not found"));
        let de = not_found(Language::De);
        assert!(de.contains("Seite nicht gefunden"));
        assert!(de.contains(r#"<a href="/de">Zurück zu den Arbeiten</a>"#));
    }
}
