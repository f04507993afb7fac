//! Interface strings per language.

use folio_content::Language;

/// Fixed interface strings of one language.
#[derive(Debug)]
pub struct Labels {
    pub artworks: &'static str,
    pub info: &'static str,
    pub news: &'static str,
    pub filters: &'static str,
    pub clear_all: &'static str,
    pub apply: &'static str,
    pub open: &'static str,
    pub close: &'static str,
    /// Link text of the detail page's language switch.
    pub read_other_language: &'static str,
    pub impressum: &'static str,
    pub email: &'static str,
    pub menu: &'static str,
    pub not_found: &'static str,
    pub not_found_hint: &'static str,
}

const EN: Labels = Labels {
    artworks: "ARTWORKS",
    info: "INFO",
    news: "NEWS",
    filters: "Filters",
    clear_all: "Clear All",
    apply: "Apply",
    open: "Open [+]",
    close: "Close [-]",
    read_other_language: "Read in German →",
    impressum: "Imprint",
    email: "Email",
    menu: "Menu",
    not_found: "Page not found",
    not_found_hint: "Back to artworks",
};

const DE: Labels = Labels {
    artworks: "ARTWORKS",
    info: "INFO",
    news: "NEWS",
    filters: "Filters",
    clear_all: "Clear All",
    apply: "Anwenden",
    open: "Open [+]",
    close: "Close [-]",
    read_other_language: "Auf Deutsch lesen →",
    impressum: "Impressum",
    email: "Email",
    menu: "Menü",
    not_found: "Seite nicht gefunden",
    not_found_hint: "Zurück zu den Arbeiten",
};

/// Labels for a language.
#[must_use]
pub const fn labels(language: Language) -> &'static Labels {
    match language {
        Language::En => &EN,
        Language::De => &DE,
    }
}
