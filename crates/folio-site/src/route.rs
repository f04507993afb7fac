//! URL route classification.
//!
//! Every path maps to exactly one [`Route`]. The optional `de` prefix selects
//! German; the remaining segments select the page kind.

use folio_content::Language;

/// Kind of page a path addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteKind {
    Home,
    Info,
    News,
    Impressum,
    /// Project detail page addressed by slug.
    Detail(String),
}

impl RouteKind {
    /// Canonical path of this page in a language.
    #[must_use]
    pub fn path(&self, language: Language) -> String {
        let prefix = language.prefix();
        match self {
            Self::Home if prefix.is_empty() => "/".to_owned(),
            Self::Home => prefix.to_owned(),
            Self::Info => format!("{prefix}/category/info"),
            Self::News => format!("{prefix}/category/news"),
            Self::Impressum => format!("{prefix}/impressum"),
            Self::Detail(slug) => format!("{prefix}/{slug}"),
        }
    }
}

/// Classified route: language plus page kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub language: Language,
    pub kind: RouteKind,
}

impl Route {
    /// Classify path segments.
    ///
    /// Predicates are checked in order: language prefix, info, news,
    /// impressum, home, and finally detail by the last segment.
    #[must_use]
    pub fn classify(segments: &[&str]) -> Self {
        let (language, rest) = match segments.split_first() {
            Some((&"de", rest)) => (Language::De, rest),
            _ => (Language::En, segments),
        };

        let kind = if follows_category(rest, &["info", "informationen"]) {
            RouteKind::Info
        } else if follows_category(rest, &["news", "neuigkeiten"]) {
            RouteKind::News
        } else if rest.contains(&"impressum") {
            RouteKind::Impressum
        } else if let Some(last) = rest.last() {
            RouteKind::Detail((*last).to_owned())
        } else {
            RouteKind::Home
        };

        Self { language, kind }
    }

    /// Classify a URL path. Empty segments are ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        Self::classify(&segments)
    }

    /// Canonical path of this route.
    #[must_use]
    pub fn path(&self) -> String {
        self.kind.path(self.language)
    }
}

fn follows_category(segments: &[&str], names: &[&str]) -> bool {
    segments
        .windows(2)
        .any(|pair| pair[0] == "category" && names.contains(&pair[1]))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn classify(path: &str) -> Route {
        Route::from_path(path)
    }

    #[test]
    fn test_home() {
        assert_eq!(classify("/"), Route { language: Language::En, kind: RouteKind::Home });
        assert_eq!(classify(""), Route { language: Language::En, kind: RouteKind::Home });
        assert_eq!(classify("/de"), Route { language: Language::De, kind: RouteKind::Home });
        assert_eq!(classify("/de/"), Route { language: Language::De, kind: RouteKind::Home });
    }

    #[test]
    fn test_info_and_news() {
        assert_eq!(classify("/category/info").kind, RouteKind::Info);
        assert_eq!(classify("/de/category/informationen").kind, RouteKind::Info);
        assert_eq!(classify("/category/news").kind, RouteKind::News);
        assert_eq!(classify("/de/category/neuigkeiten").kind, RouteKind::News);
        assert_eq!(classify("/x/category/news/y").kind, RouteKind::News);
    }

    #[test]
    fn test_info_requires_category_segment() {
        assert_eq!(classify("/info").kind, RouteKind::Detail("info".to_owned()));
        assert_eq!(classify("/info/category").kind, RouteKind::Detail("category".to_owned()));
    }

    #[test]
    fn test_impressum_anywhere() {
        assert_eq!(classify("/impressum").kind, RouteKind::Impressum);
        assert_eq!(classify("/de/legal/impressum").kind, RouteKind::Impressum);
    }

    #[test]
    fn test_detail_uses_last_segment() {
        let route = classify("/de/works/abc");
        assert_eq!(route.language, Language::De);
        assert_eq!(route.kind, RouteKind::Detail("abc".to_owned()));
    }

    #[test]
    fn test_de_only_as_first_segment() {
        let route = classify("/works/de");
        assert_eq!(route.language, Language::En);
        assert_eq!(route.kind, RouteKind::Detail("de".to_owned()));
    }

    #[test]
    fn test_prefixed_and_unprefixed_agree() {
        let shapes = [
            "",
            "/abc",
            "/a/b",
            "/category/info",
            "/category/news",
            "/impressum",
            "/category/other",
        ];
        for shape in shapes {
            let en = classify(shape);
            let de = classify(&format!("/de{shape}"));
            assert_eq!(en.kind, de.kind, "shape {shape:?}");
            assert_eq!(en.language, Language::En);
            assert_eq!(de.language, Language::De);
        }
    }

    #[test]
    fn test_canonical_paths() {
        assert_eq!(RouteKind::Home.path(Language::En), "/");
        assert_eq!(RouteKind::Home.path(Language::De), "/de");
        assert_eq!(RouteKind::Info.path(Language::De), "/de/category/info");
        assert_eq!(RouteKind::News.path(Language::En), "/category/news");
        assert_eq!(RouteKind::Impressum.path(Language::De), "/de/impressum");
        assert_eq!(RouteKind::Detail("abc".to_owned()).path(Language::En), "/abc");
    }

    #[test]
    fn test_canonical_path_classifies_back() {
        for kind in [RouteKind::Home, RouteKind::Info, RouteKind::News, RouteKind::Impressum] {
            for language in [Language::En, Language::De] {
                let route = Route { language, kind: kind.clone() };
                assert_eq!(Route::from_path(&route.path()), route);
            }
        }
    }
}
