//! Category selection of the home grid.

use percent_encoding::percent_decode_str;

use crate::page::Artwork;

/// Query parameter carrying a selected category id. Repeated once per id.
pub const CATEGORY_PARAM: &str = "category";

/// Selected category ids, in request order without duplicates.
///
/// An empty selection shows every artwork; otherwise an artwork is shown when
/// it shares at least one category with the selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    ids: Vec<String>,
}

impl CategoryFilter {
    /// Create a filter from category ids.
    #[must_use]
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self::default();
        for id in ids {
            filter.push(id.into());
        }
        filter
    }

    /// Parse `category=` parameters from a URL query string.
    ///
    /// Other parameters and blank values are ignored.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let mut filter = Self::default();
        for pair in query.split('&') {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            if decode(name) == CATEGORY_PARAM {
                filter.push(decode(value));
            }
        }
        filter
    }

    fn push(&mut self, id: String) {
        let id = id.trim();
        if !id.is_empty() && !self.contains(id) {
            self.ids.push(id.to_owned());
        }
    }

    /// Selected ids.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether a category id is selected.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|selected| selected == id)
    }

    /// Whether an artwork passes the filter.
    #[must_use]
    pub fn matches(&self, artwork: &Artwork) -> bool {
        self.is_empty() || artwork.categories.iter().any(|id| self.contains(id))
    }
}

/// Decode a form-encoded query component (`+` is a space).
fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn artwork(categories: &[&str]) -> Artwork {
        Artwork {
            id: "1".to_owned(),
            title: "Tide".to_owned(),
            slug: "tide".to_owned(),
            display_year: "2020".to_owned(),
            categories: categories.iter().map(|&c| c.to_owned()).collect(),
            images: Vec::new(),
        }
    }

    #[test]
    fn test_from_query_repeated_params() {
        let filter = CategoryFilter::from_query("category=1&lang=de&category=3&category=1");

        assert_eq!(filter.ids(), ["1", "3"]);
    }

    #[test]
    fn test_from_query_decodes_values() {
        let filter = CategoryFilter::from_query("category=sound+%26+space&category%5B%5D=x");

        assert_eq!(filter.ids(), ["sound & space"]);
    }

    #[test]
    fn test_from_query_ignores_blank() {
        assert!(CategoryFilter::from_query("").is_empty());
        assert!(CategoryFilter::from_query("category=&category").is_empty());
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = CategoryFilter::default();

        assert!(filter.matches(&artwork(&[])));
        assert!(filter.matches(&artwork(&["1"])));
    }

    #[test]
    fn test_matches_any_selected_category() {
        let filter = CategoryFilter::new(["2", "5"]);

        assert!(filter.matches(&artwork(&["1", "2"])));
        assert!(filter.matches(&artwork(&["5"])));
        assert!(!filter.matches(&artwork(&["1", "3"])));
        assert!(!filter.matches(&artwork(&[])));
    }
}
