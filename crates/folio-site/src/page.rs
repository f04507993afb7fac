//! Resolved page data, ready for rendering.

use folio_content::{InfoEntry, Language, NewsItem, Post};

use crate::route::Route;

/// A resolved page: its route, language-switch target and content.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub route: Route,
    /// Path of the same page in the other language.
    pub alternate_path: String,
    pub content: PageContent,
}

impl Page {
    /// Page language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.route.language
    }
}

/// Dataset of a page, one variant per route kind.
#[derive(Clone, Debug, PartialEq)]
pub enum PageContent {
    Home(HomePage),
    Info(Vec<InfoEntry>),
    News(Vec<NewsItem>),
    Impressum,
    Detail(Box<Post>),
}

/// Home grid data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HomePage {
    /// Filter options in stored order.
    pub categories: Vec<CategoryOption>,
    /// Artworks passing the category filter, newest first.
    pub artworks: Vec<Artwork>,
}

/// Category filter option with its localized name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
    /// Whether the request's filter selects this category.
    pub selected: bool,
}

/// Grid tile of one artwork.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub display_year: String,
    /// Ids of the artwork's categories.
    pub categories: Vec<String>,
    /// Featured image URLs.
    pub images: Vec<String>,
}
