//! Page resolution and rendering.
//!
//! [`Site`] maps a URL path to a [`Page`] by classifying the route and running
//! exactly one dataset query against the [`ContentStore`], then renders the
//! page into a complete HTML document.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use folio_content::FsStore;
//! use folio_site::{Site, SiteConfig};
//!
//! let site = Site::new(Arc::new(FsStore::new("content")), SiteConfig::default());
//! let page = site.render("/de/category/news", false)?;
//! ```

use std::sync::{Arc, LazyLock};

use folio_content::{
    Category, Collection, ContentStore, DEFAULT_DEPTH, InfoEntry, Language, NewsItem, Post, Query,
    Relation, STATUS_FIELD, StoreError,
};
use regex::Regex;

use crate::filter::CategoryFilter;
use crate::page::{Artwork, CategoryOption, HomePage, Page, PageContent};
use crate::route::{Route, RouteKind};
use crate::views::{self, Fragment, Renderers, Shell};

/// Upper bound of documents fetched for the home grid.
const HOME_LIMIT: usize = 100;

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

/// Configuration for [`Site`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    /// Document title.
    pub title: String,
    /// Brand shown in the navbar and footer.
    pub brand: String,
    /// Contact address on the impressum page.
    pub contact_email: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Ursula Damm".to_owned(),
            brand: "Ursula Damm".to_owned(),
            contact_email: "studio@ursuladamm.de".to_owned(),
        }
    }
}

/// Error returned when a page cannot be resolved.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// No document matches the route.
    #[error("Page not found: {path}")]
    NotFound {
        path: String,
        /// Language of the requested route, for the localized 404 page.
        language: Language,
    },
    /// The content store failed.
    #[error("Content store error: {0}")]
    Store(#[from] StoreError),
}

/// A rendered HTML document.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    pub html: String,
    pub language: Language,
    /// Rich-text nodes that were skipped or degraded.
    pub warnings: Vec<String>,
}

/// Page resolver and renderer.
///
/// Immutable after construction, so one instance serves concurrent requests.
pub struct Site {
    store: Arc<dyn ContentStore>,
    config: SiteConfig,
    renderers: Renderers,
}

impl Site {
    /// Create a site over a content store.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>, config: SiteConfig) -> Self {
        Self {
            store,
            config,
            renderers: Renderers::new(),
        }
    }

    /// Site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub(crate) fn store(&self) -> &(dyn ContentStore + 'static) {
        self.store.as_ref()
    }

    /// Resolve a URL path to its page data.
    ///
    /// In draft mode the published-status filters are dropped and queries ask
    /// the store for draft versions.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::NotFound`] if a detail route matches no post and
    /// [`SiteError::Store`] if a query fails.
    pub fn resolve(&self, path: &str, draft: bool) -> Result<Page, SiteError> {
        self.resolve_filtered(path, draft, &CategoryFilter::default())
    }

    /// Resolve a URL path, narrowing the home grid to the selected categories.
    ///
    /// The filter only applies to home routes.
    ///
    /// # Errors
    ///
    /// Same as [`Site::resolve`].
    pub fn resolve_filtered(
        &self,
        path: &str,
        draft: bool,
        filter: &CategoryFilter,
    ) -> Result<Page, SiteError> {
        let route = Route::from_path(path);
        let language = route.language;

        let content = match &route.kind {
            RouteKind::Home => PageContent::Home(self.home(language, draft, filter)?),
            RouteKind::Info => {
                let query = published(Query::new(Collection::Info), draft)
                    .where_equals("language", language.code());
                PageContent::Info(self.store().find_as::<InfoEntry>(&query)?)
            }
            RouteKind::News => {
                let query = published(Query::new(Collection::News), draft)
                    .where_equals("language", language.code())
                    .sort_by("-date");
                PageContent::News(self.store().find_as::<NewsItem>(&query)?)
            }
            RouteKind::Impressum => PageContent::Impressum,
            RouteKind::Detail(slug) => {
                let post = self.detail(slug, language, draft)?.ok_or_else(|| {
                    tracing::debug!(path, slug = %slug, %language, "No post for detail route");
                    SiteError::NotFound {
                        path: path.to_owned(),
                        language,
                    }
                })?;
                PageContent::Detail(Box::new(post))
            }
        };

        let alternate_path = match &content {
            PageContent::Detail(post) => match post.alternate_slug() {
                Some(slug) => RouteKind::Detail(slug.to_owned()).path(language.other()),
                None => RouteKind::Home.path(language.other()),
            },
            _ => route.kind.path(language.other()),
        };

        Ok(Page {
            route,
            alternate_path,
            content,
        })
    }

    /// Resolve and render a URL path.
    ///
    /// # Errors
    ///
    /// Same as [`Site::resolve`].
    pub fn render(&self, path: &str, draft: bool) -> Result<RenderedPage, SiteError> {
        self.render_filtered(path, draft, &CategoryFilter::default())
    }

    /// Resolve and render a URL path with a home-grid category filter.
    ///
    /// # Errors
    ///
    /// Same as [`Site::resolve`].
    pub fn render_filtered(
        &self,
        path: &str,
        draft: bool,
        filter: &CategoryFilter,
    ) -> Result<RenderedPage, SiteError> {
        let page = self.resolve_filtered(path, draft, filter)?;
        Ok(self.render_page(&page))
    }

    /// Render resolved page data into a full document.
    #[must_use]
    pub fn render_page(&self, page: &Page) -> RenderedPage {
        let language = page.language();
        let fragment = match &page.content {
            PageContent::Home(home) => Fragment {
                html: views::grid(home, language),
                warnings: Vec::new(),
            },
            PageContent::Info(entries) => views::info(entries, language, &self.renderers.info),
            PageContent::News(items) => views::news(items, &self.renderers.news),
            PageContent::Impressum => Fragment {
                html: views::impressum(language, &self.config.contact_email),
                warnings: Vec::new(),
            },
            PageContent::Detail(post) => {
                views::detail(post, language, &page.alternate_path, &self.renderers.detail)
            }
        };

        let title = match &page.content {
            PageContent::Detail(post) if !post.title.is_empty() => {
                format!("{} | {}", post.title, self.config.title)
            }
            _ => self.config.title.clone(),
        };
        let path = page.route.path();

        if !fragment.warnings.is_empty() {
            tracing::debug!(
                path = %path,
                warnings = fragment.warnings.len(),
                "Page rendered with warnings"
            );
        }

        let html = views::document(
            &Shell {
                title: &title,
                brand: &self.config.brand,
                language,
                path: &path,
                alternate_path: &page.alternate_path,
            },
            &fragment.html,
        );

        RenderedPage {
            html,
            language,
            warnings: fragment.warnings,
        }
    }

    /// Render the localized not-found page.
    #[must_use]
    pub fn render_not_found(&self, language: Language) -> RenderedPage {
        let home = RouteKind::Home;
        let html = views::document(
            &Shell {
                title: &self.config.title,
                brand: &self.config.brand,
                language,
                path: &home.path(language),
                alternate_path: &home.path(language.other()),
            },
            &views::not_found(language),
        );

        RenderedPage {
            html,
            language,
            warnings: Vec::new(),
        }
    }

    fn home(
        &self,
        language: Language,
        draft: bool,
        filter: &CategoryFilter,
    ) -> Result<HomePage, StoreError> {
        let categories = self
            .store()
            .find_as::<Category>(&Query::new(Collection::Categories).limit(HOME_LIMIT))?;
        let posts = self.store().find_as::<Post>(
            &published(Query::new(Collection::Posts), draft)
                .where_equals("language", language.code())
                .limit(HOME_LIMIT),
        )?;

        let categories = categories
            .iter()
            .map(|category| {
                let id = category
                    .id
                    .as_ref()
                    .map_or_else(|| category.name_en.clone(), ToString::to_string);
                CategoryOption {
                    selected: filter.contains(&id),
                    name: category.name(language).to_owned(),
                    id,
                }
            })
            .collect();

        let mut artworks: Vec<Artwork> = posts
            .iter()
            .filter_map(artwork)
            .filter(|artwork| filter.matches(artwork))
            .collect();
        sort_artworks(&mut artworks);

        Ok(HomePage {
            categories,
            artworks,
        })
    }

    fn detail(&self, slug: &str, language: Language, draft: bool) -> Result<Option<Post>, StoreError> {
        let query = published(Query::new(Collection::Posts), draft)
            .where_equals("slug", slug)
            .where_equals("language", language.code())
            .limit(1)
            .depth(DEFAULT_DEPTH);
        Ok(self.store().find_as::<Post>(&query)?.into_iter().next())
    }
}

/// Restrict a query to published documents, or switch it to draft mode.
fn published(query: Query, draft: bool) -> Query {
    if draft {
        query.draft(true)
    } else {
        query.where_equals(STATUS_FIELD, "published")
    }
}

/// Grid tile of a post. Posts without a slug cannot be linked and are skipped.
fn artwork(post: &Post) -> Option<Artwork> {
    let Some(slug) = post.slug.as_deref().filter(|slug| !slug.is_empty()) else {
        tracing::debug!(title = %post.title, "Skipping post without slug");
        return None;
    };

    Some(Artwork {
        id: post
            .id
            .as_ref()
            .map_or_else(|| slug.to_owned(), ToString::to_string),
        title: post.title.clone(),
        slug: slug.to_owned(),
        display_year: post.display_year.clone().unwrap_or_default(),
        categories: post
            .categories
            .iter()
            .filter_map(|relation| match relation {
                Relation::Expanded(category) => category.id.as_ref().map(ToString::to_string),
                Relation::Id(id) => Some(id.to_string()),
            })
            .collect(),
        images: post.image_urls().map(str::to_owned).collect(),
    })
}

/// Newest first: by the first four-digit year, then by the year text.
/// Artworks without a year go last.
fn sort_artworks(artworks: &mut [Artwork]) {
    artworks.sort_by(|a, b| {
        first_year(&b.display_year)
            .cmp(&first_year(&a.display_year))
            .then_with(|| b.display_year.cmp(&a.display_year))
    });
}

fn first_year(display_year: &str) -> Option<u32> {
    YEAR_RE
        .find(display_year)
        .and_then(|m| m.as_str().parse().ok())
}
