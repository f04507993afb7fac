//! Draft preview lookup.

use folio_content::{Collection, Language, Query, StoreError};
use serde_json::Value;

use crate::route::RouteKind;
use crate::site::Site;

/// Error returned when a preview target cannot be resolved.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The request named no document.
    #[error("No slug provided")]
    MissingSlug,
    /// The collection parameter is not a known collection.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
    /// The collection has no page to preview.
    #[error("Collection '{0}' cannot be previewed")]
    Unsupported(Collection),
    /// No document, draft or published, matches.
    #[error("Post not found")]
    NotFound {
        collection: Collection,
        slug: String,
    },
    /// The content store failed.
    #[error("Content store error: {0}")]
    Store(#[from] StoreError),
}

impl Site {
    /// Canonical URL of the page showing a (possibly draft) document.
    ///
    /// `collection` defaults to posts. Posts are looked up by slug; news and
    /// info entries have no slug and are looked up by id. The document's own
    /// language picks the URL prefix.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::MissingSlug`] for a missing or blank slug,
    /// [`PreviewError::NotFound`] if nothing matches, and the other variants
    /// for bad collections or store failures.
    pub fn preview_target(
        &self,
        slug: Option<&str>,
        collection: Option<&str>,
    ) -> Result<String, PreviewError> {
        let slug = slug
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
            .ok_or(PreviewError::MissingSlug)?;

        let collection = match collection.map(str::trim).filter(|c| !c.is_empty()) {
            Some(name) => name
                .parse::<Collection>()
                .map_err(|e| PreviewError::UnknownCollection(e.0))?,
            None => Collection::Posts,
        };

        let key = match collection {
            Collection::Posts => "slug",
            Collection::News | Collection::Info => "id",
            other => return Err(PreviewError::Unsupported(other)),
        };

        let query = Query::new(collection)
            .where_equals(key, slug)
            .depth(0)
            .limit(1)
            .draft(true);
        let doc = self
            .store()
            .find(&query)?
            .into_iter()
            .next()
            .ok_or_else(|| PreviewError::NotFound {
                collection,
                slug: slug.to_owned(),
            })?;

        let language = doc
            .get("language")
            .and_then(Value::as_str)
            .and_then(Language::from_code)
            .unwrap_or_default();
        let kind = match collection {
            Collection::News => RouteKind::News,
            Collection::Info => RouteKind::Info,
            _ => RouteKind::Detail(
                doc.get("slug")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .unwrap_or(slug)
                    .to_owned(),
            ),
        };

        let target = kind.path(language);
        tracing::info!(%collection, slug, url = %target, "Preview target resolved");
        Ok(target)
    }
}
