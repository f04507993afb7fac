//! Collection queries.
//!
//! A [`Query`] names a collection plus equality filters, an optional sort,
//! a relation population depth, a result limit and the draft flag. Backends
//! either translate it to their own query language or evaluate it in memory
//! with [`Query::apply`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::model::DocId;

/// Default relation population depth.
pub const DEFAULT_DEPTH: u8 = 2;

/// Field holding the draft/published status of versioned collections.
pub const STATUS_FIELD: &str = "_status";

/// CMS collections read by the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Posts,
    News,
    Info,
    Categories,
    Media,
}

impl Collection {
    /// All collections.
    pub const ALL: [Self; 5] = [
        Self::Posts,
        Self::News,
        Self::Info,
        Self::Categories,
        Self::Media,
    ];

    /// URL slug of the collection.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::News => "news",
            Self::Info => "info",
            Self::Categories => "categories",
            Self::Media => "media",
        }
    }

    /// Whether documents carry a draft/published status.
    #[must_use]
    pub const fn has_drafts(self) -> bool {
        matches!(self, Self::Posts | Self::News | Self::Info)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when parsing an unknown collection slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCollection(pub String);

impl fmt::Display for UnknownCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown collection '{}'", self.0)
    }
}

impl std::error::Error for UnknownCollection {}

impl FromStr for Collection {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|collection| collection.slug() == s)
            .ok_or_else(|| UnknownCollection(s.to_owned()))
    }
}

/// Equality filter on a top-level field.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    /// Whether a document satisfies the filter.
    ///
    /// Relation fields match when the stored id (or the id of an expanded
    /// document) equals the value; has-many fields match when any entry does.
    /// A missing `_status` counts as published.
    #[must_use]
    pub fn matches(&self, doc: &Value) -> bool {
        match doc.get(&self.field) {
            Some(Value::Array(items)) => items.iter().any(|item| loosely_equal(item, &self.value)),
            Some(stored) => loosely_equal(stored, &self.value),
            None if self.field == STATUS_FIELD => self.value == "published",
            None => self.value.is_null(),
        }
    }
}

fn loosely_equal(stored: &Value, expected: &Value) -> bool {
    if stored == expected {
        return true;
    }
    match (DocId::from_value(stored), DocId::from_value(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Sort order on a top-level field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub descending: bool,
}

impl Sort {
    /// Parse `field` (ascending) or `-field` (descending).
    ///
    /// Returns `None` for an empty field name.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        let (field, descending) = match spec.strip_prefix('-') {
            Some(field) => (field, true),
            None => (spec, false),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_owned(),
            descending,
        })
    }

    /// Compare two documents by the sort field.
    ///
    /// Missing values sort before present ones in ascending order.
    #[must_use]
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let ordering = compare_values(a.get(&self.field), b.get(&self.field));
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            f.write_str("-")?;
        }
        f.write_str(&self.field)
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), Some(_)) => Ordering::Less,
        (Some(_), None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(a), Some(b)) => a.to_string().cmp(&b.to_string()),
    }
}

/// Query against one collection.
///
/// # Example
///
/// ```
/// use folio_content::{Collection, Query};
///
/// let query = Query::new(Collection::News)
///     .where_equals("language", "de")
///     .where_equals("_status", "published")
///     .sort_by("-date");
/// assert_eq!(query.filters.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub collection: Collection,
    pub filters: Vec<Filter>,
    pub sort: Option<Sort>,
    /// Relation population depth (0 leaves relations as ids).
    pub depth: u8,
    pub limit: Option<usize>,
    /// Include draft documents.
    pub draft: bool,
}

impl Query {
    /// Create an unfiltered query with the default depth.
    #[must_use]
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            filters: Vec::new(),
            sort: None,
            depth: DEFAULT_DEPTH,
            limit: None,
            draft: false,
        }
    }

    /// Add an equality filter.
    #[must_use]
    pub fn where_equals(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Set the sort order.
    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set the sort order from `field` / `-field` notation.
    #[must_use]
    pub fn sort_by(mut self, spec: &str) -> Self {
        self.sort = Sort::parse(spec);
        self
    }

    /// Set the relation population depth.
    #[must_use]
    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Limit the number of results.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Include draft documents.
    #[must_use]
    pub fn draft(mut self, draft: bool) -> Self {
        self.draft = draft;
        self
    }

    /// Value of the first equality filter on a field.
    #[must_use]
    pub fn filter_value(&self, field: &str) -> Option<&Value> {
        self.filters
            .iter()
            .find(|filter| filter.field == field)
            .map(|filter| &filter.value)
    }

    /// Whether a document is visible to this query.
    ///
    /// Draft documents are hidden unless the draft flag is set; every filter
    /// must match.
    #[must_use]
    pub fn matches(&self, doc: &Value) -> bool {
        let is_draft = doc.get(STATUS_FIELD).and_then(Value::as_str) == Some("draft");
        if is_draft && !self.draft {
            return false;
        }
        self.filters.iter().all(|filter| filter.matches(doc))
    }

    /// Evaluate the query in memory: filter, sort (stable), then limit.
    #[must_use]
    pub fn apply<'a>(&self, docs: impl IntoIterator<Item = &'a Value>) -> Vec<Value> {
        let mut matched: Vec<Value> = docs
            .into_iter()
            .filter(|doc| self.matches(doc))
            .cloned()
            .collect();
        if let Some(sort) = &self.sort {
            matched.sort_by(|a, b| sort.compare(a, b));
        }
        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_collection_from_str() {
        assert_eq!("posts".parse::<Collection>(), Ok(Collection::Posts));
        assert_eq!("info".parse::<Collection>(), Ok(Collection::Info));
        assert_eq!(
            "users".parse::<Collection>(),
            Err(UnknownCollection("users".to_owned()))
        );
    }

    #[test]
    fn test_collection_drafts() {
        assert!(Collection::Posts.has_drafts());
        assert!(!Collection::Media.has_drafts());
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(
            Sort::parse("-date"),
            Some(Sort {
                field: "date".to_owned(),
                descending: true
            })
        );
        assert_eq!(
            Sort::parse("title"),
            Some(Sort {
                field: "title".to_owned(),
                descending: false
            })
        );
        assert_eq!(Sort::parse("-"), None);
        assert_eq!(Sort::parse(""), None);
        assert_eq!(Sort::parse("-date").unwrap().to_string(), "-date");
    }

    #[test]
    fn test_filter_matches_scalar() {
        let filter = Filter {
            field: "language".to_owned(),
            value: json!("de"),
        };
        assert!(filter.matches(&json!({"language": "de"})));
        assert!(!filter.matches(&json!({"language": "en"})));
        assert!(!filter.matches(&json!({})));
    }

    #[test]
    fn test_filter_matches_relation_ids() {
        let filter = Filter {
            field: "categories".to_owned(),
            value: json!(3),
        };
        assert!(filter.matches(&json!({"categories": [1, "3"]})));
        assert!(filter.matches(&json!({"categories": [{"id": 3, "name_en": "Video"}]})));
        assert!(!filter.matches(&json!({"categories": [1, 2]})));
    }

    #[test]
    fn test_missing_status_is_published() {
        let filter = Filter {
            field: STATUS_FIELD.to_owned(),
            value: json!("published"),
        };
        assert!(filter.matches(&json!({"title": "x"})));
    }

    #[test]
    fn test_query_hides_drafts() {
        let doc = json!({"slug": "a", "_status": "draft"});
        let query = Query::new(Collection::Posts).where_equals("slug", "a");
        assert!(!query.matches(&doc));
        assert!(query.clone().draft(true).matches(&doc));
    }

    #[test]
    fn test_apply_sorts_and_limits() {
        let docs = [
            json!({"headline": "b", "date": "2024-02-01"}),
            json!({"headline": "a", "date": "2024-05-01"}),
            json!({"headline": "c"}),
            json!({"headline": "d", "date": "2023-01-01"}),
        ];
        let query = Query::new(Collection::News).sort_by("-date").limit(3);
        let headlines: Vec<_> = query
            .apply(&docs)
            .iter()
            .map(|doc| doc["headline"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(headlines, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_apply_keeps_stored_order_without_sort() {
        let docs = [json!({"n": 2}), json!({"n": 1}), json!({"n": 3})];
        let result = Query::new(Collection::Info).apply(&docs);
        assert_eq!(result, docs.to_vec());
    }

    #[test]
    fn test_sort_numbers() {
        let sort = Sort::parse("n").unwrap();
        assert_eq!(sort.compare(&json!({"n": 2}), &json!({"n": 10})), Ordering::Less);
    }
}
