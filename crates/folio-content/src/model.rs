//! Typed portfolio documents.
//!
//! Decoding is lenient: optional and relation fields tolerate `null`, and
//! relations accept either a bare id or the expanded document.

use std::fmt;

use folio_richtext::{Media, RichText};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Content language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    /// Language code as stored (`en`, `de`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }

    /// Parse a language code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "de" => Some(Self::De),
            _ => None,
        }
    }

    /// The other site language.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::En => Self::De,
            Self::De => Self::En,
        }
    }

    /// URL prefix for this language: empty for English, `/de` for German.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::En => "",
            Self::De => "/de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Publication status of a versioned document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    #[default]
    Published,
}

/// Document identifier.
///
/// Stores hand out numeric or string ids; both are kept in their string form
/// so `3` and `"3"` compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocId(String);

impl DocId {
    /// Create an id from its string form.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id from a JSON number, string, or an object's `id` field.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self(n.to_string())),
            Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            Value::Object(map) => map.get("id").and_then(|id| match id {
                Value::Object(_) => None,
                id => Self::from_value(id),
            }),
            _ => None,
        }
    }

    /// String form of the id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DocId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Number(_) | Value::String(_) => DocId::from_value(&value)
                .ok_or_else(|| serde::de::Error::custom("empty document id")),
            other => Err(serde::de::Error::custom(format!(
                "expected number or string id, got {other}"
            ))),
        }
    }
}

/// Relation to another document: expanded or a bare id.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Relation<T> {
    Expanded(T),
    Id(DocId),
}

impl<T> Relation<T> {
    /// Expanded document, if the relation was populated.
    #[must_use]
    pub fn expanded(&self) -> Option<&T> {
        match self {
            Self::Expanded(doc) => Some(doc),
            Self::Id(_) => None,
        }
    }
}

/// Artwork category with localized names.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: Option<DocId>,
    pub name_en: String,
    pub name_de: String,
}

impl Category {
    /// Localized category name.
    #[must_use]
    pub fn name(&self, language: Language) -> &str {
        match language {
            Language::En => &self.name_en,
            Language::De => &self.name_de,
        }
    }
}

/// The other-language version of a post, as far as the site needs it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlternateVersion {
    pub id: Option<DocId>,
    pub slug: Option<String>,
    pub language: Option<Language>,
}

/// Artwork/project post.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Post {
    pub id: Option<DocId>,
    pub title: String,
    pub slug: Option<String>,
    pub language: Language,
    #[serde(deserialize_with = "null_as_default")]
    pub alternate_version: Option<Relation<AlternateVersion>>,
    pub published_date: Option<String>,
    /// Free-text year range, e.g. `2023-2025`.
    pub display_year: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub categories: Vec<Relation<Category>>,
    #[serde(deserialize_with = "lenient_list")]
    pub featured_images: Vec<Relation<Media>>,
    #[serde(deserialize_with = "null_as_default")]
    pub content: RichText,
    #[serde(rename = "_status", deserialize_with = "null_as_default")]
    pub status: Status,
}

impl Post {
    /// Slug of the expanded alternate-language version, if any.
    #[must_use]
    pub fn alternate_slug(&self) -> Option<&str> {
        self.alternate_version
            .as_ref()?
            .expanded()?
            .slug
            .as_deref()
            .filter(|slug| !slug.is_empty())
    }

    /// Expanded categories in stored order.
    pub fn expanded_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter_map(Relation::expanded)
    }

    /// URLs of expanded featured images in stored order.
    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.featured_images
            .iter()
            .filter_map(Relation::expanded)
            .filter_map(Media::url)
    }
}

/// News feed entry.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    pub id: Option<DocId>,
    pub headline: Option<String>,
    /// Legacy title used when no headline is set.
    pub title: Option<String>,
    /// ISO-8601 date.
    pub date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub description: RichText,
    pub language: Language,
    #[serde(rename = "_status", deserialize_with = "null_as_default")]
    pub status: Status,
}

impl NewsItem {
    /// Headline, falling back to the title.
    #[must_use]
    pub fn headline(&self) -> &str {
        self.headline
            .as_deref()
            .filter(|h| !h.is_empty())
            .or(self.title.as_deref())
            .unwrap_or_default()
    }
}

/// Labelled section of an info entry.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InfoSection {
    pub label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub details: RichText,
}

/// Info/FAQ entry.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InfoEntry {
    pub id: Option<DocId>,
    pub title: String,
    #[serde(deserialize_with = "lenient_list")]
    pub sections: Vec<InfoSection>,
    pub language: Language,
    #[serde(rename = "_status", deserialize_with = "null_as_default")]
    pub status: Status,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// List that tolerates `null` and drops entries that do not decode.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: for<'a> Deserialize<'a>,
{
    let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items
        .into_iter()
        .filter_map(|item| T::deserialize(item).ok())
        .collect())
}
