//! Media references inside rich text.

use serde::Deserialize;
use serde_json::Value;

/// An uploaded asset as delivered by the content store.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Media {
    /// Store-assigned identifier.
    pub id: Option<Value>,
    /// Public URL of the asset.
    pub url: Option<String>,
    /// MIME type reported by the store (e.g., `video/mp4`).
    pub mime_type: Option<String>,
    /// Alternative text.
    pub alt: Option<String>,
    /// Original filename.
    pub filename: Option<String>,
    /// Pixel width (images and videos).
    pub width: Option<u32>,
    /// Pixel height (images and videos).
    pub height: Option<u32>,
}

impl Media {
    /// Non-empty URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// MIME type or an empty string.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        self.mime_type.as_deref().unwrap_or_default()
    }

    /// Alt text or an empty string.
    #[must_use]
    pub fn alt(&self) -> &str {
        self.alt.as_deref().unwrap_or_default()
    }

    /// Presentation kind derived from the MIME type.
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(self.mime_type())
    }
}

/// How a media asset is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    /// Classify by MIME substring. File extensions are never consulted.
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.contains("video") {
            Self::Video
        } else if mime.contains("audio") {
            Self::Audio
        } else {
            Self::Image
        }
    }
}

/// Reference to a media document: either pre-expanded or a bare identifier.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MediaRef {
    /// Expanded media document.
    Resolved(Media),
    /// Unexpanded identifier (or any other unusable value).
    Unresolved(Value),
}

impl Default for MediaRef {
    fn default() -> Self {
        Self::Unresolved(Value::Null)
    }
}

impl MediaRef {
    /// Media with a usable URL, if the reference resolved to one.
    #[must_use]
    pub fn resolve(&self) -> Option<&Media> {
        match self {
            Self::Resolved(media) if media.url().is_some() => Some(media),
            _ => None,
        }
    }
}

/// Display size hint attached to an upload node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadSize {
    Small,
    Medium,
    #[default]
    Full,
}

impl UploadSize {
    /// Parse a size hint, defaulting to full width for anything unrecognized.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("small") => Self::Small,
            Some("medium") => Self::Medium,
            _ => Self::Full,
        }
    }

    /// CSS class for this size.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Small => "size-small",
            Self::Medium => "size-medium",
            Self::Full => "size-full",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(MediaKind::from_mime("image/jpeg"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("audio/mpeg"), MediaKind::Audio);
        assert_eq!(MediaKind::from_mime("Video/QuickTime"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime(""), MediaKind::Image);
    }

    #[test]
    fn test_kind_ignores_extension() {
        let media = Media {
            url: Some("/media/clip.mp4".to_owned()),
            mime_type: Some("image/png".to_owned()),
            ..Media::default()
        };
        assert_eq!(media.kind(), MediaKind::Image);
    }

    #[test]
    fn test_media_ref_resolved() {
        let value = serde_json::json!({"id": 4, "url": "/media/a.jpg", "mimeType": "image/jpeg"});
        let media_ref: MediaRef = serde_json::from_value(value).unwrap();
        let media = media_ref.resolve().unwrap();
        assert_eq!(media.url(), Some("/media/a.jpg"));
        assert_eq!(media.mime_type(), "image/jpeg");
        assert_eq!(media.alt(), "");
    }

    #[test]
    fn test_media_ref_id_is_unresolved() {
        let media_ref: MediaRef = serde_json::from_value(serde_json::json!(12)).unwrap();
        assert!(media_ref.resolve().is_none());
        assert!(matches!(media_ref, MediaRef::Unresolved(_)));
    }

    #[test]
    fn test_media_ref_without_url_is_unresolved() {
        let media_ref: MediaRef =
            serde_json::from_value(serde_json::json!({"id": 1, "url": ""})).unwrap();
        assert!(media_ref.resolve().is_none());
    }

    #[test]
    fn test_upload_size_parse() {
        assert_eq!(UploadSize::parse(Some("small")), UploadSize::Small);
        assert_eq!(UploadSize::parse(Some("medium")), UploadSize::Medium);
        assert_eq!(UploadSize::parse(Some("full")), UploadSize::Full);
        assert_eq!(UploadSize::parse(Some("huge")), UploadSize::Full);
        assert_eq!(UploadSize::parse(None), UploadSize::Full);
    }
}
