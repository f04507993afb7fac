//! Third-party video embed URLs.

/// Rewrite a video page URL into its embeddable player URL.
///
/// - `youtube.com/watch?v=ID` → `youtube.com/embed/ID`
/// - `youtu.be/ID` → `www.youtube.com/embed/ID`
/// - `vimeo.com/ID` → `player.vimeo.com/video/ID` with a minimal player chrome
///
/// Anything else is returned unchanged.
///
/// # Examples
///
/// ```
/// use folio_richtext::embed_url;
///
/// assert_eq!(
///     embed_url("https://www.youtube.com/watch?v=abc123"),
///     "https://www.youtube.com/embed/abc123"
/// );
/// ```
pub fn embed_url(url: &str) -> String {
    let url = url.trim();

    if url.contains("watch?v=") {
        return url.replacen("watch?v=", "embed/", 1);
    }

    let (scheme, rest) = url.split_once("://").unwrap_or(("https", url));

    if let Some(id) = rest.strip_prefix("youtu.be/") {
        let id = id.split(['?', '#']).next().unwrap_or_default();
        return format!("{scheme}://www.youtube.com/embed/{id}");
    }

    let vimeo_path = rest
        .strip_prefix("www.vimeo.com/")
        .or_else(|| rest.strip_prefix("vimeo.com/"));
    if let Some(path) = vimeo_path
        && let Some(id) = vimeo_id(path)
    {
        return format!(
            "https://player.vimeo.com/video/{id}?title=0&byline=0&portrait=0&dnt=1"
        );
    }

    url.to_owned()
}

/// Numeric video id from a vimeo.com path (e.g., `123456` or `channels/staff/123456`).
fn vimeo_id(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next()?;
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .filter(|segment| segment.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_watch() {
        assert_eq!(
            embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_youtube_short_link() {
        assert_eq!(
            embed_url("https://youtu.be/dQw4w9WgXcQ?t=10"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_vimeo() {
        assert_eq!(
            embed_url("https://vimeo.com/76979871"),
            "https://player.vimeo.com/video/76979871?title=0&byline=0&portrait=0&dnt=1"
        );
    }

    #[test]
    fn test_vimeo_channel_path() {
        assert_eq!(
            embed_url("https://vimeo.com/channels/staffpicks/76979871"),
            "https://player.vimeo.com/video/76979871?title=0&byline=0&portrait=0&dnt=1"
        );
    }

    #[test]
    fn test_vimeo_non_video_unchanged() {
        assert_eq!(
            embed_url("https://vimeo.com/about"),
            "https://vimeo.com/about"
        );
    }

    #[test]
    fn test_already_embed_unchanged() {
        assert_eq!(
            embed_url("https://www.youtube.com/embed/abc"),
            "https://www.youtube.com/embed/abc"
        );
        assert_eq!(
            embed_url("https://player.vimeo.com/video/1"),
            "https://player.vimeo.com/video/1"
        );
    }
}
