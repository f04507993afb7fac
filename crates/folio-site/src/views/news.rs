//! News feed.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate};
use folio_content::NewsItem;
use folio_richtext::{RichTextRenderer, escape_html};

use super::Fragment;

/// Render news items in the given order.
pub(crate) fn news(items: &[NewsItem], renderer: &RichTextRenderer) -> Fragment {
    let mut fragment = Fragment::default();
    fragment.push(r#"<div class="container"><div class="feed">"#);

    for item in items {
        write!(
            fragment.html,
            r#"<article class="news-item"><div class="row"><div class="content-column"><h2 class="headline">{}</h2><div class="description">"#,
            escape_html(item.headline()),
        )
        .unwrap();
        fragment.rich_text(renderer, &item.description);
        write!(
            fragment.html,
            r#"</div></div><div class="date-side">{}</div></div></article>"#,
            format_date(item.date.as_deref().unwrap_or_default()),
        )
        .unwrap();
    }

    fragment.push("</div></div>");
    fragment
}

/// Format an ISO-8601 date or timestamp as `dd/mm/yyyy`.
///
/// Unparseable input renders as an empty string.
pub(crate) fn format_date(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return timestamp.date_naive().format("%d/%m/%Y").to_string();
    }
    match NaiveDate::parse_from_str(value.get(..10).unwrap_or(value), "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(e) => {
            tracing::debug!(value, error = %e, "Unparseable news date");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-06-01T10:00:00.000Z"), "01/06/2024");
        assert_eq!(format_date("2024-12-24"), "24/12/2024");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("soon"), "");
    }

    #[test]
    fn test_news_items() {
        let items: Vec<NewsItem> = serde_json::from_value(json!([
            {"headline": "Opening", "date": "2024-06-01", "description": {"root": {"children": [
                {"type": "paragraph", "children": [{"type": "text", "text": "Gallery X"}]}
            ]}}},
            {"title": "Legacy title", "date": null}
        ]))
        .unwrap();

        let fragment = news(&items, &RichTextRenderer::new());

        assert!(fragment.html.contains(r#"<h2 class="headline">Opening</h2><div class="description"><p>Gallery X</p></div>"#));
        assert!(fragment.html.contains(r#"<div class="date-side">01/06/2024</div>"#));
        assert!(fragment.html.contains(r#"<h2 class="headline">Legacy title</h2>"#));
        assert!(fragment.html.contains(r#"<div class="date-side"></div>"#));
        let first = fragment.html.find("Opening").unwrap();
        let second = fragment.html.find("Legacy title").unwrap();
        assert!(first < second);
    }
}
