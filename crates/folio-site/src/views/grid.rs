//! Home grid with the category filter drawer.

use std::fmt::Write;

use folio_content::Language;
use folio_richtext::escape_html;

use crate::filter::CATEGORY_PARAM;
use crate::i18n::labels;
use crate::page::HomePage;
use crate::route::RouteKind;

/// Render the artwork grid.
///
/// The filter drawer is a `<details>` holding one checkbox per category inside
/// a GET form, so applying it reloads the home page with `?category=` ids.
/// The drawer stays open while a selection is active. Each tile lists its
/// category ids in `data-categories`.
pub(crate) fn grid(home: &HomePage, language: Language) -> String {
    let labels = labels(language);
    let home_path = RouteKind::Home.path(language);
    let filtering = home.categories.iter().any(|c| c.selected);
    let mut out = String::new();

    write!(
        out,
        r#"<div class="wrapper"><div class="container"><form class="filters" method="get" action="{}"><details class="drawer"{}><summary class="filter-toggle">{}</summary><div class="drawer-actions"><button type="submit" class="apply-btn">{}</button><a class="clear-btn" href="{}">{}</a></div><div class="checkbox-grid">"#,
        escape_html(&home_path),
        if filtering { " open" } else { "" },
        labels.filters,
        labels.apply,
        escape_html(&home_path),
        labels.clear_all,
    )
    .unwrap();
    for category in &home.categories {
        write!(
            out,
            r#"<label class="label"><input type="checkbox" class="checkbox" name="{CATEGORY_PARAM}" value="{}"{}>{}</label>"#,
            escape_html(&category.id),
            if category.selected { " checked" } else { "" },
            escape_html(&category.name),
        )
        .unwrap();
    }
    out.push_str(r#"</div></details></form><section class="artistic-list">"#);

    for artwork in &home.artworks {
        let href = RouteKind::Detail(artwork.slug.clone()).path(language);
        write!(
            out,
            r#"<a class="project-tile" href="{}" data-categories="{}"><div class="tile-header"><div class="title-info"><h3 class="project-title">{}</h3></div><div class="year-wrapper"><span class="art-year">[{}]</span></div></div><div class="image-strip">"#,
            escape_html(&href),
            escape_html(&artwork.categories.join(" ")),
            escape_html(&artwork.title),
            escape_html(&artwork.display_year),
        )
        .unwrap();
        for url in &artwork.images {
            write!(
                out,
                r#"<div class="img-frame"><img src="{}" alt="" class="gallery-img" loading="lazy"></div>"#,
                escape_html(url)
            )
            .unwrap();
        }
        out.push_str("</div></a>");
    }

    out.push_str("</section></div></div>");
    out
}
