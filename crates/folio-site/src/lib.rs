//! Page resolution and presentation for the portfolio site.
//!
//! A request path is classified into a [`Route`], resolved against a
//! [`ContentStore`](folio_content::ContentStore) into a [`Page`], and rendered
//! into a complete HTML document by [`Site`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use folio_content::FsStore;
//! use folio_site::{Site, SiteConfig, SiteError};
//!
//! let site = Site::new(Arc::new(FsStore::new("content")), SiteConfig::default());
//! match site.render("/de/turnstile", false) {
//!     Ok(page) => println!("{}", page.html),
//!     Err(SiteError::NotFound { language, .. }) => {
//!         println!("{}", site.render_not_found(language).html);
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```

mod filter;
mod i18n;
mod page;
mod preview;
mod route;
mod site;
mod views;

pub use filter::{CATEGORY_PARAM, CategoryFilter};
pub use i18n::{Labels, labels};
pub use page::{Artwork, CategoryOption, HomePage, Page, PageContent};
pub use preview::PreviewError;
pub use route::{Route, RouteKind};
pub use site::{RenderedPage, Site, SiteConfig, SiteError};
