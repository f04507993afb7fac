//! Content model and store abstraction for the portfolio site.
//!
//! This crate provides a [`ContentStore`] trait for querying CMS collections
//! independently of where the content lives. This enables:
//!
//! - **Unit testing** without a running CMS
//! - **Backend flexibility** (JSON files on disk, the CMS REST API)
//! - **Clean separation** between page resolution and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Query`] with equality filters, sort, depth, limit and the draft flag
//! - [`ContentStore`] trait returning raw JSON documents, plus the typed
//!   `find_as` helper on `dyn ContentStore`
//! - Typed documents ([`Post`], [`NewsItem`], [`InfoEntry`], [`Category`])
//! - [`Schema`] and [`Populator`] for relation population
//! - [`FsStore`] for JSON files on disk
//! - [`MockStore`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use folio_content::{Collection, ContentStore, FsStore, Post, Query};
//!
//! let store: Box<dyn ContentStore> = Box::new(FsStore::new("content"));
//! let posts: Vec<Post> = store.find_as(&Query::new(Collection::Posts).limit(100))?;
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod model;
mod populate;
mod query;
mod schema;
mod store;

pub use folio_richtext::Media;
pub use fs::FsStore;
#[cfg(feature = "mock")]
pub use mock::MockStore;
pub use model::{
    AlternateVersion, Category, DocId, InfoEntry, InfoSection, Language, NewsItem, Post, Relation,
    Status,
};
pub use populate::Populator;
pub use query::{Collection, DEFAULT_DEPTH, Filter, Query, STATUS_FIELD, Sort, UnknownCollection};
pub use schema::{BlockSchema, CollectionSchema, Field, FieldKind, Schema};
pub use store::{ContentStore, ErrorStatus, StoreError, StoreErrorKind};
