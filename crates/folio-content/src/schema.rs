//! Declarative collection schema.
//!
//! Only the shape needed to read content is described: which fields are
//! relations (and to which collection), which hold rich text, and which are
//! arrays of nested fields. In-memory backends use it to populate relations.

use crate::query::Collection;

/// Kind of a schema field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain text.
    Text,
    /// ISO-8601 date.
    Date,
    /// One of a fixed set of values.
    Select(&'static [&'static str]),
    /// Reference to documents of another collection.
    Relationship { to: Collection, has_many: bool },
    /// Reference to upload documents (media).
    Upload { to: Collection, has_many: bool },
    /// Rich-text document.
    RichText,
    /// Repeated group of nested fields.
    Array(Vec<Field>),
}

/// One field of a collection or block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Schema of one collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionSchema {
    pub collection: Collection,
    /// Documents carry a draft/published status.
    pub drafts: bool,
    pub fields: Vec<Field>,
}

/// Schema of a custom rich-text block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockSchema {
    pub block_type: &'static str,
    pub fields: Vec<Field>,
}

/// Full content schema.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    pub collections: Vec<CollectionSchema>,
    pub blocks: Vec<BlockSchema>,
    /// Collection that rich-text upload nodes point at.
    pub upload_collection: Collection,
}

const LANGUAGES: &[&str] = &["en", "de"];
const GRID_COLUMNS: &[&str] = &["2", "3", "4"];

impl Schema {
    /// Schema of the portfolio site.
    #[must_use]
    pub fn portfolio() -> Self {
        let language = || Field::new("language", FieldKind::Select(LANGUAGES)).required();

        Self {
            collections: vec![
                CollectionSchema {
                    collection: Collection::Media,
                    drafts: false,
                    fields: vec![Field::new("alt", FieldKind::Text).required()],
                },
                CollectionSchema {
                    collection: Collection::Categories,
                    drafts: false,
                    fields: vec![
                        Field::new("name_en", FieldKind::Text).required(),
                        Field::new("name_de", FieldKind::Text).required(),
                    ],
                },
                CollectionSchema {
                    collection: Collection::Posts,
                    drafts: true,
                    fields: vec![
                        Field::new("title", FieldKind::Text).required(),
                        Field::new("slug", FieldKind::Text),
                        language(),
                        Field::new(
                            "alternateVersion",
                            FieldKind::Relationship {
                                to: Collection::Posts,
                                has_many: false,
                            },
                        ),
                        Field::new("publishedDate", FieldKind::Date).required(),
                        Field::new("displayYear", FieldKind::Text),
                        Field::new(
                            "categories",
                            FieldKind::Relationship {
                                to: Collection::Categories,
                                has_many: true,
                            },
                        ),
                        Field::new(
                            "featuredImages",
                            FieldKind::Upload {
                                to: Collection::Media,
                                has_many: true,
                            },
                        ),
                        Field::new("content", FieldKind::RichText).required(),
                    ],
                },
                CollectionSchema {
                    collection: Collection::News,
                    drafts: true,
                    fields: vec![
                        Field::new("headline", FieldKind::Text).required(),
                        Field::new("date", FieldKind::Date).required(),
                        Field::new("description", FieldKind::RichText).required(),
                        language(),
                    ],
                },
                CollectionSchema {
                    collection: Collection::Info,
                    drafts: true,
                    fields: vec![
                        Field::new("title", FieldKind::Text).required(),
                        Field::new(
                            "sections",
                            FieldKind::Array(vec![
                                Field::new("label", FieldKind::Text).required(),
                                Field::new("details", FieldKind::RichText).required(),
                            ]),
                        ),
                        language(),
                    ],
                },
            ],
            blocks: vec![BlockSchema {
                block_type: "mediaGrid",
                fields: vec![
                    Field::new("columns", FieldKind::Select(GRID_COLUMNS)),
                    Field::new(
                        "images",
                        FieldKind::Array(vec![
                            Field::new(
                                "image",
                                FieldKind::Upload {
                                    to: Collection::Media,
                                    has_many: false,
                                },
                            )
                            .required(),
                            Field::new("caption", FieldKind::Text),
                        ]),
                    ),
                ],
            }],
            upload_collection: Collection::Media,
        }
    }

    /// Schema for a collection.
    #[must_use]
    pub fn collection(&self, collection: Collection) -> Option<&CollectionSchema> {
        self.collections
            .iter()
            .find(|schema| schema.collection == collection)
    }

    /// Schema for a rich-text block type.
    #[must_use]
    pub fn block(&self, block_type: &str) -> Option<&BlockSchema> {
        self.blocks
            .iter()
            .find(|schema| schema.block_type == block_type)
    }
}
