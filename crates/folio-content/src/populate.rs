//! Relation population.
//!
//! Replaces relation ids with the referenced documents, following the
//! [`Schema`] down to a depth: depth 1 expands the document's own relations,
//! depth 2 also expands the relations of those documents, and so on. Upload
//! nodes and block payloads inside rich-text fields are expanded the same way.
//! Ids whose target cannot be found are left in place.

use serde_json::Value;

use crate::model::DocId;
use crate::query::Collection;
use crate::schema::{Field, FieldKind, Schema};

/// Expands relations using a lookup function.
pub struct Populator<'a, F> {
    schema: &'a Schema,
    lookup: F,
}

impl<'a, F> Populator<'a, F>
where
    F: FnMut(Collection, &DocId) -> Option<Value>,
{
    /// Create a populator that resolves ids with `lookup`.
    pub fn new(schema: &'a Schema, lookup: F) -> Self {
        Self { schema, lookup }
    }

    /// Populate a document of `collection` to `depth`.
    pub fn populate(&mut self, collection: Collection, doc: &mut Value, depth: u8) {
        if depth == 0 {
            return;
        }
        let schema = self.schema;
        if let Some(collection_schema) = schema.collection(collection) {
            self.fields(&collection_schema.fields, doc, depth);
        }
    }

    fn fields(&mut self, fields: &'a [Field], target: &mut Value, depth: u8) {
        let Some(object) = target.as_object_mut() else {
            return;
        };
        for field in fields {
            let Some(value) = object.get_mut(field.name) else {
                continue;
            };
            match &field.kind {
                FieldKind::Relationship { to, .. } | FieldKind::Upload { to, .. } => match value {
                    Value::Array(items) => {
                        for item in items {
                            self.expand(*to, item, depth);
                        }
                    }
                    single => self.expand(*to, single, depth),
                },
                FieldKind::RichText => self.rich_text(value, depth),
                FieldKind::Array(nested) => {
                    if let Value::Array(items) = value {
                        for item in items {
                            self.fields(nested, item, depth);
                        }
                    }
                }
                FieldKind::Text | FieldKind::Date | FieldKind::Select(_) => {}
            }
        }
    }

    fn expand(&mut self, to: Collection, value: &mut Value, depth: u8) {
        match value {
            Value::Null => {}
            Value::Object(_) => self.populate(to, value, depth - 1),
            _ => {
                let Some(id) = DocId::from_value(value) else {
                    return;
                };
                match (self.lookup)(to, &id) {
                    Some(mut doc) => {
                        self.populate(to, &mut doc, depth - 1);
                        *value = doc;
                    }
                    None => {
                        tracing::debug!(collection = %to, id = %id, "Relation target not found");
                    }
                }
            }
        }
    }

    fn rich_text(&mut self, value: &mut Value, depth: u8) {
        if let Some(root) = value.get_mut("root") {
            self.node(root, depth);
        }
    }

    fn node(&mut self, node: &mut Value, depth: u8) {
        let schema = self.schema;
        let node_type = node.get("type").and_then(Value::as_str);
        let is_upload = node_type == Some("upload");
        let is_block = node_type == Some("block");

        if is_upload {
            let to = node
                .get("relationTo")
                .and_then(Value::as_str)
                .and_then(|slug| slug.parse().ok())
                .unwrap_or(schema.upload_collection);
            if let Some(media) = node.get_mut("value") {
                self.expand(to, media, depth);
            }
        } else if is_block && let Some(fields) = node.get_mut("fields") {
            let block = fields
                .get("blockType")
                .and_then(Value::as_str)
                .and_then(|block_type| schema.block(block_type));
            if let Some(block) = block {
                self.fields(&block.fields, fields, depth);
            }
        }

        if let Some(Value::Array(children)) = node.get_mut("children") {
            for child in children {
                self.node(child, depth);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn fixtures() -> HashMap<(Collection, String), Value> {
        let mut docs = HashMap::new();
        docs.insert(
            (Collection::Categories, "1".to_owned()),
            json!({"id": 1, "name_en": "Video", "name_de": "Video"}),
        );
        docs.insert(
            (Collection::Media, "10".to_owned()),
            json!({"id": 10, "url": "/media/a.jpg", "mimeType": "image/jpeg", "alt": "A"}),
        );
        docs.insert(
            (Collection::Media, "11".to_owned()),
            json!({"id": 11, "url": "/media/b.mp4", "mimeType": "video/mp4", "alt": "B"}),
        );
        docs.insert(
            (Collection::Posts, "2".to_owned()),
            json!({"id": 2, "slug": "datenmeer", "language": "de", "alternateVersion": 1, "categories": [1]}),
        );
        docs
    }

    fn populate(mut doc: Value, depth: u8) -> Value {
        let schema = Schema::portfolio();
        let docs = fixtures();
        let mut populator = Populator::new(&schema, |collection, id: &DocId| {
            docs.get(&(collection, id.as_str().to_owned())).cloned()
        });
        populator.populate(Collection::Posts, &mut doc, depth);
        doc
    }

    #[test]
    fn test_depth_zero_leaves_ids() {
        let doc = json!({"id": 1, "categories": [1], "featuredImages": [10]});
        assert_eq!(populate(doc.clone(), 0), doc);
    }

    #[test]
    fn test_depth_one_expands_direct_relations() {
        let doc = populate(
            json!({"id": 1, "categories": [1], "featuredImages": [10, 99], "alternateVersion": 2}),
            1,
        );
        assert_eq!(doc["categories"][0]["name_en"], "Video");
        assert_eq!(doc["featuredImages"][0]["url"], "/media/a.jpg");
        assert_eq!(doc["featuredImages"][1], 99);
        assert_eq!(doc["alternateVersion"]["slug"], "datenmeer");
        assert_eq!(doc["alternateVersion"]["categories"][0], 1);
    }

    #[test]
    fn test_depth_two_expands_nested_relations() {
        let doc = populate(json!({"id": 1, "alternateVersion": 2}), 2);
        assert_eq!(doc["alternateVersion"]["categories"][0]["name_de"], "Video");
        assert_eq!(doc["alternateVersion"]["alternateVersion"], 1);
    }

    #[test]
    fn test_rich_text_uploads_and_grid_images() {
        let doc = populate(
            json!({
                "id": 1,
                "content": {"root": {"children": [
                    {"type": "upload", "relationTo": "media", "value": 11},
                    {"type": "paragraph", "children": [
                        {"type": "upload", "value": {"id": 10}}
                    ]},
                    {"type": "block", "fields": {
                        "blockType": "mediaGrid",
                        "images": [{"image": 10, "caption": "one"}, {"image": 404}]
                    }}
                ]}}
            }),
            1,
        );
        let children = &doc["content"]["root"]["children"];
        assert_eq!(children[0]["value"]["mimeType"], "video/mp4");
        assert_eq!(children[1]["children"][0]["value"], json!({"id": 10}));
        assert_eq!(children[2]["fields"]["images"][0]["image"]["url"], "/media/a.jpg");
        assert_eq!(children[2]["fields"]["images"][1]["image"], 404);
    }

    #[test]
    fn test_null_relation_untouched() {
        let doc = populate(json!({"alternateVersion": null}), 2);
        assert_eq!(doc["alternateVersion"], Value::Null);
    }
}
