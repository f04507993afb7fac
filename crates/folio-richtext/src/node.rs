//! Rich-text document tree.
//!
//! Documents arrive as JSON trees of `{ "type": ..., "children": [...] }`
//! objects. Every object is decoded into a [`Node`]: known types get their own
//! variant, everything else (including known types whose payload does not
//! decode) becomes [`Node::Unknown`] with the raw payload kept around. Decoding
//! a node therefore never fails.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::format::TextFormat;
use crate::media::{MediaRef, UploadSize};

/// A complete rich-text field.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RichText {
    /// Root container.
    pub root: Root,
}

impl RichText {
    /// Build a document from top-level nodes.
    #[must_use]
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            root: Root { children },
        }
    }

    /// Top-level nodes in stored order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.root.children
    }

    /// Whether the document has no content nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

/// Root node of a rich-text document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Root {
    /// Ordered top-level nodes.
    pub children: Vec<Node>,
}

/// One node of a rich-text tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Literal text with format bits (also used for `tab` nodes).
    Text(TextNode),
    /// Line break.
    LineBreak,
    /// Block paragraph.
    Paragraph(Container),
    /// Heading with its own tag.
    Heading(HeadingNode),
    /// Block quotation.
    Quote(Container),
    /// Ordered or unordered list.
    List(ListNode),
    /// List entry.
    ListItem(Container),
    /// Hyperlink (`link` and `autolink`).
    Link(LinkNode),
    /// Media upload reference.
    Upload(UploadNode),
    /// Custom block with a typed payload.
    Block(BlockNode),
    /// Third-party video embed.
    Embed(EmbedNode),
    /// Divider.
    HorizontalRule,
    /// Unrecognized or malformed node.
    Unknown(UnknownNode),
}

/// Generic container node.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Container {
    pub children: Vec<Node>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextNode {
    pub text: String,
    pub format: TextFormat,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeadingNode {
    /// Heading element name, e.g. `h2`.
    pub tag: Option<String>,
    pub children: Vec<Node>,
}

impl HeadingNode {
    /// Tag to render with: the node's own `h1`–`h6`, or `h2`.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self.tag.as_deref() {
            Some(tag @ ("h1" | "h2" | "h3" | "h4" | "h5" | "h6")) => tag,
            _ => "h2",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListNode {
    /// `number`, `bullet` or `check`.
    pub list_type: Option<String>,
    /// `ol` or `ul`.
    pub tag: Option<String>,
    pub children: Vec<Node>,
}

impl ListNode {
    /// Whether the list renders as an ordered list.
    ///
    /// `listType` wins when present; otherwise the `tag` decides.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        match self.list_type.as_deref() {
            Some(list_type) => list_type == "number",
            None => self.tag.as_deref() == Some("ol"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkFields {
    pub url: Option<String>,
    pub new_tab: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinkNode {
    pub fields: LinkFields,
    /// Top-level URL used by some schema variants.
    pub url: Option<String>,
    pub children: Vec<Node>,
}

impl LinkNode {
    /// Destination: `fields.url` first, then the top-level `url`.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        non_empty(self.fields.url.as_deref()).or_else(|| non_empty(self.url.as_deref()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UploadFields {
    pub size: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UploadNode {
    pub relation_to: Option<String>,
    pub value: MediaRef,
    #[serde(deserialize_with = "null_as_default")]
    pub fields: UploadFields,
}

impl UploadNode {
    /// Size hint, defaulting to full width.
    #[must_use]
    pub fn size(&self) -> UploadSize {
        UploadSize::parse(self.fields.size.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BlockNode {
    /// Block payload, including its `blockType` discriminator.
    pub fields: Value,
}

impl BlockNode {
    /// Block type discriminator (e.g., `mediaGrid`).
    #[must_use]
    pub fn block_type(&self) -> Option<&str> {
        self.fields.get("blockType").and_then(Value::as_str)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmbedFields {
    pub url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EmbedNode {
    #[serde(deserialize_with = "null_as_default")]
    pub fields: EmbedFields,
    pub url: Option<String>,
}

impl EmbedNode {
    /// Source URL: `fields.url` first, then the top-level `url`.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        non_empty(self.fields.url.as_deref()).or_else(|| non_empty(self.url.as_deref()))
    }
}

/// Node whose type has no converter, or whose payload did not decode.
#[derive(Clone, Debug, PartialEq)]
pub struct UnknownNode {
    /// Raw `type` value (empty if missing).
    pub node_type: String,
    /// Children, if the payload had any.
    pub children: Vec<Node>,
    /// Text, if the payload had any.
    pub text: Option<String>,
    /// Original payload.
    pub raw: Value,
}

impl Node {
    /// Decode a JSON value into a node.
    ///
    /// Never fails: unrecognized types and malformed payloads become
    /// [`Node::Unknown`].
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let node_type = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        let decoded = match node_type.as_str() {
            "text" | "tab" => decode(&value).map(Self::Text),
            "linebreak" => Ok(Self::LineBreak),
            "paragraph" => decode(&value).map(Self::Paragraph),
            "heading" => decode(&value).map(Self::Heading),
            "quote" => decode(&value).map(Self::Quote),
            "list" => decode(&value).map(Self::List),
            "listitem" => decode(&value).map(Self::ListItem),
            "link" | "autolink" => decode(&value).map(Self::Link),
            "upload" => decode(&value).map(Self::Upload),
            "block" => decode(&value).map(Self::Block),
            "embed" => decode(&value).map(Self::Embed),
            "horizontalrule" => Ok(Self::HorizontalRule),
            _ => return Self::unknown(node_type, value),
        };

        decoded.unwrap_or_else(|e| {
            tracing::debug!(node_type = %node_type, error = %e, "Malformed rich-text node");
            Self::unknown(node_type, value)
        })
    }

    /// Build a text node.
    #[must_use]
    pub fn text(text: impl Into<String>, format: impl Into<TextFormat>) -> Self {
        Self::Text(TextNode {
            text: text.into(),
            format: format.into(),
        })
    }

    /// Type discriminator as it appears in stored documents.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Text(_) => "text",
            Self::LineBreak => "linebreak",
            Self::Paragraph(_) => "paragraph",
            Self::Heading(_) => "heading",
            Self::Quote(_) => "quote",
            Self::List(_) => "list",
            Self::ListItem(_) => "listitem",
            Self::Link(_) => "link",
            Self::Upload(_) => "upload",
            Self::Block(_) => "block",
            Self::Embed(_) => "embed",
            Self::HorizontalRule => "horizontalrule",
            Self::Unknown(node) => &node.node_type,
        }
    }

    fn unknown(node_type: String, value: Value) -> Self {
        let children = value
            .get("children")
            .and_then(Value::as_array)
            .map(|children| children.iter().cloned().map(Self::from_value).collect())
            .unwrap_or_default();
        let text = value.get("text").and_then(Value::as_str).map(str::to_owned);
        Self::Unknown(UnknownNode {
            node_type,
            children,
            text,
            raw: value,
        })
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

fn decode<T: for<'de> Deserialize<'de>>(value: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(value)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
