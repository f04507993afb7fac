//! Per-element CSS class hooks.
//!
//! Each page styles rich text differently, so the renderer takes a
//! [`ClassNames`] table and attaches the configured class to every element it
//! emits. Elements without an entry are emitted without a class attribute.

use std::collections::BTreeMap;

/// Element kinds the renderer emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    Paragraph,
    Heading,
    Quote,
    List,
    ListItem,
    Link,
    MediaContainer,
    Image,
    Video,
    Audio,
    Grid,
    GridItem,
    Caption,
    Embed,
    Rule,
}

/// Mapping from element kind to CSS class.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassNames {
    classes: BTreeMap<Element, String>,
}

impl ClassNames {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the class for an element.
    #[must_use]
    pub fn with(mut self, element: Element, class: impl Into<String>) -> Self {
        self.classes.insert(element, class.into());
        self
    }

    /// Class for an element, if configured.
    #[must_use]
    pub fn get(&self, element: Element) -> Option<&str> {
        self.classes.get(&element).map(String::as_str)
    }
}
