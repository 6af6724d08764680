//! Leaf nodes: tags with attributes and a text value but no child tags.

use super::AttributeMap;

/// A tag without nested tags, e.g. `<item id="1"/>` or `<item id="2">hi</item>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeafNode {
    name: String,
    attributes: AttributeMap,
    value: String,
}

impl LeafNode {
    /// Creates an empty leaf called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        LeafNode {
            name: name.into(),
            ..Default::default()
        }
    }

    pub(crate) fn from_parts(name: String, attributes: AttributeMap, value: String) -> Self {
        LeafNode {
            name,
            attributes,
            value,
        }
    }

    /// Adds an attribute, builder style.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Sets the text value, builder style.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Returns the tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attributes.
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// Returns a mutable reference to the attributes.
    pub fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.attributes
    }

    /// Returns the value of attribute `key`, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets attribute `key`, replacing any previous value in place.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Removes attribute `key`, keeping the order of the others.
    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    /// Returns the text value (empty for self-closing tags).
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the text value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Looks up a field by key.
    ///
    /// An empty key yields the text value; otherwise the attribute value,
    /// or `""` when the attribute is absent.
    pub fn field(&self, key: &str) -> &str {
        if key.is_empty() {
            return &self.value;
        }
        self.attribute(key).unwrap_or_default()
    }

    /// True when there are no attributes and no value.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty() && self.value.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lookup() {
        let leaf = LeafNode::new("item").with_attribute("id", "7").with_value("hi");
        assert_eq!(leaf.field(""), "hi");
        assert_eq!(leaf.field("id"), "7");
        assert_eq!(leaf.field("missing"), "");
    }

    #[test]
    fn test_is_empty() {
        assert!(LeafNode::new("x").is_empty());
        assert!(!LeafNode::new("x").with_value("v").is_empty());
        assert!(!LeafNode::new("x").with_attribute("a", "").is_empty());
    }

    #[test]
    fn test_remove_attribute_keeps_order() {
        let mut leaf = LeafNode::new("x")
            .with_attribute("a", "1")
            .with_attribute("b", "2")
            .with_attribute("c", "3");
        assert_eq!(leaf.remove_attribute("a").as_deref(), Some("1"));
        let keys: Vec<&str> = leaf.attributes().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "c"]);
    }
}
