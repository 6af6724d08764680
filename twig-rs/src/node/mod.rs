//! Node structures for XML tree representation.
//!
//! A parsed document is a [`TreeNode`] that owns two ordered child lists:
//! leaves (tags without nested tags) and subtrees. There is no shared
//! ownership; each node exclusively owns its children.

mod leaf;
mod tree;

pub use leaf::LeafNode;
pub use tree::{Child, Lookup, TreeNode};

use indexmap::IndexMap;

use crate::constants::{MERGE_TAG, RESULT_TAG};

/// Attribute name to attribute value, in document order.
///
/// Equality ignores order; iteration (and therefore printing) follows
/// insertion order.
pub type AttributeMap = IndexMap<String, String>;

/// The name of a tree node.
///
/// Containers created by operations rather than by parsing carry their own
/// variants so that they can never be confused with a real tag that happens
/// to be called `merge` or `result`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagName {
    /// A tag that appeared in a document or was built by the caller.
    Named(String),
    /// Synthetic container holding trees that could not be merged.
    MergeContainer,
    /// Synthetic container holding search results.
    ResultContainer,
}

impl TagName {
    /// Returns the name as printed in serialized output.
    pub fn as_str(&self) -> &str {
        match self {
            TagName::Named(name) => name,
            TagName::MergeContainer => MERGE_TAG,
            TagName::ResultContainer => RESULT_TAG,
        }
    }

    /// Returns true for merge and result containers.
    pub fn is_synthetic(&self) -> bool {
        !matches!(self, TagName::Named(_))
    }

    /// Returns true if this is a real tag called `name`.
    pub fn matches(&self, name: &str) -> bool {
        matches!(self, TagName::Named(own) if own == name)
    }
}

impl From<&str> for TagName {
    fn from(name: &str) -> Self {
        TagName::Named(name.to_string())
    }
}

impl From<String> for TagName {
    fn from(name: String) -> Self {
        TagName::Named(name)
    }
}

impl std::fmt::Display for TagName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_names_do_not_match_real_tags() {
        assert_eq!(TagName::MergeContainer.as_str(), "merge");
        assert!(!TagName::MergeContainer.matches("merge"));
        assert!(TagName::from("merge").matches("merge"));
        assert_ne!(TagName::from("merge"), TagName::MergeContainer);
    }

    #[test]
    fn test_is_synthetic() {
        assert!(TagName::ResultContainer.is_synthetic());
        assert!(!TagName::from("root").is_synthetic());
    }

    #[test]
    fn test_attribute_map_equality_ignores_order() {
        let mut a = AttributeMap::new();
        a.insert("x".to_string(), "1".to_string());
        a.insert("y".to_string(), "2".to_string());
        let mut b = AttributeMap::new();
        b.insert("y".to_string(), "2".to_string());
        b.insert("x".to_string(), "1".to_string());
        assert_eq!(a, b);
    }
}
