//! Tree nodes: tags with nested child tags.

use super::{AttributeMap, LeafNode, TagName};

/// A tag with nested tags.
///
/// Children are kept in two ordered lists: leaves and subtrees. Their
/// relative interleaving in the source document is not recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    name: TagName,
    attributes: AttributeMap,
    leaves: Vec<LeafNode>,
    trees: Vec<TreeNode>,
}

/// A direct child of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Child<'a> {
    Tree(&'a TreeNode),
    Leaf(&'a LeafNode),
}

/// Result of [`TreeNode::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Tree(&'a TreeNode),
    Leaf(&'a LeafNode),
    Attribute(&'a str),
}

impl TreeNode {
    /// Creates an empty tree node.
    pub fn new(name: impl Into<TagName>) -> Self {
        TreeNode {
            name: name.into(),
            attributes: AttributeMap::new(),
            leaves: Vec::new(),
            trees: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        name: TagName,
        attributes: AttributeMap,
        leaves: Vec<LeafNode>,
        trees: Vec<TreeNode>,
    ) -> Self {
        TreeNode {
            name,
            attributes,
            leaves,
            trees,
        }
    }

    /// Adds an attribute, builder style.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Appends a leaf, builder style.
    pub fn with_leaf(mut self, leaf: LeafNode) -> Self {
        self.leaves.push(leaf);
        self
    }

    /// Appends a subtree, builder style.
    pub fn with_tree(mut self, tree: TreeNode) -> Self {
        self.trees.push(tree);
        self
    }

    /// Returns the tag name.
    pub fn name(&self) -> &TagName {
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

    /// Sets attribute `key`, replacing any previous value in place.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Removes attribute `key`, keeping the order of the others.
    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    /// Returns the child leaves in document order.
    pub fn leaves(&self) -> &[LeafNode] {
        &self.leaves
    }

    /// Returns the child subtrees in document order.
    pub fn trees(&self) -> &[TreeNode] {
        &self.trees
    }

    /// Appends a leaf.
    pub fn push_leaf(&mut self, leaf: LeafNode) {
        self.leaves.push(leaf);
    }

    /// Appends a subtree.
    pub fn push_tree(&mut self, tree: TreeNode) {
        self.trees.push(tree);
    }

    /// True when the node has neither leaves nor subtrees.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty() && self.trees.is_empty()
    }

    /// Returns the value of attribute `key`, if present.
    pub fn find_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Finds the unique direct child called `tag`.
    ///
    /// Subtrees are checked first, then leaves. If the name is shared by
    /// several subtrees (or several leaves) that list does not yield a
    /// match.
    pub fn find_child_by_tag(&self, tag: &str) -> Option<Child<'_>> {
        if let Some(tree) = unique(self.trees.iter().filter(|t| t.name.matches(tag))) {
            return Some(Child::Tree(tree));
        }
        unique(self.leaves.iter().filter(|l| l.name() == tag)).map(Child::Leaf)
    }

    /// Looks `key` up as a unique child tag, falling back to an attribute.
    pub fn lookup(&self, key: &str) -> Option<Lookup<'_>> {
        match self.find_child_by_tag(key) {
            Some(Child::Tree(tree)) => Some(Lookup::Tree(tree)),
            Some(Child::Leaf(leaf)) => Some(Lookup::Leaf(leaf)),
            None => self.find_attribute(key).map(Lookup::Attribute),
        }
    }

    /// Finds the first child leaf called `tag` whose `attribute` equals `value`.
    ///
    /// Comparison goes through [`LeafNode::field`], so an empty `attribute`
    /// compares the leaf value and a missing attribute compares as `""`.
    pub fn find_leaf(&self, tag: &str, attribute: &str, value: &str) -> Option<&LeafNode> {
        self.leaves
            .iter()
            .filter(|leaf| leaf.name() == tag)
            .find(|leaf| leaf.field(attribute) == value)
    }
}

fn unique<T>(mut iter: impl Iterator<Item = T>) -> Option<T> {
    let first = iter.next()?;
    match iter.next() {
        Some(_) => None,
        None => Some(first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TreeNode {
        TreeNode::new("catalog")
            .with_attribute("owner", "ann")
            .with_tree(TreeNode::new("shelf").with_leaf(LeafNode::new("book")))
            .with_tree(TreeNode::new("box").with_leaf(LeafNode::new("cd")))
            .with_tree(TreeNode::new("box").with_leaf(LeafNode::new("cd")))
            .with_leaf(LeafNode::new("item").with_attribute("id", "1"))
            .with_leaf(LeafNode::new("item").with_attribute("id", "2").with_value("hi"))
            .with_leaf(LeafNode::new("note").with_value("fragile"))
    }

    #[test]
    fn test_is_empty() {
        assert!(TreeNode::new("x").with_attribute("a", "1").is_empty());
        assert!(!catalog().is_empty());
    }

    #[test]
    fn test_find_child_by_tag_unique() {
        let tree = catalog();
        assert!(matches!(
            tree.find_child_by_tag("shelf"),
            Some(Child::Tree(t)) if t.name().matches("shelf")
        ));
        assert!(matches!(
            tree.find_child_by_tag("note"),
            Some(Child::Leaf(l)) if l.value() == "fragile"
        ));
    }

    #[test]
    fn test_find_child_by_tag_ambiguous() {
        let tree = catalog();
        assert!(tree.find_child_by_tag("box").is_none());
        assert!(tree.find_child_by_tag("item").is_none());
        assert!(tree.find_child_by_tag("nothing").is_none());
    }

    #[test]
    fn test_lookup_falls_back_to_attribute() {
        let tree = catalog();
        assert_eq!(tree.lookup("owner"), Some(Lookup::Attribute("ann")));
        assert!(matches!(tree.lookup("shelf"), Some(Lookup::Tree(_))));
        assert!(tree.lookup("item").is_none());
    }

    #[test]
    fn test_find_leaf() {
        let tree = catalog();
        let leaf = tree.find_leaf("item", "id", "2").unwrap();
        assert_eq!(leaf.value(), "hi");
        assert!(tree.find_leaf("item", "id", "3").is_none());
        assert_eq!(tree.find_leaf("note", "", "fragile").map(LeafNode::name), Some("note"));
    }

    #[test]
    fn test_synthetic_container_not_found_by_tag() {
        let tree = TreeNode::new("root").with_tree(TreeNode::new(TagName::MergeContainer));
        assert!(tree.find_child_by_tag("merge").is_none());
    }
}
