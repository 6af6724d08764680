//! Structural merge of two trees.
//!
//! Two trees with the same name and no conflicting attribute values are
//! unified into one node. Anything else is collected under a synthetic
//! merge container. The operation is left-biased and not commutative:
//! attribute order and child order follow the left operand.

use crate::node::{TagName, TreeNode};

/// Returns the attribute keys present in both trees with different values.
pub fn conflicting_attributes<'a>(a: &'a TreeNode, b: &TreeNode) -> Vec<&'a str> {
    a.attributes()
        .iter()
        .filter(|(key, value)| b.find_attribute(key).is_some_and(|other| other != *value))
        .map(|(key, _)| key.as_str())
        .collect()
}

/// Returns true if `a` and `b` can be unified into a single node.
pub fn can_merge(a: &TreeNode, b: &TreeNode) -> bool {
    a.name() == b.name() && conflicting_attributes(a, b).is_empty()
}

/// Merges `a` and `b`.
///
/// - Same name, no conflicting attributes: one node with `a`'s attributes
///   followed by the keys only `b` has, and both child lists concatenated.
/// - Otherwise, if either side is a merge container, the other side is
///   appended to a copy of that container's subtrees.
/// - Otherwise a new merge container holds `a` then `b`.
pub fn merge(a: &TreeNode, b: &TreeNode) -> TreeNode {
    if can_merge(a, b) {
        let mut attributes = a.attributes().clone();
        for (key, value) in b.attributes() {
            attributes
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        let leaves = a.leaves().iter().chain(b.leaves()).cloned().collect();
        let trees = a.trees().iter().chain(b.trees()).cloned().collect();
        return TreeNode::from_parts(a.name().clone(), attributes, leaves, trees);
    }

    tracing::debug!(
        left = %a.name(),
        right = %b.name(),
        conflicts = ?conflicting_attributes(a, b),
        "trees not mergeable, using merge container"
    );
    match (a.name(), b.name()) {
        (TagName::MergeContainer, _) => absorb(a, b),
        (_, TagName::MergeContainer) => absorb(b, a),
        _ => TreeNode::new(TagName::MergeContainer)
            .with_tree(a.clone())
            .with_tree(b.clone()),
    }
}

fn absorb(container: &TreeNode, other: &TreeNode) -> TreeNode {
    let mut trees = container.trees().to_vec();
    trees.push(other.clone());
    TreeNode::from_parts(
        TagName::MergeContainer,
        Default::default(),
        container.leaves().to_vec(),
        trees,
    )
}

impl TreeNode {
    /// Merges `other` into a copy of this tree; see [`merge`].
    pub fn merge_with(&self, other: &TreeNode) -> TreeNode {
        merge(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::LeafNode;

    #[test]
    fn test_merge_same_name() {
        let a = TreeNode::new("a")
            .with_attribute("x", "1")
            .with_leaf(LeafNode::new("l1"));
        let b = TreeNode::new("a")
            .with_attribute("y", "2")
            .with_attribute("x", "1")
            .with_leaf(LeafNode::new("l2"))
            .with_tree(TreeNode::new("t"));
        let merged = merge(&a, &b);

        assert!(merged.name().matches("a"));
        let keys: Vec<&str> = merged.attributes().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["x", "y"]);
        let leaves: Vec<&str> = merged.leaves().iter().map(LeafNode::name).collect();
        assert_eq!(leaves, vec!["l1", "l2"]);
        assert_eq!(merged.trees().len(), 1);
    }

    #[test]
    fn test_merge_conflicting_attribute() {
        let a = TreeNode::new("a").with_attribute("x", "1");
        let b = TreeNode::new("a").with_attribute("x", "2");
        assert_eq!(conflicting_attributes(&a, &b), vec!["x"]);

        let merged = merge(&a, &b);
        assert_eq!(merged.name(), &TagName::MergeContainer);
        assert_eq!(merged.trees(), &[a, b][..]);
    }

    #[test]
    fn test_merge_different_names() {
        let a = TreeNode::new("a");
        let b = TreeNode::new("b");
        let merged = a.merge_with(&b);
        assert_eq!(merged.name(), &TagName::MergeContainer);
        assert_eq!(merged.trees().len(), 2);
        assert!(merged.trees()[0].name().matches("a"));
    }

    #[test]
    fn test_merge_absorbs_into_container() {
        let container = merge(&TreeNode::new("a"), &TreeNode::new("b"));
        let c = TreeNode::new("c");

        let left = merge(&container, &c);
        let names: Vec<&str> = left.trees().iter().map(|t| t.name().as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);

        let right = merge(&c, &container);
        let names: Vec<&str> = right.trees().iter().map(|t| t.name().as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_two_containers_concatenates() {
        let left = merge(&TreeNode::new("a"), &TreeNode::new("b"));
        let right = merge(&TreeNode::new("c"), &TreeNode::new("d"));
        let merged = merge(&left, &right);
        assert_eq!(merged.name(), &TagName::MergeContainer);
        assert_eq!(merged.trees().len(), 4);
    }

    #[test]
    fn test_real_merge_tag_is_not_a_container() {
        let real = TreeNode::new("merge").with_tree(TreeNode::new("x"));
        let merged = merge(&real, &TreeNode::new("y"));
        assert_eq!(merged.name(), &TagName::MergeContainer);
        assert_eq!(merged.trees()[0], real);
    }
}
