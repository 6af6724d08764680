//! Recursive search by tag name.

use crate::node::{TagName, TreeNode};

/// Collects every descendant subtree and leaf called `tag`.
///
/// The result is a flat result container: matching subtrees become its
/// subtrees and matching leaves its leaves. Nesting depth and position are
/// not kept. The searched node itself is never part of the result, and
/// synthetic containers never match.
pub fn search(tree: &TreeNode, tag: &str) -> TreeNode {
    let mut result = TreeNode::new(TagName::ResultContainer);
    collect(tree, tag, &mut result);
    result
}

fn collect(tree: &TreeNode, tag: &str, result: &mut TreeNode) {
    for subtree in tree.trees() {
        if subtree.name().matches(tag) {
            result.push_tree(subtree.clone());
        }
        collect(subtree, tag, result);
    }
    for leaf in tree.leaves() {
        if leaf.name() == tag {
            result.push_leaf(leaf.clone());
        }
    }
}

impl TreeNode {
    /// Searches this tree; see [`search`].
    pub fn search(&self, tag: &str) -> TreeNode {
        search(self, tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_str;

    #[test]
    fn test_search_collects_all_depths() {
        let tree = parse_str(
            "<lib><shelf><book>a</book><box><book>b</book><x/></box></shelf><book>c</book></lib>",
        )
        .unwrap();
        let result = tree.search("book");
        assert_eq!(result.name(), &TagName::ResultContainer);
        let values: Vec<&str> = result.leaves().iter().map(|l| l.value()).collect();
        assert_eq!(values, vec!["b", "a", "c"]);
        assert!(result.trees().is_empty());
    }

    #[test]
    fn test_search_matches_subtrees() {
        let tree = parse_str("<r><s><s><i/><j/></s><k/></s></r>").unwrap();
        let result = tree.search("s");
        assert_eq!(result.trees().len(), 2);
        assert_eq!(result.trees()[0].trees().len(), 1);
        assert!(result.leaves().is_empty());
    }

    #[test]
    fn test_search_skips_root_and_containers() {
        let tree = parse_str("<r><a/></r>").unwrap();
        assert!(tree.search("r").is_empty());

        let merged = tree.merge_with(&parse_str("<q><a/></q>").unwrap());
        assert!(merged.search("merge").is_empty());
        assert_eq!(merged.search("a").leaves().len(), 2);
    }
}
