//! xml-twig - a minimal XML parser and in-memory tree
//!
//! This library parses small, well-formed-ish XML documents into a
//! navigable tree, answers lookups over that tree, merges and searches
//! trees, and serializes them back to text.
//!
//! # Overview
//!
//! Parsing is lexical rather than grammar driven. The document is scanned
//! for tags, sibling elements are separated by counting open tags per
//! name, and each sibling becomes either a [`LeafNode`] (a tag with no
//! nested tags) or a [`TreeNode`] that is parsed recursively.
//!
//! Out of scope: namespaces, DOCTYPE, CDATA, comments, entity escaping
//! and streaming input. `<?...?>` declarations and `\r`, `\n`, `\t`
//! formatting characters are stripped before parsing.
//!
//! # Example
//!
//! ```
//! use xml_twig::parse_str;
//!
//! let tree = parse_str(r#"<root><item id="1"/><item id="2">hi</item></root>"#).unwrap();
//! assert_eq!(tree.leaves().len(), 2);
//! assert_eq!(tree.find_leaf("item", "id", "2").unwrap().value(), "hi");
//! assert!(tree.lookup("item").is_none());
//! assert_eq!(tree.leaves()[0].to_text(), r#"<item id="1"/>"#);
//! ```

pub mod constants;
pub mod error;
pub mod merge;
pub mod node;
pub mod search;
pub mod xml;

// Re-export commonly used types
pub use constants::*;
pub use error::{Error, Result};
pub use merge::{can_merge, conflicting_attributes, merge};
pub use node::{AttributeMap, Child, LeafNode, Lookup, TagName, TreeNode};
pub use search::search;
pub use xml::{
    check_tree, get_parallel_roots, is_tree, parse_file, parse_str, print_to_string,
    save_to_file, strip_formatting, strip_header, LineEnding, ParserOptions, SaveMode, XmlParser,
    XmlPrinter, XmlPrinterOptions,
};
