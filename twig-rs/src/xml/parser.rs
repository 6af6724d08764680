//! Recursive parser that builds [`TreeNode`] trees from text.
//!
//! Parsing works on whole substrings: the root tag is located, its inner
//! content is split into sibling fragments, and each fragment becomes a
//! leaf or is parsed again as a subtree.

use std::fs;
use std::path::Path;

use super::lexer::{
    is_valid_name, match_opening_tag, parse_attribute_tokens, split_attributes,
    strip_formatting, strip_header, Lexer, TagKind,
};
use super::splitter::{check_tree, get_parallel_roots};
use crate::constants::{DEFAULT_MAX_DEPTH, LEAF_MAX_TAG_OPENERS};
use crate::error::{Error, Result};
use crate::node::{LeafNode, TagName, TreeNode};

/// Options controlling [`XmlParser`].
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Maximum element nesting depth before parsing fails.
    pub max_depth: usize,
    /// Remove `<?...?>` declarations before parsing.
    pub strip_header: bool,
    /// Remove `\r`, `\n` and `\t` before parsing.
    pub strip_formatting: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            strip_header: true,
            strip_formatting: true,
        }
    }
}

/// XML parser that builds node trees.
#[derive(Debug, Clone, Default)]
pub struct XmlParser {
    options: ParserOptions,
}

impl XmlParser {
    /// Creates a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given options.
    pub fn with_options(options: ParserOptions) -> Self {
        XmlParser { options }
    }

    /// Returns the parser options.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses a document from a string.
    pub fn parse_str(&self, xml: &str) -> Result<TreeNode> {
        let mut text = xml.to_string();
        if self.options.strip_header {
            text = strip_header(&text);
        }
        if self.options.strip_formatting {
            text = strip_formatting(&text);
        }
        self.parse_tree(&text, 0)
    }

    /// Parses a document from a file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<TreeNode> {
        let xml = fs::read_to_string(path)?;
        self.parse_str(&xml)
    }

    fn parse_tree(&self, xml: &str, depth: usize) -> Result<TreeNode> {
        if depth >= self.options.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        check_tree(xml)?;

        let opening = Lexer::new(xml)
            .map_while(|tag| tag.ok())
            .find(|tag| tag.kind == TagKind::Open && is_valid_name(tag.name))
            .ok_or(Error::CannotIdentifyRoot)?;
        let (name, tokens) = split_attributes(opening.body)?;
        let attributes = parse_attribute_tokens(&tokens)?;
        tracing::debug!(root = name, depth, "identified root tag");

        let xml = narrow_to_single_root(xml, name)?;

        let start = xml
            .find(opening.raw)
            .ok_or(Error::CannotIdentifyRoot)?
            + opening.raw.len();
        let closing = format!("</{}>", name);
        let end = start
            + xml[start..]
                .rfind(&closing)
                .ok_or(Error::CannotIdentifyRoot)?;
        warn_discarded(&xml[..start - opening.raw.len()], name);
        warn_discarded(&xml[end + closing.len()..], name);

        let mut leaves = Vec::new();
        let mut trees = Vec::new();
        for child in get_parallel_roots(&xml[start..end])? {
            let Some(open) = child.find('<') else {
                tracing::warn!(parent = name, text = child, "discarding character data");
                continue;
            };
            if open > 0 {
                tracing::warn!(
                    parent = name,
                    text = &child[..open],
                    "discarding character data"
                );
            }
            let child = &child[open..];
            if child.matches('<').count() <= LEAF_MAX_TAG_OPENERS {
                leaves.push(parse_leaf(child)?);
            } else {
                trees.push(self.parse_tree(child, depth + 1)?);
            }
        }

        Ok(TreeNode::from_parts(
            TagName::Named(name.to_string()),
            attributes,
            leaves,
            trees,
        ))
    }
}

/// Narrows `xml` to its single top-level element when the root name is
/// opened more than once.
///
/// Fails with `UnseparatedChildren` if the splitter finds several
/// top-level elements.
fn narrow_to_single_root<'a>(xml: &'a str, name: &str) -> Result<&'a str> {
    let reopened = Lexer::new(xml)
        .map_while(|tag| tag.ok())
        .filter(|tag| tag.kind == TagKind::Open && tag.name == name)
        .count();
    if reopened <= 1 {
        return Ok(xml);
    }

    let mut elements: Vec<&str> = get_parallel_roots(xml)?
        .into_iter()
        .filter(|fragment| fragment.contains('<'))
        .collect();
    match elements.len() {
        1 => Ok(elements.remove(0)),
        _ => Err(Error::UnseparatedChildren {
            fragments: elements.into_iter().map(str::to_string).collect(),
        }),
    }
}

fn warn_discarded(text: &str, root: &str) {
    if !text.is_empty() {
        tracing::warn!(root, text, "discarding content outside root element");
    }
}

/// Parses a fragment holding exactly one tag into a leaf.
///
/// The value is whatever remains once the opening tag and the matching
/// closing tag are removed; self-closing tags have an empty value.
pub fn parse_leaf(fragment: &str) -> Result<LeafNode> {
    let opening = match_opening_tag(fragment).ok_or(Error::CannotIdentifyRoot)?;
    let (name, tokens) = split_attributes(opening.body)?;
    let attributes = parse_attribute_tokens(&tokens)?;

    let value = match opening.kind {
        TagKind::SelfClosing => String::new(),
        _ => fragment
            .replacen(opening.raw, "", 1)
            .replace(&format!("</{}>", name), ""),
    };
    Ok(LeafNode::from_parts(name.to_string(), attributes, value))
}

/// Parses XML from a string with default options.
pub fn parse_str(xml: &str) -> Result<TreeNode> {
    XmlParser::new().parse_str(xml)
}

/// Parses XML from a file with default options.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<TreeNode> {
    XmlParser::new().parse_file(path)
}
