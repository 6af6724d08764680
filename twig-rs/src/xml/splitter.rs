//! Sibling splitting and structural validation.
//!
//! Both operations run the tag stream from the lexer through a per-name
//! open-tag counter. The counter is keyed by tag name, so nested tags with
//! the same name are tracked correctly, and self-closing tags never change
//! nesting depth.

use rustc_hash::FxHashMap;

use super::lexer::{is_valid_name, Lexer, Tag, TagKind};
use crate::error::{Error, Result};

/// Per-tag-name count of currently open elements.
#[derive(Debug, Default)]
pub struct OpenTagCounter<'a> {
    counts: FxHashMap<&'a str, i64>,
}

impl<'a> OpenTagCounter<'a> {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one tag to the counter.
    ///
    /// Opening tags increment, closing tags decrement and self-closing tags
    /// only register their name with a zero count. Closing a name that was
    /// never seen fails with `UnbalancedCloseTag`.
    pub fn record(&mut self, tag: &Tag<'a>) -> Result<()> {
        match tag.kind {
            TagKind::SelfClosing => {
                self.counts.entry(tag.name).or_insert(0);
            }
            TagKind::Open => {
                *self.counts.entry(tag.name).or_insert(0) += 1;
            }
            TagKind::Close => match self.counts.get_mut(tag.name) {
                Some(count) => *count -= 1,
                None => {
                    return Err(Error::UnbalancedCloseTag {
                        tag: tag.name.to_string(),
                    })
                }
            },
        }
        Ok(())
    }

    /// Returns the current count for `name` (zero if untracked).
    pub fn count(&self, name: &str) -> i64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// True when no tag name has a positive pending-open count.
    pub fn is_settled(&self) -> bool {
        self.counts.values().all(|count| *count <= 0)
    }

    /// True when every tracked count is exactly zero.
    pub fn is_balanced(&self) -> bool {
        self.counts.values().all(|count| *count == 0)
    }

    /// Consumes the counter, failing with `IncompleteTree` unless balanced.
    pub fn finish(self) -> Result<()> {
        if self.is_balanced() {
            return Ok(());
        }
        let mut open: Vec<String> = self
            .counts
            .into_iter()
            .filter(|(_, count)| *count != 0)
            .map(|(name, _)| name.to_string())
            .collect();
        open.sort();
        Err(Error::IncompleteTree { open })
    }
}

/// Splits back-to-back sibling fragments into one string per top-level element.
///
/// A fragment ends right after the tag that brings every counter back to
/// zero or below. Character data before an element belongs to that
/// element's fragment; character data after the last element becomes a
/// fragment of its own, so concatenating the result always reproduces
/// `xml`.
pub fn get_parallel_roots(xml: &str) -> Result<Vec<&str>> {
    let mut counter = OpenTagCounter::new();
    let mut roots = Vec::new();
    let mut start = 0;

    for tag in Lexer::new(xml) {
        let tag = tag?;
        tracing::trace!(kind = ?tag.kind, name = tag.name, "scanned tag");
        counter.record(&tag)?;
        if counter.is_settled() {
            roots.push(&xml[start..tag.span.end]);
            start = tag.span.end;
        }
    }
    counter.finish()?;

    if start < xml.len() {
        roots.push(&xml[start..]);
    }
    tracing::debug!(count = roots.len(), "split sibling fragments");
    Ok(roots)
}

/// Checks that `xml` has a root element and balanced tags.
///
/// Fails with `CannotIdentifyRoot` when no opening tag is followed by its
/// own closing tag, and otherwise with the counter errors of a scan that
/// ignores self-closing tags.
pub fn check_tree(xml: &str) -> Result<()> {
    if !has_root_pair(xml) {
        return Err(Error::CannotIdentifyRoot);
    }

    let mut counter = OpenTagCounter::new();
    for tag in Lexer::new(xml) {
        let tag = tag?;
        if tag.kind != TagKind::SelfClosing {
            counter.record(&tag)?;
        }
    }
    counter.finish()
}

/// Returns true if `xml` passes [`check_tree`].
pub fn is_tree(xml: &str) -> bool {
    check_tree(xml).is_ok()
}

fn has_root_pair(xml: &str) -> bool {
    Lexer::new(xml)
        .map_while(|tag| tag.ok())
        .filter(|tag| tag.kind == TagKind::Open && is_valid_name(tag.name))
        .any(|tag| xml[tag.span.end..].contains(&format!("</{}>", tag.name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_roots_simple() {
        let roots = get_parallel_roots(r#"<item id="1"/><item id="2">hi</item>"#).unwrap();
        assert_eq!(roots, vec![r#"<item id="1"/>"#, r#"<item id="2">hi</item>"#]);
    }

    #[test]
    fn test_parallel_roots_nested_same_name() {
        let xml = "<a><a><a/></a></a><b>x</b>";
        let roots = get_parallel_roots(xml).unwrap();
        assert_eq!(roots, vec!["<a><a><a/></a></a>", "<b>x</b>"]);
    }

    #[test]
    fn test_parallel_roots_identical_siblings() {
        let roots = get_parallel_roots("<a></a><a></a>").unwrap();
        assert_eq!(roots, vec!["<a></a>", "<a></a>"]);
    }

    #[test]
    fn test_parallel_roots_character_data() {
        let xml = "lead<a>x</a>tail";
        let roots = get_parallel_roots(xml).unwrap();
        assert_eq!(roots, vec!["lead<a>x</a>", "tail"]);
        assert_eq!(roots.concat(), xml);
    }

    #[test]
    fn test_parallel_roots_empty() {
        assert!(get_parallel_roots("").unwrap().is_empty());
    }

    #[test]
    fn test_parallel_roots_unbalanced_close() {
        let err = get_parallel_roots("<a></a></b>").unwrap_err();
        assert!(matches!(err, Error::UnbalancedCloseTag { tag } if tag == "b"));
    }

    #[test]
    fn test_parallel_roots_incomplete() {
        let err = get_parallel_roots("<a><b></b>").unwrap_err();
        assert!(matches!(err, Error::IncompleteTree { open } if open == vec!["a".to_string()]));
    }

    #[test]
    fn test_counter_self_closing_is_noop() {
        let mut counter = OpenTagCounter::new();
        for tag in Lexer::new("<a><b/>") {
            counter.record(&tag.unwrap()).unwrap();
        }
        assert_eq!(counter.count("a"), 1);
        assert_eq!(counter.count("b"), 0);
        assert!(!counter.is_settled());
    }

    #[test]
    fn test_is_tree() {
        assert!(is_tree(r#"<root><item id="1"/><item id="2">hi</item></root>"#));
        assert!(is_tree("<a><a></a></a>"));
        assert!(!is_tree("<a><b></a>"));
        assert!(!is_tree("<a/>"));
        assert!(!is_tree("no tags"));
    }

    #[test]
    fn test_check_tree_errors() {
        assert!(matches!(
            check_tree("<a><b></a>"),
            Err(Error::IncompleteTree { .. })
        ));
        assert!(matches!(
            check_tree("<a></a></c>"),
            Err(Error::UnbalancedCloseTag { .. })
        ));
        assert!(matches!(check_tree("<a/>"), Err(Error::CannotIdentifyRoot)));
    }
}
