//! Tag lexer.
//!
//! Scans text for `<...>` tag tokens and splits opening tags into a name
//! and attribute tokens. The lexer knows nothing about nesting; the
//! splitter and parser build structure on top of the token stream.

use std::ops::Range;

use crate::constants::FORMATTING_CHARS;
use crate::error::{Error, Result};
use crate::node::AttributeMap;

/// The lexical kind of a tag token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>`
    Open,
    /// `</name>`
    Close,
    /// `<name .../>`
    SelfClosing,
}

/// A single `<...>` token found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Kind of tag.
    pub kind: TagKind,
    /// Tag name (without `/`).
    pub name: &'a str,
    /// Interior text without the angle brackets and the `/` markers.
    pub body: &'a str,
    /// Byte range of the whole token, brackets included.
    pub span: Range<usize>,
    /// The whole token text, brackets included.
    pub raw: &'a str,
}

impl Tag<'_> {
    /// Returns true for opening and self-closing tags.
    pub fn is_start(&self) -> bool {
        matches!(self.kind, TagKind::Open | TagKind::SelfClosing)
    }
}

/// Iterator over the tag tokens of a string.
///
/// Character data between tags is skipped. A `>` inside a quoted
/// attribute value does not terminate the tag. After an error the
/// iterator is exhausted.
pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `text`.
    pub fn new(text: &'a str) -> Self {
        Lexer { text, pos: 0 }
    }

    /// Byte offset where scanning resumes.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn find_tag_end(&self, open: usize) -> Option<usize> {
        let mut quote: Option<char> = None;
        let mut prev = '<';
        for (i, c) in self.text[open + 1..].char_indices() {
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => {}
                None if (c == '"' || c == '\'') && prev == '=' => quote = Some(c),
                None if c == '>' => return Some(open + 1 + i),
                None => {}
            }
            prev = c;
        }
        None
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Tag<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let open = self.pos + self.text[self.pos..].find('<')?;
        let Some(close) = self.find_tag_end(open) else {
            self.pos = self.text.len();
            return Some(Err(Error::UnterminatedTag { offset: open }));
        };
        self.pos = close + 1;

        let inner = &self.text[open + 1..close];
        let (kind, body) = if let Some(rest) = inner.strip_prefix('/') {
            (TagKind::Close, rest)
        } else if let Some(rest) = inner.trim_end().strip_suffix('/') {
            (TagKind::SelfClosing, rest)
        } else {
            (TagKind::Open, inner)
        };
        let name = body.split(char::is_whitespace).next().unwrap_or_default();

        Some(Ok(Tag {
            kind,
            name,
            body,
            span: open..close + 1,
            raw: &self.text[open..=close],
        }))
    }
}

/// Returns true if `name` is a tag or attribute name this library accepts:
/// a letter or underscore followed by letters, digits or underscores.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Finds the first opening or self-closing tag with a valid name.
pub fn match_opening_tag(text: &str) -> Option<Tag<'_>> {
    Lexer::new(text)
        .map_while(|tag| tag.ok())
        .find(|tag| tag.is_start() && is_valid_name(tag.name))
}

/// Returns true if the first opening tag of `fragment` is self-closing.
pub fn is_self_closing(fragment: &str) -> bool {
    match_opening_tag(fragment).is_some_and(|tag| tag.kind == TagKind::SelfClosing)
}

/// Returns the quote character left open by `token`, if any.
fn unbalanced_quote(token: &str) -> Option<char> {
    let quote = token.chars().find(|c| *c == '"' || *c == '\'')?;
    (token.matches(quote).count() % 2 == 1).then_some(quote)
}

/// Splits an opening tag body into its name and raw `key=value` tokens.
///
/// The body is split on runs of whitespace; a token that opens a quote
/// without closing it is joined (with single spaces) to the following
/// tokens until the same quote character closes.
pub fn split_attributes(body: &str) -> Result<(&str, Vec<String>)> {
    let mut parts = body.split_whitespace();
    let name = parts.next().unwrap_or_default();

    let mut tokens = Vec::new();
    let mut pending: Option<(String, char)> = None;
    for part in parts {
        match pending.take() {
            Some((mut combined, quote)) => {
                combined.push(' ');
                combined.push_str(part);
                if part.matches(quote).count() % 2 == 1 {
                    tokens.push(combined);
                } else {
                    pending = Some((combined, quote));
                }
            }
            None => match unbalanced_quote(part) {
                Some(quote) => pending = Some((part.to_string(), quote)),
                None => tokens.push(part.to_string()),
            },
        }
    }

    if pending.is_some() {
        return Err(Error::MalformedAttributes {
            tag: name.to_string(),
        });
    }
    Ok((name, tokens))
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Builds an attribute map from `key=value` tokens.
///
/// Tokens split on the first `=`; one pair of surrounding quotes is
/// removed from the value. Empty tokens are skipped and a repeated key
/// keeps the last value.
pub fn parse_attribute_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<AttributeMap> {
    let mut attributes = AttributeMap::new();
    for token in tokens {
        let token = token.as_ref();
        if token.is_empty() {
            continue;
        }
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| Error::MissingAttributeValue {
                token: token.to_string(),
            })?;
        attributes.insert(key.to_string(), strip_quotes(value).to_string());
    }
    Ok(attributes)
}

/// Removes `\r`, `\n` and `\t` characters.
pub fn strip_formatting(text: &str) -> String {
    text.chars().filter(|c| !FORMATTING_CHARS.contains(c)).collect()
}

/// Removes every `<?...?>` declaration whose body contains no `?`.
pub fn strip_header(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("<?") {
        let after = &rest[start + 2..];
        match after.find('?') {
            Some(q) if after[q + 1..].starts_with('>') => {
                out.push_str(&rest[..start]);
                rest = &after[q + 2..];
            }
            _ => {
                out.push_str(&rest[..start + 2]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Turns arbitrary text into a value made only of `[A-Za-z0-9_]`.
///
/// Spaces become underscores, everything else outside the set is dropped.
pub fn make_attribute_value_safe(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            ' ' => Some('_'),
            c if c.is_ascii_alphanumeric() || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}
