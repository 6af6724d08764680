//! XML lexing, splitting, parsing and output.
//!
//! Parsing flows one way: text goes through the [`lexer`] into the
//! [`splitter`], and the [`parser`] recursively builds trees from the
//! resulting fragments. The [`printer`] turns trees back into text.

pub mod lexer;
pub mod parser;
pub mod printer;
pub mod splitter;

pub use lexer::{
    is_self_closing, make_attribute_value_safe, match_opening_tag, parse_attribute_tokens,
    split_attributes, strip_formatting, strip_header, Lexer, Tag, TagKind,
};
pub use parser::{parse_file, parse_leaf, parse_str, ParserOptions, XmlParser};
pub use printer::{
    print_to_string, print_to_string_with, save_to_file, LineEnding, SaveMode, XmlPrinter,
    XmlPrinterOptions,
};
pub use splitter::{check_tree, get_parallel_roots, is_tree, OpenTagCounter};
