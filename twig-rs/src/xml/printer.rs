//! XML printer that outputs node trees.
//!
//! Output has one child per line: the opening tag, then every subtree,
//! then every leaf, then the closing tag. Attribute values and text are
//! written verbatim; nothing is escaped.

use std::fmt::{self, Write};
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::node::{AttributeMap, LeafNode, TreeNode};

/// Line terminator placed between printed lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Options for XML printing.
#[derive(Debug, Clone, Default)]
pub struct XmlPrinterOptions {
    /// Indent nested lines with one tab per level.
    ///
    /// Tabs are removed again by formatting stripping, so pretty output
    /// parses back to the same tree.
    pub pretty_print: bool,
    /// Line terminator.
    pub line_ending: LineEnding,
}

/// How [`save_to_file`] treats an existing destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveMode {
    /// Replace an existing file.
    #[default]
    Overwrite,
    /// Fail if the file already exists.
    CreateNew,
}

/// XML printer writing into any [`fmt::Write`] sink.
pub struct XmlPrinter<W: Write> {
    writer: W,
    options: XmlPrinterOptions,
}

impl<W: Write> XmlPrinter<W> {
    /// Creates a new XML printer.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, XmlPrinterOptions::default())
    }

    /// Creates a new XML printer with the given options.
    pub fn with_options(writer: W, options: XmlPrinterOptions) -> Self {
        XmlPrinter { writer, options }
    }

    /// Consumes the printer, returning the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Prints a tree.
    pub fn print_tree(&mut self, tree: &TreeNode) -> fmt::Result {
        self.tree(tree, 0)
    }

    /// Prints a single leaf on one line.
    pub fn print_leaf(&mut self, leaf: &LeafNode) -> fmt::Result {
        self.leaf(leaf)
    }

    fn tree(&mut self, tree: &TreeNode, level: usize) -> fmt::Result {
        let name = tree.name().as_str();
        write!(self.writer, "<{}", name)?;
        self.attributes(tree.attributes())?;
        self.writer.write_char('>')?;

        for child in tree.trees() {
            self.newline(level + 1)?;
            self.tree(child, level + 1)?;
        }
        for leaf in tree.leaves() {
            self.newline(level + 1)?;
            self.leaf(leaf)?;
        }

        self.newline(level)?;
        write!(self.writer, "</{}>", name)
    }

    fn leaf(&mut self, leaf: &LeafNode) -> fmt::Result {
        write!(self.writer, "<{}", leaf.name())?;
        self.attributes(leaf.attributes())?;
        if leaf.value().is_empty() {
            self.writer.write_str("/>")
        } else {
            write!(self.writer, ">{}</{}>", leaf.value(), leaf.name())
        }
    }

    fn attributes(&mut self, attributes: &AttributeMap) -> fmt::Result {
        for (key, value) in attributes {
            write!(self.writer, " {}=\"{}\"", key, value)?;
        }
        Ok(())
    }

    fn newline(&mut self, level: usize) -> fmt::Result {
        self.writer.write_str(self.options.line_ending.as_str())?;
        if self.options.pretty_print {
            for _ in 0..level {
                self.writer.write_char('\t')?;
            }
        }
        Ok(())
    }
}

/// Prints a tree to a string with default options.
pub fn print_to_string(tree: &TreeNode) -> String {
    print_to_string_with(tree, XmlPrinterOptions::default())
}

/// Prints a tree to a string.
pub fn print_to_string_with(tree: &TreeNode, options: XmlPrinterOptions) -> String {
    let mut printer = XmlPrinter::with_options(String::new(), options);
    // Writing into a String cannot fail.
    let _ = printer.print_tree(tree);
    printer.into_inner()
}

/// Writes the printed tree to `path`.
pub fn save_to_file<P: AsRef<Path>>(
    tree: &TreeNode,
    path: P,
    options: XmlPrinterOptions,
    mode: SaveMode,
) -> Result<()> {
    let mut open = OpenOptions::new();
    open.write(true);
    match mode {
        SaveMode::Overwrite => open.create(true).truncate(true),
        SaveMode::CreateNew => open.create_new(true),
    };
    let mut file = open.open(path.as_ref())?;
    file.write_all(print_to_string_with(tree, options).as_bytes())?;
    file.flush()?;
    tracing::debug!(path = %path.as_ref().display(), "saved document");
    Ok(())
}

impl TreeNode {
    /// Serializes the tree with default printer options.
    pub fn to_text(&self) -> String {
        print_to_string(self)
    }

    /// Writes [`TreeNode::to_text`] output to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P, mode: SaveMode) -> Result<()> {
        save_to_file(self, path, XmlPrinterOptions::default(), mode)
    }
}

impl LeafNode {
    /// Serializes the leaf on a single line.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        XmlPrinter::new(f).print_tree(self)
    }
}

impl fmt::Display for LeafNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        XmlPrinter::new(f).print_leaf(self)
    }
}
