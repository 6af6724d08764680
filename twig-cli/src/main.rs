//! Command line front end for the xml-twig document model.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::error::Error as StdError;
use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use xml_twig::xml::{print_to_string_with, save_to_file, LineEnding, SaveMode, XmlPrinterOptions};
use xml_twig::{get_parallel_roots, merge, parse_file, Error, Lookup, TreeNode};

type CliResult = Result<(), Box<dyn StdError>>;

/// Simple XML tree reader, searcher and merger
#[derive(Parser)]
#[command(name = "twig")]
#[command(version)]
#[command(about = "Read, query and combine simple XML documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct OutputArgs {
    /// Indent nested elements with tabs
    #[arg(short, long, global = true)]
    pretty: bool,

    /// Use CRLF line endings
    #[arg(long, global = true)]
    crlf: bool,

    /// Fail instead of replacing an existing output file
    #[arg(short = 'n', long, global = true)]
    no_clobber: bool,
}

impl OutputArgs {
    fn printer_options(&self) -> XmlPrinterOptions {
        XmlPrinterOptions {
            pretty_print: self.pretty,
            line_ending: if self.crlf {
                LineEnding::CrLf
            } else {
                LineEnding::Lf
            },
        }
    }

    fn save_mode(&self) -> SaveMode {
        if self.no_clobber {
            SaveMode::CreateNew
        } else {
            SaveMode::Overwrite
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a file holds a single well-nested tree
    #[command(visible_alias = "c")]
    Check {
        /// Input file
        file: String,
    },

    /// Parse a file and print it back
    #[command(visible_alias = "p")]
    Print {
        /// Input file
        file: String,
        /// Output file (default: stdout)
        output: Option<String>,
    },

    /// Print the top-level sibling fragments of a file, one per line
    Split {
        /// Input file
        file: String,
    },

    /// Collect every element with the given tag
    #[command(visible_alias = "s")]
    Search {
        /// Input file
        file: String,
        /// Tag name to look for
        tag: String,
        /// Output file (default: stdout)
        output: Option<String>,
    },

    /// Look up a direct child or an attribute of the root element
    Get {
        /// Input file
        file: String,
        /// Child tag or attribute name
        key: String,
    },

    /// Merge two documents
    #[command(visible_alias = "m")]
    Merge {
        /// Left document
        left: String,
        /// Right document
        right: String,
        /// Output file (default: stdout)
        output: Option<String>,
    },
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "twig=info,xml_twig=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let output = &cli.output;

    let result = match cli.command {
        Commands::Check { file } => run_check(&file),
        Commands::Print { file, output: path } => run_print(&file, path.as_deref(), output),
        Commands::Split { file } => run_split(&file),
        Commands::Search {
            file,
            tag,
            output: path,
        } => run_search(&file, &tag, path.as_deref(), output),
        Commands::Get { file, key } => run_get(&file, &key, output),
        Commands::Merge {
            left,
            right,
            output: path,
        } => run_merge(&left, &right, path.as_deref(), output),
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(fragments) = e.downcast_ref::<Error>().and_then(Error::fragments) {
                for (i, fragment) in fragments.iter().enumerate() {
                    eprintln!("  [{}] {}", i, fragment);
                }
            }
            std::process::ExitCode::FAILURE
        }
    }
}

/// Writes `tree` to `path`, or to stdout when no path is given.
fn emit(tree: &TreeNode, path: Option<&str>, args: &OutputArgs) -> CliResult {
    match path {
        Some(path) => {
            save_to_file(tree, path, args.printer_options(), args.save_mode())?;
            tracing::info!(path, "wrote document");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", print_to_string_with(tree, args.printer_options()))?;
        }
    }
    Ok(())
}

fn run_check(path: &str) -> CliResult {
    let tree = parse_file(path)?;
    tracing::info!(
        path,
        trees = tree.trees().len(),
        leaves = tree.leaves().len(),
        "document is a tree"
    );
    println!("{}: ok", path);
    Ok(())
}

fn run_print(path: &str, output: Option<&str>, args: &OutputArgs) -> CliResult {
    let tree = parse_file(path)?;
    emit(&tree, output, args)
}

fn run_split(path: &str) -> CliResult {
    let text = std::fs::read_to_string(path)?;
    let text = xml_twig::strip_formatting(&xml_twig::strip_header(&text));
    let mut stdout = io::stdout().lock();
    for fragment in get_parallel_roots(&text)? {
        writeln!(stdout, "{}", fragment)?;
    }
    Ok(())
}

fn run_search(path: &str, tag: &str, output: Option<&str>, args: &OutputArgs) -> CliResult {
    let tree = parse_file(path)?;
    let result = tree.search(tag);
    tracing::info!(
        tag,
        trees = result.trees().len(),
        leaves = result.leaves().len(),
        "search complete"
    );
    emit(&result, output, args)
}

fn run_get(path: &str, key: &str, args: &OutputArgs) -> CliResult {
    let tree = parse_file(path)?;
    let mut stdout = io::stdout().lock();
    match tree.lookup(key) {
        Some(Lookup::Tree(subtree)) => writeln!(
            stdout,
            "{}",
            print_to_string_with(subtree, args.printer_options())
        )?,
        Some(Lookup::Leaf(leaf)) => writeln!(stdout, "{}", leaf)?,
        Some(Lookup::Attribute(value)) => writeln!(stdout, "{}", value)?,
        None => return Err(format!("no unique child or attribute named '{}'", key).into()),
    }
    Ok(())
}

fn run_merge(left: &str, right: &str, output: Option<&str>, args: &OutputArgs) -> CliResult {
    tracing::info!(path = left, "parsing left document");
    let a = parse_file(left)?;
    tracing::info!(path = right, "parsing right document");
    let b = parse_file(right)?;

    let merged = merge(&a, &b);
    if merged.name().is_synthetic() {
        tracing::warn!("documents could not be unified, wrapped in a merge container");
    }
    emit(&merged, output, args)
}
