//! Example: Search a document for a tag
//!
//! Parses a file and prints every element with the given tag, collected
//! into a single result container.
//!
//! Usage: cargo run --example search <file.xml> <tag>

use std::env;

use xml_twig::xml::{print_to_string_with, XmlPrinterOptions};
use xml_twig::XmlParser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: {} <file.xml> <tag>", args[0]);
        std::process::exit(1);
    }

    let parser = XmlParser::new();
    eprintln!("Parsing: {}", args[1]);
    let tree = parser.parse_file(&args[1])?;

    let result = tree.search(&args[2]);
    eprintln!(
        "Found {} subtrees and {} leaves",
        result.trees().len(),
        result.leaves().len()
    );

    let options = XmlPrinterOptions {
        pretty_print: true,
        ..Default::default()
    };
    println!("{}", print_to_string_with(&result, options));
    Ok(())
}
