//! Constants used throughout xml-twig.

/// Tag name printed for a synthetic merge container.
pub const MERGE_TAG: &str = "merge";

/// Tag name printed for a synthetic search result container.
pub const RESULT_TAG: &str = "result";

/// Default maximum nesting depth accepted by the parser.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Characters removed by formatting stripping.
pub const FORMATTING_CHARS: [char; 3] = ['\r', '\n', '\t'];

/// Fragments with at most this many `<` characters are parsed as leaves.
pub const LEAF_MAX_TAG_OPENERS: usize = 2;
