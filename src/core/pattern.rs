//! # Pattern Matching
//!
//! rundev uses two small glob grammars, kept as separate functions so one cannot be
//! used where the other is meant:
//!
//! - **Directory patterns** (global `mappings`): `*` is exactly one path segment,
//!   `**` is any run of characters including separators. The pattern must match the
//!   *tail* of the subject path. A pattern whose first segment is exactly `*` must
//!   also reach the start of the subject, so `*/foo` means "`foo` one level below the
//!   root". `*-api` or `**/foo` stay plain suffix matches.
//! - **Script filters** (`scriptFilter`): `*` is any run of characters and the whole
//!   script name must match.
//!
//! Every other character is literal. A pattern that fails to compile never matches.

use regex::Regex;

const DOUBLE_STAR: &str = "**";
const SEGMENT_RE: &str = "[^/]+";
const ANYTHING_RE: &str = ".*";

/// Escapes the literal parts of `text` and joins them with `replacement` at every `*`.
fn expand_single_stars(text: &str, replacement: &str) -> String {
    text.split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(replacement)
}

/// Translates a directory pattern into its regular-expression source.
pub fn directory_pattern_regex(pattern: &str) -> String {
    // `**` is split out first so its stars are never read as two single segments.
    let body = pattern
        .split(DOUBLE_STAR)
        .map(|part| expand_single_stars(part, SEGMENT_RE))
        .collect::<Vec<_>>()
        .join(ANYTHING_RE);

    // A bare leading `*` segment is only meaningful when counted from the root.
    if pattern.starts_with("*/") {
        format!("^/?{}$", body)
    } else {
        format!("{}$", body)
    }
}

/// Translates a script filter into its regular-expression source.
pub fn script_filter_regex(filter: &str) -> String {
    format!("^{}$", expand_single_stars(filter, ANYTHING_RE))
}

fn compile(source: &str, pattern: &str) -> Option<Regex> {
    match Regex::new(source) {
        Ok(re) => Some(re),
        Err(e) => {
            log::debug!("Pattern '{}' could not be compiled ({}); treating as no match.", pattern, e);
            None
        }
    }
}

/// Compiles a script filter once so it can be applied to many names.
pub fn compile_script_filter(filter: &str) -> Option<Regex> {
    compile(&script_filter_regex(filter), filter)
}

/// Matches a directory pattern against an absolute, `/`-separated path.
pub fn matches_directory(pattern: &str, subject: &str) -> bool {
    compile(&directory_pattern_regex(pattern), pattern).is_some_and(|re| re.is_match(subject))
}

/// Matches a script filter against a single script name.
pub fn matches_script(filter: &str, name: &str) -> bool {
    compile_script_filter(filter).is_some_and(|re| re.is_match(name))
}
