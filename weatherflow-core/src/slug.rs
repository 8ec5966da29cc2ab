//! Place name to URL slug conversion.

use regex::Regex;
use std::sync::LazyLock;

/// Whitespace as browsers define it for `\s` and `trim`: U+FEFF counts, U+0085 does not.
const WHITESPACE: &str = r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static RE_EDGE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^[{WHITESPACE}]+|[{WHITESPACE}]+$")).expect("valid slug regex")
});
static RE_DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("[^a-z0-9{WHITESPACE}-]")).expect("valid slug regex")
});
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("[{WHITESPACE}]+")).expect("valid slug regex"));
static RE_HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("valid slug regex"));

/// Converts a free-text place name into a URL path segment.
///
/// The result is either empty or matches `^[a-z0-9]+(-[a-z0-9]+)*$`, and
/// `slugify(&slugify(s)) == slugify(s)` holds for every input.
///
/// ```
/// use weatherflow_core::slugify;
///
/// assert_eq!(slugify("  St. Louis, MO "), "st-louis-mo");
/// assert_eq!(slugify("O'Brien's Town"), "obriens-town");
/// ```
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    let trimmed = RE_EDGE_WHITESPACE.replace_all(&lower, "");
    let cleaned = RE_DISALLOWED.replace_all(&trimmed, "");
    let hyphenated = RE_WHITESPACE.replace_all(&cleaned, "-");
    let collapsed = RE_HYPHENS.replace_all(&hyphenated, "-");

    collapsed.trim_matches('-').to_string()
}

/// Best-effort display name for a slug: hyphens become spaces and each word
/// is capitalised. This is cosmetic only and does not invert [`slugify`].
pub fn deslugify(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
