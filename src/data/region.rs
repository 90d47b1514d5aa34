use once_cell::sync::Lazy;
use regex::Regex;

/// Fallback label for records without a usable place name.
pub const UNKNOWN_REGION: &str = "Unknown";

static PARENTHESIZED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("valid parenthesized region regex"));

/// Derive a province name from a free-text location.
///
/// Catalogue locations look like `"BASLAMIS-SINDIRGI (BALIKESIR)"` or
/// `"EGE DENIZI"`. The rules, in order:
/// * text inside the first parentheses, unless it is blank
/// * otherwise, with a `-` present, the first word after the last dash
/// * otherwise the first word
pub fn extract_region(location: &str) -> String {
    if let Some(inner) = PARENTHESIZED_RE
        .captures(location)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
    {
        return inner.to_string();
    }

    let word = if location.contains('-') {
        location.rsplit('-').next().and_then(first_word)
    } else {
        first_word(location)
    };

    word.map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_REGION.to_string())
}

fn first_word(s: &str) -> Option<&str> {
    s.split_whitespace().next()
}
