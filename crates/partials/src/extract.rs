//! Partial reference extraction.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// `{{> name}}` with optional inner whitespace; names use `[A-Za-z0-9/_-]`.
static PARTIAL_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{>\s*([a-zA-Z0-9/_-]+)\s*\}\}").unwrap());

/// Find every distinct partial name referenced in `template`.
///
/// Malformed tokens such as `{{>}}` or `{{> bad.name}}` are skipped without
/// error. Names come back in order of first occurrence.
pub fn extract_partials(template: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for caps in PARTIAL_REF_RE.captures_iter(template) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }

    names
}
