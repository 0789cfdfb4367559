//! Selector grammar for nested field selection.
//!
//! A selector is either a bare field name (`"author"`) or a name with a
//! nested sub-field list (`"author{id;name}"`). Sub-names are `;`-separated
//! so that a whole selector list can still be comma-joined into a single
//! string: `"id,author{id;name},title"`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// Matches `name{sub1;sub2}`: everything before the first `{`, then the text
/// strictly inside the outermost braces.
static BRACED_SELECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^{}]*)\{(.+)\}$").expect("braced selector regex"));

/// Result of parsing a list of field selectors.
///
/// `top_level` is deduplicated and its iteration order is not part of the
/// contract. Every key in `nested` is also a member of `top_level`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSelectors {
    /// First-level field names, deduplicated.
    pub top_level: BTreeSet<String>,
    /// Requested sub-field names per top-level field.
    pub nested: BTreeMap<String, Vec<String>>,
}

impl ParsedSelectors {
    /// True when no selectors were given.
    pub fn is_empty(&self) -> bool {
        self.top_level.is_empty()
    }
}

/// Parse a list of selector tokens.
///
/// Tokens are whitespace-trimmed and empty tokens are dropped, so a
/// pre-split comma-joined string can be fed through unchanged. Malformed
/// brace syntax (unbalanced braces, trailing text after `}`) is out of
/// contract; such a token is kept as a bare name and will fail existence
/// validation downstream instead of panicking here.
pub fn parse_selectors<I, S>(selectors: I) -> ParsedSelectors
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedSelectors::default();

    for raw in selectors {
        let token = raw.as_ref().trim();
        if token.is_empty() {
            continue;
        }

        if let Some(caps) = BRACED_SELECTOR.captures(token) {
            let first_level = caps[1].to_string();
            let sub_names: Vec<String> = caps[2]
                .split(';')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            parsed
                .nested
                .insert(first_level.clone(), sub_names);
            parsed.top_level.insert(first_level);
        } else {
            parsed.top_level.insert(token.to_string());
        }
    }

    parsed
}

/// Parse a comma-joined selector string, e.g. `"id,author{id;name}"`.
pub fn parse_selector_list(raw: &str) -> ParsedSelectors {
    parse_selectors(raw.split(','))
}
