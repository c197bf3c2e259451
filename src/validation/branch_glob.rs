//! Branch name matching against comma-separated wildcard sets.
//!
//! Only `*` is special: it matches any run of characters, `/` included.
//! Every other character, `?` and `[` among them, matches itself.

use glob::{MatchOptions, Pattern};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Compiled OR-set of anchored branch patterns.
#[derive(Debug, Clone)]
pub struct BranchMatcher {
    source: String,
    patterns: Vec<Pattern>,
}

impl BranchMatcher {
    pub fn new(pattern_set: &str) -> Self {
        let patterns = pattern_set
            .split(',')
            .map(str::trim)
            .filter(|pattern| !pattern.is_empty())
            .filter_map(compile)
            .collect();

        Self {
            source: pattern_set.to_string(),
            patterns,
        }
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_with(candidate, MATCH_OPTIONS))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Escapes everything between the `*` wildcards so the glob engine treats it
/// literally. Runs of `*` collapse to one, since `**` has its own meaning there.
fn compile(pattern: &str) -> Option<Pattern> {
    let mut collapsed = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '*' && collapsed.ends_with('*') {
            continue;
        }
        collapsed.push(c);
    }

    let escaped = collapsed
        .split('*')
        .map(Pattern::escape)
        .collect::<Vec<_>>()
        .join("*");
    Pattern::new(&escaped).ok()
}

pub fn matches(pattern_set: &str, candidate: &str) -> bool {
    BranchMatcher::new(pattern_set).is_match(candidate)
}
