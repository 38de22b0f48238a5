use regex::{Regex, Replacer};
use std::fmt;

/// Number of places a pattern matched when exactly one was required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCount(pub usize);

impl MatchCount {
    pub fn is_missing(&self) -> bool {
        self.0 == 0
    }

    pub fn is_ambiguous(&self) -> bool {
        self.0 > 1
    }
}

impl fmt::Display for MatchCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "no match"),
            1 => write!(f, "1 match"),
            n => write!(f, "{} matches", n),
        }
    }
}

/// Replaces the single match of `pattern` in `text`.
///
/// Fails with the observed match count unless the pattern matches exactly
/// once; the input is never partially rewritten.
pub fn replace_exactly_once<R: Replacer>(
    text: &str,
    pattern: &Regex,
    replacement: R,
) -> Result<String, MatchCount> {
    let count = pattern.find_iter(text).count();
    if count != 1 {
        return Err(MatchCount(count));
    }
    Ok(pattern.replacen(text, 1, replacement).into_owned())
}
