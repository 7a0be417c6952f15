use std::ops::Range;

use regex::Regex;

/// Error type for search patterns. Never fatal: an invalid pattern filters
/// nothing out, and the error is only reported for display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("invalid pattern /{pattern}/: {message}")]
    Invalid { pattern: String, message: String },
}

/// What a compiled pattern tests item names against
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Empty or invalid pattern
    All,
    Regex(Regex),
}

/// A compiled search pattern
#[derive(Debug, Clone)]
pub struct Filter {
    matcher: Matcher,
    error: Option<PatternError>,
}

impl Default for Filter {
    fn default() -> Self {
        Filter {
            matcher: Matcher::All,
            error: None,
        }
    }
}

/// Compile `pattern` into a filter.
///
/// An empty pattern matches everything. An invalid pattern also matches
/// everything, but keeps the error so the prompt can flag it.
pub fn compile(pattern: &str, ignore_case: bool) -> Filter {
    if pattern.is_empty() {
        return Filter::default();
    }
    let source = if ignore_case {
        format!("(?i){}", pattern)
    } else {
        pattern.to_string()
    };
    match Regex::new(&source) {
        Ok(re) => Filter {
            matcher: Matcher::Regex(re),
            error: None,
        },
        Err(e) => Filter {
            matcher: Matcher::All,
            error: Some(PatternError::Invalid {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }),
        },
    }
}

impl Filter {
    pub fn is_match(&self, name: &str) -> bool {
        match &self.matcher {
            Matcher::All => true,
            Matcher::Regex(re) => re.is_match(name),
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// The compiled regex, if the pattern was non-empty and valid
    pub fn regex(&self) -> Option<&Regex> {
        match &self.matcher {
            Matcher::All => None,
            Matcher::Regex(re) => Some(re),
        }
    }

    pub fn error(&self) -> Option<&PatternError> {
        self.error.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Byte ranges in `text` that the pattern matches, for highlighting.
    /// Empty when the filter matches everything.
    pub fn match_ranges(&self, text: &str) -> Vec<Range<usize>> {
        match &self.matcher {
            Matcher::All => Vec::new(),
            Matcher::Regex(re) => re
                .find_iter(text)
                .filter(|m| !m.is_empty())
                .map(|m| m.start()..m.end())
                .collect(),
        }
    }
}
