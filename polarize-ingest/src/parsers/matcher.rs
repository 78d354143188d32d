//! Ordered "first match wins" pattern chains.
//!
//! Each format variant is a (pattern, extractor) pair. A chain tries them in
//! order and stops at the first extractor that returns a value, so new export
//! variants are appended without touching control flow.

use anyhow::{Context, Result};
use regex::{Captures, Regex};

/// Currency prefix as it may appear before any amount: multi-char dollar
/// variants, a three-letter code, or a single symbol character.
pub const CURRENCY_PREFIX: &str = r"(?:HK\$|R\$|C\$|A\$|[A-Z]{3}\s?|[^\d\s+.,:;()])";

/// Digits with optional `.`/`,` grouping and decimals
pub const AMOUNT: &str = r"\d[\d.,]*";

pub type Extractor<T> = fn(&Captures<'_>) -> Option<T>;

pub struct Matcher<T> {
    pub name: &'static str,
    regex: Regex,
    extract: Extractor<T>,
}

impl<T> Matcher<T> {
    pub fn new(name: &'static str, pattern: &str, extract: Extractor<T>) -> Result<Self> {
        let regex = Regex::new(pattern).with_context(|| format!("compiling {name} pattern"))?;
        Ok(Self { name, regex, extract })
    }

    /// First occurrence in `text` the extractor accepts
    pub fn apply(&self, text: &str) -> Option<T> {
        self.regex
            .captures_iter(text)
            .find_map(|caps| (self.extract)(&caps))
    }
}

pub struct MatcherChain<T> {
    label: &'static str,
    matchers: Vec<Matcher<T>>,
}

impl<T> MatcherChain<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            matchers: Vec::new(),
        }
    }

    pub fn with(mut self, name: &'static str, pattern: &str, extract: Extractor<T>) -> Result<Self> {
        self.matchers.push(Matcher::new(name, pattern, extract)?);
        Ok(self)
    }

    /// Run matchers in order; the first hit wins
    pub fn first_match(&self, text: &str) -> Option<T> {
        for m in &self.matchers {
            if let Some(found) = m.apply(text) {
                log::trace!("{} matched by {}", self.label, m.name);
                return Some(found);
            }
        }
        log::trace!("{}: no pattern matched", self.label);
        None
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(caps: &Captures<'_>) -> Option<u32> {
        caps.get(1)?.as_str().parse().ok()
    }

    fn reject(_: &Captures<'_>) -> Option<u32> {
        None
    }

    #[test]
    fn test_first_match_wins() {
        let chain = MatcherChain::new("test")
            .with("strict", r"id=(\d+);", digits)
            .unwrap()
            .with("loose", r"(\d+)", digits)
            .unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.first_match("7 then id=42;"), Some(42));
        assert_eq!(chain.first_match("only 7"), Some(7));
        assert_eq!(chain.first_match("nothing"), None);
    }

    #[test]
    fn test_rejected_extraction_falls_through() {
        let chain = MatcherChain::new("test")
            .with("never", r"(\d+)", reject)
            .unwrap()
            .with("loose", r"(\d+)", digits)
            .unwrap();
        assert_eq!(chain.first_match("5"), Some(5));
    }

    #[test]
    fn test_bad_pattern_is_an_error() {
        assert!(Matcher::new("broken", r"(unclosed", digits).is_err());
    }
}
