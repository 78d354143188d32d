//! Re-entry count phrasing variants.

use anyhow::Result;
use regex::Captures;

use super::matcher::MatcherChain;

fn count(caps: &Captures<'_>) -> Option<u32> {
    caps.name("n")?.as_str().parse().ok()
}

pub struct ReEntryParser {
    chain: MatcherChain<u32>,
}

impl ReEntryParser {
    pub fn new() -> Result<Self> {
        let chain = MatcherChain::new("re-entries")
            .with("made-n", r"(?i)\bmade\s+(?P<n>\d+)\s+re-?entr(?:y|ies)\b", count)?
            .with("n-re-entries", r"(?i)\b(?P<n>\d+)\s+re-?entr(?:y|ies)\b", count)?
            .with("re-entered-n-times", r"(?i)\bre-?entered\s+(?P<n>\d+)\s+times?\b", count)?
            .with("n-times-re-entered", r"(?i)\b(?P<n>\d+)\s+times?\s+re-?entered\b", count)?;
        Ok(Self { chain })
    }

    /// Number of re-entries, `None` when the document never mentions any
    pub fn parse(&self, content: &str) -> Option<u32> {
        self.chain.first_match(content)
    }
}
