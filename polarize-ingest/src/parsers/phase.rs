//! Category classification: phase markers first, then currency.

use anyhow::{Context, Result};
use regex::Regex;

use polarize_core::{BASE_CURRENCY, Category};

/// Patterns for one phase category: some apply to the title, some to the body
struct PhaseRule {
    category: Category,
    name: Vec<Regex>,
    content: Vec<Regex>,
}

impl PhaseRule {
    fn new(category: Category, name: &[&str], content: &[&str]) -> Result<Self> {
        let compile = |patterns: &[&str]| {
            patterns
                .iter()
                .map(|p| Regex::new(p).with_context(|| format!("compiling phase pattern {p}")))
                .collect::<Result<Vec<_>>>()
        };
        Ok(Self {
            category,
            name: compile(name)?,
            content: compile(content)?,
        })
    }

    fn matches_name(&self, name: &str) -> bool {
        self.name.iter().any(|re| re.is_match(name))
    }

    fn matches_content(&self, content: &str) -> bool {
        self.content.iter().any(|re| re.is_match(content))
    }
}

pub struct PhaseClassifier {
    rules: Vec<PhaseRule>,
}

impl PhaseClassifier {
    pub fn new() -> Result<Self> {
        let rules = vec![
            PhaseRule::new(
                Category::PhaseDay1,
                &[
                    r"(?i)\[\s*Day\s*1[A-Z]?\s*\]",
                    r"(?i)\bPhase\b.*\bDay\s*1[A-Z]?\b",
                    r"(?i)\bDay\s*1[A-Z]?\b",
                    r"(?i)\bPhase\s*#\s*1\b",
                    r"(?i)\bPhase\s*1\b",
                ],
                &[r"(?i)\badvanced\s+to\s+(?:the\s+)?(?:next\s+day|day\s*2)"],
            )?,
            PhaseRule::new(
                Category::PhaseDay2Plus,
                &[
                    r"(?i)\[\s*(?:Day\s*[2-9]|Final\s+Day)\s*\]",
                    r"(?i)\bPhase\b.*\bDay\s*[2-9]\b",
                    r"(?i)\bDay\s*[2-9]\b",
                    r"(?i)\bFinal\s+Day\b",
                    r"(?i)\bPhase\s*#\s*[2-9]\b",
                    r"(?i)\bPhase\s*[2-9]\b",
                ],
                &[
                    r"(?i)\bthis\s+is\s+a\s+day\s*[2-9]\b",
                    r"(?i)\bday\s*[2-9]\s+tournament\b",
                ],
            )?,
        ];
        Ok(Self { rules })
    }

    /// Title markers of every rule are tried before any body phrase, so a
    /// "[Day 2]" leg that mentions advancing stays Day 2. Otherwise currency decides.
    pub fn classify(&self, name: &str, content: &str, currency_code: &str) -> Category {
        let by_name = self.rules.iter().find(|r| r.matches_name(name));
        if let Some(rule) = by_name.or_else(|| self.rules.iter().find(|r| r.matches_content(content))) {
            return rule.category;
        }
        if currency_code != BASE_CURRENCY {
            Category::OtherCurrency
        } else {
            Category::OtherTournaments
        }
    }
}
