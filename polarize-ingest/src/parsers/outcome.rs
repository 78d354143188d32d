//! Result line variants, most explicit first.

use anyhow::Result;
use regex::Captures;

use super::matcher::{AMOUNT, CURRENCY_PREFIX, MatcherChain};
use crate::amount::parse_amount;
use crate::types::Outcome;

fn amount(caps: &Captures<'_>) -> Option<f64> {
    parse_amount(caps.name("amount")?.as_str())
}

fn received(caps: &Captures<'_>) -> Option<Outcome> {
    amount(caps).map(Outcome::Received)
}

fn lost(caps: &Captures<'_>) -> Option<Outcome> {
    amount(caps).map(Outcome::Lost)
}

pub struct OutcomeParser {
    chain: MatcherChain<Outcome>,
}

impl OutcomeParser {
    pub fn new() -> Result<Self> {
        let money = format!(r"{CURRENCY_PREFIX}?[ \t]*(?P<amount>{AMOUNT})");
        let chain = MatcherChain::new("result")
            // You received a total of $113.44.
            .with(
                "received-total",
                &format!(r"(?i:received\s+a\s+total\s+of)\s*{money}"),
                received,
            )?
            // You made 2 re-entries and lost a total of $60.00.
            .with(
                "lost-total",
                &format!(r"(?i:lost\s+a\s+total\s+of)\s*{money}"),
                lost,
            )?
            // 3rd : Hero, $113.44
            .with(
                "position",
                &format!(r"(?m)^[ \t]*\d+(?i:st|nd|rd|th)[ \t]*:[ \t]*[^,\r\n]+,[ \t]*{money}"),
                received,
            )?
            // You won $40; a bare number ("won 3 bounties") is not money
            .with(
                "won",
                &format!(r"(?i:\bwon)[ \t]+{CURRENCY_PREFIX}[ \t]*(?P<amount>{AMOUNT})"),
                received,
            )?
            // Won: $40 / Profit: $40 / Finished: $40
            .with(
                "label-won",
                &format!(r"(?i:\b(?:won|profit|finished))[ \t]*:[ \t]*{money}"),
                received,
            )?
            // Lost: $55
            .with("label-lost", &format!(r"(?i:\blost)[ \t]*:[ \t]*{money}"), lost)?;
        Ok(Self { chain })
    }

    /// Stated outcome, `None` when the document carries no amount at all
    pub fn parse(&self, content: &str) -> Option<Outcome> {
        self.chain.first_match(content)
    }
}
