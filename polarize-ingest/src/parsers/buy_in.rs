//! "Buy-in:" line: main + fee [+ bounty], each optionally prefixed by a currency.

use anyhow::Result;
use regex::Captures;

use super::matcher::{AMOUNT, CURRENCY_PREFIX, MatcherChain};
use crate::amount::parse_amount;
use crate::types::BuyInLine;

fn amount(caps: &Captures<'_>, group: &str) -> Option<f64> {
    caps.name(group).and_then(|m| parse_amount(m.as_str()))
}

fn extract(caps: &Captures<'_>) -> Option<BuyInLine> {
    let main = amount(caps, "main")?;
    let fee = match caps.name("fee") {
        Some(m) => parse_amount(m.as_str())?,
        None => 0.0,
    };
    let bounty = match caps.name("bounty") {
        Some(m) => parse_amount(m.as_str())?,
        None => 0.0,
    };
    let raw = caps
        .name("raw")
        .map(|m| m.as_str().trim().trim_end_matches(['.', ',']).to_string())
        .unwrap_or_default();
    Some(BuyInLine {
        prefix: caps
            .name("cur")
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default(),
        main,
        fee,
        bounty,
        raw,
    })
}

pub struct BuyInParser {
    chain: MatcherChain<BuyInLine>,
}

impl BuyInParser {
    pub fn new() -> Result<Self> {
        let label = r"(?i:buy-?in)[ \t]*:[ \t]*";
        let first = format!(r"(?P<cur>{CURRENCY_PREFIX})?[ \t]*(?P<main>{AMOUNT})");
        let part = |group: &str| format!(r"[ \t]*\+[ \t]*{CURRENCY_PREFIX}?[ \t]*(?P<{group}>{AMOUNT})");

        let chain = MatcherChain::new("buy-in")
            // Buy-in: $25.6+$4.4+$25
            .with(
                "main-fee-bounty",
                &format!(r"{label}(?P<raw>{first}{}{})", part("fee"), part("bounty")),
                extract,
            )?
            // Buy-in: €50,00+€5,00
            .with(
                "main-fee",
                &format!(r"{label}(?P<raw>{first}{})", part("fee")),
                extract,
            )?
            // Buy-In: $55
            .with("single", &format!(r"{label}(?P<raw>{first})"), extract)?;

        Ok(Self { chain })
    }

    pub fn parse(&self, content: &str) -> Option<BuyInLine> {
        self.chain.first_match(content)
    }
}
