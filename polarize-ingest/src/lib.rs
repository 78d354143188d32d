//! polarize-ingest: tournament summary exports -> normalized tournament facts.

pub mod amount;
pub mod parsers;
pub mod types;

pub use amount::parse_amount;
pub use parsers::summary::SummaryParser;
pub use types::{BuyInLine, Header, Outcome, ParsedSummary};

use polarize_core::TournamentFact;

/// One-shot convenience wrapper. Prefer a long-lived `SummaryParser` for batches.
pub fn parse_tournament_summary(content: &str, filename: &str) -> Option<TournamentFact> {
    match SummaryParser::new() {
        Ok(parser) => parser.parse(content, filename),
        Err(e) => {
            log::error!("building summary parser: {e:#}");
            None
        }
    }
}
