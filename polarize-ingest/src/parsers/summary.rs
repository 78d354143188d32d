//! Tournament summary parser.
//!
//! Expected export text:
//!   Tournament #187665934, Phase-M: $55 Global World Festival [Day 2], Hold'em No Limit
//!   Buy-in: $50.6+$4.4
//!   1352 Players
//!   Total Prize Pool: $74,360.00
//!   Tournament started 2025/05/12 18:00:00
//!   7th : Hero, $113.44
//!   You finished the tournament in 7th place.
//!   You received a total of $113.44.

use anyhow::Result;
use chrono::NaiveDateTime;
use regex::Regex;

use polarize_core::currency::{self, SymbolTable};
use polarize_core::{BASE_CURRENCY, Category, TournamentFact};

use super::buy_in::BuyInParser;
use super::entries::ReEntryParser;
use super::header::HeaderParser;
use super::outcome::OutcomeParser;
use super::phase::PhaseClassifier;
use crate::types::ParsedSummary;

pub struct SummaryParser {
    header: HeaderParser,
    buy_in: BuyInParser,
    re_entries: ReEntryParser,
    outcome: OutcomeParser,
    phases: PhaseClassifier,
    started: Regex,
    players: Regex,
    symbols: SymbolTable,
}

impl SummaryParser {
    pub fn new() -> Result<Self> {
        Self::with_symbols(currency::SYMBOLS)
    }

    /// Parser using a custom symbol -> currency code table
    pub fn with_symbols(symbols: SymbolTable) -> Result<Self> {
        Ok(Self {
            header: HeaderParser::new()?,
            buy_in: BuyInParser::new()?,
            re_entries: ReEntryParser::new()?,
            outcome: OutcomeParser::new()?,
            phases: PhaseClassifier::new()?,
            started: Regex::new(
                r"(?i)Tournament\s+started\s+(\d{4}/\d{1,2}/\d{1,2}\s+\d{1,2}:\d{2}:\d{2})",
            )?,
            players: Regex::new(r"(?im)^[ \t]*(\d[\d,.]*)[ \t]+Players\b")?,
            symbols,
        })
    }

    /// Extract the raw fields. `None` when the header or the buy-in is missing.
    pub fn extract(&self, content: &str) -> Option<ParsedSummary> {
        let header = self.header.parse(content)?;
        let buy_in = self.buy_in.parse(content)?;
        Some(ParsedSummary {
            header,
            buy_in,
            re_entries: self.re_entries.parse(content),
            outcome: self.outcome.parse(content),
            started_at: self
                .started
                .captures(content)
                .and_then(|c| NaiveDateTime::parse_from_str(&c[1], "%Y/%m/%d %H:%M:%S").ok()),
            players: self
                .players
                .captures(content)
                .and_then(|c| c[1].replace([',', '.'], "").parse().ok()),
        })
    }

    /// Parse one document. Unrecognized text yields `None`, never an error.
    pub fn parse(&self, content: &str, filename: &str) -> Option<TournamentFact> {
        let Some(parsed) = self.extract(content) else {
            log::debug!("{filename}: not a recognizable tournament summary");
            return None;
        };
        let Some(fact) = self.normalize(parsed, content, filename) else {
            log::debug!("{filename}: re-entry count out of range");
            return None;
        };
        log::debug!(
            "parsed {}: {} [{}] buy-in {:.2} {}",
            filename,
            fact.name,
            fact.category,
            fact.buy_in,
            fact.currency_code
        );
        Some(fact)
    }

    /// Fill every derived field exactly once. `None` when the entry count overflows.
    fn normalize(&self, parsed: ParsedSummary, content: &str, filename: &str) -> Option<TournamentFact> {
        let ParsedSummary {
            header,
            buy_in,
            re_entries,
            outcome,
            started_at,
            players,
        } = parsed;

        let currency_code = currency::code_for_prefix(&buy_in.prefix, self.symbols);
        let is_usd = currency_code == BASE_CURRENCY;
        let category = self.phases.classify(&header.name, content, &currency_code);

        let single = buy_in.total();
        let re_entries = re_entries.unwrap_or(0);
        let total_entries = re_entries.checked_add(1)?;
        let stake = single * f64::from(total_entries);

        let stated = outcome.map(|o| o.signed()).unwrap_or(-stake);
        let (result, total_buy_in) = match category {
            Category::PhaseDay1 => (-stake, stake),
            Category::PhaseDay2Plus => (stated.max(0.0), 0.0),
            Category::OtherCurrency | Category::OtherTournaments => (stated, stake),
        };

        Some(TournamentFact {
            name: header.name,
            tournament_id: header.tournament_id,
            game_type: header.game_type,
            started_at,
            players,
            category,
            buy_in: single,
            buy_in_original: (!is_usd).then_some(buy_in.raw),
            re_entries,
            total_entries,
            total_buy_in,
            result,
            conversion_rate: if is_usd { 1.0 } else { 0.0 },
            currency_code,
            normal_deal: 0.0,
            automatic_sale: 0.0,
            original_filename: Some(filename.to_string()).filter(|f| !f.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DAY_TWO: &str = "Tournament #187665935, Phase-M: $55 Global World Festival [Day 2], Hold'em No Limit
Buy-in: $50.6+$4.4
1352 Players
Total Prize Pool: $74,360.00
Tournament started 2025/05/12 18:00:00
7th : Hero, $113.44
You finished the tournament in 7th place.
You received a total of $113.44.
";

    fn parser() -> SummaryParser {
        SummaryParser::new().unwrap()
    }

    #[test]
    fn test_parses_day_two() {
        let fact = parser().parse(DAY_TWO, "GG20250512_phase_day2.txt").unwrap();
        assert_eq!(fact.tournament_id.as_deref(), Some("187665935"));
        assert_eq!(fact.category, Category::PhaseDay2Plus);
        assert!((fact.buy_in - 55.0).abs() < 1e-9);
        assert_eq!(fact.total_buy_in, 0.0);
        assert!((fact.result - 113.44).abs() < 1e-9);
        assert_eq!(fact.players, Some(1352));
        assert_eq!(
            fact.started_at.map(|d| d.to_string()).as_deref(),
            Some("2025-05-12 18:00:00")
        );
        assert_eq!(fact.original_filename.as_deref(), Some("GG20250512_phase_day2.txt"));
        assert_eq!(fact.normal_deal, 0.0);
        assert_eq!(fact.automatic_sale, 0.0);
    }

    #[test]
    fn test_day_two_loss_is_clamped() {
        let text = "Tournament #5, Festival [Day 2], Hold'em No Limit\nBuy-in: $50+$5\nLost: $55\n";
        let fact = parser().parse(text, "d2.txt").unwrap();
        assert_eq!(fact.result, 0.0);
    }

    #[test]
    fn test_day_one_is_always_a_loss() {
        let text = "Tournament #6, Festival [Day 1], Hold'em No Limit
Buy-in: $50+$5
12th : Hero, $0 Entry
You finished the tournament in 12th place.
You made 1 re-entry and have advanced to Day2 with 24000 chips.
";
        let fact = parser().parse(text, "d1.txt").unwrap();
        assert_eq!(fact.category, Category::PhaseDay1);
        assert_eq!(fact.total_entries, 2);
        assert!((fact.total_buy_in - 110.0).abs() < 1e-9);
        assert!((fact.result + 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_result_is_full_loss() {
        let text = "Tournament #7, Sunday Big $20, Hold'em No Limit
Buy-in: $18.4+$1.6
You finished the tournament in 300th place.
You made 3 re-entries.
";
        let fact = parser().parse(text, "loss.txt").unwrap();
        assert_eq!(fact.category, Category::OtherTournaments);
        assert_eq!(fact.re_entries, 3);
        assert!((fact.total_buy_in - 80.0).abs() < 1e-9);
        assert!((fact.result + 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_other_currency_is_pending_until_converted() {
        let text = "Tournament #8, Zodiac Dog Ultra Deepstack 7-Max ¥110 [Turbo], Hold'em No Limit
Buy-in: ¥100+¥10
12th : Hero, ¥302.90
You received a total of ¥302.90.
";
        let fact = parser().parse(text, "cny.txt").unwrap();
        assert_eq!(fact.category, Category::OtherCurrency);
        assert_eq!(fact.currency_code, "CNY");
        assert_eq!(fact.conversion_rate, 0.0);
        assert!(fact.conversion_pending());
        assert_eq!(fact.buy_in_original.as_deref(), Some("¥100+¥10"));
        assert!((fact.result - 302.9).abs() < 1e-9);
    }

    #[test]
    fn test_custom_symbol_table() {
        let parser = SummaryParser::with_symbols(&[("¥", "JPY")]).unwrap();
        let fact = parser
            .parse("Tournament #9, Tokyo Nights, Hold'em No Limit\nBuy-in: ¥1000+¥100\n", "jpy.txt")
            .unwrap();
        assert_eq!(fact.currency_code, "JPY");
    }

    #[test]
    fn test_unrecognized_documents() {
        let p = parser();
        assert!(p.parse("", "empty.txt").is_none());
        assert!(p.parse("Hand #1: Hold'em No Limit ($0.01/$0.02)", "hand.txt").is_none());
        assert!(p.parse("Tournament #10, No Buy In, Hold'em No Limit\n", "x.txt").is_none());
    }

    #[test]
    fn test_absurd_re_entry_count_is_rejected() {
        let text = "Tournament #1, Sunday Big, Hold'em No Limit\nBuy-in: $10+$1\nYou made 4294967295 re-entries.\n";
        assert!(parser().parse(text, "x.txt").is_none());

        let text = "Tournament #1, Sunday Big, Hold'em No Limit\nBuy-in: $10+$1\nYou made 4294967294 re-entries.\n";
        let fact = parser().parse(text, "x.txt").unwrap();
        assert_eq!(fact.total_entries, u32::MAX);
    }

    #[test]
    fn test_day_two_name_beats_advancement_text() {
        let text = "Tournament #11, Festival [Day 2], Hold'em No Limit
Buy-in: $50+$5
You have advanced to the next day with 80000 chips.
";
        let fact = parser().parse(text, "d2.txt").unwrap();
        assert_eq!(fact.category, Category::PhaseDay2Plus);
        assert_eq!(fact.total_buy_in, 0.0);
        assert!(fact.result >= 0.0);
    }

    #[rstest]
    #[case("$", "USD", "18.40", "1.60", "You made 3 re-entries and received a total of $32.70.", 3)]
    #[case("€", "EUR", "50,00", "5,00", "You re-entered 2 times.", 2)]
    #[case("£", "GBP", "30.00", "3.00", "1 re-entry", 1)]
    #[case("R$", "BRL", "100,00", "10,00", "4 times re-entered", 4)]
    #[case("C$", "CAD", "20.00", "2.00", "", 0)]
    #[case("¥", "CNY", "100", "10", "You made 10 re-entries and lost a total of ¥1210.", 10)]
    fn test_entries_always_follow_re_entries(
        #[case] symbol: &str,
        #[case] code: &str,
        #[case] main: &str,
        #[case] fee: &str,
        #[case] re_entry_line: &str,
        #[case] expected: u32,
    ) {
        let text = format!(
            "Tournament #123, Daily Mega Low, Hold'em No Limit\nBuy-in: {symbol}{main}+{symbol}{fee}\n{re_entry_line}\n"
        );
        let fact = parser().parse(&text, "variant.txt").unwrap();
        assert_eq!(fact.currency_code, code);
        assert_eq!(fact.re_entries, expected);
        assert_eq!(fact.total_entries, fact.re_entries + 1);
        let expected_total = fact.buy_in * f64::from(fact.total_entries);
        assert!((fact.total_buy_in - expected_total).abs() < 1e-9);
    }
}
