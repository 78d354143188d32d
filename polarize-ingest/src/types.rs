use chrono::NaiveDateTime;

/// Identifier and title from the header line
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub tournament_id: Option<String>,
    pub name: String,
    pub game_type: Option<String>,
}

/// Components of the "Buy-in:" line, still in the original currency
#[derive(Debug, Clone, PartialEq)]
pub struct BuyInLine {
    /// Currency symbol or code as written ("$", "R$", "EUR"); empty when absent
    pub prefix: String,
    pub main: f64,
    pub fee: f64,
    pub bounty: f64,
    /// The amounts exactly as printed, e.g. "€50.00+€5.00"
    pub raw: String,
}

impl BuyInLine {
    pub fn total(&self) -> f64 {
        (self.main + self.fee + self.bounty).abs()
    }
}

/// What the document says the player walked away with
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Money received; zero for an entry-only finish
    Received(f64),
    /// Loss stated explicitly, as a positive magnitude
    Lost(f64),
}

impl Outcome {
    pub fn signed(&self) -> f64 {
        match self {
            Outcome::Received(v) => v.abs(),
            Outcome::Lost(v) => -v.abs(),
        }
    }
}

/// Raw extraction result before normalization. Optional fields are the ones
/// allowed to be missing; the header and buy-in are not.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSummary {
    pub header: Header,
    pub buy_in: BuyInLine,
    pub re_entries: Option<u32>,
    pub outcome: Option<Outcome>,
    pub started_at: Option<NaiveDateTime>,
    pub players: Option<u32>,
}
