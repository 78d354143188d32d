//! Tournament fact types: one parsed tournament summary, normalized to a single shape.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Base currency every amount is converted into before distribution.
pub const BASE_CURRENCY: &str = "USD";

/// Mutually exclusive tournament classification.
///
/// Phase categories take precedence over currency: a non-USD phase tournament
/// is still `PhaseDay1` / `PhaseDay2Plus`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    PhaseDay1,
    PhaseDay2Plus,
    OtherCurrency,
    OtherTournaments,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::PhaseDay1,
        Category::PhaseDay2Plus,
        Category::OtherCurrency,
        Category::OtherTournaments,
    ];

    /// Phase tournaments are capped by the phase limit instead of the normal limit
    pub fn is_phase(&self) -> bool {
        matches!(self, Category::PhaseDay1 | Category::PhaseDay2Plus)
    }

    /// Human-readable label used in reports and CSV exports
    pub fn label(&self) -> &'static str {
        match self {
            Category::PhaseDay1 => "Phase Day 1",
            Category::PhaseDay2Plus => "Phase Day 2+",
            Category::OtherCurrency => "Other Currencies",
            Category::OtherTournaments => "Other Tournaments",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A played tournament instance extracted from one summary document.
///
/// Created by the parser, rescaled once by currency conversion (non-USD only),
/// and filled with `normal_deal` / `automatic_sale` once by the distribution engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentFact {
    /// Free-text title; drives category inference
    pub name: String,
    /// Platform-assigned numeric identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tournament_id: Option<String>,
    /// Game description from the header line, e.g. "Hold'em No Limit"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_type: Option<String>,
    /// Local start time as printed in the export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<NaiveDateTime>,
    /// Field size, when the export states it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<u32>,
    pub category: Category,
    /// Single-entry cost (main + fee + bounty). Never negative.
    pub buy_in: f64,
    /// Original-currency rendering of the buy-in line; only set for non-USD facts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buy_in_original: Option<String>,
    pub re_entries: u32,
    /// Always `re_entries + 1`
    pub total_entries: u32,
    /// `buy_in * total_entries`, except Phase Day 2+ where it is 0
    pub total_buy_in: f64,
    /// Money received (positive) or booked loss (negative)
    pub result: f64,
    pub currency_code: String,
    /// Multiplier original -> USD. `<= 0` means conversion is still pending.
    pub conversion_rate: f64,
    pub normal_deal: f64,
    pub automatic_sale: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
}

impl TournamentFact {
    pub fn is_usd(&self) -> bool {
        self.currency_code == BASE_CURRENCY
    }

    /// True when the fact is non-USD and has no usable conversion rate yet
    pub fn conversion_pending(&self) -> bool {
        !self.is_usd() && self.conversion_rate <= 0.0
    }

    /// Buy-in counted against the result. Day 2+ legs cost nothing to play.
    pub fn logical_buy_in(&self) -> f64 {
        match self.category {
            Category::PhaseDay2Plus => 0.0,
            _ => self.buy_in,
        }
    }

    /// Identifier used in reports: the platform id when known, else the filename, else the name
    pub fn display_id(&self) -> &str {
        self.tournament_id
            .as_deref()
            .or(self.original_filename.as_deref())
            .unwrap_or(&self.name)
    }

    /// Returns a copy carrying the given distribution
    pub fn with_distribution(mut self, normal_deal: f64, automatic_sale: f64) -> Self {
        self.normal_deal = normal_deal;
        self.automatic_sale = automatic_sale;
        self
    }
}
