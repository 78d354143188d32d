//! Aggregate view over a set of tournament facts.

use serde::{Deserialize, Serialize};

use crate::tournament::Category;

/// Per-category counts and their share of the total (0-100)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub phase_day1_count: usize,
    pub phase_day2_count: usize,
    pub other_currency_count: usize,
    pub other_tournaments_count: usize,
    pub phase_day1_percentage: f64,
    pub phase_day2_percentage: f64,
    pub other_currency_percentage: f64,
    pub other_tournaments_percentage: f64,
}

impl CategoryBreakdown {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::PhaseDay1 => self.phase_day1_count,
            Category::PhaseDay2Plus => self.phase_day2_count,
            Category::OtherCurrency => self.other_currency_count,
            Category::OtherTournaments => self.other_tournaments_count,
        }
    }

    pub fn percentage(&self, category: Category) -> f64 {
        match category {
            Category::PhaseDay1 => self.phase_day1_percentage,
            Category::PhaseDay2Plus => self.phase_day2_percentage,
            Category::OtherCurrency => self.other_currency_percentage,
            Category::OtherTournaments => self.other_tournaments_percentage,
        }
    }

    pub fn increment(&mut self, category: Category) {
        match category {
            Category::PhaseDay1 => self.phase_day1_count += 1,
            Category::PhaseDay2Plus => self.phase_day2_count += 1,
            Category::OtherCurrency => self.other_currency_count += 1,
            Category::OtherTournaments => self.other_tournaments_count += 1,
        }
    }

    /// Recompute percentages from the counts; all zero when `total` is 0
    pub fn update_percentages(&mut self, total: usize) {
        let pct = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            }
        };
        self.phase_day1_percentage = pct(self.phase_day1_count);
        self.phase_day2_percentage = pct(self.phase_day2_count);
        self.other_currency_percentage = pct(self.other_currency_count);
        self.other_tournaments_percentage = pct(self.other_tournaments_count);
    }
}

/// Totals for one analysis run. Derived from facts only; never stored on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_tournaments: usize,
    pub net_profit: f64,
    pub normal_deal: f64,
    pub automatic_sale: f64,
    pub categories: CategoryBreakdown,
}
