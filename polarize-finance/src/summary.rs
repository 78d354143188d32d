//! Aggregation of distributed facts into a `Summary`.

use polarize_core::{Summary, TournamentFact};

/// Sum results and deals, count categories. Order of `facts` does not matter.
pub fn summarize(facts: &[TournamentFact]) -> Summary {
    let mut summary = facts.iter().fold(Summary::default(), |mut acc, fact| {
        acc.total_tournaments += 1;
        acc.net_profit += fact.result;
        acc.normal_deal += fact.normal_deal;
        acc.automatic_sale += fact.automatic_sale;
        acc.categories.increment(fact.category);
        acc
    });
    summary.categories.update_percentages(summary.total_tournaments);
    summary
}
