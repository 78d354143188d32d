//! Payload for submitting an analysed session to the tracker.

use serde::{Deserialize, Serialize};

use polarize_core::{Category, Summary, TournamentFact};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTournament {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tournament_id: Option<String>,
    pub category: Category,
    pub buy_in: f64,
    pub result: f64,
    pub normal_deal: f64,
    pub automatic_sale: f64,
    pub currency_code: String,
}

impl From<&TournamentFact> for SessionTournament {
    fn from(fact: &TournamentFact) -> Self {
        Self {
            name: fact.name.clone(),
            tournament_id: fact.tournament_id.clone(),
            category: fact.category,
            buy_in: fact.buy_in,
            result: fact.result,
            normal_deal: fact.normal_deal,
            automatic_sale: fact.automatic_sale,
            currency_code: fact.currency_code.clone(),
        }
    }
}

/// `{summary, tournaments[]}` plus the headline totals the tracker indexes on
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub total_profit: f64,
    pub normal_deal: f64,
    pub automatic_sale: f64,
    pub summary: Summary,
    pub tournaments: Vec<SessionTournament>,
}

impl SessionPayload {
    pub fn new(summary: &Summary, facts: &[TournamentFact]) -> Self {
        Self {
            total_profit: summary.net_profit,
            normal_deal: summary.normal_deal,
            automatic_sale: summary.automatic_sale,
            summary: summary.clone(),
            tournaments: facts.iter().map(SessionTournament::from).collect(),
        }
    }
}

/// Tracker response; only the session id matters
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReceipt {
    pub session_id: Option<String>,
}
