//! Currency normalization to USD: live rate table with static fallbacks.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use polarize_core::currency::{FALLBACK_RATES, RateTable, fallback_rate};
use polarize_core::{BASE_CURRENCY, TournamentFact};

/// Amount in USD and the multiplier that produced it. `rate <= 0` means no rate was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub rate: f64,
}

#[derive(Debug)]
pub struct CurrencyNormalizer {
    /// Code -> USD per unit, from the live source
    live: HashMap<String, f64>,
    fallback: RateTable,
    /// Codes already reported as using a fallback or missing rate
    warned: Mutex<HashSet<String>>,
}

/// Response of an exchange-rate endpoint quoted per USD:
/// `{"result":"success","rates":{"EUR":0.94,...}}`
#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

impl CurrencyNormalizer {
    pub fn new(live: HashMap<String, f64>, fallback: RateTable) -> Self {
        Self {
            live,
            fallback,
            warned: Mutex::new(HashSet::new()),
        }
    }

    /// True the first time `code` is seen, so each currency is warned about once per run
    fn first_warning(&self, code: &str) -> bool {
        self.warned
            .lock()
            .map(|mut seen| seen.insert(code.to_string()))
            .unwrap_or(false)
    }

    /// Static fallback rates only
    pub fn offline() -> Self {
        Self::new(HashMap::new(), FALLBACK_RATES)
    }

    /// Fetch live rates; any failure or timeout degrades to the static table.
    pub async fn with_live_rates(url: &str, timeout: Duration) -> Self {
        match tokio::time::timeout(timeout, fetch_rates(url)).await {
            Ok(Ok(live)) => {
                log::info!("loaded {} exchange rates from {}", live.len(), url);
                Self::new(live, FALLBACK_RATES)
            }
            Ok(Err(e)) => {
                log::warn!("exchange rates unavailable ({e:#}); using fallback rates");
                Self::offline()
            }
            Err(_) => {
                log::warn!("exchange rate lookup timed out after {timeout:?}; using fallback rates");
                Self::offline()
            }
        }
    }

    /// USD per one unit of `code`; 0 when neither source knows the currency
    pub fn rate_for(&self, code: &str) -> f64 {
        if code == BASE_CURRENCY {
            return 1.0;
        }
        if let Some(rate) = self.live.get(code) {
            return *rate;
        }
        match fallback_rate(code, self.fallback) {
            Some(rate) => {
                if self.first_warning(code) {
                    log::warn!("no live rate for {code}; using fallback {rate}");
                }
                rate
            }
            None => {
                if self.first_warning(code) {
                    log::warn!("no rate for {code}; conversion stays pending");
                }
                0.0
            }
        }
    }

    pub fn convert_to_usd(&self, amount: f64, code: &str) -> Conversion {
        let rate = self.rate_for(code);
        if rate > 0.0 {
            Conversion {
                amount: amount * rate,
                rate,
            }
        } else {
            Conversion { amount, rate: 0.0 }
        }
    }

    /// Rescale a pending non-USD fact into USD. Facts that are USD or already
    /// converted come back unchanged, so applying twice is harmless.
    pub fn apply(&self, mut fact: TournamentFact) -> TournamentFact {
        if fact.is_usd() {
            fact.conversion_rate = 1.0;
            return fact;
        }
        if !fact.conversion_pending() {
            return fact;
        }
        let rate = self.rate_for(&fact.currency_code);
        if rate <= 0.0 {
            return fact;
        }
        fact.buy_in *= rate;
        fact.total_buy_in *= rate;
        fact.result *= rate;
        fact.conversion_rate = rate;
        fact
    }
}

impl Default for CurrencyNormalizer {
    fn default() -> Self {
        Self::offline()
    }
}

/// Invert per-USD quotes into USD-per-unit rates, dropping unusable entries
pub fn rates_from_quotes(quotes: HashMap<String, f64>) -> HashMap<String, f64> {
    quotes
        .into_iter()
        .filter(|(_, quote)| quote.is_finite() && *quote > 0.0)
        .map(|(code, quote)| (code, 1.0 / quote))
        .collect()
}

async fn fetch_rates(url: &str) -> Result<HashMap<String, f64>> {
    let resp = reqwest::Client::new()
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?;

    let status = resp.status();
    if !status.is_success() {
        bail!("exchange rate error: {status}");
    }

    let body: RatesResponse = resp.json().await.context("parse exchange rate response")?;
    Ok(rates_from_quotes(body.rates))
}
