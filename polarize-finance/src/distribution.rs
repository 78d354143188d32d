//! Deal splitting: divides a tournament's outcome between the normal deal and
//! the automatic sale according to how far the buy-in exceeds the player's cap.

use polarize_core::{Category, CoreError, PlayerLevel, TournamentFact};

/// Share of a single entry covered by each side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    pub cap: f64,
    pub normal_pct: f64,
    pub polarize_pct: f64,
}

impl Split {
    /// `polarize = max(0, (buy_in - cap) / buy_in)`, taken from the single-entry
    /// buy-in. A zero buy-in leaves everything on the normal side.
    pub fn for_buy_in(single_buy_in: f64, cap: f64) -> Self {
        let single = single_buy_in.abs();
        let polarize_pct = if single > 0.0 {
            ((single - cap) / single).max(0.0)
        } else {
            0.0
        };
        Self {
            cap,
            normal_pct: 1.0 - polarize_pct,
            polarize_pct,
        }
    }

    pub fn for_fact(fact: &TournamentFact, level: &PlayerLevel) -> Self {
        Self::for_buy_in(fact.buy_in, level.cap_for(fact.category))
    }
}

/// Outcome of distributing one tournament
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution {
    pub normal_deal: f64,
    pub automatic_sale: f64,
    /// Non-USD fact without a conversion rate; both amounts are 0 and not final
    pub pending: bool,
}

impl Distribution {
    pub fn pending() -> Self {
        Self {
            normal_deal: 0.0,
            automatic_sale: 0.0,
            pending: true,
        }
    }

    fn split(amount: f64, split: Split) -> Self {
        Self {
            normal_deal: amount * split.normal_pct,
            automatic_sale: amount * split.polarize_pct,
            pending: false,
        }
    }

    pub fn total(&self) -> f64 {
        self.normal_deal + self.automatic_sale
    }
}

/// Profit or loss the split is applied to.
///
/// Phase Day 1 is always the full stake lost; Day 2+ has no stake so the prize
/// is the profit. Otherwise the stake is subtracted from money received. A
/// negative result is a booked loss that already includes the stake.
pub fn attributed_amount(fact: &TournamentFact) -> f64 {
    let stake = total_stake(fact);
    match fact.category {
        Category::PhaseDay1 => -stake,
        Category::PhaseDay2Plus => fact.result,
        Category::OtherCurrency | Category::OtherTournaments => {
            if fact.result < 0.0 {
                fact.result
            } else {
                fact.result - stake
            }
        }
    }
}

fn total_stake(fact: &TournamentFact) -> f64 {
    if fact.total_buy_in > 0.0 {
        fact.total_buy_in
    } else {
        fact.buy_in.abs() * f64::from(fact.total_entries.max(1))
    }
}

/// Split one tournament. Fails only when the player level itself is invalid.
pub fn distribute(fact: &TournamentFact, level: &PlayerLevel) -> Result<Distribution, CoreError> {
    level.validate()?;
    Ok(distribute_unchecked(fact, level))
}

fn distribute_unchecked(fact: &TournamentFact, level: &PlayerLevel) -> Distribution {
    if fact.conversion_pending() {
        log::debug!("{}: conversion pending, distribution deferred", fact.display_id());
        return Distribution::pending();
    }
    Distribution::split(attributed_amount(fact), Split::for_fact(fact, level))
}

/// Split every tournament, returning updated copies in the same order
pub fn distribute_all(
    facts: &[TournamentFact],
    level: &PlayerLevel,
) -> Result<Vec<TournamentFact>, CoreError> {
    level.validate()?;
    Ok(facts
        .iter()
        .map(|fact| {
            let d = distribute_unchecked(fact, level);
            fact.clone().with_distribution(d.normal_deal, d.automatic_sale)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn level() -> PlayerLevel {
        PlayerLevel::new("test", 22.0, 11.0)
    }

    fn fact(category: Category, buy_in: f64, re_entries: u32, result: f64) -> TournamentFact {
        let total_entries = re_entries + 1;
        TournamentFact {
            name: "Test".to_string(),
            tournament_id: None,
            game_type: None,
            started_at: None,
            players: None,
            category,
            buy_in,
            buy_in_original: None,
            re_entries,
            total_entries,
            total_buy_in: match category {
                Category::PhaseDay2Plus => 0.0,
                _ => buy_in * f64::from(total_entries),
            },
            result,
            currency_code: "USD".to_string(),
            conversion_rate: 1.0,
            normal_deal: 0.0,
            automatic_sale: 0.0,
            original_filename: None,
        }
    }

    #[test]
    fn test_phase_day_one() {
        let d = distribute(&fact(Category::PhaseDay1, 55.0, 0, -55.0), &level()).unwrap();
        assert!((d.normal_deal + 11.0).abs() < EPS);
        assert!((d.automatic_sale + 44.0).abs() < EPS);
        assert!(!d.pending);
    }

    #[test]
    fn test_phase_day_two() {
        let d = distribute(&fact(Category::PhaseDay2Plus, 55.0, 0, 113.44), &level()).unwrap();
        assert!((d.normal_deal - 22.688).abs() < EPS);
        assert!((d.automatic_sale - 90.752).abs() < EPS);
        assert!((d.total() - 113.44).abs() < EPS);
    }

    #[test]
    fn test_regular_with_loss() {
        let d = distribute(&fact(Category::OtherTournaments, 55.0, 0, 18.75), &level()).unwrap();
        assert!((d.normal_deal + 14.5).abs() < EPS);
        assert!((d.automatic_sale + 21.75).abs() < EPS);
    }

    #[test]
    fn test_regular_with_re_entries_under_cap() {
        let d = distribute(&fact(Category::OtherTournaments, 20.0, 3, 32.7), &level()).unwrap();
        assert!((d.normal_deal + 47.3).abs() < EPS);
        assert_eq!(d.automatic_sale, 0.0);
    }

    #[test]
    fn test_booked_loss_is_not_charged_twice() {
        let d = distribute(&fact(Category::OtherTournaments, 20.0, 3, -80.0), &level()).unwrap();
        assert!((d.total() + 80.0).abs() < EPS);
    }

    #[test]
    fn test_currency_pending() {
        let mut f = fact(Category::OtherCurrency, 110.0, 2, 302.9);
        f.currency_code = "CNY".to_string();
        f.conversion_rate = 0.0;
        let d = distribute(&f, &level()).unwrap();
        assert_eq!(d, Distribution::pending());
    }

    #[test]
    fn test_zero_buy_in_has_no_nan() {
        let s = Split::for_buy_in(0.0, 22.0);
        assert_eq!(s.polarize_pct, 0.0);
        assert_eq!(s.normal_pct, 1.0);
        let d = distribute(&fact(Category::OtherTournaments, 0.0, 0, 5.0), &level()).unwrap();
        assert!(d.normal_deal.is_finite());
        assert!((d.normal_deal - 5.0).abs() < EPS);
    }

    #[test]
    fn test_percentage_bounds() {
        for buy_in in [0.5, 5.0, 11.0, 22.0, 22.01, 55.0, 215.0, 1050.0] {
            for cap in [11.0, 22.0, 100.0] {
                let s = Split::for_buy_in(buy_in, cap);
                assert!((0.0..=1.0).contains(&s.normal_pct));
                assert!((s.polarize_pct - (1.0 - s.normal_pct)).abs() < EPS);
                if buy_in <= cap {
                    assert_eq!(s.polarize_pct, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_invalid_level_fails_fast() {
        let bad = PlayerLevel::new("bad", 0.0, 11.0);
        let f = fact(Category::OtherTournaments, 55.0, 0, 18.75);
        assert!(distribute(&f, &bad).is_err());
        assert!(distribute_all(&[f], &bad).is_err());
    }

    #[test]
    fn test_distribute_all_is_idempotent() {
        let facts = vec![
            fact(Category::PhaseDay1, 55.0, 0, -55.0),
            fact(Category::OtherTournaments, 55.0, 0, 18.75),
        ];
        let once = distribute_all(&facts, &level()).unwrap();
        let twice = distribute_all(&once, &level()).unwrap();
        assert_eq!(once, twice);
        assert!((once[1].normal_deal + 14.5).abs() < EPS);
    }
}
