//! CSV export: one row per tournament, stable column order.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use polarize_core::TournamentFact;

pub const CSV_HEADERS: [&str; 10] = [
    "Tournament",
    "Category",
    "Buy-in",
    "Re-entries",
    "Total Entries",
    "Total Buy-in",
    "Result",
    "Normal Deal",
    "Automatic Sale",
    "Currency",
];

/// "$12.50" / "-$12.50"
pub fn format_usd(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

fn row(fact: &TournamentFact) -> [String; 10] {
    [
        fact.name.clone(),
        fact.category.label().to_string(),
        fact.buy_in_original
            .clone()
            .unwrap_or_else(|| format_usd(fact.buy_in)),
        fact.re_entries.to_string(),
        fact.total_entries.to_string(),
        format_usd(fact.total_buy_in),
        format_usd(fact.result),
        format_usd(fact.normal_deal),
        format_usd(fact.automatic_sale),
        fact.currency_code.clone(),
    ]
}

pub fn write_csv<W: Write>(facts: &[TournamentFact], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;
    for fact in facts {
        wtr.write_record(row(fact))
            .with_context(|| format!("writing row for {}", fact.display_id()))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(facts: &[TournamentFact]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(facts, &mut buf)?;
    String::from_utf8(buf).context("csv output is not utf-8")
}

pub fn write_csv_file(path: impl AsRef<Path>, facts: &[TournamentFact]) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())
        .with_context(|| format!("creating {}", path.as_ref().display()))?;
    write_csv(facts, file)
}
