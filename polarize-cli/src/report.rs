use polarize_core::{Category, PlayerLevel};
use polarize_core::currency::{SYMBOLS, symbol_for_code};
use polarize_finance::BatchReport;
use polarize_finance::export::format_usd;

/// Render the analysis as plain text, one line per tournament
pub fn render(report: &BatchReport, level: &PlayerLevel) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "# Polarize analysis (level {}, normal cap {}, phase cap {})\n\n",
        level.level,
        format_usd(level.normal_limit),
        format_usd(level.phase_limit)
    ));

    for f in &report.tournaments {
        if f.conversion_pending() {
            out.push_str(&format!(
                "- [{}] {} | buy-in {} | conversion pending ({})\n",
                f.category,
                f.name,
                f.buy_in_original
                    .clone()
                    .unwrap_or_else(|| format!("{}{:.2}", symbol_for_code(&f.currency_code, SYMBOLS), f.buy_in)),
                f.currency_code
            ));
            continue;
        }
        out.push_str(&format!(
            "- [{}] {} | buy-in {} x{} | result {} | normal {} | sale {}\n",
            f.category,
            f.name,
            format_usd(f.buy_in),
            f.total_entries,
            format_usd(f.result),
            format_usd(f.normal_deal),
            format_usd(f.automatic_sale)
        ));
    }

    let s = &report.summary;
    out.push_str(&format!("\n## Summary ({} tournaments)\n\n", s.total_tournaments));
    out.push_str(&format!("Net profit:     {}\n", format_usd(s.net_profit)));
    out.push_str(&format!("Normal deal:    {}\n", format_usd(s.normal_deal)));
    out.push_str(&format!("Automatic sale: {}\n\n", format_usd(s.automatic_sale)));
    for c in Category::ALL {
        out.push_str(&format!(
            "{:<18} {:>4} ({:.1}%)\n",
            c.label(),
            s.categories.count(c),
            s.categories.percentage(c)
        ));
    }

    if !report.pending.is_empty() {
        out.push_str(&format!("\nPending conversion: {}\n", report.pending.join(", ")));
    }
    if !report.skipped.is_empty() {
        out.push_str(&format!("Skipped (not a tournament summary): {}\n", report.skipped.join(", ")));
    }
    out
}
