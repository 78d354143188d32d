use polarize_core::{Category, PlayerLevel};
use polarize_finance::{
    CurrencyNormalizer, Document, analyze_batch, distribute, summarize, to_csv_string,
};
use polarize_ingest::SummaryParser;
use rstest::rstest;
use std::path::PathBuf;

const EPS: f64 = 1e-6;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
}

fn load(name: &str) -> Document {
    Document::from_path(fixtures_dir().join(name)).unwrap()
}

fn all_documents() -> Vec<Document> {
    let mut names: Vec<_> = std::fs::read_dir(fixtures_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names.iter().map(|n| load(n)).collect()
}

fn level() -> PlayerLevel {
    PlayerLevel::new("3.1", 22.0, 11.0)
}

/// Real exports: the phase day 1 leg is a full loss split 20/80 at a $11 cap.
#[test]
fn test_phase_day_one_export() {
    let doc = load("GG20250511_phase_day1.txt");
    let fact = SummaryParser::new().unwrap().parse(&doc.content, &doc.filename).unwrap();

    assert_eq!(fact.name, "Phase-M: $55 Global World Festival [Day 1]");
    assert_eq!(fact.category, Category::PhaseDay1);
    assert!((fact.result + 55.0).abs() < EPS);

    let d = distribute(&fact, &level()).unwrap();
    assert!((d.normal_deal + 11.0).abs() < EPS);
    assert!((d.automatic_sale + 44.0).abs() < EPS);
}

#[test]
fn test_phase_day_two_export() {
    let doc = load("GG20250512_phase_day2.txt");
    let fact = SummaryParser::new().unwrap().parse(&doc.content, &doc.filename).unwrap();

    assert_eq!(fact.category, Category::PhaseDay2Plus);
    assert_eq!(fact.logical_buy_in(), 0.0);

    let d = distribute(&fact, &level()).unwrap();
    assert!((d.normal_deal - 22.688).abs() < EPS);
    assert!((d.automatic_sale - 90.752).abs() < EPS);
    assert!((d.total() - 113.44).abs() < EPS);
}

#[test]
fn test_bounty_export() {
    let doc = load("GG20250518_bounty_hunters.txt");
    let fact = SummaryParser::new().unwrap().parse(&doc.content, &doc.filename).unwrap();

    assert_eq!(fact.name, "132-M: $55 Bounty Hunters Sunday Main Event, $1M GTD");
    assert!((fact.buy_in - 55.0).abs() < EPS);
    assert_eq!(fact.players, Some(20422));

    let d = distribute(&fact, &level()).unwrap();
    assert!((d.normal_deal + 14.5).abs() < EPS);
    assert!((d.automatic_sale + 21.75).abs() < EPS);
}

#[test]
fn test_re_entry_export() {
    let doc = load("GG20250518_with_reentries.txt");
    let fact = SummaryParser::new().unwrap().parse(&doc.content, &doc.filename).unwrap();

    assert_eq!(fact.re_entries, 3);
    assert_eq!(fact.total_entries, 4);
    assert!((fact.total_buy_in - 80.0).abs() < EPS);

    let d = distribute(&fact, &level()).unwrap();
    assert!((d.normal_deal + 47.3).abs() < EPS);
    assert_eq!(d.automatic_sale, 0.0);
}

#[test]
fn test_yuan_export_pending_then_converted() {
    let doc = load("GG20250505_chinese_yuan.txt");
    let fact = SummaryParser::new().unwrap().parse(&doc.content, &doc.filename).unwrap();
    assert_eq!(fact.currency_code, "CNY");
    assert_eq!(fact.category, Category::OtherCurrency);

    let pending = distribute(&fact, &level()).unwrap();
    assert!(pending.pending);
    assert_eq!(pending.total(), 0.0);

    let converted = CurrencyNormalizer::offline().apply(fact);
    let d = distribute(&converted, &level()).unwrap();
    assert!(!d.pending);
    assert!((d.total() - (converted.result - converted.total_buy_in)).abs() < EPS);
}

#[rstest]
#[case("GG20250505_chinese_yuan.txt", Category::OtherCurrency, "CNY")]
#[case("GG20250511_phase_day1.txt", Category::PhaseDay1, "USD")]
#[case("GG20250512_phase_day2.txt", Category::PhaseDay2Plus, "USD")]
#[case("GG20250518_bounty_hunters.txt", Category::OtherTournaments, "USD")]
#[case("GG20250518_with_reentries.txt", Category::OtherTournaments, "USD")]
#[case("GG20250520_euro_comma.txt", Category::OtherCurrency, "EUR")]
fn test_fixture_classification(#[case] file: &str, #[case] category: Category, #[case] currency: &str) {
    let doc = load(file);
    let fact = SummaryParser::new().unwrap().parse(&doc.content, &doc.filename).unwrap();
    assert_eq!(fact.category, category);
    assert_eq!(fact.currency_code, currency);
    assert_eq!(fact.original_filename.as_deref(), Some(file));
}

/// Whole folder: notes are skipped, every tournament lands in the summary.
#[test]
fn test_fixture_folder_batch() {
    let docs = all_documents();
    let report = analyze_batch(
        &SummaryParser::new().unwrap(),
        &docs,
        &CurrencyNormalizer::offline(),
        &level(),
    )
    .unwrap();

    assert_eq!(report.skipped, vec!["session_notes.txt".to_string()]);
    assert!(report.pending.is_empty());
    assert_eq!(report.tournaments.len(), docs.len() - 1);
    assert_eq!(report.summary.total_tournaments, report.tournaments.len());

    for fact in &report.tournaments {
        assert_eq!(fact.total_entries, fact.re_entries + 1);
        if fact.category != Category::PhaseDay2Plus {
            let expected = fact.buy_in * f64::from(fact.total_entries);
            assert!((fact.total_buy_in - expected).abs() < EPS, "{}", fact.name);
        }
    }

    let euro = report
        .tournaments
        .iter()
        .find(|f| f.currency_code == "EUR")
        .unwrap();
    assert_eq!(euro.re_entries, 1);
    assert!((euro.normal_deal + 44.0).abs() < EPS);
    assert!((euro.normal_deal + euro.automatic_sale - euro.result).abs() < EPS);

    let resummed = summarize(&report.tournaments);
    assert_eq!(resummed, report.summary);

    let csv = to_csv_string(&report.tournaments).unwrap();
    assert_eq!(csv.lines().count(), report.tournaments.len() + 1);
}
