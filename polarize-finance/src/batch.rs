//! Batch analysis: parse -> convert -> distribute -> aggregate.
//!
//! Unparseable documents and pending conversions never abort the batch; they
//! are reported next to the successful results.

use anyhow::Context;
use serde::Serialize;
use std::path::Path;

use polarize_core::{CoreError, PlayerLevel, Summary, TournamentFact};
use polarize_ingest::SummaryParser;

use crate::currency::CurrencyNormalizer;
use crate::distribution::distribute_all;
use crate::summary::summarize;

/// One uploaded document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: String,
    pub content: String,
}

impl Document {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Read a file from disk, keeping only its file name for provenance
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(filename, String::from_utf8_lossy(&bytes)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Every parsed tournament, distributed (pending ones carry zero deals)
    pub tournaments: Vec<TournamentFact>,
    /// Totals over tournaments with a final USD distribution
    pub summary: Summary,
    /// Filenames that were not recognizable summaries
    pub skipped: Vec<String>,
    /// Tournaments still waiting for a conversion rate
    pub pending: Vec<String>,
}

impl BatchReport {
    /// Tournaments whose amounts are final and in USD
    pub fn settled(&self) -> impl Iterator<Item = &TournamentFact> {
        self.tournaments.iter().filter(|f| !f.conversion_pending())
    }
}

pub fn analyze_batch(
    parser: &SummaryParser,
    documents: &[Document],
    normalizer: &CurrencyNormalizer,
    level: &PlayerLevel,
) -> Result<BatchReport, CoreError> {
    level.validate()?;

    let mut parsed = Vec::with_capacity(documents.len());
    let mut skipped = Vec::new();
    for doc in documents {
        match parser.parse(&doc.content, &doc.filename) {
            Some(fact) => parsed.push(normalizer.apply(fact)),
            None => skipped.push(doc.filename.clone()),
        }
    }

    let tournaments = distribute_all(&parsed, level)?;
    let pending: Vec<String> = tournaments
        .iter()
        .filter(|f| f.conversion_pending())
        .map(|f| f.display_id().to_string())
        .collect();
    log::info!(
        "analyzed {} documents: {} tournaments, {} skipped, {} pending conversion",
        documents.len(),
        tournaments.len(),
        skipped.len(),
        pending.len()
    );

    let mut report = BatchReport {
        tournaments,
        summary: Summary::default(),
        skipped,
        pending,
    };
    let settled: Vec<TournamentFact> = report.settled().cloned().collect();
    report.summary = summarize(&settled);
    Ok(report)
}
