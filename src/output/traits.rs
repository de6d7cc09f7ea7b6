//! Output handler traits and types
//!
//! This module defines the trait interface for exporters and the tabular records
//! they write.

use crate::output::stats::SampleSummary;
use crate::sample::{SampleKind, SampleRecord};
use crate::state::TraversalOutcome;
use rusqlite::types::Value;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// A starting article together with the walk that started from it
#[derive(Debug, Clone)]
pub struct SampleOutcome {
    pub record: SampleRecord,
    pub outcome: TraversalOutcome,
}

impl SampleOutcome {
    /// Text shown for the article; random records take the title of the page
    /// the walk actually landed on
    pub fn display_text(&self) -> &str {
        if self.record.display_text.is_empty() {
            self.outcome.display_title()
        } else {
            &self.record.display_text
        }
    }
}

/// One exported row: a sampled article and its degrees of separation
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRecord {
    pub record: SampleRecord,
    pub degrees: u32,
}

/// Rows of one sample, ready to be written
///
/// Only walks that reached the target are included; failed walks are dropped
/// rather than recorded with a placeholder degree.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub kind: SampleKind,
    pub records: Vec<ExportRecord>,
}

impl ExportTable {
    /// Builds a table from finished walks, dropping failures
    pub fn from_outcomes(kind: SampleKind, outcomes: &[SampleOutcome]) -> Self {
        let records = outcomes
            .iter()
            .filter_map(|o| {
                let degrees = o.outcome.degrees?;
                let mut record = o.record.clone();
                record.display_text = o.display_text().to_string();
                Some(ExportRecord { record, degrees })
            })
            .collect();

        Self { kind, records }
    }

    /// Name of the exported table (file stem or SQL table name)
    pub fn name(&self) -> &'static str {
        self.kind.table_name()
    }

    /// Column headers for this sample kind
    pub fn columns(&self) -> &'static [&'static str] {
        match self.kind {
            SampleKind::Random => &["Text", "Degrees"],
            SampleKind::TopRanked => &["Rank", "Text", "Link", "Popularity", "Degrees"],
            SampleKind::Category => &["Table", "Rank", "Text", "Link", "Popularity", "Degrees"],
        }
    }

    /// Cell values of one row, in column order
    pub fn row(&self, row: &ExportRecord) -> Vec<Value> {
        let record = &row.record;
        let text = Value::Text(record.display_text.clone());
        let link = Value::Text(record.href.clone());
        let rank = optional(record.rank.map(|r| Value::Integer(r as i64)));
        let popularity = optional(record.popularity.map(Value::Real));
        let degrees = Value::Integer(row.degrees as i64);

        match self.kind {
            SampleKind::Random => vec![text, degrees],
            SampleKind::TopRanked => vec![rank, text, link, popularity, degrees],
            SampleKind::Category => {
                let table = optional(record.category_id.map(|c| Value::Integer(c as i64)));
                vec![table, rank, text, link, popularity, degrees]
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn optional(value: Option<Value>) -> Value {
    value.unwrap_or(Value::Null)
}

/// Everything reported about one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: String,
    pub finished_at: String,
    pub duration_seconds: i64,
    pub config_hash: String,
    pub target_title: String,
    pub max_steps: u32,

    /// Pages requested from the server, ranking page included
    pub requests: u64,

    pub samples: Vec<SampleSummary>,
}

impl RunSummary {
    /// Walks attempted across all samples
    pub fn attempted(&self) -> usize {
        self.samples.iter().map(|s| s.attempted).sum()
    }

    /// Walks that reached the target across all samples
    pub fn succeeded(&self) -> usize {
        self.samples.iter().map(|s| s.succeeded).sum()
    }
}

/// Trait for exporters
///
/// An exporter receives one table per sample and may buffer or write it
/// immediately; `finalize` is called once after the last table.
pub trait OutputHandler {
    /// Writes one sample's table
    fn write_table(&mut self, table: &ExportTable) -> OutputResult<()>;

    /// Finalizes the output, performing any cleanup or final writes
    fn finalize(&mut self) -> OutputResult<()> {
        Ok(())
    }
}
