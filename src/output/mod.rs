//! Output module for exporting walk results and reports
//!
//! This module handles:
//! - Aggregating degree statistics per sample
//! - Exporting successful walks as CSV (and optionally SQLite) tables
//! - Generating the markdown summary of a run

mod csv_output;
mod markdown;
mod sqlite_output;
pub mod stats;
mod traits;

pub use csv_output::{format_csv, CsvOutputHandler};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use sqlite_output::SqliteOutputHandler;
pub use stats::{CategorySummary, DegreeStatistics, SampleSummary};
pub use traits::{
    ExportRecord, ExportTable, OutputError, OutputHandler, OutputResult, RunSummary, SampleOutcome,
};

use crate::config::OutputConfig;
use crate::sample::SampleKind;
use std::path::Path;

/// Writes one export table per sample through every configured handler
///
/// # Arguments
///
/// * `config` - Output configuration (export directory, optional database)
/// * `results` - Finished walks grouped by sample kind
///
/// # Returns
///
/// * `Ok(Vec<ExportTable>)` - The tables that were written
/// * `Err(OutputError)` - A handler failed to write
pub fn export_tables(
    config: &OutputConfig,
    results: &[(SampleKind, Vec<SampleOutcome>)],
) -> OutputResult<Vec<ExportTable>> {
    let tables: Vec<ExportTable> = results
        .iter()
        .map(|(kind, outcomes)| ExportTable::from_outcomes(*kind, outcomes))
        .collect();

    let mut handlers: Vec<Box<dyn OutputHandler>> =
        vec![Box::new(CsvOutputHandler::new(Path::new(&config.export_dir))?)];
    if let Some(path) = &config.database_path {
        handlers.push(Box::new(SqliteOutputHandler::new(Path::new(path))?));
    }

    for handler in handlers.iter_mut() {
        for table in &tables {
            handler.write_table(table)?;
        }
        handler.finalize()?;
    }

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::random_sample;
    use crate::state::{OutcomeReason, TraversalOutcome};

    #[test]
    fn test_export_tables_writes_csv_and_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = OutputConfig {
            export_dir: dir.path().join("exports").display().to_string(),
            database_path: Some(dir.path().join("walks.db").display().to_string()),
            summary_path: dir.path().join("summary.md").display().to_string(),
        };

        let records = random_sample(2).records;
        let outcomes = vec![
            SampleOutcome {
                record: records[0].clone(),
                outcome: TraversalOutcome::converged(
                    "Special:Random",
                    1,
                    vec!["Stoicism".into(), "Philosophy".into()],
                ),
            },
            SampleOutcome {
                record: records[1].clone(),
                outcome: TraversalOutcome::failed(
                    "Special:Random",
                    OutcomeReason::FetchError,
                    0,
                    vec![],
                ),
            },
        ];

        let tables = export_tables(&config, &[(SampleKind::Random, outcomes)]).unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].records.len(), 1);

        let csv = std::fs::read_to_string(dir.path().join("exports").join("random.csv")).unwrap();
        assert_eq!(csv, "Text,Degrees\nStoicism,1\n");
        assert!(dir.path().join("walks.db").exists());
    }
}
