//! CSV exporter
//!
//! Writes one `<table>.csv` file per sample into the export directory.

use crate::output::traits::{ExportTable, OutputHandler, OutputResult};
use rusqlite::types::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes export tables as CSV files
pub struct CsvOutputHandler {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl CsvOutputHandler {
    /// Creates the handler, creating the export directory if needed
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            written: Vec::new(),
        })
    }

    /// Files written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl OutputHandler for CsvOutputHandler {
    fn write_table(&mut self, table: &ExportTable) -> OutputResult<()> {
        let path = self.dir.join(format!("{}.csv", table.name()));
        let mut out = BufWriter::new(File::create(&path)?);
        out.write_all(format_csv(table).as_bytes())?;
        out.flush()?;

        tracing::info!(
            "Wrote {} rows to {}",
            table.records.len(),
            path.display()
        );
        self.written.push(path);
        Ok(())
    }
}

/// Formats a table as CSV, header first
pub fn format_csv(table: &ExportTable) -> String {
    let mut csv = String::new();

    let header: Vec<String> = table.columns().iter().map(|c| escape_field(c)).collect();
    csv.push_str(&header.join(","));
    csv.push('\n');

    for record in &table.records {
        let fields: Vec<String> = table.row(record).iter().map(format_value).collect();
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }

    csv
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(r) => r.to_string(),
        Value::Text(s) => escape_field(s),
        Value::Blob(b) => escape_field(&String::from_utf8_lossy(b)),
    }
}

/// Quotes a field when it contains a separator, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
