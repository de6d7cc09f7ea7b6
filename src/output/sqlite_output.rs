//! SQLite-based output handler implementation
//!
//! This module writes each sample's table into a SQLite database. Tables are
//! dropped and recreated on every run.

use crate::output::traits::{ExportTable, OutputHandler, OutputResult};
use rusqlite::{params_from_iter, Connection};
use std::path::Path;

/// SQLite-based output handler
pub struct SqliteOutputHandler {
    conn: Connection,
}

impl SqliteOutputHandler {
    /// Opens (or creates) the export database
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteOutputHandler)` - Successfully opened database
    /// * `Err(OutputError)` - Failed to open database
    pub fn new(path: &Path) -> OutputResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;
        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> OutputResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Returns the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl OutputHandler for SqliteOutputHandler {
    fn write_table(&mut self, table: &ExportTable) -> OutputResult<()> {
        let name = table.name();
        let columns = table.columns();

        let tx = self.conn.transaction()?;

        // "Table" is a keyword, so column names are always quoted
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {name}; CREATE TABLE {name} ({});",
            columns
                .iter()
                .map(|c| format!("\"{}\" {}", c, column_type(c)))
                .collect::<Vec<_>>()
                .join(", ")
        ))?;

        {
            let placeholders = (1..=columns.len())
                .map(|i| format!("?{}", i))
                .collect::<Vec<_>>()
                .join(", ");
            let quoted = columns
                .iter()
                .map(|c| format!("\"{}\"", c))
                .collect::<Vec<_>>()
                .join(", ");
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} ({}) VALUES ({})",
                name, quoted, placeholders
            ))?;

            for record in &table.records {
                stmt.execute(params_from_iter(table.row(record)))?;
            }
        }

        tx.commit()?;

        tracing::info!("Stored {} rows in table {}", table.records.len(), name);
        Ok(())
    }
}

fn column_type(column: &str) -> &'static str {
    match column {
        "Text" | "Link" => "TEXT",
        "Popularity" => "REAL",
        _ => "INTEGER",
    }
}
