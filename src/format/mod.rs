//! Output writing for scraped rows (CSV, JSON Lines) and detail lookups.

use crate::amazon::{DetailRecord, OutputRow, HEADER};
use crate::config::OutputFormat;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

enum Sink<W: Write> {
    Csv(csv::Writer<W>),
    Jsonl(W),
}

/// Streams output rows to a file or any other writer.
///
/// CSV output starts with the header row, even when no rows follow.
pub struct RowWriter<W: Write> {
    sink: Sink<W>,
    rows: usize,
}

impl RowWriter<BufWriter<File>> {
    /// Creates or truncates `path` and prepares it for rows.
    pub fn create(path: &Path, format: OutputFormat) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Self::new(BufWriter::new(file), format)
    }
}

impl<W: Write> RowWriter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Result<Self> {
        let sink = match format {
            OutputFormat::Csv => {
                let mut csv_writer = csv::Writer::from_writer(writer);
                csv_writer.write_record(HEADER).context("Failed to write CSV header")?;
                Sink::Csv(csv_writer)
            }
            OutputFormat::Jsonl => Sink::Jsonl(writer),
        };

        Ok(Self { sink, rows: 0 })
    }

    /// Appends one row.
    pub fn write_row(&mut self, row: &OutputRow) -> Result<()> {
        match &mut self.sink {
            Sink::Csv(csv) => csv.write_record(row.values()).context("Failed to write CSV row")?,
            Sink::Jsonl(writer) => {
                serde_json::to_writer(&mut *writer, row).context("Failed to write JSON row")?;
                writer.write_all(b"\n").context("Failed to write JSON row")?;
            }
        }

        self.rows += 1;
        Ok(())
    }

    /// Number of rows written so far.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(self) -> Result<W> {
        match self.sink {
            Sink::Csv(csv) => {
                csv.into_inner().map_err(|e| e.into_error()).context("Failed to flush output")
            }
            Sink::Jsonl(mut writer) => {
                writer.flush().context("Failed to flush output")?;
                Ok(writer)
            }
        }
    }
}

/// Formats a single product's details for the terminal.
pub fn format_details(url: &str, details: &DetailRecord, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(details).unwrap_or_else(|_| "{}".to_string());
    }

    let or_na = |s: &str| if s.is_empty() { "N/A".to_string() } else { s.to_string() };

    let mut lines = Vec::new();
    lines.push(format!("URL:          {}", url));
    lines.push(format!("ASIN:         {}", or_na(&details.asin)));
    lines.push(format!("Manufacturer: {}", or_na(&details.manufacturer)));
    lines.push(format!("Description:  {}", or_na(&details.description)));
    lines.join("\n")
}
