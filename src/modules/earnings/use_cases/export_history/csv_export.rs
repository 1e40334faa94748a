// CSV rendering of the reset ledger for download.
//
// Format
// - Header `#,Time,Earning`, then one row per record with a 1-based index.
// - Every field quoted, inner quotes doubled. Earnings are raw numbers, never currency text.
// - Earnings below 1e-6 or from 1e21 up are written in exponent form (`8.333e-7`).
// - Rows separated by `\n`, no trailing newline.

use crate::modules::earnings::core::history::ResetRecord;
use crate::shared::core::primitives::number_text;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;

pub const CSV_FILENAME: &str = "earning_history.csv";
pub const CSV_MIME: &str = "text/csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: &'static str,
    pub mime: &'static str,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv writer failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv buffer flush failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv output is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub fn to_csv(records: &[ResetRecord]) -> Result<String, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(["#", "Time", "Earning"])?;
    for (index, record) in records.iter().enumerate() {
        writer.write_record([
            (index + 1).to_string(),
            record.time.clone(),
            number_text(record.earning),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|error| error.into_error())?;
    let mut body = String::from_utf8(bytes)?;
    if body.ends_with('\n') {
        body.pop();
    }
    Ok(body)
}

/// Nothing to download for an empty ledger.
pub fn export(records: &[ResetRecord]) -> Result<Option<CsvExport>, ExportError> {
    if records.is_empty() {
        return Ok(None);
    }
    Ok(Some(CsvExport {
        filename: CSV_FILENAME,
        mime: CSV_MIME,
        body: to_csv(records)?,
    }))
}
