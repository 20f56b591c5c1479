use std::io::Write;

use crate::constants::columns::OUTPUT;
use crate::data::ProcessedRecord;
use crate::errors::PipelineError;

/// Serialization used for processed records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON object per line, keyed by output column name.
    #[default]
    JsonLines,
    /// Header plus one row per record; list columns hold JSON arrays and an
    /// unresolved date is an empty cell.
    Csv,
}

/// Write `records` in `format`.
pub fn write_records<W: Write>(
    records: &[ProcessedRecord],
    format: OutputFormat,
    writer: W,
) -> Result<(), PipelineError> {
    match format {
        OutputFormat::JsonLines => write_json_lines(records, writer),
        OutputFormat::Csv => write_csv(records, writer),
    }
}

/// Write one JSON object per record.
pub fn write_json_lines<W: Write>(
    records: &[ProcessedRecord],
    mut writer: W,
) -> Result<(), PipelineError> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records as CSV with the output column header.
pub fn write_csv<W: Write>(records: &[ProcessedRecord], writer: W) -> Result<(), PipelineError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(OUTPUT)?;
    for record in records {
        writer.write_record([
            record.user.clone(),
            record.rating.to_string(),
            record.resolved_date_text().unwrap_or_default(),
            record.description.clone(),
            record.normalized_description.clone(),
            record.sentiment.to_string(),
            serde_json::to_string(&record.tokens)?,
            serde_json::to_string(&record.lemmas)?,
        ])?;
    }
    writer.flush()?;
    Ok(())
}
