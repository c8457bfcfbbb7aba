use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;

use crate::model::{ClientId, PaymentDetails, PaymentOutcome, PaymentRequest, Paymode};

/// Errors that can occur when reading or writing csv rows
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open csv: {0}")]
    Open(#[source] csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: missing {column}")]
    MissingColumn { line: usize, column: &'static str },

    #[error("failed to write csv: {0}")]
    Write(#[from] csv::Error),

    #[error("failed to flush csv: {0}")]
    Io(#[from] io::Error),
}

/// Raw input row. `client` and `paymode` are mandatory, any other column
/// becomes a payment detail.
type InputRow = HashMap<String, String>;

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    client: &'a str,
    paymode: &'a str,
    bank: &'a str,
    success: bool,
}

/// Read payment requests from a csv file
pub fn read_requests(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<PaymentRequest, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(CsvError::Open)?;
    Ok(parse_rows(reader))
}

/// Read payment requests from any reader, e.g. an in-memory buffer
pub fn read_requests_from(
    reader: impl Read,
) -> impl Iterator<Item = Result<PaymentRequest, CsvError>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    parse_rows(reader)
}

fn parse_rows<R: Read>(
    reader: csv::Reader<R>,
) -> impl Iterator<Item = Result<PaymentRequest, CsvError>> {
    reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| -> Result<PaymentRequest, CsvError> {
            let line = idx + 2; // 1-indexed, skip header
            let mut row = result.map_err(|source| CsvError::Parse { line, source })?;
            let client: ClientId = take_column(&mut row, line, "client")?;
            let paymode: Paymode = take_column(&mut row, line, "paymode")?;
            let details: PaymentDetails = row
                .into_iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(key, value)| (key, serde_json::Value::String(value)))
                .collect();
            Ok(PaymentRequest {
                client,
                paymode,
                details,
            })
        })
}

fn take_column(row: &mut InputRow, line: usize, column: &'static str) -> Result<String, CsvError> {
    row.remove(column)
        .filter(|value| !value.is_empty())
        .ok_or(CsvError::MissingColumn { line, column })
}

/// Write payment outcomes in csv format
pub fn write_outcomes<'a>(
    writer: impl Write,
    outcomes: impl IntoIterator<Item = &'a PaymentOutcome>,
) -> Result<(), CsvError> {
    let mut writer = csv::Writer::from_writer(writer);

    for outcome in outcomes {
        let row = OutputRow {
            client: &outcome.client,
            paymode: &outcome.paymode,
            bank: outcome.bank.as_deref().unwrap_or(""),
            success: outcome.success,
        };
        writer.serialize(&row)?;
    }

    writer.flush()?;
    Ok(())
}
