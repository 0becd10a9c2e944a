// SPDX-License-Identifier: Apache-2.0

use crate::backend::{StoreError, StoreErrorCode};
use funnelbook_model::Table;

pub fn table_to_csv(table: &Table) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(table.columns())
        .map_err(|e| StoreError::new(StoreErrorCode::Codec, e.to_string()))?;
    for row in table.rows() {
        writer
            .write_record(row)
            .map_err(|e| StoreError::new(StoreErrorCode::Codec, e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| StoreError::new(StoreErrorCode::Codec, e.to_string()))
}

pub fn table_from_csv(bytes: &[u8]) -> Result<Table, StoreError> {
    if bytes.is_empty() {
        return Ok(Table::empty());
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| StoreError::new(StoreErrorCode::Codec, e.to_string()))?
        .clone();
    let mut table = Table::new(headers.iter());
    for record in reader.records() {
        let record = record.map_err(|e| StoreError::new(StoreErrorCode::Codec, e.to_string()))?;
        table.push_row(record.iter());
    }
    Ok(table)
}
