use crate::error::LedgerError;
use chrono::NaiveDate;
use funnelbook_model::{Collection, Table};
use funnelbook_store::{table_to_csv, TabularStore};

/// Serializes the accumulated rows of one collection to a downloadable
/// byte stream: header row of canonical column names, one data row per
/// record, no formatting. A never-written collection still yields its
/// header.
pub fn export_csv<S: TabularStore>(
    store: &S,
    collection: Collection,
) -> Result<Vec<u8>, LedgerError> {
    let mut table = store.read(collection)?;
    if table.columns().is_empty() {
        table = Table::new(collection.columns().iter().copied());
    }
    Ok(table_to_csv(&table)?)
}

/// Dated default report file name, e.g. `reporte_funnel_20260827.csv`.
#[must_use]
pub fn report_file_name(collection: Collection, date: NaiveDate) -> String {
    format!(
        "reporte_{}_{}.csv",
        collection.as_str(),
        date.format("%Y%m%d")
    )
}
