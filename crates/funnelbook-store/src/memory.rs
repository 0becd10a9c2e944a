use crate::backend::{StoreError, StoreErrorCode, TabularStore};
use funnelbook_model::{Collection, Table};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

/// Mutex-guarded in-memory store. Reads hand back cloned snapshots, so a
/// caller's table never aliases the durable state. Failure knobs let tests
/// exercise the adapter-error paths.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<BTreeMap<Collection, Table>>,
    pub read_calls: AtomicU64,
    pub write_calls: AtomicU64,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TabularStore for MemoryStore {
    fn read(&self, collection: Collection) -> Result<Table, StoreError> {
        self.read_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(StoreError::new(
                StoreErrorCode::Io,
                "injected read failure",
            ));
        }
        let tables = self
            .tables
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "store lock poisoned"))?;
        Ok(tables.get(&collection).cloned().unwrap_or_else(Table::empty))
    }

    fn write(&self, collection: Collection, table: &Table) -> Result<(), StoreError> {
        self.write_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(StoreError::new(
                StoreErrorCode::Io,
                "injected write failure",
            ));
        }
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "store lock poisoned"))?;
        tables.insert(collection, table.clone());
        Ok(())
    }
}
