#![forbid(unsafe_code)]
//! Tabular store adapters.
//!
//! The remote spreadsheet behind the original application is reduced to a
//! narrow contract: read a full collection snapshot, write a full
//! replacement snapshot. Two backends implement it — a local CSV-file
//! store with atomic publish, and an in-memory store for tests and
//! injection.

mod backend;
mod codec;
mod local_fs;
mod memory;

pub use backend::{StoreError, StoreErrorCode, TabularStore};
pub use codec::{table_from_csv, table_to_csv};
pub use local_fs::LocalFsStore;
pub use memory::MemoryStore;

use sha2::{Digest, Sha256};

pub const CRATE_NAME: &str = "funnelbook-store";

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
