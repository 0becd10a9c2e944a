// SPDX-License-Identifier: Apache-2.0

use crate::backend::{StoreError, StoreErrorCode, TabularStore};
use crate::codec::{table_from_csv, table_to_csv};
use crate::sha256_hex;
use funnelbook_model::{Collection, Table};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One CSV file per collection under a root directory.
///
/// A write publishes atomically: payload and checksum sidecar are staged as
/// tmp files and renamed into place while a per-collection lock file is
/// held. Reads soft-verify the sidecar and report a mismatch as a typed
/// error instead of returning torn data.
pub struct LocalFsStore {
    root: PathBuf,
}

impl LocalFsStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn csv_path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.csv", collection.as_str()))
    }

    fn checksum_path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.csv.sha256", collection.as_str()))
    }

    fn lock_path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.csv.lock", collection.as_str()))
    }
}

impl TabularStore for LocalFsStore {
    fn read(&self, collection: Collection) -> Result<Table, StoreError> {
        let path = self.csv_path(collection);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Table::empty()),
            Err(err) => {
                return Err(StoreError::new(
                    StoreErrorCode::Io,
                    format!("read {}: {err}", path.display()),
                ))
            }
        };
        match fs::read_to_string(self.checksum_path(collection)) {
            Ok(expected) => {
                let actual = sha256_hex(&bytes);
                if expected.trim() != actual {
                    return Err(StoreError::new(
                        StoreErrorCode::Validation,
                        format!(
                            "checksum mismatch for collection {collection}: expected {}, got {actual}",
                            expected.trim()
                        ),
                    ));
                }
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                return Err(StoreError::new(
                    StoreErrorCode::Io,
                    format!("read checksum for {collection}: {err}"),
                ))
            }
        }
        table_from_csv(&bytes)
    }

    fn write(&self, collection: Collection, table: &Table) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root).map_err(|e| {
            StoreError::new(
                StoreErrorCode::Io,
                format!("create store root {}: {e}", self.root.display()),
            )
        })?;
        let _lock = WriteLockGuard::acquire(self.lock_path(collection))?;

        let bytes = table_to_csv(table)?;
        let checksum = sha256_hex(&bytes);

        let csv_path = self.csv_path(collection);
        let checksum_path = self.checksum_path(collection);
        let csv_tmp = csv_path.with_extension("csv.tmp");
        let checksum_tmp = checksum_path.with_extension("sha256.tmp");

        fs::write(&csv_tmp, &bytes)
            .map_err(|e| StoreError::new(StoreErrorCode::Io, format!("stage write: {e}")))?;
        fs::write(&checksum_tmp, &checksum)
            .map_err(|e| StoreError::new(StoreErrorCode::Io, format!("stage checksum: {e}")))?;
        fs::rename(&csv_tmp, &csv_path)
            .map_err(|e| StoreError::new(StoreErrorCode::Io, format!("publish write: {e}")))?;
        fs::rename(&checksum_tmp, &checksum_path)
            .map_err(|e| StoreError::new(StoreErrorCode::Io, format!("publish checksum: {e}")))?;

        tracing::debug!(
            collection = collection.as_str(),
            rows = table.row_count(),
            "published collection snapshot"
        );
        Ok(())
    }
}

struct WriteLockGuard {
    path: PathBuf,
}

impl WriteLockGuard {
    fn acquire(path: PathBuf) -> Result<Self, StoreError> {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(Self { path }),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => Err(StoreError::new(
                StoreErrorCode::Conflict,
                format!("write already in progress: {}", path.display()),
            )),
            Err(err) => Err(StoreError::new(
                StoreErrorCode::Io,
                format!("acquire write lock {}: {err}", path.display()),
            )),
        }
    }
}

impl Drop for WriteLockGuard {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
