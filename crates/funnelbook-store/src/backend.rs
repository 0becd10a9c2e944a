// SPDX-License-Identifier: Apache-2.0

use funnelbook_model::{Collection, Table};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    NotFound,
    Validation,
    Conflict,
    Io,
    Codec,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation_error",
            Self::Conflict => "conflict",
            Self::Io => "io_error",
            Self::Codec => "codec_error",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// The full adapter contract. `read` of a collection that has never been
/// written yields an empty table rather than an error (fails-soft); `write`
/// replaces the entire durable snapshot and is atomic-or-failed as a whole.
pub trait TabularStore: Send + Sync {
    fn read(&self, collection: Collection) -> Result<Table, StoreError>;
    fn write(&self, collection: Collection, table: &Table) -> Result<(), StoreError>;
}

impl<T: TabularStore + ?Sized> TabularStore for &T {
    fn read(&self, collection: Collection) -> Result<Table, StoreError> {
        (**self).read(collection)
    }

    fn write(&self, collection: Collection, table: &Table) -> Result<(), StoreError> {
        (**self).write(collection, table)
    }
}

impl<T: TabularStore + ?Sized> TabularStore for std::sync::Arc<T> {
    fn read(&self, collection: Collection) -> Result<Table, StoreError> {
        (**self).read(collection)
    }

    fn write(&self, collection: Collection, table: &Table) -> Result<(), StoreError> {
        (**self).write(collection, table)
    }
}
