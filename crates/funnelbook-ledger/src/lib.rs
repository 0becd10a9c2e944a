#![forbid(unsafe_code)]
//! Append-only ledger over a tabular store.
//!
//! The one piece of real logic in the system: derived sequence numbering
//! for the `funnel` collection, append-only commits, and the "current
//! state" derivations built on top of them.

mod clock;
mod error;
mod ledger;
mod report;
mod session;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{LedgerError, LedgerErrorCode};
pub use ledger::{
    Ledger, OpportunityDraft, OpportunitySnapshot, PlanDraft, PlanSnapshot, VisitDraft,
};
pub use report::{export_csv, report_file_name};
pub use session::Session;

use std::path::PathBuf;

pub const CRATE_NAME: &str = "funnelbook-ledger";

pub const ENV_FUNNELBOOK_LOG: &str = "FUNNELBOOK_LOG";
pub const ENV_FUNNELBOOK_DATA_DIR: &str = "FUNNELBOOK_DATA_DIR";

/// Data-root resolution: explicit env var, then XDG data home, then a
/// home-relative default.
#[must_use]
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(explicit) = std::env::var(ENV_FUNNELBOOK_DATA_DIR) {
        let trimmed = explicit.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        let trimmed = xdg_data_home.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed).join("funnelbook");
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed)
                .join(".local")
                .join("share")
                .join("funnelbook");
        }
    }

    PathBuf::from(".funnelbook")
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    DependencyFailure = 4,
    Internal = 10,
}

impl ExitCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::Validation => "validation",
            Self::DependencyFailure => "dependency_failure",
            Self::Internal => "internal",
        }
    }
}
