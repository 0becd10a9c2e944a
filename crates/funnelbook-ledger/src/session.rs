use crate::clock::Clock;
use crate::error::LedgerError;
use chrono::{DateTime, Utc};
use funnelbook_model::OperatorId;

/// Explicit per-session context, scoped to one operator's active session
/// and dropped on logout. Replaces the ambient global session state of the
/// original form application.
#[derive(Debug, Clone)]
pub struct Session {
    operator: OperatorId,
    started_at: DateTime<Utc>,
}

impl Session {
    /// The entire login gate: any non-empty free-text identifier is
    /// accepted. No password, no identity verification.
    pub fn login(identifier: &str, clock: &dyn Clock) -> Result<Self, LedgerError> {
        let operator = OperatorId::parse(identifier)?;
        Ok(Self {
            operator,
            started_at: clock.now(),
        })
    }

    #[must_use]
    pub fn operator(&self) -> &OperatorId {
        &self.operator
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
