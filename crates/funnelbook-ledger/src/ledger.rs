// SPDX-License-Identifier: Apache-2.0

use crate::clock::{Clock, SystemClock};
use crate::error::{LedgerError, LedgerErrorCode};
use crate::session::Session;
use chrono::{DateTime, NaiveDate, Utc};
use funnelbook_model::{
    parse_recorded_at, AccountPlan, ClientId, Collection, Opportunity, OpportunityNumber,
    Product, Stage, Status, Table, VisitLog,
};
use funnelbook_store::TabularStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Candidate record for a brand-new opportunity, as collected by the form.
#[derive(Debug, Clone)]
pub struct OpportunityDraft {
    pub client_id: ClientId,
    pub client_name: String,
    pub product: Product,
    pub value: f64,
    pub expected_close_date: NaiveDate,
    pub status: Status,
}

/// Candidate account-plan narrative. Fields left empty stay empty in the
/// appended row; merging against the current plan is the form's job.
#[derive(Debug, Clone)]
pub struct PlanDraft {
    pub client_id: ClientId,
    pub financial_analysis: String,
    pub financial_analysis_review: String,
    pub value_chain: String,
    pub value_chain_review: String,
    pub cash_flow: String,
    pub cash_flow_review: String,
    pub risks: String,
}

impl PlanDraft {
    #[must_use]
    pub fn new(client_id: ClientId) -> Self {
        Self {
            client_id,
            financial_analysis: String::new(),
            financial_analysis_review: String::new(),
            value_chain: String::new(),
            value_chain_review: String::new(),
            cash_flow: String::new(),
            cash_flow_review: String::new(),
            risks: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisitDraft {
    pub client_id: ClientId,
    pub contact_date: NaiveDate,
    pub contact_name: String,
    pub topics: String,
    pub outcomes: String,
    pub next_objective: String,
    pub next_date: Option<NaiveDate>,
}

/// Latest known state of one opportunity, read back permissively: cells
/// are reported as raw text because historical rows may predate the value
/// catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpportunitySnapshot {
    pub number: u64,
    pub client_name: String,
    pub product: String,
    pub value: String,
    pub expected_close_date: String,
    pub stage: String,
    pub status: String,
    pub owner: String,
    pub recorded_at: String,
}

/// The "current" account plan for a client: the row with the latest
/// `fecha_gestion`. Raw text for the same reason as above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSnapshot {
    pub financial_analysis: String,
    pub financial_analysis_review: String,
    pub value_chain: String,
    pub value_chain_review: String,
    pub cash_flow: String,
    pub cash_flow_review: String,
    pub risks: String,
    pub owner: String,
    pub recorded_at: String,
}

/// Append-only ledger service over one tabular store.
///
/// Every commit is an unguarded-at-the-store read-modify-write over the
/// entire collection; the in-process mutex serializes those cycles so two
/// concurrent submissions in one process can neither lose an update nor
/// share a sequence number. Writers in other processes remain unserialized
/// and undetected.
pub struct Ledger<S: TabularStore> {
    store: S,
    clock: Box<dyn Clock>,
    commit: Mutex<()>,
}

impl<S: TabularStore> Ledger<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Box::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(store: S, clock: Box<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            commit: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Next sequence number derived from the current `funnel` snapshot:
    /// max of the leniently-parsed `no_oportunidad` column plus one, never
    /// below the floor. Never fails; a read error falls back to the floor.
    ///
    /// The result is unique only relative to the snapshot read.
    #[must_use]
    pub fn next_opportunity_number(&self) -> OpportunityNumber {
        self.next_number_unguarded()
    }

    // Callers needing uniqueness hold the commit guard across this read
    // and the append that consumes the number.
    fn next_number_unguarded(&self) -> OpportunityNumber {
        match self.store.read(Collection::Funnel) {
            Ok(table) => Self::sequence_from_table(&table),
            Err(err) => {
                tracing::warn!(error = %err, "funnel read failed, falling back to floor");
                OpportunityNumber::floor()
            }
        }
    }

    fn sequence_from_table(table: &Table) -> OpportunityNumber {
        let max = table
            .column_values("no_oportunidad")
            .into_iter()
            .filter_map(OpportunityNumber::from_cell)
            .map(OpportunityNumber::as_u64)
            .max();
        match max {
            Some(value) => OpportunityNumber::after(value),
            None => OpportunityNumber::floor(),
        }
    }

    /// Appends one record to a collection: re-read the full snapshot, drop
    /// all-empty columns, add the row last, write the whole table back.
    /// Nothing is retried; on write failure the durable table is unchanged.
    pub fn append(
        &self,
        collection: Collection,
        record: &BTreeMap<String, String>,
    ) -> Result<(), LedgerError> {
        let _guard = self.commit_guard()?;
        self.append_locked(collection, record)
    }

    fn append_locked(
        &self,
        collection: Collection,
        record: &BTreeMap<String, String>,
    ) -> Result<(), LedgerError> {
        let mut table = self.store.read(collection)?;
        if table.columns().is_empty() {
            table = Table::new(collection.columns().iter().copied());
        }
        let dropped = table.drop_empty_columns();
        if !dropped.is_empty() {
            tracing::warn!(
                collection = collection.as_str(),
                dropped = ?dropped,
                "dropped all-empty columns from prior snapshot"
            );
        }
        table.push_record(record);
        self.store.write(collection, &table)?;
        tracing::info!(
            collection = collection.as_str(),
            rows = table.row_count(),
            "appended record"
        );
        Ok(())
    }

    /// Creates a new opportunity: assigns the sequence number and the
    /// `recorded_at` stamp, stage Gestión Inicial, and commits. Number
    /// derivation and append happen under one commit guard.
    pub fn record_opportunity(
        &self,
        session: &Session,
        draft: OpportunityDraft,
    ) -> Result<Opportunity, LedgerError> {
        let _guard = self.commit_guard()?;
        let number = self.next_number_unguarded();
        let opportunity = Opportunity {
            client_id: draft.client_id,
            client_name: draft.client_name,
            number,
            product: draft.product,
            value: draft.value,
            expected_close_date: draft.expected_close_date,
            stage: Stage::Inicial,
            status: draft.status,
            owner: session.operator().clone(),
            recorded_at: self.clock.now(),
        };
        opportunity.validate()?;
        self.append_locked(Collection::Funnel, &opportunity.to_cells())?;
        Ok(opportunity)
    }

    /// Appends a progress snapshot for an existing opportunity, carrying
    /// the identifying cells forward from its latest row. Stage is always
    /// Actualización; any status may follow any other status.
    pub fn record_progress(
        &self,
        session: &Session,
        client_id: ClientId,
        number: OpportunityNumber,
        status: Status,
    ) -> Result<(), LedgerError> {
        let table = self.store.read(Collection::Funnel)?;
        let row = latest_row(&table, |t, idx| {
            t.cell(idx, "cliente_id")
                .and_then(ClientId::from_cell)
                .is_some_and(|c| c == client_id)
                && t.cell(idx, "no_oportunidad")
                    .and_then(OpportunityNumber::from_cell)
                    .is_some_and(|n| n == number)
        })
        .ok_or_else(|| {
            LedgerError::new(
                LedgerErrorCode::Validation,
                format!("no prior history for client {client_id}, opportunity {number}"),
            )
        })?;

        let mut cells = BTreeMap::new();
        for column in ["cliente_id", "cliente_nombre", "no_oportunidad", "producto", "valor", "fecha_cierre"] {
            cells.insert(
                column.to_string(),
                table.cell(row, column).unwrap_or_default().to_string(),
            );
        }
        cells.insert(
            "etapa".to_string(),
            Stage::Actualizacion.as_str().to_string(),
        );
        cells.insert("estado".to_string(), status.as_str().to_string());
        cells.insert(
            "comercial_id".to_string(),
            session.operator().to_string(),
        );
        cells.insert(
            "fecha_gestion".to_string(),
            funnelbook_model::format_recorded_at(self.clock.now()),
        );
        self.append(Collection::Funnel, &cells)
    }

    pub fn record_plan(
        &self,
        session: &Session,
        draft: PlanDraft,
    ) -> Result<AccountPlan, LedgerError> {
        let plan = AccountPlan {
            client_id: draft.client_id,
            financial_analysis: draft.financial_analysis,
            financial_analysis_review: draft.financial_analysis_review,
            value_chain: draft.value_chain,
            value_chain_review: draft.value_chain_review,
            cash_flow: draft.cash_flow,
            cash_flow_review: draft.cash_flow_review,
            risks: draft.risks,
            owner: session.operator().clone(),
            recorded_at: self.clock.now(),
        };
        self.append(Collection::PlanCuenta, &plan.to_cells())?;
        Ok(plan)
    }

    pub fn record_visit(
        &self,
        session: &Session,
        draft: VisitDraft,
    ) -> Result<VisitLog, LedgerError> {
        let visit = VisitLog {
            client_id: draft.client_id,
            contact_date: draft.contact_date,
            contact_name: draft.contact_name,
            topics: draft.topics,
            outcomes: draft.outcomes,
            next_objective: draft.next_objective,
            next_date: draft.next_date,
            owner: session.operator().clone(),
            recorded_at: self.clock.now(),
        };
        visit.validate()?;
        self.append(Collection::Bitacora, &visit.to_cells())?;
        Ok(visit)
    }

    /// Latest snapshot per opportunity number for one client, sorted by
    /// number. Drives the progress form's pick list.
    pub fn client_opportunities(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<OpportunitySnapshot>, LedgerError> {
        let table = self.store.read(Collection::Funnel)?;
        let mut latest: BTreeMap<u64, (Option<DateTime<Utc>>, usize)> = BTreeMap::new();
        for idx in 0..table.row_count() {
            let matches_client = table
                .cell(idx, "cliente_id")
                .and_then(ClientId::from_cell)
                .is_some_and(|c| c == client_id);
            if !matches_client {
                continue;
            }
            let Some(number) = table
                .cell(idx, "no_oportunidad")
                .and_then(OpportunityNumber::from_cell)
            else {
                continue;
            };
            let at = table.cell(idx, "fecha_gestion").and_then(parse_recorded_at);
            let entry = latest.entry(number.as_u64()).or_insert((at, idx));
            // Ties keep the later row: last appended wins.
            if at >= entry.0 {
                *entry = (at, idx);
            }
        }
        Ok(latest
            .into_iter()
            .map(|(number, (_, idx))| OpportunitySnapshot {
                number,
                client_name: table.cell(idx, "cliente_nombre").unwrap_or_default().to_string(),
                product: table.cell(idx, "producto").unwrap_or_default().to_string(),
                value: table.cell(idx, "valor").unwrap_or_default().to_string(),
                expected_close_date: table
                    .cell(idx, "fecha_cierre")
                    .unwrap_or_default()
                    .to_string(),
                stage: table.cell(idx, "etapa").unwrap_or_default().to_string(),
                status: table.cell(idx, "estado").unwrap_or_default().to_string(),
                owner: table.cell(idx, "comercial_id").unwrap_or_default().to_string(),
                recorded_at: table
                    .cell(idx, "fecha_gestion")
                    .unwrap_or_default()
                    .to_string(),
            })
            .collect())
    }

    /// The client's current plan: row with the latest `fecha_gestion`
    /// among rows matching the client. Used as the pre-filled defaults of
    /// the plan form.
    pub fn current_plan(
        &self,
        client_id: ClientId,
    ) -> Result<Option<PlanSnapshot>, LedgerError> {
        let table = self.store.read(Collection::PlanCuenta)?;
        let row = latest_row(&table, |t, idx| {
            t.cell(idx, "cliente_id")
                .and_then(ClientId::from_cell)
                .is_some_and(|c| c == client_id)
        });
        Ok(row.map(|idx| PlanSnapshot {
            financial_analysis: table
                .cell(idx, "analisis_fin_pos")
                .unwrap_or_default()
                .to_string(),
            financial_analysis_review: table
                .cell(idx, "analisis_fin_rev")
                .unwrap_or_default()
                .to_string(),
            value_chain: table
                .cell(idx, "cadena_valor_pos")
                .unwrap_or_default()
                .to_string(),
            value_chain_review: table
                .cell(idx, "cadena_valor_rev")
                .unwrap_or_default()
                .to_string(),
            cash_flow: table
                .cell(idx, "flujo_efec_pos")
                .unwrap_or_default()
                .to_string(),
            cash_flow_review: table
                .cell(idx, "flujo_efec_rev")
                .unwrap_or_default()
                .to_string(),
            risks: table.cell(idx, "riesgos").unwrap_or_default().to_string(),
            owner: table.cell(idx, "comercial_id").unwrap_or_default().to_string(),
            recorded_at: table
                .cell(idx, "fecha_gestion")
                .unwrap_or_default()
                .to_string(),
        }))
    }

    fn commit_guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, LedgerError> {
        self.commit
            .lock()
            .map_err(|_| LedgerError::new(LedgerErrorCode::Internal, "commit lock poisoned"))
    }
}

/// Row index with the maximum parseable `fecha_gestion` among rows the
/// predicate selects. Unparseable stamps sort as oldest; ties keep the
/// later row, matching "last appended wins".
fn latest_row<F>(table: &Table, select: F) -> Option<usize>
where
    F: Fn(&Table, usize) -> bool,
{
    let mut best: Option<(Option<DateTime<Utc>>, usize)> = None;
    for idx in 0..table.row_count() {
        if !select(table, idx) {
            continue;
        }
        let at = table.cell(idx, "fecha_gestion").and_then(parse_recorded_at);
        match &best {
            Some((best_at, _)) if at < *best_at => {}
            _ => best = Some((at, idx)),
        }
    }
    best.map(|(_, idx)| idx)
}
