use crate::commands::{OpportunityCommand, PlanCommand, ReportCommand, VisitCommand};
use crate::OutputMode;
use chrono::NaiveDate;
use funnelbook_ledger::{
    export_csv, report_file_name, Ledger, LedgerError, LedgerErrorCode, OpportunityDraft,
    PlanDraft, Session, SystemClock, VisitDraft,
};
use funnelbook_model::{
    ClientId, Collection, OpportunityNumber, Product, Stage, Status, DATE_FORMAT,
};
use funnelbook_store::{table_from_csv, LocalFsStore};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

pub(crate) fn opportunity(
    ledger: &Ledger<LocalFsStore>,
    operator: Option<&str>,
    command: OpportunityCommand,
    output_mode: OutputMode,
) -> Result<(), LedgerError> {
    match command {
        OpportunityCommand::New {
            client_id,
            client_name,
            product,
            value,
            close_date,
            status,
        } => {
            let session = require_session(operator)?;
            let draft = OpportunityDraft {
                client_id: ClientId::new(client_id)?,
                client_name,
                product: Product::parse(&product)?,
                value,
                expected_close_date: parse_date(&close_date)?,
                status: Status::parse(&status)?,
            };
            let recorded = ledger.record_opportunity(&session, draft)?;
            emit_ok(
                output_mode,
                json!({
                    "command": "opportunity new",
                    "status": "ok",
                    "number": recorded.number.as_u64(),
                    "client_id": recorded.client_id.as_u64(),
                    "recorded_at": funnelbook_model::format_recorded_at(recorded.recorded_at),
                }),
            )
        }
        OpportunityCommand::Advance {
            client_id,
            number,
            status,
        } => {
            let session = require_session(operator)?;
            let client_id = ClientId::new(client_id)?;
            let number = OpportunityNumber::new(number);
            ledger.record_progress(&session, client_id, number, Status::parse(&status)?)?;
            emit_ok(
                output_mode,
                json!({
                    "command": "opportunity advance",
                    "status": "ok",
                    "number": number.as_u64(),
                    "client_id": client_id.as_u64(),
                }),
            )
        }
        OpportunityCommand::List { client_id } => {
            let snapshots = ledger.client_opportunities(ClientId::new(client_id)?)?;
            emit_ok(
                output_mode,
                json!({
                    "command": "opportunity list",
                    "status": "ok",
                    "client_id": client_id,
                    "opportunities": snapshots,
                }),
            )
        }
    }
}

pub(crate) fn plan(
    ledger: &Ledger<LocalFsStore>,
    operator: Option<&str>,
    command: PlanCommand,
    output_mode: OutputMode,
) -> Result<(), LedgerError> {
    match command {
        PlanCommand::Save {
            client_id,
            fin_analysis,
            fin_analysis_review,
            value_chain,
            value_chain_review,
            cash_flow,
            cash_flow_review,
            risks,
        } => {
            let session = require_session(operator)?;
            let client_id = ClientId::new(client_id)?;
            // The form pre-fills from the current plan; omitted fields
            // carry forward instead of blanking history.
            let current = ledger.current_plan(client_id)?;
            let mut draft = PlanDraft::new(client_id);
            if let Some(current) = &current {
                draft.financial_analysis = current.financial_analysis.clone();
                draft.financial_analysis_review = current.financial_analysis_review.clone();
                draft.value_chain = current.value_chain.clone();
                draft.value_chain_review = current.value_chain_review.clone();
                draft.cash_flow = current.cash_flow.clone();
                draft.cash_flow_review = current.cash_flow_review.clone();
                draft.risks = current.risks.clone();
            }
            if let Some(v) = fin_analysis {
                draft.financial_analysis = v;
            }
            if let Some(v) = fin_analysis_review {
                draft.financial_analysis_review = v;
            }
            if let Some(v) = value_chain {
                draft.value_chain = v;
            }
            if let Some(v) = value_chain_review {
                draft.value_chain_review = v;
            }
            if let Some(v) = cash_flow {
                draft.cash_flow = v;
            }
            if let Some(v) = cash_flow_review {
                draft.cash_flow_review = v;
            }
            if let Some(v) = risks {
                draft.risks = v;
            }
            let plan = ledger.record_plan(&session, draft)?;
            emit_ok(
                output_mode,
                json!({
                    "command": "plan save",
                    "status": "ok",
                    "client_id": plan.client_id.as_u64(),
                    "recorded_at": funnelbook_model::format_recorded_at(plan.recorded_at),
                }),
            )
        }
        PlanCommand::Show { client_id } => {
            let current = ledger.current_plan(ClientId::new(client_id)?)?;
            emit_ok(
                output_mode,
                json!({
                    "command": "plan show",
                    "status": "ok",
                    "client_id": client_id,
                    "plan": current,
                }),
            )
        }
    }
}

pub(crate) fn visit(
    ledger: &Ledger<LocalFsStore>,
    operator: Option<&str>,
    command: VisitCommand,
    output_mode: OutputMode,
) -> Result<(), LedgerError> {
    match command {
        VisitCommand::Log {
            client_id,
            contact_date,
            contact_name,
            topics,
            outcomes,
            next_objective,
            next_date,
        } => {
            let session = require_session(operator)?;
            let draft = VisitDraft {
                client_id: ClientId::new(client_id)?,
                contact_date: parse_date(&contact_date)?,
                contact_name,
                topics,
                outcomes,
                next_objective,
                next_date: next_date.as_deref().map(parse_date).transpose()?,
            };
            let visit = ledger.record_visit(&session, draft)?;
            emit_ok(
                output_mode,
                json!({
                    "command": "visit log",
                    "status": "ok",
                    "client_id": visit.client_id.as_u64(),
                    "recorded_at": funnelbook_model::format_recorded_at(visit.recorded_at),
                }),
            )
        }
    }
}

pub(crate) fn report(
    ledger: &Ledger<LocalFsStore>,
    command: ReportCommand,
    output_mode: OutputMode,
) -> Result<(), LedgerError> {
    match command {
        ReportCommand::Export { collection, out } => {
            let collection = Collection::parse(&collection)?;
            let bytes = export_csv(ledger.store(), collection)?;
            // Cells may carry embedded newlines, so count decoded records,
            // not newline bytes.
            let rows = table_from_csv(&bytes)?.row_count();
            let out: PathBuf = out.unwrap_or_else(|| {
                PathBuf::from(report_file_name(collection, chrono::Utc::now().date_naive()))
            });
            fs::write(&out, &bytes).map_err(|e| {
                LedgerError::new(
                    LedgerErrorCode::Store,
                    format!("write report {}: {e}", out.display()),
                )
            })?;
            emit_ok(
                output_mode,
                json!({
                    "command": "report export",
                    "status": "ok",
                    "collection": collection.as_str(),
                    "rows": rows,
                    "out": out,
                }),
            )
        }
    }
}

pub(crate) fn catalog(output_mode: OutputMode) -> Result<(), LedgerError> {
    emit_ok(
        output_mode,
        json!({
            "command": "catalog",
            "status": "ok",
            "products": Product::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            "stages": Stage::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            "statuses": Status::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            "collections": Collection::ALL.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
        }),
    )
}

fn require_session(operator: Option<&str>) -> Result<Session, LedgerError> {
    let identifier = operator.ok_or_else(|| {
        LedgerError::new(
            LedgerErrorCode::Validation,
            "--operator is required for this command",
        )
    })?;
    Session::login(identifier, &SystemClock)
}

fn parse_date(input: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
        LedgerError::new(
            LedgerErrorCode::Validation,
            format!("date must be YYYY-MM-DD: {input}"),
        )
    })
}

pub(crate) fn emit_ok(output_mode: OutputMode, payload: serde_json::Value) -> Result<(), LedgerError> {
    let rendered = if output_mode.json {
        serde_json::to_string(&payload)
    } else {
        serde_json::to_string_pretty(&payload)
    }
    .map_err(|e| LedgerError::new(LedgerErrorCode::Internal, e.to_string()))?;
    println!("{rendered}");
    Ok(())
}
