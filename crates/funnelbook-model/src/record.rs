use crate::catalog::{Product, Stage, Status};
use crate::ids::{ClientId, OperatorId, OpportunityNumber, ValidationError};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical wire encoding of `fecha_gestion`: RFC 3339 UTC with
/// microsecond precision.
#[must_use]
pub fn format_recorded_at(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Lenient reader for `fecha_gestion` cells. Accepts the canonical RFC
/// 3339 form and the space-separated variant older rows carry; anything
/// else yields `None` and sorts as oldest.
#[must_use]
pub fn parse_recorded_at(cell: &str) -> Option<DateTime<Utc>> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// One snapshot of an opportunity's stage/status at `recorded_at`.
/// Multiple rows share one `number`, each a historical fact; rows are
/// never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Opportunity {
    pub client_id: ClientId,
    pub client_name: String,
    pub number: OpportunityNumber,
    pub product: Product,
    pub value: f64,
    pub expected_close_date: NaiveDate,
    pub stage: Stage,
    pub status: Status,
    pub owner: OperatorId,
    pub recorded_at: DateTime<Utc>,
}

impl Opportunity {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.client_name.trim().is_empty() {
            return Err(ValidationError("client name must not be empty".to_string()));
        }
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(ValidationError(
                "opportunity value must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn to_cells(&self) -> BTreeMap<String, String> {
        let mut cells = BTreeMap::new();
        cells.insert("cliente_id".to_string(), self.client_id.to_string());
        cells.insert("cliente_nombre".to_string(), self.client_name.clone());
        cells.insert("no_oportunidad".to_string(), self.number.to_string());
        cells.insert("producto".to_string(), self.product.as_str().to_string());
        cells.insert("valor".to_string(), self.value.to_string());
        cells.insert(
            "fecha_cierre".to_string(),
            self.expected_close_date.format(DATE_FORMAT).to_string(),
        );
        cells.insert("etapa".to_string(), self.stage.as_str().to_string());
        cells.insert("estado".to_string(), self.status.as_str().to_string());
        cells.insert("comercial_id".to_string(), self.owner.to_string());
        cells.insert(
            "fecha_gestion".to_string(),
            format_recorded_at(self.recorded_at),
        );
        cells
    }
}

/// Account-plan narrative for a client. Append-only; the "current" plan is
/// the row with the latest `recorded_at` for the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountPlan {
    pub client_id: ClientId,
    pub financial_analysis: String,
    pub financial_analysis_review: String,
    pub value_chain: String,
    pub value_chain_review: String,
    pub cash_flow: String,
    pub cash_flow_review: String,
    pub risks: String,
    pub owner: OperatorId,
    pub recorded_at: DateTime<Utc>,
}

impl AccountPlan {
    #[must_use]
    pub fn to_cells(&self) -> BTreeMap<String, String> {
        let mut cells = BTreeMap::new();
        cells.insert("cliente_id".to_string(), self.client_id.to_string());
        cells.insert(
            "analisis_fin_pos".to_string(),
            self.financial_analysis.clone(),
        );
        cells.insert(
            "analisis_fin_rev".to_string(),
            self.financial_analysis_review.clone(),
        );
        cells.insert("cadena_valor_pos".to_string(), self.value_chain.clone());
        cells.insert(
            "cadena_valor_rev".to_string(),
            self.value_chain_review.clone(),
        );
        cells.insert("flujo_efec_pos".to_string(), self.cash_flow.clone());
        cells.insert("flujo_efec_rev".to_string(), self.cash_flow_review.clone());
        cells.insert("riesgos".to_string(), self.risks.clone());
        cells.insert("comercial_id".to_string(), self.owner.to_string());
        cells.insert(
            "fecha_gestion".to_string(),
            format_recorded_at(self.recorded_at),
        );
        cells
    }
}

/// One visit to a client. Purely additive: there is no "current" visit,
/// every row is a historical fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VisitLog {
    pub client_id: ClientId,
    pub contact_date: NaiveDate,
    pub contact_name: String,
    pub topics: String,
    pub outcomes: String,
    pub next_objective: String,
    pub next_date: Option<NaiveDate>,
    pub owner: OperatorId,
    pub recorded_at: DateTime<Utc>,
}

impl VisitLog {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.contact_name.trim().is_empty() {
            return Err(ValidationError(
                "contact name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn to_cells(&self) -> BTreeMap<String, String> {
        let mut cells = BTreeMap::new();
        cells.insert("cliente_id".to_string(), self.client_id.to_string());
        cells.insert(
            "fecha_contacto".to_string(),
            self.contact_date.format(DATE_FORMAT).to_string(),
        );
        cells.insert("nombre_contacto".to_string(), self.contact_name.clone());
        cells.insert("temas".to_string(), self.topics.clone());
        cells.insert("acuerdos".to_string(), self.outcomes.clone());
        cells.insert("proximo_objetivo".to_string(), self.next_objective.clone());
        cells.insert(
            "proxima_fecha".to_string(),
            self.next_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        );
        cells.insert("comercial_id".to_string(), self.owner.to_string());
        cells.insert(
            "fecha_gestion".to_string(),
            format_recorded_at(self.recorded_at),
        );
        cells
    }
}
