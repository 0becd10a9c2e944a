#![forbid(unsafe_code)]
//! Funnelbook model SSOT.
//!
//! Typed identifiers, record structs, the value catalogs, canonical
//! collection schemas, and the [`Table`] snapshot type. No I/O lives here.

mod catalog;
mod ids;
mod record;
mod schema;
mod table;

pub use catalog::{Product, Stage, Status};
pub use ids::{
    parse_client_id, parse_operator_id, ClientId, OperatorId, OpportunityNumber, ValidationError,
    OPERATOR_MAX_LEN, OPPORTUNITY_NUMBER_FLOOR,
};
pub use record::{
    format_recorded_at, parse_recorded_at, AccountPlan, Opportunity, VisitLog, DATE_FORMAT,
};
pub use schema::{
    Collection, BITACORA_COLUMNS, FUNNEL_COLUMNS, PLAN_CUENTA_COLUMNS, SCHEMA_VERSION,
};
pub use table::Table;

pub const CRATE_NAME: &str = "funnelbook-model";
