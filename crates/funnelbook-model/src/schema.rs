use crate::ids::ValidationError;
use std::fmt::{Display, Formatter};

/// Canonical schema version. Column names below pick one variant among the
/// field-name drift observed across revisions (e.g. `analisis_fin_pos`
/// over `an_fin_pos`).
pub const SCHEMA_VERSION: u32 = 1;

pub const FUNNEL_COLUMNS: &[&str] = &[
    "cliente_id",
    "cliente_nombre",
    "no_oportunidad",
    "producto",
    "valor",
    "fecha_cierre",
    "etapa",
    "estado",
    "comercial_id",
    "fecha_gestion",
];

pub const PLAN_CUENTA_COLUMNS: &[&str] = &[
    "cliente_id",
    "analisis_fin_pos",
    "analisis_fin_rev",
    "cadena_valor_pos",
    "cadena_valor_rev",
    "flujo_efec_pos",
    "flujo_efec_rev",
    "riesgos",
    "comercial_id",
    "fecha_gestion",
];

pub const BITACORA_COLUMNS: &[&str] = &[
    "cliente_id",
    "fecha_contacto",
    "nombre_contacto",
    "temas",
    "acuerdos",
    "proximo_objetivo",
    "proxima_fecha",
    "comercial_id",
    "fecha_gestion",
];

/// A named collection of records, analogous to one worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Collection {
    Funnel,
    PlanCuenta,
    Bitacora,
}

impl Collection {
    pub const ALL: [Self; 3] = [Self::Funnel, Self::PlanCuenta, Self::Bitacora];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Funnel => "funnel",
            Self::PlanCuenta => "plan_cuenta",
            Self::Bitacora => "bitacora",
        }
    }

    #[must_use]
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Funnel => FUNNEL_COLUMNS,
            Self::PlanCuenta => PLAN_CUENTA_COLUMNS,
            Self::Bitacora => BITACORA_COLUMNS,
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError(format!("unknown collection: {s}")))
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
