//! Value catalogs for opportunity rows.
//!
//! These enumerate the valid *values*; no transition table exists between
//! them, and the ledger never validates which status follows which.

use crate::ids::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Product {
    #[serde(rename = "Leasing")]
    Leasing,
    #[serde(rename = "Cartera Ordinaria")]
    CarteraOrdinaria,
    #[serde(rename = "CDT")]
    Cdt,
    #[serde(rename = "Cta Corriente")]
    CtaCorriente,
}

impl Product {
    pub const ALL: [Self; 4] = [
        Self::Leasing,
        Self::CarteraOrdinaria,
        Self::Cdt,
        Self::CtaCorriente,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leasing => "Leasing",
            Self::CarteraOrdinaria => "Cartera Ordinaria",
            Self::Cdt => "CDT",
            Self::CtaCorriente => "Cta Corriente",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError(format!("unknown product: {s}")))
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Row provenance: whether the snapshot was written at creation or by a
/// later progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Stage {
    #[serde(rename = "Gestión Inicial")]
    Inicial,
    #[serde(rename = "Actualización")]
    Actualizacion,
}

impl Stage {
    pub const ALL: [Self; 2] = [Self::Inicial, Self::Actualizacion];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inicial => "Gestión Inicial",
            Self::Actualizacion => "Actualización",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ValidationError(format!("unknown stage: {s}")))
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Status {
    #[serde(rename = "Planeada")]
    Planeada,
    #[serde(rename = "En contacto")]
    EnContacto,
    #[serde(rename = "Interesado")]
    Interesado,
    #[serde(rename = "En proceso")]
    EnProceso,
    #[serde(rename = "Cerrada Ganada")]
    CerradaGanada,
    #[serde(rename = "Cerrada Perdida")]
    CerradaPerdida,
}

impl Status {
    pub const ALL: [Self; 6] = [
        Self::Planeada,
        Self::EnContacto,
        Self::Interesado,
        Self::EnProceso,
        Self::CerradaGanada,
        Self::CerradaPerdida,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planeada => "Planeada",
            Self::EnContacto => "En contacto",
            Self::Interesado => "Interesado",
            Self::EnProceso => "En proceso",
            Self::CerradaGanada => "Cerrada Ganada",
            Self::CerradaPerdida => "Cerrada Perdida",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ValidationError(format!("unknown status: {s}")))
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
