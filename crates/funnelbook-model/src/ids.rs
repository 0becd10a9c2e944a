use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const OPERATOR_MAX_LEN: usize = 64;

/// Minimum valid opportunity sequence number. Used whenever no prior
/// numeric value exists in the `funnel` collection.
pub const OPPORTUNITY_NUMBER_FLOOR: u64 = 100_000;

pub fn parse_operator_id(input: &str) -> Result<OperatorId, ValidationError> {
    OperatorId::parse(input)
}

pub fn parse_client_id(input: &str) -> Result<ClientId, ValidationError> {
    ClientId::parse(input)
}

/// Free-text operator identity. Any non-empty trimmed string is accepted;
/// there is no authentication behind it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct OperatorId(String);

impl OperatorId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError(
                "operator id must not be empty".to_string(),
            ));
        }
        if s.len() > OPERATOR_MAX_LEN {
            return Err(ValidationError(format!(
                "operator id exceeds max length {OPERATOR_MAX_LEN}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for OperatorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
#[serde(transparent)]
#[non_exhaustive]
pub struct ClientId(u64);

impl ClientId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("client id must not be empty".to_string()));
        }
        let value: u64 = s
            .parse()
            .map_err(|_| ValidationError(format!("client id must be a positive integer: {s}")))?;
        Self::new(value)
    }

    pub fn new(value: u64) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError(
                "client id must be greater than zero".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Lenient cell reader. Spreadsheet connectors re-type integer columns
    /// as floats, so `12.0` still identifies client 12.
    #[must_use]
    pub fn from_cell(cell: &str) -> Option<Self> {
        let value = parse_numeric_cell(cell)?;
        Self::new(value).ok()
    }

    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl Display for ClientId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a logical opportunity across its snapshot history. Assigned
/// once, at creation, never reused for a different client/product.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord,
)]
#[serde(transparent)]
#[non_exhaustive]
pub struct OpportunityNumber(u64);

impl OpportunityNumber {
    /// Wraps an already-known number, e.g. one picked from a listing. The
    /// floor constrains only generation, not readback of history.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        let value: u64 = s.parse().map_err(|_| {
            ValidationError(format!("opportunity number must be a non-negative integer: {s}"))
        })?;
        Ok(Self(value))
    }

    /// Lenient cell reader used when scanning the `no_oportunidad` column.
    /// Values that do not parse as non-negative integers are ignored by the
    /// caller rather than failing the scan.
    #[must_use]
    pub fn from_cell(cell: &str) -> Option<Self> {
        parse_numeric_cell(cell).map(Self)
    }

    #[must_use]
    pub const fn floor() -> Self {
        Self(OPPORTUNITY_NUMBER_FLOOR)
    }

    /// Successor of the highest observed value, clamped so a corrupted
    /// maximum below the floor still yields the floor.
    #[must_use]
    pub const fn after(max_observed: u64) -> Self {
        let next = max_observed.saturating_add(1);
        if next < OPPORTUNITY_NUMBER_FLOOR {
            Self(OPPORTUNITY_NUMBER_FLOOR)
        } else {
            Self(next)
        }
    }

    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl Display for OpportunityNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn parse_numeric_cell(cell: &str) -> Option<u64> {
    let s = cell.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(v) = s.parse::<u64>() {
        return Some(v);
    }
    // Float text with a zero fraction, e.g. "100007.0".
    let f = s.parse::<f64>().ok()?;
    if !f.is_finite() || f < 0.0 || f.fract() != 0.0 {
        return None;
    }
    Some(f as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_parse_leniently() {
        assert_eq!(parse_numeric_cell("100007"), Some(100_007));
        assert_eq!(parse_numeric_cell(" 100007 "), Some(100_007));
        assert_eq!(parse_numeric_cell("100007.0"), Some(100_007));
        assert_eq!(parse_numeric_cell("bad"), None);
        assert_eq!(parse_numeric_cell(""), None);
        assert_eq!(parse_numeric_cell("100007.5"), None);
        assert_eq!(parse_numeric_cell("-3"), None);
    }
}
