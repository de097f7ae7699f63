//! Provider rows and numeric cell decoding.
//!
//! A provider hands back tables as ordered rows of column → cell text.
//! Entities decode themselves from these rows; missing columns read as
//! empty cells.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One provider row: column name → cell text.
pub type Record = BTreeMap<String, String>;

/// Column names understood by the entity decoders.
pub mod columns {
    pub const PERSON_ID: &str = "person_id";
    pub const NAME: &str = "name";
    pub const LOCATION: &str = "location";
    pub const STATUS: &str = "status";
    pub const SKILLS: &str = "skills";
    pub const CERTIFICATIONS: &str = "certifications";
    pub const DAILY_RATE: &str = "daily_rate";

    pub const EQUIPMENT_ID: &str = "equipment_id";
    pub const MODEL: &str = "model";
    pub const WEATHER_RESISTANCE: &str = "weather_resistance";
    pub const CAPABILITIES: &str = "capabilities";
    pub const MAINTENANCE_DUE: &str = "maintenance_due";

    pub const JOB_ID: &str = "job_id";
    pub const START_DATE: &str = "start_date";
    pub const END_DATE: &str = "end_date";
    pub const REQUIRED_SKILLS: &str = "required_skills";
    pub const REQUIRED_CERTS: &str = "required_certs";
    pub const WEATHER_FORECAST: &str = "weather_forecast";
    pub const BUDGET: &str = "budget";
    pub const REQUIRED_PERSONS: &str = "required_persons";
    pub const REQUIRED_EQUIPMENT: &str = "required_equipment";
    pub const ASSIGNED_PERSONS: &str = "assigned_persons";
    pub const ASSIGNED_EQUIPMENT: &str = "assigned_equipment";
}

/// Reads a cell, treating a missing column as an empty cell.
pub(crate) fn cell<'a>(record: &'a Record, column: &str) -> &'a str {
    record.get(column).map(String::as_str).unwrap_or("")
}

/// Reads a cell trimmed.
pub(crate) fn text(record: &Record, column: &str) -> String {
    cell(record, column).trim().to_string()
}

/// A currency amount read from a free-text cell.
///
/// Malformed cells are kept as [`Amount::Malformed`] and count as zero
/// wherever a number is needed. They are never raised as errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Amount {
    /// A finite number.
    Value(f64),
    /// Empty or missing cell.
    #[default]
    Absent,
    /// Cell text that does not parse as a number.
    Malformed(String),
}

impl Amount {
    /// Parses cell text. Does not log; see [`Amount::from_cell`].
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return Self::Absent;
        }
        match s.parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Value(v),
            _ => Self::Malformed(s.to_string()),
        }
    }

    /// Parses a record cell, logging malformed values with their origin.
    pub(crate) fn from_cell(record: &Record, column: &str, row_id: &str) -> Self {
        let amount = Self::parse(cell(record, column));
        if let Self::Malformed(raw) = &amount {
            tracing::warn!(row_id, column, raw = %raw, "malformed numeric cell treated as zero");
        }
        amount
    }

    /// The parsed number, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// The parsed number, or zero for absent and malformed cells.
    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    /// Whether the cell held text that failed to parse.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

impl From<f64> for Amount {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Absent => f.write_str("-"),
            Self::Malformed(raw) => f.write_str(raw),
        }
    }
}

/// Parses a resource count, defaulting to 1 when unset, unparsable or zero.
pub(crate) fn parse_count(raw: &str) -> usize {
    let s = raw.trim();
    s.parse::<usize>()
        .ok()
        .or_else(|| {
            // Spreadsheet exports often render integers as "2.0".
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 1.0)
                .map(|v| v as usize)
        })
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_parse() {
        assert_eq!(Amount::parse("3000"), Amount::Value(3000.0));
        assert_eq!(Amount::parse(" 1500.5 "), Amount::Value(1500.5));
        assert_eq!(Amount::parse(""), Amount::Absent);
        assert_eq!(Amount::parse("TBD"), Amount::Malformed("TBD".into()));
        assert_eq!(Amount::parse("NaN"), Amount::Malformed("NaN".into()));
    }

    #[test]
    fn test_amount_or_zero() {
        assert!((Amount::parse("2500").or_zero() - 2500.0).abs() < 1e-10);
        assert!((Amount::parse("n/a").or_zero()).abs() < 1e-10);
        assert!((Amount::Absent.or_zero()).abs() < 1e-10);
        assert!(Amount::parse("n/a").is_malformed());
        assert!(Amount::parse("n/a").value().is_none());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("2"), 2);
        assert_eq!(parse_count("3.0"), 3);
        assert_eq!(parse_count(""), 1);
        assert_eq!(parse_count("0"), 1);
        assert_eq!(parse_count("two"), 1);
        assert_eq!(parse_count("-4"), 1);
    }

    #[test]
    fn test_cell_missing_column() {
        let mut r = Record::new();
        r.insert("name".into(), "  Arjun ".into());
        assert_eq!(text(&r, "name"), "Arjun");
        assert_eq!(cell(&r, "location"), "");
    }
}
