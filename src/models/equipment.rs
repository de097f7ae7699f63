//! Equipment model.
//!
//! An assignable physical unit with capabilities, a weather-resistance
//! rating and a maintenance schedule.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::record::{columns, text, Record};
use crate::normalize::{normalize_list, parse_date, same_text};

/// An equipment unit that can be assigned to jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    /// Unique identifier.
    pub id: String,
    /// Model name.
    pub model: String,
    /// Current base location.
    pub location: String,
    /// Free-text status (`Available`, `Maintenance`, `Deployed`, ...).
    pub status: String,
    /// Weather-resistance rating token (e.g. `IP43`, `None`).
    pub weather_resistance: String,
    /// Normalized lowercase capability tokens.
    pub capabilities: BTreeSet<String>,
    /// Next maintenance date, when known.
    pub maintenance_due: Option<NaiveDate>,
}

impl Equipment {
    /// Creates a unit with the given ID and no attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: String::new(),
            location: String::new(),
            status: String::new(),
            weather_resistance: String::new(),
            capabilities: BTreeSet::new(),
            maintenance_due: None,
        }
    }

    /// Decodes a fleet row.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: text(record, columns::EQUIPMENT_ID),
            model: text(record, columns::MODEL),
            location: text(record, columns::LOCATION),
            status: text(record, columns::STATUS),
            weather_resistance: text(record, columns::WEATHER_RESISTANCE),
            capabilities: normalize_list(&text(record, columns::CAPABILITIES)),
            maintenance_due: parse_date(&text(record, columns::MAINTENANCE_DUE)),
        }
    }

    /// Sets the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the weather-resistance rating.
    pub fn with_weather_resistance(mut self, resistance: impl Into<String>) -> Self {
        self.weather_resistance = resistance.into();
        self
    }

    /// Replaces capabilities from a comma-separated list.
    pub fn with_capabilities(mut self, raw: &str) -> Self {
        self.capabilities = normalize_list(raw);
        self
    }

    /// Sets the maintenance due date.
    pub fn with_maintenance_due(mut self, due: NaiveDate) -> Self {
        self.maintenance_due = Some(due);
        self
    }

    /// Whether the status reads `available`.
    pub fn is_available(&self) -> bool {
        same_text(&self.status, "available")
    }

    /// Whether the status reads exactly `maintenance`.
    pub fn in_maintenance(&self) -> bool {
        same_text(&self.status, "maintenance")
    }

    /// Whether the unit has a (normalized) capability.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}
