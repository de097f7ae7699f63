//! Job model.
//!
//! A job is a scheduled engagement with a location, a date range,
//! skill/certification requirements, a weather forecast, an optional
//! budget and resource counts. Assignment lists are optional columns.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::record::{cell, columns, parse_count, text, Amount, Record};
use crate::normalize::{normalize_list, parse_date, split_ids};

/// A job to be staffed and equipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier.
    pub id: String,
    /// Job site.
    pub location: String,
    /// First day, when known.
    pub start_date: Option<NaiveDate>,
    /// Last day (inclusive), when known.
    pub end_date: Option<NaiveDate>,
    /// Required skills (normalized).
    pub required_skills: BTreeSet<String>,
    /// Required certifications (normalized).
    pub required_certs: BTreeSet<String>,
    /// Weather forecast token (empty = unset).
    pub weather_forecast: String,
    /// Budget in whole currency units.
    pub budget: Amount,
    /// Number of persons to recommend (at least 1).
    pub required_persons: usize,
    /// Number of equipment units to recommend (at least 1).
    pub required_equipment: usize,
    /// Assigned person IDs, as written.
    pub assigned_persons: Vec<String>,
    /// Assigned equipment IDs, as written.
    pub assigned_equipment: Vec<String>,
}

impl Job {
    /// Creates a job with the given ID and no requirements.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: String::new(),
            start_date: None,
            end_date: None,
            required_skills: BTreeSet::new(),
            required_certs: BTreeSet::new(),
            weather_forecast: String::new(),
            budget: Amount::Absent,
            required_persons: 1,
            required_equipment: 1,
            assigned_persons: Vec::new(),
            assigned_equipment: Vec::new(),
        }
    }

    /// Decodes a job row.
    pub fn from_record(record: &Record) -> Self {
        let id = text(record, columns::JOB_ID);
        let budget = Amount::from_cell(record, columns::BUDGET, &id);
        Self {
            location: text(record, columns::LOCATION),
            start_date: parse_date(cell(record, columns::START_DATE)),
            end_date: parse_date(cell(record, columns::END_DATE)),
            required_skills: normalize_list(cell(record, columns::REQUIRED_SKILLS)),
            required_certs: normalize_list(cell(record, columns::REQUIRED_CERTS)),
            weather_forecast: text(record, columns::WEATHER_FORECAST),
            budget,
            required_persons: parse_count(cell(record, columns::REQUIRED_PERSONS)),
            required_equipment: parse_count(cell(record, columns::REQUIRED_EQUIPMENT)),
            assigned_persons: split_ids(cell(record, columns::ASSIGNED_PERSONS)),
            assigned_equipment: split_ids(cell(record, columns::ASSIGNED_EQUIPMENT)),
            id,
        }
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the date range.
    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Replaces required skills from a comma-separated list.
    pub fn with_required_skills(mut self, raw: &str) -> Self {
        self.required_skills = normalize_list(raw);
        self
    }

    /// Replaces required certifications from a comma-separated list.
    pub fn with_required_certs(mut self, raw: &str) -> Self {
        self.required_certs = normalize_list(raw);
        self
    }

    /// Sets the weather forecast.
    pub fn with_weather(mut self, forecast: impl Into<String>) -> Self {
        self.weather_forecast = forecast.into();
        self
    }

    /// Sets the budget.
    pub fn with_budget(mut self, budget: impl Into<Amount>) -> Self {
        self.budget = budget.into();
        self
    }

    /// Sets the resource counts (zero reads as 1).
    pub fn with_counts(mut self, persons: usize, equipment: usize) -> Self {
        self.required_persons = persons.max(1);
        self.required_equipment = equipment.max(1);
        self
    }

    /// Replaces assigned person IDs from a comma-separated list.
    pub fn with_assigned_persons(mut self, raw: &str) -> Self {
        self.assigned_persons = split_ids(raw);
        self
    }

    /// Replaces assigned equipment IDs from a comma-separated list.
    pub fn with_assigned_equipment(mut self, raw: &str) -> Self {
        self.assigned_equipment = split_ids(raw);
        self
    }

    /// Inclusive day count, or 0 when either date is unknown.
    pub fn duration_days(&self) -> i64 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => (end - start).num_days() + 1,
            _ => 0,
        }
    }

    /// Whether any person or equipment assignment is recorded.
    pub fn has_assignment_data(&self) -> bool {
        !self.assigned_persons.is_empty() || !self.assigned_equipment.is_empty()
    }

    /// Whether a person ID is in the assigned list (case-insensitive).
    pub fn lists_person(&self, person_id: &str) -> bool {
        contains_id(&self.assigned_persons, person_id)
    }

    /// Whether an equipment ID is in the assigned list (case-insensitive).
    pub fn lists_equipment(&self, equipment_id: &str) -> bool {
        contains_id(&self.assigned_equipment, equipment_id)
    }
}

fn contains_id(ids: &[String], id: &str) -> bool {
    let id = id.to_lowercase();
    ids.iter().any(|x| x.to_lowercase() == id)
}
