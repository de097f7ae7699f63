//! Person model.
//!
//! An assignable human resource with skills, certifications, a home
//! location and an availability status.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::record::{columns, text, Amount, Record};
use crate::normalize::{normalize_list, same_text};

/// Statuses that block a person from an assignment.
const BLOCKING_STATUSES: &[&str] = &["on leave", "unavailable"];

/// A person that can be assigned to jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Current base location.
    pub location: String,
    /// Free-text status (`Available`, `On Leave`, `Unavailable`, ...).
    pub status: String,
    /// Normalized lowercase skill tokens.
    pub skills: BTreeSet<String>,
    /// Normalized lowercase certification tokens.
    pub certifications: BTreeSet<String>,
    /// Daily rate in whole currency units.
    pub daily_rate: Amount,
}

impl Person {
    /// Creates a person with the given ID and no attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            location: String::new(),
            status: String::new(),
            skills: BTreeSet::new(),
            certifications: BTreeSet::new(),
            daily_rate: Amount::Absent,
        }
    }

    /// Decodes a roster row.
    pub fn from_record(record: &Record) -> Self {
        let id = text(record, columns::PERSON_ID);
        let daily_rate = Amount::from_cell(record, columns::DAILY_RATE, &id);
        Self {
            name: text(record, columns::NAME),
            location: text(record, columns::LOCATION),
            status: text(record, columns::STATUS),
            skills: normalize_list(&text(record, columns::SKILLS)),
            certifications: normalize_list(&text(record, columns::CERTIFICATIONS)),
            daily_rate,
            id,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
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

    /// Replaces skills from a comma-separated list.
    pub fn with_skills(mut self, raw: &str) -> Self {
        self.skills = normalize_list(raw);
        self
    }

    /// Replaces certifications from a comma-separated list.
    pub fn with_certifications(mut self, raw: &str) -> Self {
        self.certifications = normalize_list(raw);
        self
    }

    /// Sets the daily rate.
    pub fn with_daily_rate(mut self, rate: impl Into<Amount>) -> Self {
        self.daily_rate = rate.into();
        self
    }

    /// Whether the status reads `available`.
    pub fn is_available(&self) -> bool {
        same_text(&self.status, "available")
    }

    /// Whether the status blocks assignment (`on leave`, `unavailable`).
    pub fn is_blocked(&self) -> bool {
        let status = self.status.trim().to_lowercase();
        BLOCKING_STATUSES.contains(&status.as_str())
    }

    /// Whether the person holds a (normalized) skill.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    /// Whether the person holds a (normalized) certification.
    pub fn has_certification(&self, cert: &str) -> bool {
        self.certifications.contains(cert)
    }
}
