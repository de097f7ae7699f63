//! Engine results.
//!
//! Everything the engine returns is a plain value with a descriptive
//! `Display`, so a chat or HTTP adapter can render it directly.

use serde::Serialize;
use std::fmt;

use crate::conflicts::Issue;
use crate::error::EntityKind;
use crate::models::Amount;
use crate::scoring::Score;

/// A recommended person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonPick {
    pub id: String,
    pub name: String,
    pub daily_rate: Amount,
    pub score: Score,
}

/// A recommended equipment unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentPick {
    pub id: String,
    pub model: String,
    pub weather_resistance: String,
    pub score: Score,
}

/// Best candidates for a job, highest score first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub job_id: String,
    pub persons: Vec<PersonPick>,
    pub equipment: Vec<EquipmentPick>,
}

/// Outcome of a recommendation.
///
/// An empty candidate pool is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Recommendation {
    /// Candidates were found for both pools.
    Assigned(Assignment),
    /// No person passed the availability/location/skill/certification filter.
    /// Equipment filtering was not attempted.
    NoEligiblePersons { job_id: String },
    /// No equipment passed the availability/location/weather filter.
    NoEligibleEquipment { job_id: String },
}

impl Recommendation {
    /// The assignment, when candidates were found.
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Self::Assigned(a) => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assigned(a) => {
                write!(f, "Recommended for job {}:", a.job_id)?;
                for p in &a.persons {
                    write!(f, "\n  person {} ({}) score={}", p.id, p.name, p.score)?;
                }
                for e in &a.equipment {
                    write!(f, "\n  equipment {} ({}) score={}", e.id, e.model, e.score)?;
                }
                Ok(())
            }
            Self::NoEligiblePersons { job_id } => write!(
                f,
                "No eligible persons found for job {job_id} (availability/location/skills/certs)."
            ),
            Self::NoEligibleEquipment { job_id } => write!(
                f,
                "No eligible equipment found for job {job_id} (availability/location/weather)."
            ),
        }
    }
}

/// Conflicts detected for one job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictReport {
    pub job_id: String,
    pub issues: Vec<Issue>,
}

impl ConflictReport {
    /// Whether no issue (not even a notice) was produced.
    pub fn is_clear(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issue messages in report order.
    pub fn messages(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.message.as_str()).collect()
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clear() {
            return write!(f, "No conflicts detected for job {}.", self.job_id);
        }
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "- {issue}")?;
        }
        Ok(())
    }
}

/// Conflicts and replacement candidates for a job, computed independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrgentReassignment {
    pub job_id: String,
    pub conflicts: ConflictReport,
    pub replacement: Recommendation,
}

/// An applied status write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub person_id: String,
    pub status: String,
}

impl fmt::Display for StatusUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person {} status set to {}.", self.person_id, self.status)
    }
}

/// Cost of one person over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonCost {
    pub person_id: String,
    pub daily_rate: Amount,
    pub days: i64,
    pub total_cost: f64,
}

/// Result of a roster or fleet query.
///
/// An empty table and a filter that matched nothing are kept apart so an
/// adapter can tell a missing sheet from a narrow query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QueryOutcome<T> {
    Found(Vec<T>),
    NoMatch { kind: EntityKind },
    NoData { kind: EntityKind },
}

impl<T> QueryOutcome<T> {
    pub(crate) fn new(kind: EntityKind, table_rows: usize, found: Vec<T>) -> Self {
        if table_rows == 0 {
            Self::NoData { kind }
        } else if found.is_empty() {
            Self::NoMatch { kind }
        } else {
            Self::Found(found)
        }
    }

    /// Matched rows; empty unless [`QueryOutcome::Found`].
    pub fn items(&self) -> &[T] {
        match self {
            Self::Found(items) => items,
            Self::NoMatch { .. } | Self::NoData { .. } => &[],
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Found(items) => items,
            Self::NoMatch { .. } | Self::NoData { .. } => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

impl<T> fmt::Display for QueryOutcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(items) => write!(f, "{} match(es) found.", items.len()),
            Self::NoMatch { kind } => write!(f, "No matching {} found.", plural(*kind)),
            Self::NoData { kind } => write!(f, "No {} data found.", table_name(*kind)),
        }
    }
}

fn plural(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Person => "persons",
        EntityKind::Equipment => "equipment",
        EntityKind::Job => "jobs",
    }
}

fn table_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Person => "person roster",
        EntityKind::Equipment => "equipment fleet",
        EntityKind::Job => "job",
    }
}

/// Roster filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonQuery {
    pub skill: Option<String>,
    pub certification: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

impl PersonQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skill = Some(skill.into());
        self
    }

    pub fn with_certification(mut self, cert: impl Into<String>) -> Self {
        self.certification = Some(cert.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Fleet filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentQuery {
    pub capability: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    /// Keep only units fit for this forecast.
    pub weather: Option<String>,
}

impl EquipmentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capability = Some(capability.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }
}
