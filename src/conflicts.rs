//! Conflict detection for a single job.
//!
//! Checks the job's recorded assignments against the roster, the fleet
//! and every other job. Detects:
//! - Assigned IDs missing from the roster or fleet
//! - Blocking statuses (on leave, unavailable, maintenance)
//! - Location mismatches
//! - Missing skills and certifications
//! - Weather risk for equipment
//! - Double booking across overlapping jobs
//! - Person cost exceeding the job budget
//!
//! Issues come out in check order: persons (in assigned order), then
//! equipment, then budget, then the missing-assignment notice.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Equipment, Job, Person};
use crate::normalize::{ranges_overlap, same_text, weather_ok};

/// A detected conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue category.
    pub kind: IssueKind,
    /// Related entity ID (person, equipment or job).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    /// An assigned ID has no roster or fleet row.
    NotFound,
    /// The assigned resource's status blocks the assignment.
    StatusConflict,
    /// The resource is based away from the job site.
    LocationMismatch,
    /// The person lacks required skills.
    MissingSkills,
    /// The person lacks required certifications.
    MissingCertifications,
    /// The unit is not rated for the forecast.
    WeatherRisk,
    /// The resource is assigned to another job with overlapping dates.
    DoubleBooking,
    /// Person cost exceeds the job budget.
    BudgetOverrun,
    /// No assignment data was recorded, so cross-job checks were skipped.
    AssignmentDataMissing,
}

impl Issue {
    fn new(kind: IssueKind, entity_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }

    /// Whether this is a notice rather than a problem with the job.
    pub fn is_informational(&self) -> bool {
        self.kind == IssueKind::AssignmentDataMissing
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Detects conflicts for `job` against the full roster, fleet and job list.
///
/// A job with no assignments yields exactly one informational
/// [`IssueKind::AssignmentDataMissing`] issue, so a non-empty result does
/// not by itself mean the job is broken.
pub fn detect_conflicts(
    job: &Job,
    persons: &[Person],
    equipment: &[Equipment],
    jobs: &[Job],
) -> Vec<Issue> {
    let mut issues = Vec::new();

    for pid in &job.assigned_persons {
        check_person(job, pid, persons, jobs, &mut issues);
    }

    for eid in &job.assigned_equipment {
        check_equipment(job, eid, equipment, jobs, &mut issues);
    }

    if let Some(issue) = check_budget(job, persons) {
        issues.push(issue);
    }

    if !job.has_assignment_data() {
        issues.push(Issue::new(
            IssueKind::AssignmentDataMissing,
            job.id.as_str(),
            format!(
                "Note: job {} has no assigned persons or equipment, so double-booking checks are skipped.",
                job.id
            ),
        ));
    }

    issues
}

fn find_person<'a>(persons: &'a [Person], id: &str) -> Option<&'a Person> {
    persons.iter().find(|p| same_text(&p.id, id))
}

fn find_equipment<'a>(equipment: &'a [Equipment], id: &str) -> Option<&'a Equipment> {
    equipment.iter().find(|e| same_text(&e.id, id))
}

/// Other jobs listing the resource whose dates overlap `job`.
fn overlapping_jobs<'a>(
    job: &'a Job,
    jobs: &'a [Job],
    lists: impl Fn(&Job) -> bool + 'a,
) -> impl Iterator<Item = &'a Job> + 'a {
    jobs.iter().filter(move |other| {
        other.id.trim() != job.id.trim()
            && lists(other)
            && ranges_overlap(
                job.start_date,
                job.end_date,
                other.start_date,
                other.end_date,
            )
    })
}

fn check_person(
    job: &Job,
    pid: &str,
    persons: &[Person],
    jobs: &[Job],
    issues: &mut Vec<Issue>,
) {
    let Some(person) = find_person(persons, pid) else {
        issues.push(Issue::new(
            IssueKind::NotFound,
            pid,
            format!("Person {pid} not found in roster."),
        ));
        return;
    };

    if person.is_blocked() {
        issues.push(Issue::new(
            IssueKind::StatusConflict,
            pid,
            format!(
                "Person {pid} is {} but assigned to job {}.",
                person.status, job.id
            ),
        ));
    }

    if !same_text(&person.location, &job.location) {
        issues.push(Issue::new(
            IssueKind::LocationMismatch,
            pid,
            format!(
                "Location mismatch: Person {pid} is in {} but job is in {}.",
                person.location, job.location
            ),
        ));
    }

    let missing_skills: Vec<&str> = job
        .required_skills
        .iter()
        .filter(|s| !person.has_skill(s))
        .map(String::as_str)
        .collect();
    if !missing_skills.is_empty() {
        issues.push(Issue::new(
            IssueKind::MissingSkills,
            pid,
            format!(
                "Skill mismatch: Person {pid} missing skills: {}",
                missing_skills.join(", ")
            ),
        ));
    }

    let missing_certs: Vec<&str> = job
        .required_certs
        .iter()
        .filter(|c| !person.has_certification(c))
        .map(String::as_str)
        .collect();
    if !missing_certs.is_empty() {
        issues.push(Issue::new(
            IssueKind::MissingCertifications,
            pid,
            format!(
                "Certification mismatch: Person {pid} missing certs: {}",
                missing_certs.join(", ")
            ),
        ));
    }

    for other in overlapping_jobs(job, jobs, |o| o.lists_person(pid)) {
        issues.push(Issue::new(
            IssueKind::DoubleBooking,
            pid,
            format!(
                "Double booking: Person {pid} overlaps with job {}.",
                other.id
            ),
        ));
    }
}

fn check_equipment(
    job: &Job,
    eid: &str,
    equipment: &[Equipment],
    jobs: &[Job],
    issues: &mut Vec<Issue>,
) {
    let Some(unit) = find_equipment(equipment, eid) else {
        issues.push(Issue::new(
            IssueKind::NotFound,
            eid,
            format!("Equipment {eid} not found in fleet."),
        ));
        return;
    };

    if unit.in_maintenance() {
        issues.push(Issue::new(
            IssueKind::StatusConflict,
            eid,
            format!(
                "Equipment {eid} is in Maintenance but assigned to job {}.",
                job.id
            ),
        ));
    }

    if !same_text(&unit.location, &job.location) {
        issues.push(Issue::new(
            IssueKind::LocationMismatch,
            eid,
            format!(
                "Location mismatch: Equipment {eid} is in {} but job is in {}.",
                unit.location, job.location
            ),
        ));
    }

    if !weather_ok(&unit.weather_resistance, &job.weather_forecast) {
        issues.push(Issue::new(
            IssueKind::WeatherRisk,
            eid,
            format!(
                "Weather risk: Equipment {eid} resistance={} not safe for {} job.",
                unit.weather_resistance, job.weather_forecast
            ),
        ));
    }

    for other in overlapping_jobs(job, jobs, |o| o.lists_equipment(eid)) {
        issues.push(Issue::new(
            IssueKind::DoubleBooking,
            eid,
            format!(
                "Double booking: Equipment {eid} overlaps with job {}.",
                other.id
            ),
        ));
    }
}

/// Sums `rate * days` over assigned persons found in the roster.
///
/// Absent and malformed rates count as zero.
fn check_budget(job: &Job, persons: &[Person]) -> Option<Issue> {
    let budget = job.budget.value()?;
    if job.assigned_persons.is_empty() {
        return None;
    }

    let days = job.duration_days() as f64;
    let total: f64 = job
        .assigned_persons
        .iter()
        .filter_map(|pid| find_person(persons, pid))
        .map(|p| p.daily_rate.or_zero() * days)
        .sum();

    (total > budget).then(|| {
        Issue::new(
            IssueKind::BudgetOverrun,
            job.id.as_str(),
            format!(
                "Budget warning: Person cost ₹{:.0} exceeds job budget ₹{:.0}.",
                total, budget
            ),
        )
    })
}
