//! Assignment engine.
//!
//! Orchestrates a request end to end: reload the tables from the
//! provider, run the pure filters, scorers and conflict checks over the
//! in-memory rows, and return a result value.
//!
//! # Algorithm (recommendation)
//!
//! 1. Find the job by trimmed, case-sensitive ID.
//! 2. Keep persons that are available, co-located, and hold every
//!    required skill and certification. None left → stop.
//! 3. Keep equipment that is available, co-located and weather-fit.
//! 4. Score both pools, stable-sort descending.
//! 5. Take the job's required counts from the top of each pool.
//!
//! No state is cached between requests; every call pays a full read.

mod outcome;

pub use outcome::{
    Assignment, ConflictReport, EquipmentPick, EquipmentQuery, PersonCost, PersonPick,
    PersonQuery, QueryOutcome, Recommendation, StatusUpdate, UrgentReassignment,
};

use crate::config::EngineConfig;
use crate::conflicts::detect_conflicts;
use crate::error::{EntityKind, Result, RosterError};
use crate::models::{Equipment, Job, Person};
use crate::normalize::{parse_date, same_text, weather_ok};
use crate::provider::DataProvider;
use crate::scoring::{rank_by_score, score_equipment, score_person};

/// Request-response engine over a [`DataProvider`].
///
/// # Example
///
/// ```
/// use u_roster::engine::{OpsEngine, Recommendation};
/// use u_roster::provider::InMemoryProvider;
///
/// let provider = InMemoryProvider::from_json(r#"{
///     "persons": [{ "person_id": "P1", "name": "Asha", "location": "Pune",
///                   "status": "Available", "daily_rate": 1800 }],
///     "equipment": [{ "equipment_id": "E1", "model": "M300", "location": "Pune",
///                     "status": "Available", "weather_resistance": "IP54" }],
///     "jobs": [{ "job_id": "J1", "location": "Pune", "weather_forecast": "Rainy" }]
/// }"#).unwrap();
///
/// let engine = OpsEngine::new(provider);
/// let rec = engine.recommend("J1").unwrap();
/// let picked = rec.assignment().unwrap();
/// assert_eq!(picked.persons[0].id, "P1");
/// assert_eq!(picked.equipment[0].id, "E1");
/// ```
#[derive(Debug)]
pub struct OpsEngine<P> {
    provider: P,
    config: EngineConfig,
}

impl<P: DataProvider> OpsEngine<P> {
    /// Creates an engine with the default configuration.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: EngineConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Looks up a job by ID.
    pub fn get_job(&self, job_id: &str) -> Result<Job> {
        let jobs = self.provider.load_jobs()?;
        find_job(&jobs, job_id)
            .cloned()
            .ok_or_else(|| RosterError::not_found(EntityKind::Job, job_id.trim()))
    }

    /// Runs the conflict detector for one job.
    pub fn check_conflicts(&self, job_id: &str) -> Result<ConflictReport> {
        let (persons, equipment, jobs) = self.load_all()?;
        let job = find_job(&jobs, job_id)
            .ok_or_else(|| RosterError::not_found(EntityKind::Job, job_id.trim()))?;

        let issues = detect_conflicts(job, &persons, &equipment, &jobs);
        tracing::debug!(job_id = %job.id, issues = issues.len(), "conflict check finished");

        Ok(ConflictReport {
            job_id: job.id.clone(),
            issues,
        })
    }

    /// Recommends the best persons and equipment for a job.
    ///
    /// When no person is eligible the equipment pool is not evaluated.
    pub fn recommend(&self, job_id: &str) -> Result<Recommendation> {
        let (persons, equipment, jobs) = self.load_all()?;
        let job = find_job(&jobs, job_id)
            .ok_or_else(|| RosterError::not_found(EntityKind::Job, job_id.trim()))?;

        let eligible_persons: Vec<Person> = persons
            .into_iter()
            .filter(|p| person_eligible(p, job))
            .collect();
        tracing::debug!(
            job_id = %job.id,
            candidates = eligible_persons.len(),
            "filtered persons"
        );
        if eligible_persons.is_empty() {
            return Ok(Recommendation::NoEligiblePersons {
                job_id: job.id.clone(),
            });
        }

        let eligible_equipment: Vec<Equipment> = equipment
            .into_iter()
            .filter(|e| equipment_eligible(e, job))
            .collect();
        tracing::debug!(
            job_id = %job.id,
            candidates = eligible_equipment.len(),
            "filtered equipment"
        );
        if eligible_equipment.is_empty() {
            return Ok(Recommendation::NoEligibleEquipment {
                job_id: job.id.clone(),
            });
        }

        let scoring = &self.config.scoring;
        let persons: Vec<PersonPick> =
            rank_by_score(&eligible_persons, |p| score_person(p, job, scoring))
                .into_iter()
                .take(job.required_persons)
                .map(|s| PersonPick {
                    id: s.item.id.clone(),
                    name: s.item.name.clone(),
                    daily_rate: s.item.daily_rate.clone(),
                    score: s.score,
                })
                .collect();
        let equipment: Vec<EquipmentPick> =
            rank_by_score(&eligible_equipment, |e| score_equipment(e, job, scoring))
                .into_iter()
                .take(job.required_equipment)
                .map(|s| EquipmentPick {
                    id: s.item.id.clone(),
                    model: s.item.model.clone(),
                    weather_resistance: s.item.weather_resistance.clone(),
                    score: s.score,
                })
                .collect();

        tracing::info!(
            job_id = %job.id,
            persons = persons.len(),
            equipment = equipment.len(),
            "recommendation ready"
        );

        Ok(Recommendation::Assigned(Assignment {
            job_id: job.id.clone(),
            persons,
            equipment,
        }))
    }

    /// Reports conflicts and replacement candidates side by side.
    ///
    /// The two halves are independent: conflicted persons are not
    /// excluded from the replacement pool.
    pub fn urgent_reassignment(&self, job_id: &str) -> Result<UrgentReassignment> {
        let job = self.get_job(job_id)?;
        let conflicts = self.check_conflicts(job_id)?;
        let replacement = self.recommend(job_id)?;

        Ok(UrgentReassignment {
            job_id: job.id,
            conflicts,
            replacement,
        })
    }

    /// Writes a person's status through to the provider.
    pub fn update_status(&self, person_id: &str, status: &str) -> Result<StatusUpdate> {
        if !self.provider.write_person_status(person_id, status)? {
            return Err(RosterError::not_found(EntityKind::Person, person_id.trim()));
        }

        tracing::info!(person_id, status, "person status updated");
        Ok(StatusUpdate {
            person_id: person_id.trim().to_string(),
            status: status.to_string(),
        })
    }

    /// Filters the roster.
    ///
    /// An empty roster is [`QueryOutcome::NoData`]; rows that all fail the
    /// filter give [`QueryOutcome::NoMatch`]. Neither is an error.
    pub fn query_persons(&self, query: &PersonQuery) -> Result<QueryOutcome<Person>> {
        let persons = self.provider.load_persons()?;
        let rows = persons.len();
        let skill = query.skill.as_deref().map(str::to_lowercase);
        let cert = query.certification.as_deref().map(str::to_lowercase);

        let found: Vec<Person> = persons
            .into_iter()
            .filter(|p| matches_opt(&p.status, query.status.as_deref()))
            .filter(|p| matches_opt(&p.location, query.location.as_deref()))
            .filter(|p| skill.as_deref().map_or(true, |s| p.has_skill(s.trim())))
            .filter(|p| {
                cert.as_deref()
                    .map_or(true, |c| p.has_certification(c.trim()))
            })
            .take(self.config.query_limit)
            .collect();
        tracing::debug!(rows, matches = found.len(), "person query finished");

        Ok(QueryOutcome::new(EntityKind::Person, rows, found))
    }

    /// Filters the fleet. Empty outcomes as for [`OpsEngine::query_persons`].
    pub fn query_equipment(&self, query: &EquipmentQuery) -> Result<QueryOutcome<Equipment>> {
        let equipment = self.provider.load_equipment()?;
        let rows = equipment.len();
        let capability = query.capability.as_deref().map(str::to_lowercase);

        let found: Vec<Equipment> = equipment
            .into_iter()
            .filter(|e| matches_opt(&e.status, query.status.as_deref()))
            .filter(|e| matches_opt(&e.location, query.location.as_deref()))
            .filter(|e| {
                capability
                    .as_deref()
                    .map_or(true, |c| e.has_capability(c.trim()))
            })
            .filter(|e| {
                query
                    .weather
                    .as_deref()
                    .map_or(true, |w| weather_ok(&e.weather_resistance, w))
            })
            .take(self.config.query_limit)
            .collect();
        tracing::debug!(rows, matches = found.len(), "equipment query finished");

        Ok(QueryOutcome::new(EntityKind::Equipment, rows, found))
    }

    /// Cost of a person over an inclusive date range.
    pub fn person_cost(&self, person_id: &str, start: &str, end: &str) -> Result<PersonCost> {
        let persons = self.provider.load_persons()?;
        let target = person_id.trim();
        let person = persons
            .iter()
            .find(|p| p.id == target)
            .ok_or_else(|| RosterError::not_found(EntityKind::Person, target))?;

        let (Some(start), Some(end)) = (parse_date(start), parse_date(end)) else {
            return Err(RosterError::InvalidInput(
                "Invalid start/end dates. Use YYYY-MM-DD.".into(),
            ));
        };

        let days = (end - start).num_days() + 1;
        Ok(PersonCost {
            person_id: person.id.clone(),
            daily_rate: person.daily_rate.clone(),
            days,
            total_cost: person.daily_rate.or_zero() * days as f64,
        })
    }

    fn load_all(&self) -> Result<(Vec<Person>, Vec<Equipment>, Vec<Job>)> {
        let persons = self.provider.load_persons()?;
        let equipment = self.provider.load_equipment()?;
        let jobs = self.provider.load_jobs()?;
        tracing::debug!(
            persons = persons.len(),
            equipment = equipment.len(),
            jobs = jobs.len(),
            "tables loaded"
        );
        Ok((persons, equipment, jobs))
    }
}

fn find_job<'a>(jobs: &'a [Job], job_id: &str) -> Option<&'a Job> {
    let target = job_id.trim();
    jobs.iter().find(|j| j.id.trim() == target)
}

fn person_eligible(person: &Person, job: &Job) -> bool {
    person.is_available()
        && same_text(&person.location, &job.location)
        && job.required_skills.iter().all(|s| person.has_skill(s))
        && job.required_certs.iter().all(|c| person.has_certification(c))
}

fn equipment_eligible(unit: &Equipment, job: &Job) -> bool {
    unit.is_available()
        && same_text(&unit.location, &job.location)
        && weather_ok(&unit.weather_resistance, &job.weather_forecast)
}

fn matches_opt(value: &str, wanted: Option<&str>) -> bool {
    wanted.map_or(true, |w| same_text(value, w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflicts::IssueKind;
    use crate::error::ProviderError;
    use crate::provider::InMemoryProvider;

    const FIXTURE: &str = r#"{
        "persons": [
            { "person_id": "P001", "name": "Arjun", "location": "Bangalore", "status": "Available",
              "skills": "Mapping, Survey", "certifications": "DGCA", "daily_rate": 3000 },
            { "person_id": "P002", "name": "Neha", "location": "Bangalore", "status": "On Leave",
              "skills": "Mapping", "certifications": "DGCA", "daily_rate": 1500 },
            { "person_id": "P003", "name": "Rohit", "location": "Bangalore", "status": "available",
              "skills": "mapping", "certifications": "dgca, night ops", "daily_rate": 1800 },
            { "person_id": "P004", "name": "Meera", "location": "Mumbai", "status": "Available",
              "skills": "Inspection", "certifications": "-", "daily_rate": "ask" },
            { "person_id": "P005", "name": "Kiran", "location": "Bangalore", "status": "Available",
              "skills": "Mapping", "certifications": "DGCA", "daily_rate": 1800 }
        ],
        "equipment": [
            { "equipment_id": "D001", "model": "M300", "location": "Bangalore", "status": "Available",
              "weather_resistance": "None", "capabilities": "RGB" },
            { "equipment_id": "D002", "model": "M350", "location": "Bangalore", "status": "Available",
              "weather_resistance": "IP45", "capabilities": "Thermal, RGB" },
            { "equipment_id": "D003", "model": "Mavic", "location": "Bangalore", "status": "Maintenance",
              "weather_resistance": "IP43", "capabilities": "RGB" },
            { "equipment_id": "D004", "model": "Matrice", "location": "Mumbai", "status": "Available",
              "weather_resistance": "IP67", "capabilities": "LiDAR" }
        ],
        "jobs": [
            { "job_id": "PRJ001", "location": "Bangalore", "start_date": "2026-02-05",
              "end_date": "2026-02-07", "required_skills": "Mapping", "required_certs": "DGCA",
              "weather_forecast": "Rainy", "budget": 8000, "required_persons": 2,
              "assigned_persons": "P001", "assigned_equipment": "D002" },
            { "job_id": "PRJ002", "location": "Bangalore", "start_date": "2026-02-06",
              "end_date": "2026-02-09", "required_skills": "Mapping", "weather_forecast": "Sunny",
              "assigned_persons": "P001, P002" },
            { "job_id": "PRJ003", "location": "Mumbai", "required_skills": "Inspection",
              "weather_forecast": "Rainy" },
            { "job_id": "PRJ004", "location": "Chennai", "weather_forecast": "Rainy" }
        ]
    }"#;

    fn engine() -> OpsEngine<InMemoryProvider> {
        OpsEngine::new(InMemoryProvider::from_json(FIXTURE).unwrap())
    }

    #[test]
    fn test_get_job() {
        let e = engine();
        assert_eq!(e.get_job(" PRJ002 ").unwrap().id, "PRJ002");
        let err = e.get_job("prj002").unwrap_err();
        assert!(matches!(err, RosterError::NotFound { kind: EntityKind::Job, .. }));
        assert_eq!(err.to_string(), "Job prj002 not found.");
    }

    #[test]
    fn test_recommend_ranks_and_takes_required_count() {
        let rec = engine().recommend("PRJ001").unwrap();
        let a = rec.assignment().expect("assignment");

        // P003 and P005 tie at 25+10+20+10; P003 loads first.
        let ids: Vec<&str> = a.persons.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["P003", "P005"]);
        assert_eq!(a.persons[0].score, 65);

        // D001 is not rain-rated, D003 is in maintenance.
        assert_eq!(a.equipment.len(), 1);
        assert_eq!(a.equipment[0].id, "D002");
        assert_eq!(a.equipment[0].score, 45);
    }

    #[test]
    fn test_recommend_no_eligible_persons_skips_equipment() {
        // Chennai has neither persons nor equipment; the person outcome wins.
        let rec = engine().recommend("PRJ004").unwrap();
        assert_eq!(
            rec,
            Recommendation::NoEligiblePersons {
                job_id: "PRJ004".into()
            }
        );
        assert!(rec.to_string().contains("No eligible persons"));
    }

    #[test]
    fn test_recommend_no_eligible_equipment() {
        let rec = engine().recommend("PRJ003").unwrap();
        assert_eq!(rec.assignment().unwrap().equipment[0].id, "D004");

        // Strip the only Mumbai unit of its rain rating.
        let fixture = FIXTURE.replace("\"IP67\"", "\"None\"");
        let e = OpsEngine::new(InMemoryProvider::from_json(&fixture).unwrap());
        let rec = e.recommend("PRJ003").unwrap();
        assert_eq!(
            rec,
            Recommendation::NoEligibleEquipment {
                job_id: "PRJ003".into()
            }
        );
    }

    #[test]
    fn test_recommend_unknown_job() {
        assert!(matches!(
            engine().recommend("PRJ999"),
            Err(RosterError::NotFound { .. })
        ));
    }

    #[test]
    fn test_recommend_on_empty_tables() {
        let e = OpsEngine::new(InMemoryProvider::new());
        assert!(matches!(e.recommend("J1"), Err(RosterError::NotFound { .. })));
        let outcome = e.query_persons(&PersonQuery::new()).unwrap();
        assert_eq!(
            outcome,
            QueryOutcome::NoData {
                kind: EntityKind::Person
            }
        );
        assert_eq!(outcome.to_string(), "No person roster data found.");

        let outcome = e.query_equipment(&EquipmentQuery::new()).unwrap();
        assert_eq!(outcome.to_string(), "No equipment fleet data found.");
    }

    #[test]
    fn test_check_conflicts() {
        let report = engine().check_conflicts("PRJ001").unwrap();
        assert!(!report.is_clear());
        let kinds: Vec<IssueKind> = report.issues.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![IssueKind::DoubleBooking, IssueKind::BudgetOverrun]);
        assert!(report.messages()[0].contains("PRJ002"));
        assert!(report.messages()[1].contains("₹9000"));
        assert!(report.messages()[1].contains("₹8000"));
    }

    #[test]
    fn test_check_conflicts_informational_only() {
        let report = engine().check_conflicts("PRJ003").unwrap();
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].is_informational());
    }

    #[test]
    fn test_clear_report_display() {
        let report = ConflictReport {
            job_id: "J9".into(),
            issues: Vec::new(),
        };
        assert_eq!(report.to_string(), "No conflicts detected for job J9.");
    }

    #[test]
    fn test_urgent_reassignment_keeps_halves_independent() {
        let e = engine();
        let urgent = e.urgent_reassignment("PRJ002").unwrap();

        // P002 is on leave; P001 is double-booked with PRJ001.
        assert!(urgent
            .conflicts
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::StatusConflict && i.entity_id == "P002"));
        assert!(urgent
            .conflicts
            .issues
            .iter()
            .any(|i| i.kind == IssueKind::DoubleBooking && i.entity_id == "P001"));

        // Conflicts do not filter the pool; ranking alone decides.
        let picked = urgent.replacement.assignment().unwrap();
        assert_eq!(picked.persons.len(), 1);
        assert_eq!(picked.persons[0].id, "P003");
        assert_eq!(
            e.recommend("PRJ002").unwrap(),
            urgent.replacement,
            "urgent replacement equals a plain recommendation"
        );
    }

    #[test]
    fn test_urgent_reassignment_unknown_job() {
        assert!(engine().urgent_reassignment("NOPE").is_err());
    }

    #[test]
    fn test_update_status_writes_through() {
        let e = engine();
        let update = e.update_status("P003", "On Leave").unwrap();
        assert_eq!(update.status, "On Leave");
        assert_eq!(update.to_string(), "Person P003 status set to On Leave.");

        // Next read sees the write: P003 drops out of the candidate pool.
        let rec = e.recommend("PRJ001").unwrap();
        let ids: Vec<String> = rec
            .assignment()
            .unwrap()
            .persons
            .iter()
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(ids, vec!["P005", "P001"]);
    }

    #[test]
    fn test_update_status_unknown_person() {
        let err = engine().update_status("P999", "Available").unwrap_err();
        assert_eq!(err.to_string(), "Person P999 not found.");
    }

    #[test]
    fn test_query_persons() {
        let e = engine();
        let q = PersonQuery::new()
            .with_location("bangalore")
            .with_status("AVAILABLE")
            .with_certification("Night Ops");
        let found = e.query_persons(&q).unwrap().into_items();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "P003");

        let none = e
            .query_persons(&PersonQuery::new().with_skill("welding"))
            .unwrap();
        assert!(none.is_empty());
        assert_eq!(
            none,
            QueryOutcome::NoMatch {
                kind: EntityKind::Person
            }
        );
        assert_eq!(none.to_string(), "No matching persons found.");
    }

    #[test]
    fn test_query_respects_limit() {
        let e = engine()
            .with_config(EngineConfig::default().with_query_limit(2));
        let outcome = e.query_persons(&PersonQuery::new()).unwrap();
        assert_eq!(outcome.items().len(), 2);
        assert_eq!(outcome.to_string(), "2 match(es) found.");
    }

    #[test]
    fn test_query_equipment() {
        let e = engine();
        let rainy = e
            .query_equipment(
                &EquipmentQuery::new()
                    .with_location("Bangalore")
                    .with_weather("rainy"),
            )
            .unwrap();
        let ids: Vec<&str> = rainy.items().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["D002", "D003"]);

        let thermal = e
            .query_equipment(&EquipmentQuery::new().with_capability("THERMAL"))
            .unwrap();
        assert_eq!(thermal.items().len(), 1);

        let none = e
            .query_equipment(&EquipmentQuery::new().with_capability("sonar"))
            .unwrap();
        assert_eq!(none.to_string(), "No matching equipment found.");
    }

    #[test]
    fn test_person_cost() {
        let cost = engine()
            .person_cost("P001", "2026-02-05", "2026-02-07")
            .unwrap();
        assert_eq!(cost.days, 3);
        assert!((cost.total_cost - 9000.0).abs() < 1e-9);
    }

    #[test]
    fn test_person_cost_errors() {
        let e = engine();
        let err = e.person_cost("P001", "someday", "2026-02-07").unwrap_err();
        assert!(matches!(err, RosterError::InvalidInput(_)));
        assert!(err.to_string().contains("YYYY-MM-DD"));

        assert!(matches!(
            e.person_cost("P404", "2026-02-05", "2026-02-07"),
            Err(RosterError::NotFound { .. })
        ));
    }

    #[test]
    fn test_person_cost_malformed_rate_is_zero() {
        let cost = engine()
            .person_cost("P004", "2026-02-05", "2026-02-06")
            .unwrap();
        assert!(cost.daily_rate.is_malformed());
        assert!(cost.total_cost.abs() < 1e-9);
    }

    #[derive(Debug)]
    struct DownProvider;

    impl DataProvider for DownProvider {
        fn load_persons(&self) -> std::result::Result<Vec<Person>, ProviderError> {
            Err(ProviderError::Unavailable("roster".into()))
        }
        fn load_equipment(&self) -> std::result::Result<Vec<Equipment>, ProviderError> {
            Ok(Vec::new())
        }
        fn load_jobs(&self) -> std::result::Result<Vec<Job>, ProviderError> {
            Ok(Vec::new())
        }
        fn write_person_status(
            &self,
            _person_id: &str,
            _status: &str,
        ) -> std::result::Result<bool, ProviderError> {
            Err(ProviderError::Unavailable("roster".into()))
        }
    }

    #[test]
    fn test_provider_failure_is_reported() {
        let e = OpsEngine::new(DownProvider);
        let err = e.recommend("J1").unwrap_err();
        assert_eq!(err.to_string(), "Provider error: Table unavailable: roster");
        assert!(e.update_status("P1", "Available").is_err());
    }
}
