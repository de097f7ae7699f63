//! Data-provider boundary.
//!
//! The engine never performs I/O itself. It reads whole tables through a
//! [`DataProvider`] on every request and writes status changes back
//! through it. Implementations are responsible for transport, retries,
//! timeouts and serializing concurrent cell writes.

use serde_json::Value;
use std::sync::RwLock;

use crate::error::{self, ProviderError};
use crate::models::{columns, Equipment, Job, Person, Record};

/// Table access for the engine.
///
/// Loads return rows in provider order; that order is the tie-break order
/// for ranking and the report order for conflicts.
pub trait DataProvider {
    /// Reads the person roster.
    fn load_persons(&self) -> Result<Vec<Person>, ProviderError>;

    /// Reads the equipment fleet.
    fn load_equipment(&self) -> Result<Vec<Equipment>, ProviderError>;

    /// Reads the job list.
    fn load_jobs(&self) -> Result<Vec<Job>, ProviderError>;

    /// Writes a person's status into the first row whose ID matches.
    ///
    /// Returns `Ok(false)` when no row matched.
    fn write_person_status(&self, person_id: &str, status: &str) -> Result<bool, ProviderError>;
}

#[derive(Debug, Clone, Default)]
struct Tables {
    persons: Vec<Record>,
    equipment: Vec<Record>,
    jobs: Vec<Record>,
}

/// A provider backed by in-memory rows.
///
/// Rows are decoded on every load, so writes are visible to the next
/// read, as with a live spreadsheet.
///
/// # Example
/// ```
/// use u_roster::provider::{DataProvider, InMemoryProvider};
///
/// let provider = InMemoryProvider::from_json(r#"{
///     "persons": [{ "person_id": "P001", "status": "Available", "daily_rate": 1500 }]
/// }"#).unwrap();
///
/// assert!(provider.write_person_status("P001", "On Leave").unwrap());
/// assert_eq!(provider.load_persons().unwrap()[0].status, "On Leave");
/// ```
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    tables: RwLock<Tables>,
}

impl InMemoryProvider {
    /// Creates a provider with empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider from row tables.
    pub fn from_records(persons: Vec<Record>, equipment: Vec<Record>, jobs: Vec<Record>) -> Self {
        Self {
            tables: RwLock::new(Tables {
                persons: persons.into_iter().map(trim_headers).collect(),
                equipment: equipment.into_iter().map(trim_headers).collect(),
                jobs: jobs.into_iter().map(trim_headers).collect(),
            }),
        }
    }

    /// Parses a JSON document with optional `persons`, `equipment` and
    /// `jobs` arrays of flat objects.
    ///
    /// Cells may be strings, numbers, booleans or null.
    pub fn from_json(json: &str) -> error::Result<Self> {
        let doc: Value = serde_json::from_str(json)?;
        Ok(Self::from_records(
            table_from_json(&doc, "persons")?,
            table_from_json(&doc, "equipment")?,
            table_from_json(&doc, "jobs")?,
        ))
    }

    /// Appends a roster row.
    pub fn push_person(&self, record: Record) -> Result<(), ProviderError> {
        self.write()?.persons.push(trim_headers(record));
        Ok(())
    }

    /// Appends a fleet row.
    pub fn push_equipment(&self, record: Record) -> Result<(), ProviderError> {
        self.write()?.equipment.push(trim_headers(record));
        Ok(())
    }

    /// Appends a job row.
    pub fn push_job(&self, record: Record) -> Result<(), ProviderError> {
        self.write()?.jobs.push(trim_headers(record));
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, ProviderError> {
        self.tables
            .read()
            .map_err(|_| ProviderError::Unavailable("table lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, ProviderError> {
        self.tables
            .write()
            .map_err(|_| ProviderError::Unavailable("table lock poisoned".into()))
    }
}

impl DataProvider for InMemoryProvider {
    fn load_persons(&self) -> Result<Vec<Person>, ProviderError> {
        Ok(self
            .read()?
            .persons
            .iter()
            .map(Person::from_record)
            .collect())
    }

    fn load_equipment(&self) -> Result<Vec<Equipment>, ProviderError> {
        Ok(self
            .read()?
            .equipment
            .iter()
            .map(Equipment::from_record)
            .collect())
    }

    fn load_jobs(&self) -> Result<Vec<Job>, ProviderError> {
        Ok(self.read()?.jobs.iter().map(Job::from_record).collect())
    }

    fn write_person_status(&self, person_id: &str, status: &str) -> Result<bool, ProviderError> {
        let mut tables = self.write()?;
        let target = person_id.trim();
        let row = tables
            .persons
            .iter_mut()
            .find(|r| r.get(columns::PERSON_ID).is_some_and(|id| id.trim() == target));

        match row {
            Some(row) => {
                row.insert(columns::STATUS.to_string(), status.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn trim_headers(record: Record) -> Record {
    record
        .into_iter()
        .map(|(k, v)| (k.trim().to_string(), v))
        .collect()
}

fn table_from_json(doc: &Value, name: &str) -> Result<Vec<Record>, ProviderError> {
    let rows = match doc.get(name) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(rows)) => rows,
        Some(_) => {
            return Err(ProviderError::Malformed(format!(
                "'{name}' must be an array of rows"
            )))
        }
    };

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let obj = row.as_object().ok_or_else(|| {
                ProviderError::Malformed(format!("'{name}' row {i} is not an object"))
            })?;
            Ok(obj
                .iter()
                .map(|(k, v)| (k.clone(), cell_text(v)))
                .collect())
        })
        .collect()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;

    const DOC: &str = r#"{
        "persons": [
            { " person_id ": "P001", "status": "Available", "daily_rate": 3000, "skills": "Mapping" },
            { "person_id": "P002", "status": "Available", "daily_rate": null },
            { "person_id": "P001", "status": "Available" }
        ],
        "equipment": [
            { "equipment_id": "D001", "status": "Available", "weather_resistance": "IP43" }
        ],
        "jobs": [
            { "job_id": "PRJ001", "budget": 8000.5, "required_persons": 2 }
        ]
    }"#;

    #[test]
    fn test_from_json_decodes_cells() {
        let provider = InMemoryProvider::from_json(DOC).unwrap();

        let persons = provider.load_persons().unwrap();
        assert_eq!(persons.len(), 3);
        assert_eq!(persons[0].id, "P001");
        assert_eq!(persons[0].daily_rate.value(), Some(3000.0));
        assert!(persons[1].daily_rate.value().is_none());

        let jobs = provider.load_jobs().unwrap();
        assert_eq!(jobs[0].budget.value(), Some(8000.5));
        assert_eq!(jobs[0].required_persons, 2);

        assert_eq!(provider.load_equipment().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_tables_are_empty() {
        let provider = InMemoryProvider::from_json("{}").unwrap();
        assert!(provider.load_persons().unwrap().is_empty());
        assert!(provider.load_equipment().unwrap().is_empty());
        assert!(provider.load_jobs().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_document() {
        let err = InMemoryProvider::from_json(r#"{ "persons": { "a": 1 } }"#).unwrap_err();
        assert!(matches!(
            err,
            RosterError::Provider(ProviderError::Malformed(_))
        ));

        let err = InMemoryProvider::from_json(r#"{ "jobs": [1, 2] }"#).unwrap_err();
        assert!(err.to_string().contains("row 0"));

        assert!(matches!(
            InMemoryProvider::from_json("[").unwrap_err(),
            RosterError::Json(_)
        ));
    }

    #[test]
    fn test_status_write_hits_first_match_only() {
        let provider = InMemoryProvider::from_json(DOC).unwrap();
        assert!(provider.write_person_status(" P001 ", "On Leave").unwrap());

        let persons = provider.load_persons().unwrap();
        assert_eq!(persons[0].status, "On Leave");
        assert_eq!(persons[2].status, "Available");
    }

    #[test]
    fn test_status_write_unknown_id() {
        let provider = InMemoryProvider::from_json(DOC).unwrap();
        assert!(!provider.write_person_status("P999", "On Leave").unwrap());
        // IDs match exactly on write.
        assert!(!provider.write_person_status("p001", "On Leave").unwrap());
    }

    #[test]
    fn test_push_rows() {
        let provider = InMemoryProvider::new();
        let mut row = Record::new();
        row.insert("job_id".into(), "J1".into());
        provider.push_job(row).unwrap();
        assert_eq!(provider.load_jobs().unwrap()[0].id, "J1");
    }
}
