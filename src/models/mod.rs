//! Domain models.
//!
//! Flat records read from the external system of record. Every entity
//! decodes itself from a provider [`Record`]; missing or malformed cells
//! degrade to empty values rather than errors.
//!
//! # Domain Mappings
//!
//! | u-roster | Aerial survey | Field service | Events |
//! |----------|---------------|---------------|--------|
//! | Person | Pilot | Technician | Crew member |
//! | Equipment | Drone | Vehicle / Rig | AV kit |
//! | Job | Mission | Work order | Booking |

mod equipment;
mod job;
mod person;
mod record;

pub use equipment::Equipment;
pub use job::Job;
pub use person::Person;
pub use record::{columns, Amount, Record};
