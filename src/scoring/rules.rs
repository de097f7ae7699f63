//! Built-in scorers.
//!
//! # Person
//! Location, then each required skill and certification, then a
//! daily-rate band. Certifications weigh heavily enough to act as hard
//! requirements within a ranking; filtering happens upstream.
//!
//! # Equipment
//! Location, then weather fitness. An unfit unit takes a dominant
//! penalty.

use super::Score;
use crate::config::ScoringConfig;
use crate::models::{Equipment, Job, Person};
use crate::normalize::{same_text, weather_ok};

/// Scores a person against a job.
pub fn score_person(person: &Person, job: &Job, config: &ScoringConfig) -> Score {
    let mut score = if same_text(&person.location, &job.location) {
        config.person_location_match
    } else {
        config.person_location_mismatch
    };

    for skill in &job.required_skills {
        score += if person.has_skill(skill) {
            config.skill_present
        } else {
            config.skill_missing
        };
    }

    for cert in &job.required_certs {
        score += if person.has_certification(cert) {
            config.certification_present
        } else {
            config.missing_certification
        };
    }

    // Non-numeric rates contribute nothing.
    if let Some(rate) = person.daily_rate.value() {
        score += if rate <= config.low_rate_ceiling {
            config.low_rate_bonus
        } else if rate <= config.mid_rate_ceiling {
            config.mid_rate_bonus
        } else {
            config.high_rate_penalty
        };
    }

    score
}

/// Scores an equipment unit against a job.
pub fn score_equipment(unit: &Equipment, job: &Job, config: &ScoringConfig) -> Score {
    let location = if same_text(&unit.location, &job.location) {
        config.equipment_location_match
    } else {
        config.equipment_location_mismatch
    };

    let weather = if weather_ok(&unit.weather_resistance, &job.weather_forecast) {
        config.weather_fit
    } else {
        config.weather_unfit
    };

    location + weather
}
