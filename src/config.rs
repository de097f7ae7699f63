//! Engine configuration.
//!
//! [`ScoringConfig`] holds the fitness weights used by the scorers;
//! [`EngineConfig`] wraps it with the query settings of the orchestrator.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Weights and thresholds for candidate scoring.
///
/// # Defaults
///
/// ```
/// use u_roster::config::ScoringConfig;
///
/// let config = ScoringConfig::default();
/// assert_eq!(config.person_location_match, 25);
/// assert_eq!(config.missing_certification, -80);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Person located at the job site.
    pub person_location_match: i64,
    /// Person located elsewhere.
    pub person_location_mismatch: i64,
    /// Per required skill the person has.
    pub skill_present: i64,
    /// Per required skill the person lacks.
    pub skill_missing: i64,
    /// Per required certification the person holds.
    pub certification_present: i64,
    /// Per required certification the person lacks.
    ///
    /// Heavy enough to act as a hard requirement inside a ranking.
    pub missing_certification: i64,
    /// Rates at or below this get `low_rate_bonus`.
    pub low_rate_ceiling: f64,
    /// Rates at or below this (and above `low_rate_ceiling`) get `mid_rate_bonus`.
    pub mid_rate_ceiling: f64,
    pub low_rate_bonus: i64,
    pub mid_rate_bonus: i64,
    /// Applied to rates above `mid_rate_ceiling`.
    pub high_rate_penalty: i64,
    /// Equipment located at the job site.
    pub equipment_location_match: i64,
    /// Equipment located elsewhere.
    pub equipment_location_mismatch: i64,
    /// Equipment fit for the forecast.
    pub weather_fit: i64,
    /// Equipment unfit for the forecast.
    pub weather_unfit: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            person_location_match: 25,
            person_location_mismatch: -10,
            skill_present: 10,
            skill_missing: -30,
            certification_present: 20,
            missing_certification: -80,
            low_rate_ceiling: 2000.0,
            mid_rate_ceiling: 4000.0,
            low_rate_bonus: 10,
            mid_rate_bonus: 5,
            high_rate_penalty: -5,
            equipment_location_match: 20,
            equipment_location_mismatch: -10,
            weather_fit: 25,
            weather_unfit: -100,
        }
    }
}

impl ScoringConfig {
    /// Sets the daily-rate bands.
    pub fn with_rate_bands(mut self, low_ceiling: f64, mid_ceiling: f64) -> Self {
        self.low_rate_ceiling = low_ceiling;
        self.mid_rate_ceiling = mid_ceiling;
        self
    }

    /// Sets the weather fit/unfit weights.
    pub fn with_weather_weights(mut self, fit: i64, unfit: i64) -> Self {
        self.weather_fit = fit;
        self.weather_unfit = unfit;
        self
    }
}

/// Orchestrator configuration.
///
/// ```
/// use u_roster::config::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "query_limit": 5 }"#).unwrap();
/// assert_eq!(config.query_limit, 5);
/// assert_eq!(config.scoring.skill_present, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Candidate scoring weights.
    pub scoring: ScoringConfig,
    /// Maximum rows returned by roster and fleet queries.
    pub query_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            query_limit: 20,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON document; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the scoring weights.
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    /// Sets the query row limit.
    pub fn with_query_limit(mut self, limit: usize) -> Self {
        self.query_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            EngineConfig::from_json(r#"{ "scoring": { "weather_unfit": -500 } }"#).unwrap();
        assert_eq!(config.scoring.weather_unfit, -500);
        assert_eq!(config.scoring.weather_fit, 25);
        assert_eq!(config.query_limit, 20);
    }

    #[test]
    fn test_invalid_json() {
        assert!(EngineConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::default()
            .with_query_limit(3)
            .with_scoring(ScoringConfig::default().with_rate_bands(1000.0, 3000.0));
        assert_eq!(config.query_limit, 3);
        assert!((config.scoring.mid_rate_ceiling - 3000.0).abs() < 1e-10);
    }
}
