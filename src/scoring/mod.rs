//! Candidate fitness scoring and ranking.
//!
//! Scorers compute a signed fitness for a candidate against a job.
//! Scores are unnormalized rank keys, not probabilities.
//!
//! # Score Convention
//! **Higher score = better fit.** Ranking sorts descending and keeps load
//! order among equal scores.
//!
//! # Usage
//!
//! ```
//! use u_roster::config::ScoringConfig;
//! use u_roster::models::{Job, Person};
//! use u_roster::scoring::{rank_by_score, score_person};
//!
//! let job = Job::new("J1").with_location("Pune").with_required_skills("mapping");
//! let people = vec![
//!     Person::new("P1").with_location("Delhi").with_skills("mapping"),
//!     Person::new("P2").with_location("Pune").with_skills("mapping"),
//! ];
//! let config = ScoringConfig::default();
//! let ranked = rank_by_score(&people, |p| score_person(p, &job, &config));
//! assert_eq!(ranked[0].item.id, "P2");
//! ```

mod rules;

pub use rules::{score_equipment, score_person};

use serde::Serialize;

/// Score returned by a scorer.
pub type Score = i64;

/// A candidate paired with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scored<'a, T> {
    pub item: &'a T,
    pub score: Score,
}

/// Scores every item and sorts descending by score.
///
/// The sort is stable: equal scores keep their input order.
pub fn rank_by_score<'a, T, F>(items: &'a [T], score_fn: F) -> Vec<Scored<'a, T>>
where
    F: Fn(&T) -> Score,
{
    let mut ranked: Vec<Scored<'a, T>> = items
        .iter()
        .map(|item| Scored {
            item,
            score: score_fn(item),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
