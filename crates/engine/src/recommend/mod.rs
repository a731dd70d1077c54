//! Recommendation records: the engine's one output type and its reasoning.

mod alternatives;
mod composer;
mod explainer;

pub use alternatives::rank_alternatives;
pub use composer::{compose_recommendation, persist_recommendation, ResourceEvaluation};
pub use explainer::{
    capacity_analysis, potential_blockers, risk_factors, success_factors, task_matches,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::predict::OutcomeForecast;
use crate::risk::RiskProfile;
use crate::scoring::FitBreakdown;

/// A ranked, explained assignment recommendation.
///
/// Immutable once created; a new query always produces a new record.
/// Staleness is bounded only by the expiry timestamp, set 24 hours after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecommendation {
    /// Record id, assigned at composition time.
    pub id: String,
    pub project_id: String,
    pub resource_id: String,
    pub fit: FitBreakdown,
    /// Fixed-weight combination of the six sub-scores, in `[0, 1]`.
    pub overall_fit_score: f64,
    pub forecast: OutcomeForecast,
    pub risk: RiskProfile,
    /// Tasks this resource should take on from the project right now.
    pub recommended_task_count: u32,
    pub reasoning: RecommendationReasoning,
    /// Other candidates ranked by skill match, as fallback suggestions.
    pub alternative_assignments: Vec<AlternativeAssignment>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AssignmentRecommendation {
    /// Whether the recommendation has outlived its validity window.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Structured reasoning behind a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReasoning {
    /// Best-matching candidate tasks, sorted descending by skill match.
    pub task_matches: Vec<TaskMatch>,
    pub capacity_analysis: CapacityAnalysis,
    pub potential_blockers: Vec<String>,
    pub success_factors: Vec<String>,
    pub risk_factors: Vec<String>,
}

/// One candidate task with its per-task skill match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMatch {
    pub task_id: String,
    pub title: String,
    pub skill_match_score: f64,
}

/// Capacity summary included in the reasoning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityAnalysis {
    pub current_utilization_percentage: f64,
    /// Project task count beyond the resource's weekly optimum, floored at 0.
    pub additional_capacity_needed: u32,
    pub optimal_distribution: String,
    pub timeline_impact: String,
}

/// A fallback suggestion for another candidate resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeAssignment {
    pub resource_id: String,
    pub resource_name: String,
    pub skill_match_score: f64,
    pub rationale: String,
    pub trade_offs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(created_at: DateTime<Utc>) -> AssignmentRecommendation {
        AssignmentRecommendation {
            id: "rec-1".into(),
            project_id: "p1".into(),
            resource_id: "r1".into(),
            fit: FitBreakdown::default(),
            overall_fit_score: 0.5,
            forecast: crate::predict::outcome_forecast(
                &[],
                None,
                &crate::config::EngineConfig::default(),
            ),
            risk: RiskProfile {
                overload_risk: 0.0,
                skill_gap_risk: 2.0,
                context_switching_impact: 0.0,
            },
            recommended_task_count: 2,
            reasoning: RecommendationReasoning {
                task_matches: vec![],
                capacity_analysis: CapacityAnalysis {
                    current_utilization_percentage: 0.0,
                    additional_capacity_needed: 0,
                    optimal_distribution: String::new(),
                    timeline_impact: String::new(),
                },
                potential_blockers: vec![],
                success_factors: vec![],
                risk_factors: vec![],
            },
            alternative_assignments: vec![],
            created_at,
            expires_at: created_at + Duration::hours(24),
        }
    }

    #[test]
    fn expiry_is_exclusive_of_the_last_instant() {
        let created = Utc::now();
        let rec = record(created);
        assert!(!rec.is_expired(created));
        assert!(!rec.is_expired(created + Duration::hours(23)));
        assert!(rec.is_expired(created + Duration::hours(24)));
        assert!(rec.is_expired(created + Duration::hours(25)));
    }

    #[test]
    fn serde_round_trip_preserves_scores() {
        let rec = record(Utc::now());
        let json = serde_json::to_string(&rec).expect("serializes");
        let back: AssignmentRecommendation = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back, rec);
    }
}
