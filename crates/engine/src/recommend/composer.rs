//! Assembles the final recommendation record and persists it.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::availability::AvailabilityOutlook;
use crate::config::EngineConfig;
use crate::predict::OutcomeForecast;
use crate::repo::RecommendationStore;
use crate::risk::RiskProfile;
use crate::scoring::FitBreakdown;
use crate::types::{ResourceProfile, SkillProficiency, Task};
use crate::utilization::UtilizationSnapshot;

use super::explainer;
use super::{AlternativeAssignment, AssignmentRecommendation, RecommendationReasoning};

/// Everything computed for one resource, ready for composition.
#[derive(Debug)]
pub struct ResourceEvaluation<'a> {
    pub resource_id: &'a str,
    pub project_tasks: &'a [Task],
    pub profile: Option<&'a ResourceProfile>,
    pub proficiencies: &'a [SkillProficiency],
    pub utilization: &'a UtilizationSnapshot,
    pub availability: &'a AvailabilityOutlook,
    pub fit: FitBreakdown,
    pub forecast: OutcomeForecast,
    pub risk: RiskProfile,
    pub alternatives: Vec<AlternativeAssignment>,
}

/// Builds the recommendation record for one evaluated resource.
///
/// The recommended task count never exceeds the resource's free slots, and a
/// single project's claim on the resource's weekly capacity is capped by the
/// configured share. Expiry is `created_at` plus the configured TTL.
pub fn compose_recommendation(
    project_id: &str,
    evaluation: ResourceEvaluation<'_>,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> AssignmentRecommendation {
    let fallback = config.neutral_profile(evaluation.resource_id);
    let profile = evaluation.profile.unwrap_or(&fallback);

    let weekly_claim =
        (f64::from(profile.optimal_task_count_per_week) * config.weekly_claim_cap).floor() as u32;
    let recommended_task_count = evaluation
        .availability
        .available_task_slots
        .min(weekly_claim);

    let reasoning = RecommendationReasoning {
        task_matches: explainer::task_matches(
            evaluation.project_tasks,
            evaluation.proficiencies,
            config.max_task_matches,
        ),
        capacity_analysis: explainer::capacity_analysis(
            evaluation.project_tasks,
            profile,
            evaluation.utilization,
            evaluation.availability,
        ),
        potential_blockers: explainer::potential_blockers(evaluation.project_tasks, profile),
        success_factors: explainer::success_factors(profile),
        risk_factors: explainer::risk_factors(evaluation.project_tasks, profile),
    };

    AssignmentRecommendation {
        id: Uuid::new_v4().to_string(),
        project_id: project_id.to_string(),
        resource_id: evaluation.resource_id.to_string(),
        overall_fit_score: evaluation.fit.overall(&config.weights),
        fit: evaluation.fit,
        forecast: evaluation.forecast,
        risk: evaluation.risk,
        recommended_task_count,
        reasoning,
        alternative_assignments: evaluation.alternatives,
        created_at: now,
        expires_at: now + config.recommendation_ttl(),
    }
}

/// Persists a composed recommendation, degrading gracefully on failure.
///
/// A failed insert is logged and swallowed; the caller still receives the
/// computed record and decides whether an unpersisted recommendation is
/// acceptable.
pub async fn persist_recommendation(
    store: &dyn RecommendationStore,
    recommendation: &AssignmentRecommendation,
) {
    match store.append(recommendation).await {
        Ok(assigned_id) => {
            debug!(
                resource_id = %recommendation.resource_id,
                record_id = %assigned_id,
                "recommendation persisted"
            );
        }
        Err(error) => {
            warn!(
                resource_id = %recommendation.resource_id,
                project_id = %recommendation.project_id,
                %error,
                "failed to persist recommendation; returning unpersisted result"
            );
        }
    }
}
