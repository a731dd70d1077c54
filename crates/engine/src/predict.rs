//! Outcome forecasting from historical velocity and complexity handling.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::scoring::average_complexity;
use crate::types::{ResourceProfile, Task};

/// Predicted outcomes for an assignment, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeForecast {
    /// Likelihood the resource completes the assigned work.
    pub completion_likelihood: f64,
    /// Expected quality of the delivered work.
    pub quality_prediction: f64,
    /// Confidence in the planned timeline.
    pub timeline_confidence: f64,
    /// Overall probability the assignment succeeds.
    pub success_probability: f64,
}

/// Forecasts outcomes for a resource against a project's task set.
///
/// A missing profile falls back to the configured neutral defaults
/// (velocity from `default_velocity`, mid-scale complexity handling).
pub fn outcome_forecast(
    project_tasks: &[Task],
    profile: Option<&ResourceProfile>,
    config: &EngineConfig,
) -> OutcomeForecast {
    let fallback = config.neutral_profile("");
    let profile = profile.unwrap_or(&fallback);

    let velocity = profile.historical_task_velocity;
    let handling = f64::from(profile.complexity_handling_score);
    let avg = average_complexity(project_tasks).max(f64::MIN_POSITIVE);

    OutcomeForecast {
        completion_likelihood: (velocity * (handling / avg)).min(1.0),
        quality_prediction: (handling / 10.0 * 0.9).min(1.0),
        timeline_confidence: (velocity * 0.9).min(1.0),
        success_probability: ((velocity + handling / 10.0) / 2.0).min(1.0),
    }
}
