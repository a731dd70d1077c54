//! Named scoring weights, utilization bands, and capacity constants.
//!
//! Every threshold the engine applies lives here rather than inline at the
//! point of use, so the invariants (weights summing to 1.0, bands ordered
//! high to low) stay checkable in one place.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ResourceProfile, TimeWindow};

/// Tolerance for the weights-sum-to-one check.
const WEIGHT_SUM_EPSILON: f64 = 1e-9;

/// Configuration errors surfaced by [`EngineConfig::validate`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Scoring weights must sum to exactly 1.0.
    #[error("scoring weights sum to {sum}, expected 1.0")]
    WeightsNotNormalized { sum: f64 },

    /// Utilization bands must be strictly decreasing.
    #[error("utilization bands are not strictly decreasing: {bands:?}")]
    BandsNotOrdered { bands: [f64; 5] },

    /// The weekly-claim cap must stay in (0, 1].
    #[error("weekly claim cap {0} outside (0, 1]")]
    InvalidWeeklyClaimCap(f64),
}

/// Fixed weights combining the six fit sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub capacity: f64,
    pub complexity: f64,
    pub skill: f64,
    pub availability: f64,
    pub collaboration: f64,
    pub learning: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            capacity: 0.25,
            complexity: 0.20,
            skill: 0.25,
            availability: 0.15,
            collaboration: 0.10,
            learning: 0.05,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.capacity
            + self.complexity
            + self.skill
            + self.availability
            + self.collaboration
            + self.learning
    }
}

/// Utilization percentage thresholds, evaluated high to low, first match wins.
///
/// Percentages above `severely_overloaded` classify as severely overloaded,
/// above `overloaded` as overloaded, and so on down to underutilized below
/// `moderately_utilized`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilizationBands {
    pub severely_overloaded: f64,
    pub overloaded: f64,
    pub optimally_loaded: f64,
    pub well_utilized: f64,
    pub moderately_utilized: f64,
}

impl Default for UtilizationBands {
    fn default() -> Self {
        Self {
            severely_overloaded: 120.0,
            overloaded: 100.0,
            optimally_loaded: 85.0,
            well_utilized: 60.0,
            moderately_utilized: 30.0,
        }
    }
}

impl UtilizationBands {
    fn as_array(&self) -> [f64; 5] {
        [
            self.severely_overloaded,
            self.overloaded,
            self.optimally_loaded,
            self.well_utilized,
            self.moderately_utilized,
        ]
    }
}

/// Multipliers deriving complexity-tier capacities from base capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierMultipliers {
    pub simple: f64,
    pub medium: f64,
    pub complex: f64,
    pub collaborative: f64,
}

impl TierMultipliers {
    /// Tiers applied when a resource profile exists.
    pub fn profiled() -> Self {
        Self {
            simple: 1.5,
            medium: 1.0,
            complex: 0.5,
            collaborative: 0.7,
        }
    }

    /// Tiers applied to the fixed default capacities when no profile exists.
    /// Deliberately simple multiples, not tuned constants.
    pub fn fallback() -> Self {
        Self {
            simple: 1.67,
            medium: 1.0,
            complex: 0.33,
            collaborative: 0.67,
        }
    }
}

/// Base task capacities used when a resource has no profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultCapacities {
    pub per_day: u32,
    pub per_week: u32,
    pub per_month: u32,
}

impl Default for DefaultCapacities {
    fn default() -> Self {
        Self {
            per_day: 3,
            per_week: 15,
            per_month: 60,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Window utilization and availability are evaluated over.
    pub evaluation_window: TimeWindow,
    pub weights: ScoringWeights,
    pub bands: UtilizationBands,
    pub default_capacities: DefaultCapacities,
    /// Complexity-tier multipliers applied when a profile exists.
    pub profiled_tiers: TierMultipliers,
    /// Complexity-tier multipliers applied to the default capacities.
    pub fallback_tiers: TierMultipliers,
    /// Planned-to-actual completion ratio assumed when no profile exists.
    pub default_velocity: f64,
    /// Share of a resource's weekly capacity a single project may claim.
    pub weekly_claim_cap: f64,
    /// Utilization reported when capacity is zero but tasks are assigned.
    pub zero_capacity_utilization: f64,
    /// Hours a recommendation stays valid.
    pub recommendation_ttl_hours: i64,
    /// Upper bound on concurrently evaluated resources.
    pub max_concurrent_evaluations: usize,
    /// Maximum alternatives attached to a recommendation.
    pub max_alternatives: usize,
    /// Task matches listed in the reasoning section.
    pub max_task_matches: usize,
    /// Share of current tasks assumed complete by the next period.
    pub period_completion_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            evaluation_window: TimeWindow::Week,
            weights: ScoringWeights::default(),
            bands: UtilizationBands::default(),
            default_capacities: DefaultCapacities::default(),
            profiled_tiers: TierMultipliers::profiled(),
            fallback_tiers: TierMultipliers::fallback(),
            default_velocity: 0.8,
            weekly_claim_cap: 0.3,
            zero_capacity_utilization: 200.0,
            recommendation_ttl_hours: 24,
            max_concurrent_evaluations: 8,
            max_alternatives: 3,
            max_task_matches: 5,
            period_completion_rate: 0.7,
        }
    }
}

impl EngineConfig {
    /// Checks the structural invariants the scoring math relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(ConfigError::WeightsNotNormalized { sum });
        }
        let bands = self.bands.as_array();
        if !bands.windows(2).all(|w| w[0] > w[1]) {
            return Err(ConfigError::BandsNotOrdered { bands });
        }
        if self.weekly_claim_cap <= 0.0 || self.weekly_claim_cap > 1.0 {
            return Err(ConfigError::InvalidWeeklyClaimCap(self.weekly_claim_cap));
        }
        Ok(())
    }

    /// Validity window applied to new recommendations.
    pub fn recommendation_ttl(&self) -> Duration {
        Duration::hours(self.recommendation_ttl_hours)
    }

    /// The profile a resource is scored against when no profile row exists.
    ///
    /// Capacity counts and velocity come from this configuration; the
    /// remaining fields keep their mid-scale values.
    pub fn neutral_profile(&self, resource_id: impl Into<String>) -> ResourceProfile {
        ResourceProfile {
            optimal_task_count_per_day: self.default_capacities.per_day,
            optimal_task_count_per_week: self.default_capacities.per_week,
            historical_task_velocity: self.default_velocity,
            ..ResourceProfile::neutral(resource_id)
        }
    }
}
