//! Risk assessment: overload, skill gap, and context switching.

use serde::{Deserialize, Serialize};

use crate::scoring::average_complexity;
use crate::types::{ResourceProfile, Task};
use crate::utilization::UtilizationSnapshot;

/// Risk factors attached to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// 0-10, driven directly by current utilization.
    pub overload_risk: f64,
    /// 0-10, driven by the project's average complexity.
    pub skill_gap_risk: f64,
    /// Productivity drag from switching across the current load.
    pub context_switching_impact: f64,
}

/// Assesses assignment risk for one resource.
pub fn risk_profile(
    project_tasks: &[Task],
    profile: Option<&ResourceProfile>,
    utilization: &UtilizationSnapshot,
) -> RiskProfile {
    let fallback = ResourceProfile::neutral(&utilization.resource_id);
    let profile = profile.unwrap_or(&fallback);

    let overload_risk = (utilization.utilization_percentage / 10.0).floor().min(10.0);

    let avg = average_complexity(project_tasks);
    let skill_gap_risk = if avg > 7.0 {
        7.0
    } else if avg > 5.0 {
        4.0
    } else {
        2.0
    };

    let context_switching_impact = f64::from(profile.task_switching_penalty_score) / 10.0
        * (f64::from(utilization.task_count) / 10.0);

    RiskProfile {
        overload_risk,
        skill_gap_risk,
        context_switching_impact,
    }
}
