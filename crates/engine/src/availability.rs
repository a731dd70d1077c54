//! Availability: free task slots derived from capacity and current load.

use serde::{Deserialize, Serialize};

use crate::capacity::CapacityPlan;
use crate::config::EngineConfig;
use crate::types::{ResourceProfile, SwitchingPreference, Task};
use crate::utilization::TaskDistribution;

/// Free slots per complexity tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSlots {
    pub simple: u32,
    pub medium: u32,
    pub complex: u32,
}

/// How much new work a resource can absorb right now and next period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityOutlook {
    pub resource_id: String,
    /// Overall free slots, floored at zero.
    pub available_task_slots: u32,
    pub availability_percentage: f64,
    pub tier_slots: TierSlots,
    /// Free slots capped by the resource's switching preference.
    pub recommended_new_tasks: u32,
    /// 0-1, cost of adding work on top of the current load.
    pub context_switch_impact: f64,
    /// Tasks expected to finish by the next period.
    pub expected_completions: u32,
    /// Slots projected open next period, assuming the configured share of
    /// current tasks completes.
    pub next_period_available_slots: u32,
}

/// New-task caps per switching preference.
fn new_task_cap(preference: SwitchingPreference) -> u32 {
    match preference {
        SwitchingPreference::Sequential => 2,
        SwitchingPreference::Parallel => 5,
        SwitchingPreference::Balanced => 3,
    }
}

/// Derives availability from a capacity plan and the resource's active tasks.
pub fn availability_outlook(
    tasks: &[Task],
    profile: Option<&ResourceProfile>,
    plan: &CapacityPlan,
    config: &EngineConfig,
) -> AvailabilityOutlook {
    let task_count = tasks.len() as u32;
    let available_task_slots = plan.base_capacity.saturating_sub(task_count);
    let availability_percentage = if plan.base_capacity == 0 {
        0.0
    } else {
        f64::from(available_task_slots) / f64::from(plan.base_capacity) * 100.0
    };

    let current = TaskDistribution::from_tasks(tasks);
    let tier_slots = TierSlots {
        simple: plan.complexity.simple.saturating_sub(current.simple),
        medium: plan.complexity.medium.saturating_sub(current.medium),
        complex: plan.complexity.complex.saturating_sub(current.complex),
    };

    let fallback = config.neutral_profile(&plan.resource_id);
    let profile = profile.unwrap_or(&fallback);
    let recommended_new_tasks =
        available_task_slots.min(new_task_cap(profile.task_switching_preference));

    let context_switch_impact = (f64::from(task_count)
        * f64::from(profile.task_switching_penalty_score)
        / 50.0)
        .min(1.0);

    let expected_completions =
        (f64::from(task_count) * config.period_completion_rate).floor() as u32;
    let projected_load = task_count - expected_completions;
    let next_period_available_slots = plan.base_capacity.saturating_sub(projected_load);

    AvailabilityOutlook {
        resource_id: plan.resource_id.clone(),
        available_task_slots,
        availability_percentage,
        tier_slots,
        recommended_new_tasks,
        context_switch_impact,
        expected_completions,
        next_period_available_slots,
    }
}
