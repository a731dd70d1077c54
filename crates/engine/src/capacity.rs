//! Capacity calculation: how many tasks a resource can carry in a window.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::types::{ResourceProfile, SkillProficiency, TimeWindow};

/// Capacity split by task complexity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityCapacity {
    pub simple: u32,
    pub medium: u32,
    pub complex: u32,
}

/// A resource's derived task capacity for one time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityPlan {
    pub resource_id: String,
    pub window: TimeWindow,
    /// Raw task count the resource is expected to carry.
    pub base_capacity: u32,
    /// Base capacity scaled by average proficiency (proficiency 5 is neutral).
    pub skill_adjusted_capacity: f64,
    pub complexity: ComplexityCapacity,
    /// Headroom for coordination-heavy tasks.
    pub collaborative_capacity: u32,
}

/// Derives a capacity plan for a resource.
///
/// With no profile, fixed per-window defaults apply and the fallback tier
/// multiples are used. With a profile, base capacity comes from the
/// profile's optimal count for the window and is scaled by the resource's
/// average recorded proficiency; no recorded skills means no adjustment.
pub fn capacity_plan(
    resource_id: &str,
    profile: Option<&ResourceProfile>,
    proficiencies: &[SkillProficiency],
    window: TimeWindow,
    config: &EngineConfig,
) -> CapacityPlan {
    let (base, adjusted, tiers) = match profile {
        Some(profile) => {
            let base = profile.optimal_count_for(window);
            let adjusted = skill_adjust(base, proficiencies);
            (base, adjusted, config.profiled_tiers)
        }
        None => {
            let base = match window {
                TimeWindow::Day => config.default_capacities.per_day,
                TimeWindow::Week => config.default_capacities.per_week,
                TimeWindow::Month => config.default_capacities.per_month,
            };
            (base, f64::from(base), config.fallback_tiers)
        }
    };

    CapacityPlan {
        resource_id: resource_id.to_string(),
        window,
        base_capacity: base,
        skill_adjusted_capacity: adjusted,
        complexity: ComplexityCapacity {
            simple: scale(adjusted, tiers.simple),
            medium: scale(adjusted, tiers.medium),
            complex: scale(adjusted, tiers.complex),
        },
        collaborative_capacity: scale(adjusted, tiers.collaborative),
    }
}

/// Scales base capacity by average proficiency, treating level 5 as neutral.
fn skill_adjust(base: u32, proficiencies: &[SkillProficiency]) -> f64 {
    if proficiencies.is_empty() {
        return f64::from(base);
    }
    let avg: f64 = proficiencies
        .iter()
        .map(|p| f64::from(p.proficiency_level))
        .sum::<f64>()
        / proficiencies.len() as f64;
    f64::from(base) * (avg / 5.0)
}

fn scale(base: f64, multiplier: f64) -> u32 {
    (base * multiplier).floor().max(0.0) as u32
}
