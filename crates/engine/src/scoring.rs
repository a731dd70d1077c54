//! Assignment scoring: six fit sub-scores and their fixed-weight overall.

use serde::{Deserialize, Serialize};

use crate::availability::AvailabilityOutlook;
use crate::config::{EngineConfig, ScoringWeights};
use crate::skills::{self, proficiency_levels};
use crate::types::{
    CollaborationIntensity, ResourceProfile, SkillProficiency, SkillRequirementType, Task,
    WorkStyle,
};
use crate::utilization::UtilizationSnapshot;

/// Average complexity assumed when the project has no tasks to average.
const DEFAULT_AVG_COMPLEXITY: f64 = 5.0;

/// The six fit sub-scores, each in `[0, 1]`.
///
/// [`FitBreakdown::overall`] combines them with the configured weights;
/// because the weights sum to 1.0 the overall score stays in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FitBreakdown {
    pub task_capacity_fit: f64,
    pub complexity_handling_fit: f64,
    pub skill_match_score: f64,
    pub availability_score: f64,
    pub collaboration_fit: f64,
    pub learning_opportunity_score: f64,
}

impl FitBreakdown {
    /// Fixed-weight combination of the sub-scores.
    pub fn overall(&self, weights: &ScoringWeights) -> f64 {
        weights.capacity * self.task_capacity_fit
            + weights.complexity * self.complexity_handling_fit
            + weights.skill * self.skill_match_score
            + weights.availability * self.availability_score
            + weights.collaboration * self.collaboration_fit
            + weights.learning * self.learning_opportunity_score
    }
}

/// Average complexity across a task set, defaulting to mid-scale when empty.
pub fn average_complexity(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return DEFAULT_AVG_COMPLEXITY;
    }
    tasks
        .iter()
        .map(|t| f64::from(t.complexity_score))
        .sum::<f64>()
        / tasks.len() as f64
}

/// Computes the six sub-scores for one resource against a project's open tasks.
pub fn fit_breakdown(
    project_tasks: &[Task],
    profile: Option<&ResourceProfile>,
    proficiencies: &[SkillProficiency],
    utilization: &UtilizationSnapshot,
    availability: &AvailabilityOutlook,
    config: &EngineConfig,
) -> FitBreakdown {
    let fallback = config.neutral_profile(&utilization.resource_id);
    let profile = profile.unwrap_or(&fallback);

    FitBreakdown {
        task_capacity_fit: task_capacity_fit(project_tasks, profile, utilization),
        complexity_handling_fit: complexity_handling_fit(project_tasks, profile),
        skill_match_score: skills::skill_match_score(
            proficiencies,
            &skills::requirement_union(project_tasks),
        ),
        availability_score: clamp01(availability.availability_percentage / 100.0),
        collaboration_fit: collaboration_fit(project_tasks, profile),
        learning_opportunity_score: learning_opportunity_score(project_tasks, proficiencies),
    }
}

/// Remaining weekly headroom relative to the project's task count.
fn task_capacity_fit(
    project_tasks: &[Task],
    profile: &ResourceProfile,
    utilization: &UtilizationSnapshot,
) -> f64 {
    if project_tasks.is_empty() {
        return 1.0;
    }
    let remaining = f64::from(profile.optimal_task_count_per_week)
        * (1.0 - utilization.utilization_percentage / 100.0);
    clamp01(remaining / project_tasks.len() as f64)
}

/// Complexity handling relative to the task set's average difficulty.
/// The 1.2 divisor asks for headroom above parity before full credit.
fn complexity_handling_fit(project_tasks: &[Task], profile: &ResourceProfile) -> f64 {
    let avg = average_complexity(project_tasks).max(f64::MIN_POSITIVE);
    clamp01(f64::from(profile.complexity_handling_score) / avg / 1.2)
}

/// 0.9 when the preferred work style matches the task set's collaboration
/// profile, 0.7 for mixed-style resources, 0.5 otherwise.
fn collaboration_fit(project_tasks: &[Task], profile: &ResourceProfile) -> f64 {
    let high_share = if project_tasks.is_empty() {
        0.0
    } else {
        project_tasks
            .iter()
            .filter(|t| t.collaboration_intensity == CollaborationIntensity::High)
            .count() as f64
            / project_tasks.len() as f64
    };

    match profile.preferred_work_style {
        WorkStyle::Collaborative if high_share > 0.5 => 0.9,
        WorkStyle::DeepFocus if high_share < 0.3 => 0.9,
        WorkStyle::Mixed => 0.7,
        _ => 0.5,
    }
}

/// Learning requirements where the resource is genuinely below the bar score
/// 0.8; requirements already within reach score 0.2. Averaged; zero if the
/// task set carries no learning requirements.
fn learning_opportunity_score(project_tasks: &[Task], proficiencies: &[SkillProficiency]) -> f64 {
    let levels = proficiency_levels(proficiencies);
    let mut total = 0.0;
    let mut count = 0u32;
    for task in project_tasks {
        for req in &task.required_skills {
            if req.requirement_type != SkillRequirementType::LearningOpportunity {
                continue;
            }
            let level = levels.get(req.skill_id.as_str()).copied().unwrap_or(0);
            total += if level < req.minimum_proficiency {
                0.8
            } else {
                0.2
            };
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        total / f64::from(count)
    }
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
