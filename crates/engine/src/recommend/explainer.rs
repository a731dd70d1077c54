//! Human-readable reasoning assembled from the computed signals.

use crate::availability::AvailabilityOutlook;
use crate::skills::task_match_score;
use crate::types::{
    CollaborationIntensity, ResourceProfile, SkillProficiency, SwitchingPreference, Task, WorkStyle,
};
use crate::utilization::UtilizationSnapshot;

use super::{CapacityAnalysis, TaskMatch};

/// Complexity above which a task is flagged as a potential blocker.
const BLOCKER_COMPLEXITY: u8 = 8;
/// Open-task count above which a sequential preference becomes a blocker.
const SEQUENTIAL_TASK_LIMIT: usize = 3;

/// Top candidate tasks by per-task skill match, best first.
pub fn task_matches(
    project_tasks: &[Task],
    proficiencies: &[SkillProficiency],
    limit: usize,
) -> Vec<TaskMatch> {
    let mut matches: Vec<TaskMatch> = project_tasks
        .iter()
        .map(|task| TaskMatch {
            task_id: task.id.clone(),
            title: task.title.clone(),
            skill_match_score: task_match_score(proficiencies, task),
        })
        .collect();
    matches.sort_by(|a, b| b.skill_match_score.total_cmp(&a.skill_match_score));
    matches.truncate(limit);
    matches
}

/// Capacity summary for the reasoning section.
pub fn capacity_analysis(
    project_tasks: &[Task],
    profile: &ResourceProfile,
    utilization: &UtilizationSnapshot,
    availability: &AvailabilityOutlook,
) -> CapacityAnalysis {
    let additional_capacity_needed = (project_tasks.len() as u32)
        .saturating_sub(profile.optimal_task_count_per_week);

    let optimal_distribution = format!(
        "{} simple, {} medium, {} complex slots open",
        availability.tier_slots.simple,
        availability.tier_slots.medium,
        availability.tier_slots.complex
    );

    let timeline_impact = if utilization.status.is_overloaded() {
        "Already over capacity; new work will push existing timelines".to_string()
    } else if availability.available_task_slots >= project_tasks.len() as u32 {
        "Can absorb the project without timeline impact".to_string()
    } else {
        "Partial absorption; remaining tasks need another resource or a later start".to_string()
    };

    CapacityAnalysis {
        current_utilization_percentage: utilization.utilization_percentage,
        additional_capacity_needed,
        optimal_distribution,
        timeline_impact,
    }
}

/// Conditions likely to block this assignment.
pub fn potential_blockers(project_tasks: &[Task], profile: &ResourceProfile) -> Vec<String> {
    let mut blockers = Vec::new();

    let high_complexity = project_tasks
        .iter()
        .filter(|t| t.complexity_score > BLOCKER_COMPLEXITY)
        .count();
    if high_complexity > 0 {
        blockers.push(format!(
            "{high_complexity} high-complexity task(s) present (complexity > {BLOCKER_COMPLEXITY})"
        ));
    }

    if profile.task_switching_preference == SwitchingPreference::Sequential
        && project_tasks.len() > SEQUENTIAL_TASK_LIMIT
    {
        blockers.push(format!(
            "Sequential work preference conflicts with {} open tasks",
            project_tasks.len()
        ));
    }

    blockers
}

/// Traits of this resource that favor success.
pub fn success_factors(profile: &ResourceProfile) -> Vec<String> {
    let mut factors = Vec::new();
    if profile.complexity_handling_score > 7 {
        factors.push(format!(
            "Strong complexity handling ({}/10)",
            profile.complexity_handling_score
        ));
    }
    if profile.collaboration_effectiveness > 0.8 {
        factors.push("Highly effective collaborator".to_string());
    }
    factors
}

/// Mismatches between the resource and the task set.
pub fn risk_factors(project_tasks: &[Task], profile: &ResourceProfile) -> Vec<String> {
    let mut factors = Vec::new();

    let has_deep_focus_work = project_tasks
        .iter()
        .any(|t| t.collaboration_intensity == CollaborationIntensity::Low && t.complexity_score > 6);
    if has_deep_focus_work && profile.preferred_work_style == WorkStyle::Collaborative {
        factors.push(
            "Deep-focus task present but the resource prefers collaborative work".to_string(),
        );
    }

    factors
}

/// Rationale line for an alternative candidate.
pub fn alternative_rationale(resource_name: &str, skill_match: f64) -> String {
    format!(
        "{resource_name} covers {:.0}% of the required skills",
        skill_match * 100.0
    )
}

/// Generic trade-off notes attached to every alternative.
pub fn alternative_trade_offs() -> Vec<String> {
    vec![
        "Current workload and availability not yet assessed".to_string(),
        "Ramp-up time may apply if the resource is new to the project".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::availability_outlook;
    use crate::capacity::capacity_plan;
    use crate::config::EngineConfig;
    use crate::types::{RequiredSkill, SkillRequirementType, TimeWindow};
    use crate::utilization::utilization_snapshot;

    #[test]
    fn task_matches_sorted_and_truncated() {
        let profs = vec![SkillProficiency::new("r1", "rust", 8)];
        let tasks: Vec<Task> = (0..7)
            .map(|i| {
                let t = Task::new(format!("t{i}"), "p1").with_title(format!("Task {i}"));
                if i % 2 == 0 {
                    t.with_required_skill(RequiredSkill::new(
                        "rust",
                        SkillRequirementType::Primary,
                        5,
                    ))
                } else {
                    t.with_required_skill(RequiredSkill::new(
                        "go",
                        SkillRequirementType::Primary,
                        5,
                    ))
                }
            })
            .collect();

        let matches = task_matches(&tasks, &profs, 5);
        assert_eq!(matches.len(), 5);
        for pair in matches.windows(2) {
            assert!(pair[0].skill_match_score >= pair[1].skill_match_score);
        }
        assert_eq!(matches[0].skill_match_score, 1.0);
    }

    #[test]
    fn high_complexity_flagged_as_blocker() {
        let tasks = vec![Task::new("t1", "p1").with_complexity(9)];
        let blockers = potential_blockers(&tasks, &ResourceProfile::neutral("r1"));
        assert_eq!(blockers.len(), 1);
        assert!(blockers[0].contains("high-complexity"));
    }

    #[test]
    fn sequential_preference_with_many_tasks_is_a_blocker() {
        let profile = ResourceProfile {
            task_switching_preference: SwitchingPreference::Sequential,
            ..ResourceProfile::neutral("r1")
        };
        let tasks: Vec<Task> = (0..4).map(|i| Task::new(format!("t{i}"), "p1")).collect();
        let blockers = potential_blockers(&tasks, &profile);
        assert!(blockers.iter().any(|b| b.contains("Sequential")));
    }

    #[test]
    fn no_blockers_for_benign_setup() {
        let tasks = vec![Task::new("t1", "p1")];
        assert!(potential_blockers(&tasks, &ResourceProfile::neutral("r1")).is_empty());
    }

    #[test]
    fn success_factors_require_strong_scores() {
        assert!(success_factors(&ResourceProfile::neutral("r1")).is_empty());
        let strong = ResourceProfile {
            complexity_handling_score: 9,
            collaboration_effectiveness: 0.9,
            ..ResourceProfile::neutral("r1")
        };
        assert_eq!(success_factors(&strong).len(), 2);
    }

    #[test]
    fn deep_focus_work_with_collaborative_preference_is_a_risk() {
        let profile = ResourceProfile {
            preferred_work_style: WorkStyle::Collaborative,
            ..ResourceProfile::neutral("r1")
        };
        let tasks = vec![Task::new("t1", "p1")
            .with_complexity(8)
            .with_collaboration(CollaborationIntensity::Low)];
        assert_eq!(risk_factors(&tasks, &profile).len(), 1);
        assert!(risk_factors(&tasks, &ResourceProfile::neutral("r1")).is_empty());
    }

    #[test]
    fn capacity_analysis_reports_shortfall() {
        let profile = ResourceProfile {
            optimal_task_count_per_week: 5,
            ..ResourceProfile::neutral("r1")
        };
        let config = EngineConfig::default();
        let plan = capacity_plan("r1", Some(&profile), &[], TimeWindow::Week, &config);
        let snapshot = utilization_snapshot(&[], Some(&profile), &plan, &config);
        let outlook = availability_outlook(&[], Some(&profile), &plan, &config);
        let project: Vec<Task> = (0..8).map(|i| Task::new(format!("t{i}"), "p1")).collect();
        let analysis = capacity_analysis(&project, &profile, &snapshot, &outlook);
        assert_eq!(analysis.additional_capacity_needed, 3);
        assert!(analysis.timeline_impact.contains("Partial absorption"));
    }
}
