//! Utilization analysis: current load measured against capacity.

use serde::{Deserialize, Serialize};

use crate::capacity::CapacityPlan;
use crate::config::{EngineConfig, UtilizationBands};
use crate::types::{ResourceProfile, Task};

/// Load classification bands, evaluated high to low.
///
/// This is a pure classifier over the current snapshot; no transition
/// history is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationStatus {
    SeverelyOverloaded,
    Overloaded,
    OptimallyLoaded,
    WellUtilized,
    ModeratelyUtilized,
    Underutilized,
}

impl UtilizationStatus {
    /// Classifies a utilization percentage against the configured bands.
    pub fn classify(percentage: f64, bands: &UtilizationBands) -> Self {
        if percentage > bands.severely_overloaded {
            Self::SeverelyOverloaded
        } else if percentage > bands.overloaded {
            Self::Overloaded
        } else if percentage > bands.optimally_loaded {
            Self::OptimallyLoaded
        } else if percentage > bands.well_utilized {
            Self::WellUtilized
        } else if percentage > bands.moderately_utilized {
            Self::ModeratelyUtilized
        } else {
            Self::Underutilized
        }
    }

    /// Whether the resource is carrying more than its capacity.
    pub fn is_overloaded(self) -> bool {
        matches!(self, Self::Overloaded | Self::SeverelyOverloaded)
    }
}

/// Current tasks bucketed by complexity tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDistribution {
    /// Tasks with complexity 3 or below.
    pub simple: u32,
    /// Tasks with complexity 4 through 6.
    pub medium: u32,
    /// Tasks with complexity above 6.
    pub complex: u32,
}

impl TaskDistribution {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut dist = Self::default();
        for task in tasks {
            match task.complexity_score {
                0..=3 => dist.simple += 1,
                4..=6 => dist.medium += 1,
                _ => dist.complex += 1,
            }
        }
        dist
    }
}

/// A point-in-time view of one resource's load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationSnapshot {
    pub resource_id: String,
    /// Active assigned tasks intersecting the window.
    pub task_count: u32,
    pub base_capacity: u32,
    pub utilization_percentage: f64,
    /// Task count adjusted by complexity, urgency, and collaboration.
    pub weighted_task_load: f64,
    pub weighted_capacity: f64,
    pub weighted_utilization: f64,
    pub status: UtilizationStatus,
    pub distribution: TaskDistribution,
    /// 0-10, driven by heavy dependencies and high-complexity tasks.
    pub bottleneck_risk: f64,
    /// 0-1, productivity lost to juggling concurrent work.
    pub context_switch_penalty: f64,
    /// Tasks expected to complete at the resource's historical velocity.
    pub predicted_completion_count: u32,
}

/// Builds a utilization snapshot from a resource's active tasks.
///
/// `tasks` must already be filtered to active statuses intersecting the
/// window (the repository contract). Zero capacity with zero tasks reads as
/// 0%; zero capacity with work assigned reads as the configured sentinel
/// percentage so it classifies as severely overloaded rather than
/// propagating a division by zero.
pub fn utilization_snapshot(
    tasks: &[Task],
    profile: Option<&ResourceProfile>,
    plan: &CapacityPlan,
    config: &EngineConfig,
) -> UtilizationSnapshot {
    let task_count = tasks.len() as u32;
    let utilization_percentage =
        saturating_percentage(f64::from(task_count), f64::from(plan.base_capacity), config);

    let weighted_task_load: f64 = tasks
        .iter()
        .map(|task| {
            f64::from(task.complexity_score)
                * task.priority.urgency_multiplier()
                * task.collaboration_intensity.load_multiplier()
        })
        .sum();

    let fallback = config.neutral_profile(&plan.resource_id);
    let profile = profile.unwrap_or(&fallback);
    let weighted_capacity = f64::from(profile.optimal_task_count_per_week)
        * (f64::from(profile.complexity_handling_score) / 5.0)
        * (1.0 + profile.collaboration_effectiveness);
    let weighted_utilization = saturating_percentage(weighted_task_load, weighted_capacity, config);

    let heavy_dependencies = tasks.iter().filter(|t| t.dependency_weight > 5.0).count() as f64;
    let high_complexity = tasks.iter().filter(|t| t.complexity_score > 7).count() as f64;
    let bottleneck_risk = (3.0 * heavy_dependencies + 2.0 * high_complexity).min(10.0);

    let context_switch_penalty = if task_count <= 1 {
        0.0
    } else {
        let disruptive = tasks
            .iter()
            .filter(|t| t.context_switching_penalty > 7)
            .count() as f64;
        (f64::from(task_count - 1) * 0.1 + disruptive * 0.2).min(1.0)
    };

    let predicted_completion_count =
        (f64::from(task_count) * profile.historical_task_velocity).floor() as u32;

    UtilizationSnapshot {
        resource_id: plan.resource_id.clone(),
        task_count,
        base_capacity: plan.base_capacity,
        utilization_percentage,
        weighted_task_load,
        weighted_capacity,
        weighted_utilization,
        status: UtilizationStatus::classify(utilization_percentage, &config.bands),
        distribution: TaskDistribution::from_tasks(tasks),
        bottleneck_risk,
        context_switch_penalty,
        predicted_completion_count,
    }
}

/// `load / capacity * 100`, resolving a zero capacity to 0% when idle and to
/// the configured sentinel when loaded.
fn saturating_percentage(load: f64, capacity: f64, config: &EngineConfig) -> f64 {
    if capacity <= 0.0 {
        if load <= 0.0 {
            0.0
        } else {
            config.zero_capacity_utilization
        }
    } else {
        load / capacity * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::capacity_plan;
    use crate::types::{CollaborationIntensity, TaskPriority, TimeWindow};

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    fn profile(week: u32) -> ResourceProfile {
        ResourceProfile {
            optimal_task_count_per_week: week,
            ..ResourceProfile::neutral("r1")
        }
    }

    fn snapshot_for(task_count: usize, profile: &ResourceProfile) -> UtilizationSnapshot {
        let tasks: Vec<Task> = (0..task_count)
            .map(|i| Task::new(format!("t{i}"), "p1").assigned_to("r1"))
            .collect();
        let cfg = config();
        let plan = capacity_plan("r1", Some(profile), &[], TimeWindow::Week, &cfg);
        utilization_snapshot(&tasks, Some(profile), &plan, &cfg)
    }

    #[test]
    fn twelve_of_fifteen_is_well_utilized() {
        let snapshot = snapshot_for(12, &profile(15));
        assert!((snapshot.utilization_percentage - 80.0).abs() < 1e-9);
        assert_eq!(snapshot.status, UtilizationStatus::WellUtilized);
    }

    #[test]
    fn eighteen_of_fifteen_is_overloaded() {
        let snapshot = snapshot_for(18, &profile(15));
        assert!((snapshot.utilization_percentage - 120.0).abs() < 1e-9);
        assert_eq!(snapshot.status, UtilizationStatus::Overloaded);
    }

    #[test]
    fn nineteen_of_fifteen_is_severely_overloaded() {
        let snapshot = snapshot_for(19, &profile(15));
        assert!(snapshot.utilization_percentage > 126.0);
        assert_eq!(snapshot.status, UtilizationStatus::SeverelyOverloaded);
    }

    #[test]
    fn bands_are_exhaustive_and_exclusive() {
        let bands = UtilizationBands::default();
        let cases = [
            (0.0, UtilizationStatus::Underutilized),
            (30.0, UtilizationStatus::Underutilized),
            (30.1, UtilizationStatus::ModeratelyUtilized),
            (60.0, UtilizationStatus::ModeratelyUtilized),
            (60.1, UtilizationStatus::WellUtilized),
            (85.0, UtilizationStatus::WellUtilized),
            (85.1, UtilizationStatus::OptimallyLoaded),
            (100.0, UtilizationStatus::OptimallyLoaded),
            (100.1, UtilizationStatus::Overloaded),
            (120.0, UtilizationStatus::Overloaded),
            (120.1, UtilizationStatus::SeverelyOverloaded),
        ];
        for (pct, expected) in cases {
            assert_eq!(
                UtilizationStatus::classify(pct, &bands),
                expected,
                "percentage {pct}"
            );
        }
    }

    #[test]
    fn weighted_load_applies_multipliers() {
        let tasks = vec![
            Task::new("t1", "p1")
                .with_complexity(6)
                .with_priority(TaskPriority::Critical)
                .with_collaboration(CollaborationIntensity::High),
            Task::new("t2", "p1").with_complexity(4),
        ];
        let cfg = config();
        let p = profile(15);
        let plan = capacity_plan("r1", Some(&p), &[], TimeWindow::Week, &cfg);
        let snapshot = utilization_snapshot(&tasks, Some(&p), &plan, &cfg);
        // 6 * 1.5 * 1.3 + 4 * 1.0 * 1.1 = 11.7 + 4.4
        assert!((snapshot.weighted_task_load - 16.1).abs() < 1e-9);
    }

    #[test]
    fn weighted_capacity_formula() {
        let p = ResourceProfile {
            optimal_task_count_per_week: 10,
            complexity_handling_score: 8,
            collaboration_effectiveness: 0.5,
            ..ResourceProfile::neutral("r1")
        };
        let cfg = config();
        let plan = capacity_plan("r1", Some(&p), &[], TimeWindow::Week, &cfg);
        let snapshot = utilization_snapshot(&[], Some(&p), &plan, &cfg);
        // 10 * (8/5) * 1.5 = 24
        assert!((snapshot.weighted_capacity - 24.0).abs() < 1e-9);
    }

    #[test]
    fn distribution_buckets() {
        let tasks = vec![
            Task::new("t1", "p1").with_complexity(1),
            Task::new("t2", "p1").with_complexity(3),
            Task::new("t3", "p1").with_complexity(4),
            Task::new("t4", "p1").with_complexity(6),
            Task::new("t5", "p1").with_complexity(7),
            Task::new("t6", "p1").with_complexity(10),
        ];
        let dist = TaskDistribution::from_tasks(&tasks);
        assert_eq!(dist.simple, 2);
        assert_eq!(dist.medium, 2);
        assert_eq!(dist.complex, 2);
    }

    #[test]
    fn bottleneck_risk_caps_at_ten() {
        let tasks: Vec<Task> = (0..5)
            .map(|i| {
                let mut t = Task::new(format!("t{i}"), "p1").with_complexity(9);
                t.dependency_weight = 8.0;
                t
            })
            .collect();
        let cfg = config();
        let p = profile(15);
        let plan = capacity_plan("r1", Some(&p), &[], TimeWindow::Week, &cfg);
        let snapshot = utilization_snapshot(&tasks, Some(&p), &plan, &cfg);
        assert_eq!(snapshot.bottleneck_risk, 10.0);
    }

    #[test]
    fn single_task_has_no_switch_penalty() {
        let snapshot = snapshot_for(1, &profile(15));
        assert_eq!(snapshot.context_switch_penalty, 0.0);
    }

    #[test]
    fn switch_penalty_counts_disruptive_tasks() {
        let mut tasks = vec![
            Task::new("t1", "p1"),
            Task::new("t2", "p1"),
            Task::new("t3", "p1"),
        ];
        tasks[0].context_switching_penalty = 9;
        let cfg = config();
        let p = profile(15);
        let plan = capacity_plan("r1", Some(&p), &[], TimeWindow::Week, &cfg);
        let snapshot = utilization_snapshot(&tasks, Some(&p), &plan, &cfg);
        // (3-1)*0.1 + 1*0.2 = 0.4
        assert!((snapshot.context_switch_penalty - 0.4).abs() < 1e-9);
    }

    #[test]
    fn predicted_completions_floor_velocity() {
        let p = ResourceProfile {
            historical_task_velocity: 0.8,
            ..profile(15)
        };
        let snapshot = snapshot_for(7, &p);
        assert_eq!(snapshot.predicted_completion_count, 5);
    }

    #[test]
    fn zero_capacity_with_tasks_reads_as_sentinel() {
        let p = profile(0);
        let snapshot = snapshot_for(2, &p);
        assert_eq!(
            snapshot.utilization_percentage,
            config().zero_capacity_utilization
        );
        assert_eq!(snapshot.status, UtilizationStatus::SeverelyOverloaded);
    }

    #[test]
    fn zero_capacity_idle_reads_as_zero() {
        let snapshot = snapshot_for(0, &profile(0));
        assert_eq!(snapshot.utilization_percentage, 0.0);
        assert_eq!(snapshot.status, UtilizationStatus::Underutilized);
    }

    #[test]
    fn missing_profile_uses_neutral_defaults() {
        let tasks: Vec<Task> = (0..4).map(|i| Task::new(format!("t{i}"), "p1")).collect();
        let cfg = config();
        let plan = capacity_plan("r1", None, &[], TimeWindow::Week, &cfg);
        let snapshot = utilization_snapshot(&tasks, None, &plan, &cfg);
        assert_eq!(snapshot.base_capacity, 15);
        // Default velocity 0.8: floor(4 * 0.8) = 3.
        assert_eq!(snapshot.predicted_completion_count, 3);
    }

    #[test]
    fn configured_velocity_drives_fallback_predictions() {
        let tasks: Vec<Task> = (0..10).map(|i| Task::new(format!("t{i}"), "p1")).collect();
        let mut cfg = config();
        cfg.default_velocity = 0.5;
        let plan = capacity_plan("r1", None, &[], TimeWindow::Week, &cfg);
        let snapshot = utilization_snapshot(&tasks, None, &plan, &cfg);
        assert_eq!(snapshot.predicted_completion_count, 5);
    }

    #[test]
    fn configured_capacity_drives_fallback_weighted_capacity() {
        let mut cfg = config();
        cfg.default_capacities.per_week = 10;
        let plan = capacity_plan("r1", None, &[], TimeWindow::Week, &cfg);
        let snapshot = utilization_snapshot(&[], None, &plan, &cfg);
        // 10 * (5/5) * 1.5 = 15
        assert!((snapshot.weighted_capacity - 15.0).abs() < 1e-9);
    }
}
