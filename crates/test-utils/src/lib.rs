//! Shared test fixtures for taskfit crates.
//!
//! Provides a small, internally consistent team dataset plus a store that
//! always fails, for exercising the persistence-degradation path.

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use taskfit_engine::recommend::AssignmentRecommendation;
use taskfit_engine::repo::RecommendationStore;
use taskfit_engine::types::{
    CollaborationIntensity, RequiredSkill, ResourceProfile, ResourceRef, SkillProficiency,
    SkillRequirementType, SwitchingPreference, Task, TaskPriority, WorkStyle,
};
use taskfit_engine::Dataset;

/// A profile with the given weekly optimum and otherwise neutral values.
pub fn profile(resource_id: &str, weekly: u32) -> ResourceProfile {
    ResourceProfile {
        optimal_task_count_per_week: weekly,
        optimal_task_count_per_day: (weekly / 5).max(1),
        ..ResourceProfile::neutral(resource_id)
    }
}

/// A three-person team with one open project.
///
/// - `ada`: strong Rust skills, deep-focus, lightly loaded
/// - `ben`: moderate skills, collaborative, heavily loaded
/// - `cam`: no profile and no proficiencies on record
pub fn sample_dataset() -> Dataset {
    let mut tasks = vec![
        Task::new("task-api", "proj-billing")
            .with_title("Design billing API")
            .with_complexity(7)
            .with_priority(TaskPriority::High)
            .with_required_skill(RequiredSkill::new("rust", SkillRequirementType::Primary, 6))
            .with_required_skill(RequiredSkill::new("sql", SkillRequirementType::Secondary, 4)),
        Task::new("task-ui", "proj-billing")
            .with_title("Invoice review screen")
            .with_complexity(4)
            .with_collaboration(CollaborationIntensity::High)
            .with_required_skill(RequiredSkill::new(
                "frontend",
                SkillRequirementType::Primary,
                5,
            )),
        Task::new("task-etl", "proj-billing")
            .with_title("Usage data import")
            .with_complexity(5)
            .with_required_skill(RequiredSkill::new(
                "etl",
                SkillRequirementType::LearningOpportunity,
                5,
            )),
    ];

    // Existing load: ben is close to capacity, ada has room.
    for i in 0..11 {
        tasks.push(
            Task::new(format!("ben-load-{i}"), "proj-ops")
                .with_title(format!("Ops ticket {i}"))
                .assigned_to("ben"),
        );
    }
    tasks.push(
        Task::new("ada-load-0", "proj-ops")
            .with_title("Refactor ledger module")
            .with_complexity(6)
            .assigned_to("ada"),
    );

    Dataset {
        tasks,
        profiles: vec![
            ResourceProfile {
                complexity_handling_score: 8,
                preferred_work_style: WorkStyle::DeepFocus,
                historical_task_velocity: 0.9,
                ..profile("ada", 12)
            },
            ResourceProfile {
                preferred_work_style: WorkStyle::Collaborative,
                collaboration_effectiveness: 0.85,
                task_switching_preference: SwitchingPreference::Parallel,
                ..profile("ben", 12)
            },
        ],
        proficiencies: vec![
            SkillProficiency::new("ada", "rust", 9),
            SkillProficiency::new("ada", "sql", 6),
            SkillProficiency::new("ben", "rust", 5),
            SkillProficiency::new("ben", "frontend", 7),
            SkillProficiency::new("ben", "sql", 3),
        ],
        resources: vec![
            ResourceRef {
                id: "ada".into(),
                name: "Ada".into(),
            },
            ResourceRef {
                id: "ben".into(),
                name: "Ben".into(),
            },
            ResourceRef {
                id: "cam".into(),
                name: "Cam".into(),
            },
        ],
    }
}

/// A recommendation sink that always fails its insert.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl RecommendationStore for FailingStore {
    async fn append(&self, _recommendation: &AssignmentRecommendation) -> Result<String> {
        Err(anyhow!("store unavailable"))
    }
}
