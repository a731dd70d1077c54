//! Domain model shared across the engine.
//!
//! Tasks, resource profiles, and skill proficiencies are owned and mutated
//! by external CRUD collaborators; the engine only reads them. The absence
//! of a profile or of proficiency rows is a valid state and every consumer
//! of these types must degrade to neutral defaults rather than fail.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Review,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Whether the task still counts against a resource's load.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress | Self::Review)
    }
}

/// Task priority, from routine to drop-everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl TaskPriority {
    /// Multiplier applied to a task's weighted load contribution.
    pub fn urgency_multiplier(self) -> f64 {
        match self {
            Self::Critical => 1.5,
            Self::High => 1.2,
            Self::Medium | Self::Low => 1.0,
        }
    }
}

/// How much coordination with other people a task demands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaborationIntensity {
    Low,
    #[default]
    Medium,
    High,
}

impl CollaborationIntensity {
    /// Multiplier applied to a task's weighted load contribution.
    pub fn load_multiplier(self) -> f64 {
        match self {
            Self::High => 1.3,
            Self::Medium => 1.1,
            Self::Low => 1.0,
        }
    }
}

/// Role a required skill plays in a task.
///
/// Unknown requirement types deserialize as [`SkillRequirementType::LearningOpportunity`],
/// which carries the default weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillRequirementType {
    #[default]
    Primary,
    Secondary,
    NiceToHave,
    #[serde(other)]
    LearningOpportunity,
}

impl SkillRequirementType {
    /// Weight of this requirement in the skill match score.
    pub fn weight(self) -> f64 {
        match self {
            Self::Primary => 1.0,
            Self::Secondary => 0.7,
            Self::NiceToHave => 0.3,
            Self::LearningOpportunity => 0.5,
        }
    }
}

/// A skill a task calls for, with the minimum proficiency expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredSkill {
    pub skill_id: String,
    pub requirement_type: SkillRequirementType,
    /// Minimum proficiency level (1-10) expected for full credit.
    pub minimum_proficiency: u8,
}

impl RequiredSkill {
    pub fn new(
        skill_id: impl Into<String>,
        requirement_type: SkillRequirementType,
        minimum_proficiency: u8,
    ) -> Self {
        Self {
            skill_id: skill_id.into(),
            requirement_type,
            minimum_proficiency,
        }
    }
}

/// A unit of project work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub project_id: String,
    /// Resource currently responsible for the task, if any.
    pub assigned_resource_id: Option<String>,
    pub title: String,
    /// Intrinsic difficulty on a 1-10 scale.
    pub complexity_score: u8,
    pub priority: TaskPriority,
    pub collaboration_intensity: CollaborationIntensity,
    /// How much downstream work hangs off this task.
    pub dependency_weight: f64,
    /// Cost of juggling this task alongside others (1-10).
    pub context_switching_penalty: u8,
    pub status: TaskStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub required_skills: Vec<RequiredSkill>,
}

impl Task {
    /// Creates a pending task with mid-scale defaults.
    pub fn new(id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            assigned_resource_id: None,
            title: String::new(),
            complexity_score: 5,
            priority: TaskPriority::default(),
            collaboration_intensity: CollaborationIntensity::default(),
            dependency_weight: 1.0,
            context_switching_penalty: 5,
            status: TaskStatus::Pending,
            start_date: None,
            end_date: None,
            required_skills: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_complexity(mut self, score: u8) -> Self {
        self.complexity_score = score;
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_collaboration(mut self, intensity: CollaborationIntensity) -> Self {
        self.collaboration_intensity = intensity;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn assigned_to(mut self, resource_id: impl Into<String>) -> Self {
        self.assigned_resource_id = Some(resource_id.into());
        self
    }

    pub fn with_required_skill(mut self, skill: RequiredSkill) -> Self {
        self.required_skills.push(skill);
        self
    }

    /// Whether the task's date range intersects `[start, end]`.
    ///
    /// Missing dates are treated as open-ended, so an undated task
    /// intersects every window.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let starts_before_end = self.start_date.map_or(true, |s| s <= end);
        let ends_after_start = self.end_date.map_or(true, |e| e >= start);
        starts_before_end && ends_after_start
    }
}

/// Working style a resource prefers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkStyle {
    Collaborative,
    DeepFocus,
    #[default]
    Mixed,
}

/// How a resource prefers to sequence concurrent work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchingPreference {
    Sequential,
    Parallel,
    #[default]
    Balanced,
}

/// Per-resource working characteristics.
///
/// One row per resource, maintained by external CRUD screens. A resource
/// without a profile is scored against the engine configuration's neutral
/// profile, built on [`ResourceProfile::neutral`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceProfile {
    pub resource_id: String,
    pub optimal_task_count_per_day: u32,
    pub optimal_task_count_per_week: u32,
    /// Ability to absorb difficult work (1-10).
    pub complexity_handling_score: u8,
    /// Effectiveness when work requires coordination (0-1).
    pub collaboration_effectiveness: f64,
    pub preferred_work_style: WorkStyle,
    pub task_switching_preference: SwitchingPreference,
    /// Productivity lost per concurrent task (1-10).
    pub task_switching_penalty_score: u8,
    /// Ratio of planned to actual completion; 1.0 means on-plan.
    pub historical_task_velocity: f64,
}

impl ResourceProfile {
    /// Mid-scale profile used when no profile row exists for a resource.
    pub fn neutral(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            optimal_task_count_per_day: 3,
            optimal_task_count_per_week: 15,
            complexity_handling_score: 5,
            collaboration_effectiveness: 0.5,
            preferred_work_style: WorkStyle::Mixed,
            task_switching_preference: SwitchingPreference::Balanced,
            task_switching_penalty_score: 5,
            historical_task_velocity: 0.8,
        }
    }

    /// Optimal task count for the given window; months are four weeks.
    pub fn optimal_count_for(&self, window: TimeWindow) -> u32 {
        match window {
            TimeWindow::Day => self.optimal_task_count_per_day,
            TimeWindow::Week => self.optimal_task_count_per_week,
            TimeWindow::Month => self.optimal_task_count_per_week * 4,
        }
    }
}

/// A resource's recorded proficiency in one skill (1-10).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProficiency {
    pub resource_id: String,
    pub skill_id: String,
    pub proficiency_level: u8,
}

impl SkillProficiency {
    pub fn new(
        resource_id: impl Into<String>,
        skill_id: impl Into<String>,
        proficiency_level: u8,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            skill_id: skill_id.into(),
            proficiency_level,
        }
    }
}

/// Directory entry for a candidate resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,
    pub name: String,
}

/// Reporting window for capacity and utilization queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
    Month,
}

impl TimeWindow {
    /// Window length in days; a month is four working weeks.
    pub fn days(self) -> i64 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 28,
        }
    }

    /// Concrete date range starting at `now`.
    pub fn range(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now, now + Duration::days(self.days()))
    }
}
