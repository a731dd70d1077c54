//! Repository contracts the engine reads from and writes to.
//!
//! Each external read is abstracted behind an injected trait; concurrency is
//! an orchestration concern layered above these calls, not inside them. The
//! task, profile, and proficiency stores are read-only from the engine's
//! perspective. The only write is the append-only recommendation sink.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::recommend::AssignmentRecommendation;
use crate::types::{ResourceProfile, ResourceRef, SkillProficiency, Task};

/// Read access to project and resource task data.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Open (non-terminal) tasks belonging to a project, with their
    /// required-skill lists. Unknown project ids yield an empty list.
    async fn open_project_tasks(&self, project_id: &str) -> Result<Vec<Task>>;

    /// Active tasks assigned to a resource whose date range intersects
    /// `[from, to]`.
    async fn active_tasks_for_resource(
        &self,
        resource_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Task>>;
}

/// Read access to resource working profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// The profile for a resource, or `None` when no profile row exists.
    async fn profile(&self, resource_id: &str) -> Result<Option<ResourceProfile>>;
}

/// Read access to recorded skill proficiencies.
#[async_trait]
pub trait ProficiencyRepository: Send + Sync {
    /// All proficiency rows for a resource; empty when none are recorded.
    async fn proficiencies(&self, resource_id: &str) -> Result<Vec<SkillProficiency>>;
}

/// Directory of resources eligible as alternative assignees.
#[async_trait]
pub trait ResourceDirectory: Send + Sync {
    async fn candidate_resources(&self) -> Result<Vec<ResourceRef>>;
}

/// Append-only sink for finished recommendations.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    /// Persists a recommendation and returns the assigned record id.
    async fn append(&self, recommendation: &AssignmentRecommendation) -> Result<String>;
}
