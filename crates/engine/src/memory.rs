//! In-memory repositories over a serde-loadable dataset.
//!
//! The natural backing for the engine's read contracts when the caller
//! already holds the data: CLI runs over a JSON dataset file, and tests
//! build datasets with fixture helpers.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::recommend::AssignmentRecommendation;
use crate::repo::{
    ProficiencyRepository, ProfileRepository, RecommendationStore, ResourceDirectory,
    TaskRepository,
};
use crate::types::{ResourceProfile, ResourceRef, SkillProficiency, Task};

/// A complete bundle of engine inputs, round-trippable through serde.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub profiles: Vec<ResourceProfile>,
    #[serde(default)]
    pub proficiencies: Vec<SkillProficiency>,
    #[serde(default)]
    pub resources: Vec<ResourceRef>,
}

/// All read contracts plus an in-memory recommendation sink, backed by a
/// [`Dataset`].
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    dataset: Dataset,
    recommendations: Mutex<Vec<AssignmentRecommendation>>,
}

impl InMemoryRepository {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            recommendations: Mutex::new(Vec::new()),
        }
    }

    /// Recommendations appended so far, in insertion order.
    pub async fn stored_recommendations(&self) -> Vec<AssignmentRecommendation> {
        self.recommendations.lock().await.clone()
    }
}

#[async_trait]
impl TaskRepository for InMemoryRepository {
    async fn open_project_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        Ok(self
            .dataset
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id && t.status.is_active())
            .cloned()
            .collect())
    }

    async fn active_tasks_for_resource(
        &self,
        resource_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Task>> {
        Ok(self
            .dataset
            .tasks
            .iter()
            .filter(|t| {
                t.assigned_resource_id.as_deref() == Some(resource_id)
                    && t.status.is_active()
                    && t.overlaps(from, to)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn profile(&self, resource_id: &str) -> Result<Option<ResourceProfile>> {
        Ok(self
            .dataset
            .profiles
            .iter()
            .find(|p| p.resource_id == resource_id)
            .cloned())
    }
}

#[async_trait]
impl ProficiencyRepository for InMemoryRepository {
    async fn proficiencies(&self, resource_id: &str) -> Result<Vec<SkillProficiency>> {
        Ok(self
            .dataset
            .proficiencies
            .iter()
            .filter(|p| p.resource_id == resource_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ResourceDirectory for InMemoryRepository {
    async fn candidate_resources(&self) -> Result<Vec<ResourceRef>> {
        Ok(self.dataset.resources.clone())
    }
}

#[async_trait]
impl RecommendationStore for InMemoryRepository {
    async fn append(&self, recommendation: &AssignmentRecommendation) -> Result<String> {
        let mut records = self.recommendations.lock().await;
        records.push(recommendation.clone());
        Ok(recommendation.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TaskStatus, TimeWindow};

    fn dataset() -> Dataset {
        Dataset {
            tasks: vec![
                Task::new("t1", "p1"),
                Task::new("t2", "p1").with_status(TaskStatus::Completed),
                Task::new("t3", "p2"),
                Task::new("t4", "p1").assigned_to("r1"),
            ],
            profiles: vec![ResourceProfile::neutral("r1")],
            proficiencies: vec![
                SkillProficiency::new("r1", "rust", 8),
                SkillProficiency::new("r2", "sql", 5),
            ],
            resources: vec![ResourceRef {
                id: "r1".into(),
                name: "Riley".into(),
            }],
        }
    }

    #[tokio::test]
    async fn open_tasks_filter_project_and_status() {
        let repo = InMemoryRepository::new(dataset());
        let tasks = repo.open_project_tasks("p1").await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|t| t.status.is_active()));
        assert!(repo.open_project_tasks("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn active_tasks_respect_assignment_and_window() {
        let repo = InMemoryRepository::new(dataset());
        let (from, to) = TimeWindow::Week.range(Utc::now());
        let tasks = repo.active_tasks_for_resource("r1", from, to).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "t4");
    }

    #[tokio::test]
    async fn missing_profile_is_none_not_error() {
        let repo = InMemoryRepository::new(dataset());
        assert!(repo.profile("r1").await.unwrap().is_some());
        assert!(repo.profile("r9").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn proficiencies_scoped_per_resource() {
        let repo = InMemoryRepository::new(dataset());
        assert_eq!(repo.proficiencies("r1").await.unwrap().len(), 1);
        assert!(repo.proficiencies("r9").await.unwrap().is_empty());
    }
}
