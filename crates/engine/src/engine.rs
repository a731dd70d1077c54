//! Orchestration: fan out per-resource evaluation and rank the results.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::availability::availability_outlook;
use crate::capacity::capacity_plan;
use crate::config::{ConfigError, EngineConfig};
use crate::predict::outcome_forecast;
use crate::recommend::{
    compose_recommendation, persist_recommendation, rank_alternatives, AssignmentRecommendation,
    ResourceEvaluation,
};
use crate::repo::{
    ProficiencyRepository, ProfileRepository, RecommendationStore, ResourceDirectory,
    TaskRepository,
};
use crate::risk::risk_profile;
use crate::scoring::fit_breakdown;
use crate::types::{ResourceRef, SkillProficiency, Task};
use crate::utilization::utilization_snapshot;

/// The assignment recommendation engine.
///
/// Per-resource scoring is a pure read-then-compute-then-single-write
/// pipeline with no dependency on other resources' results, so the fan-out
/// across candidates runs concurrently, bounded by
/// [`EngineConfig::max_concurrent_evaluations`]. The returned list is always
/// sorted non-increasing by overall fit score regardless of completion
/// order.
pub struct AssignmentEngine {
    shared: Arc<Shared>,
}

struct Shared {
    tasks: Arc<dyn TaskRepository>,
    profiles: Arc<dyn ProfileRepository>,
    proficiencies: Arc<dyn ProficiencyRepository>,
    directory: Arc<dyn ResourceDirectory>,
    store: Arc<dyn RecommendationStore>,
    config: EngineConfig,
}

impl AssignmentEngine {
    /// Builds an engine with the default configuration.
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        profiles: Arc<dyn ProfileRepository>,
        proficiencies: Arc<dyn ProficiencyRepository>,
        directory: Arc<dyn ResourceDirectory>,
        store: Arc<dyn RecommendationStore>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                tasks,
                profiles,
                proficiencies,
                directory,
                store,
                config: EngineConfig::default(),
            }),
        }
    }

    /// Replaces the configuration, rejecting one that breaks the scoring
    /// invariants.
    pub fn with_config(self, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let shared = Arc::try_unwrap(self.shared).unwrap_or_else(|arc| Shared {
            tasks: arc.tasks.clone(),
            profiles: arc.profiles.clone(),
            proficiencies: arc.proficiencies.clone(),
            directory: arc.directory.clone(),
            store: arc.store.clone(),
            config: arc.config.clone(),
        });
        Ok(Self {
            shared: Arc::new(Shared { config, ..shared }),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.shared.config
    }

    /// Scores every candidate resource against the project's open tasks and
    /// returns recommendations sorted descending by overall fit.
    ///
    /// An empty candidate list or a project with no open tasks yields an
    /// empty list, not an error.
    pub async fn suggest_optimal_assignment(
        &self,
        project_id: &str,
        candidate_resource_ids: &[String],
    ) -> Result<Vec<AssignmentRecommendation>> {
        self.suggest_optimal_assignment_at(project_id, candidate_resource_ids, Utc::now())
            .await
    }

    /// [`Self::suggest_optimal_assignment`] with an explicit clock, so TTL
    /// and window behavior are exactly testable.
    pub async fn suggest_optimal_assignment_at(
        &self,
        project_id: &str,
        candidate_resource_ids: &[String],
        now: DateTime<Utc>,
    ) -> Result<Vec<AssignmentRecommendation>> {
        if candidate_resource_ids.is_empty() {
            return Ok(Vec::new());
        }

        let project_tasks = Arc::new(
            self.shared
                .tasks
                .open_project_tasks(project_id)
                .await
                .context("fetching open project tasks")?,
        );
        if project_tasks.is_empty() {
            debug!(project_id, "no open tasks; nothing to recommend");
            return Ok(Vec::new());
        }

        let alternative_pool = Arc::new(self.alternative_pool().await);
        let semaphore = Arc::new(Semaphore::new(self.shared.config.max_concurrent_evaluations));
        let mut join_set = JoinSet::new();

        for (submit_order, resource_id) in candidate_resource_ids.iter().cloned().enumerate() {
            let shared = self.shared.clone();
            let project_id = project_id.to_string();
            let project_tasks = project_tasks.clone();
            let pool = alternative_pool.clone();
            let semaphore = semaphore.clone();
            join_set.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .context("evaluation pool closed")?;
                let recommendation = evaluate_resource(
                    &shared,
                    &project_id,
                    &resource_id,
                    &project_tasks,
                    &pool,
                    now,
                )
                .await?;
                Ok::<_, anyhow::Error>((submit_order, recommendation))
            });
        }

        let mut indexed = Vec::with_capacity(candidate_resource_ids.len());
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(Ok(entry)) => indexed.push(entry),
                Ok(Err(error)) => warn!(%error, "skipping candidate after evaluation failure"),
                Err(error) => warn!(%error, "evaluation task aborted"),
            }
        }

        // Restore submission order first so equal scores rank
        // deterministically, then stable-sort by fit.
        indexed.sort_by_key(|(order, _)| *order);
        let mut recommendations: Vec<AssignmentRecommendation> =
            indexed.into_iter().map(|(_, rec)| rec).collect();
        recommendations.sort_by(|a, b| b.overall_fit_score.total_cmp(&a.overall_fit_score));
        Ok(recommendations)
    }

    /// Directory candidates with their proficiencies, fetched once per query.
    async fn alternative_pool(&self) -> Vec<(ResourceRef, Vec<SkillProficiency>)> {
        let resources = match self.shared.directory.candidate_resources().await {
            Ok(resources) => resources,
            Err(error) => {
                warn!(%error, "resource directory unavailable; no alternatives");
                return Vec::new();
            }
        };
        let mut pool = Vec::with_capacity(resources.len());
        for resource in resources {
            let proficiencies = match self.shared.proficiencies.proficiencies(&resource.id).await {
                Ok(proficiencies) => proficiencies,
                Err(error) => {
                    warn!(resource_id = %resource.id, %error, "proficiency lookup failed");
                    Vec::new()
                }
            };
            pool.push((resource, proficiencies));
        }
        pool
    }
}

/// Runs the full per-resource pipeline: read, compute, compose, persist.
async fn evaluate_resource(
    shared: &Shared,
    project_id: &str,
    resource_id: &str,
    project_tasks: &[Task],
    alternative_pool: &[(ResourceRef, Vec<SkillProficiency>)],
    now: DateTime<Utc>,
) -> Result<AssignmentRecommendation> {
    let config = &shared.config;
    let (from, to) = config.evaluation_window.range(now);

    let profile = shared
        .profiles
        .profile(resource_id)
        .await
        .context("fetching resource profile")?;
    if profile.is_none() {
        debug!(resource_id, "no profile on record; using neutral defaults");
    }
    let proficiencies = shared
        .proficiencies
        .proficiencies(resource_id)
        .await
        .context("fetching proficiencies")?;
    let assigned = shared
        .tasks
        .active_tasks_for_resource(resource_id, from, to)
        .await
        .context("fetching assigned tasks")?;

    let plan = capacity_plan(
        resource_id,
        profile.as_ref(),
        &proficiencies,
        config.evaluation_window,
        config,
    );
    let utilization = utilization_snapshot(&assigned, profile.as_ref(), &plan, config);
    let availability = availability_outlook(&assigned, profile.as_ref(), &plan, config);
    let fit = fit_breakdown(
        project_tasks,
        profile.as_ref(),
        &proficiencies,
        &utilization,
        &availability,
        config,
    );
    let forecast = outcome_forecast(project_tasks, profile.as_ref(), config);
    let risk = risk_profile(project_tasks, profile.as_ref(), &utilization);

    let others: Vec<(ResourceRef, Vec<SkillProficiency>)> = alternative_pool
        .iter()
        .filter(|(resource, _)| resource.id != resource_id)
        .cloned()
        .collect();
    let alternatives = rank_alternatives(project_tasks, &others, config.max_alternatives);

    let recommendation = compose_recommendation(
        project_id,
        ResourceEvaluation {
            resource_id,
            project_tasks,
            profile: profile.as_ref(),
            proficiencies: &proficiencies,
            utilization: &utilization,
            availability: &availability,
            fit,
            forecast,
            risk,
            alternatives,
        },
        config,
        now,
    );

    debug!(
        resource_id,
        overall_fit = recommendation.overall_fit_score,
        status = ?utilization.status,
        "resource evaluated"
    );

    persist_recommendation(shared.store.as_ref(), &recommendation).await;
    Ok(recommendation)
}
