//! JSON-lines file store for recommendations.
//!
//! Append-only, one record per line. Records are never mutated; stale ones
//! are dropped wholesale by [`JsonFileStore::purge_expired`].

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::recommend::AssignmentRecommendation;
use crate::repo::RecommendationStore;

/// Appends recommendations to a newline-delimited JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads back every stored recommendation, in append order.
    pub fn load(&self) -> Result<Vec<AssignmentRecommendation>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        data.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .with_context(|| format!("parsing record in {}", self.path.display()))
            })
            .collect()
    }

    /// Drops records whose expiry has passed; returns how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize> {
        let records = self.load()?;
        let kept: Vec<&AssignmentRecommendation> =
            records.iter().filter(|r| !r.is_expired(now)).collect();
        let removed = records.len() - kept.len();
        if removed == 0 {
            return Ok(0);
        }
        let mut out = String::new();
        for record in kept {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        fs::write(&self.path, out).with_context(|| format!("rewriting {}", self.path.display()))?;
        Ok(removed)
    }
}

#[async_trait]
impl RecommendationStore for JsonFileStore {
    async fn append(&self, recommendation: &AssignmentRecommendation) -> Result<String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;
        let line = serde_json::to_string(recommendation)?;
        writeln!(file, "{line}")?;
        Ok(recommendation.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::outcome_forecast;
    use crate::recommend::{CapacityAnalysis, RecommendationReasoning};
    use crate::risk::RiskProfile;
    use crate::scoring::FitBreakdown;
    use chrono::Duration;

    fn record(id: &str, created_at: DateTime<Utc>) -> AssignmentRecommendation {
        AssignmentRecommendation {
            id: id.to_string(),
            project_id: "p1".into(),
            resource_id: "r1".into(),
            fit: FitBreakdown::default(),
            overall_fit_score: 0.42,
            forecast: outcome_forecast(&[], None, &crate::config::EngineConfig::default()),
            risk: RiskProfile {
                overload_risk: 1.0,
                skill_gap_risk: 2.0,
                context_switching_impact: 0.1,
            },
            recommended_task_count: 3,
            reasoning: RecommendationReasoning {
                task_matches: vec![],
                capacity_analysis: CapacityAnalysis {
                    current_utilization_percentage: 40.0,
                    additional_capacity_needed: 0,
                    optimal_distribution: "3 simple, 2 medium, 1 complex slots open".into(),
                    timeline_impact: "Can absorb the project without timeline impact".into(),
                },
                potential_blockers: vec!["blocker".into()],
                success_factors: vec![],
                risk_factors: vec![],
            },
            alternative_assignments: vec![],
            created_at,
            expires_at: created_at + Duration::hours(24),
        }
    }

    #[tokio::test]
    async fn append_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("recs.jsonl"));
        let now = Utc::now();
        let first = record("a", now);
        let second = record("b", now);
        store.append(&first).await.unwrap();
        store.append(&second).await.unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], first);
        assert_eq!(loaded[1], second);
    }

    #[tokio::test]
    async fn load_on_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing.jsonl"));
        assert!(store.load().unwrap().is_empty());
    }

    #[tokio::test]
    async fn purge_drops_only_expired_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("recs.jsonl"));
        let now = Utc::now();
        store.append(&record("old", now - Duration::hours(48))).await.unwrap();
        store.append(&record("fresh", now)).await.unwrap();

        let removed = store.purge_expired(now).unwrap();
        assert_eq!(removed, 1);
        let remaining = store.load().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "fresh");
    }
}
