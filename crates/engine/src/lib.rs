//! Capacity-aware task assignment recommendations.
//!
//! Given a project's open tasks and a pool of candidate resources, the
//! engine computes per resource a multi-factor fit score, an outcome
//! forecast, and a risk profile, and returns ranked, explained
//! recommendations.
//!
//! This crate provides:
//! - Capacity, utilization, and availability analysis per resource
//! - Skill matching against task requirement lists
//! - A six-factor assignment scorer with named, validated weights
//! - Recommendation composition with reasoning, alternatives, and a 24h TTL
//! - Repository traits for the read seams plus in-memory and JSON-file
//!   backings
//!
//! Entry point: [`AssignmentEngine::suggest_optimal_assignment`].

pub mod availability;
pub mod capacity;
pub mod config;
pub mod engine;
pub mod memory;
pub mod predict;
pub mod recommend;
pub mod repo;
pub mod risk;
pub mod scoring;
pub mod skills;
pub mod store;
pub mod types;
pub mod utilization;

pub use availability::{availability_outlook, AvailabilityOutlook, TierSlots};
pub use capacity::{capacity_plan, CapacityPlan, ComplexityCapacity};
pub use config::{
    ConfigError, DefaultCapacities, EngineConfig, ScoringWeights, TierMultipliers,
    UtilizationBands,
};
pub use engine::AssignmentEngine;
pub use memory::{Dataset, InMemoryRepository};
pub use predict::{outcome_forecast, OutcomeForecast};
pub use recommend::{
    AlternativeAssignment, AssignmentRecommendation, CapacityAnalysis, RecommendationReasoning,
    TaskMatch,
};
pub use repo::{
    ProficiencyRepository, ProfileRepository, RecommendationStore, ResourceDirectory,
    TaskRepository,
};
pub use risk::{risk_profile, RiskProfile};
pub use scoring::{fit_breakdown, FitBreakdown};
pub use skills::{skill_match_score, NEUTRAL_MATCH};
pub use store::JsonFileStore;
pub use types::{
    CollaborationIntensity, RequiredSkill, ResourceProfile, ResourceRef, SkillProficiency,
    SkillRequirementType, SwitchingPreference, Task, TaskPriority, TaskStatus, TimeWindow,
    WorkStyle,
};
pub use utilization::{
    utilization_snapshot, TaskDistribution, UtilizationSnapshot, UtilizationStatus,
};
