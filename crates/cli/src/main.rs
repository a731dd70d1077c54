//! Command-line interface for taskfit.
//!
//! Loads a JSON dataset, runs the assignment engine, and prints ranked
//! recommendations as a table or as JSON.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskfit_engine::{
    AssignmentEngine, AssignmentRecommendation, Dataset, InMemoryRepository, JsonFileStore,
};

#[derive(Parser)]
#[command(name = "taskfit", version, about = "Capacity-aware task assignment recommendations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank candidate resources for a project's open tasks.
    Suggest {
        /// Path to the JSON dataset (tasks, profiles, proficiencies, resources).
        #[arg(long)]
        data: PathBuf,
        /// Project whose open tasks need assignees.
        #[arg(long)]
        project: String,
        /// Candidate resource ids.
        #[arg(long, value_delimiter = ',')]
        candidates: Vec<String>,
        /// Append recommendations to this JSON-lines file instead of memory.
        #[arg(long)]
        store: Option<PathBuf>,
        /// Emit full records as JSON instead of a summary table.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Suggest {
            data,
            project,
            candidates,
            store,
            json,
        } => suggest(data, &project, &candidates, store, json).await,
    }
}

async fn suggest(
    data: PathBuf,
    project: &str,
    candidates: &[String],
    store: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let raw = fs::read_to_string(&data).with_context(|| format!("reading {}", data.display()))?;
    let dataset: Dataset =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", data.display()))?;

    let repo = Arc::new(InMemoryRepository::new(dataset));
    let engine = match store {
        Some(path) => AssignmentEngine::new(
            repo.clone(),
            repo.clone(),
            repo.clone(),
            repo,
            Arc::new(JsonFileStore::new(path)),
        ),
        None => AssignmentEngine::new(
            repo.clone(),
            repo.clone(),
            repo.clone(),
            repo.clone(),
            repo,
        ),
    };

    let recommendations = engine.suggest_optimal_assignment(project, candidates).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        println!("No recommendations: project has no open tasks or no candidates were given.");
        return Ok(());
    }
    print_table(&recommendations);
    Ok(())
}

fn print_table(recommendations: &[AssignmentRecommendation]) {
    println!(
        "{:<12} {:>8} {:>7} {:>7} {:>7} {:>6} {:>9}",
        "RESOURCE", "FIT", "SKILL", "AVAIL", "UTIL%", "TASKS", "SUCCESS"
    );
    for rec in recommendations {
        println!(
            "{:<12} {:>8.3} {:>7.2} {:>7.2} {:>7.1} {:>6} {:>8.0}%",
            rec.resource_id,
            rec.overall_fit_score,
            rec.fit.skill_match_score,
            rec.fit.availability_score,
            rec.reasoning.capacity_analysis.current_utilization_percentage,
            rec.recommended_task_count,
            rec.forecast.success_probability * 100.0,
        );
        for blocker in &rec.reasoning.potential_blockers {
            println!("             ! {blocker}");
        }
        for alt in &rec.alternative_assignments {
            println!("             ~ alternative: {}", alt.rationale);
        }
    }
}
