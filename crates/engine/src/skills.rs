//! Skill matching: how well recorded proficiencies cover required skills.

use std::collections::{HashMap, HashSet};

use crate::types::{RequiredSkill, SkillProficiency, Task};

/// Score returned when a task set carries no skill requirements at all.
/// Absence of requirements is not evidence of fit or misfit.
pub const NEUTRAL_MATCH: f64 = 0.5;

/// Scores how well a resource's proficiencies cover a requirement list.
///
/// Returns [`NEUTRAL_MATCH`] for an empty requirement list and 0.0 when the
/// resource has no recorded proficiencies. Otherwise each requirement
/// contributes `weight * min(proficiency / minimum, 1)` and the total is
/// averaged over the requirement count.
pub fn skill_match_score(
    proficiencies: &[SkillProficiency],
    requirements: &[RequiredSkill],
) -> f64 {
    if requirements.is_empty() {
        return NEUTRAL_MATCH;
    }
    if proficiencies.is_empty() {
        return 0.0;
    }

    let levels = proficiency_levels(proficiencies);
    let total: f64 = requirements
        .iter()
        .map(|req| req.requirement_type.weight() * coverage_ratio(&levels, req))
        .sum();
    total / requirements.len() as f64
}

/// Fraction of a requirement the resource meets, capped at full credit.
fn coverage_ratio(levels: &HashMap<&str, u8>, req: &RequiredSkill) -> f64 {
    let level = levels.get(req.skill_id.as_str()).copied().unwrap_or(0);
    if req.minimum_proficiency == 0 {
        // A requirement with no minimum is trivially met.
        return 1.0;
    }
    (f64::from(level) / f64::from(req.minimum_proficiency)).min(1.0)
}

/// Proficiency level per skill id.
pub fn proficiency_levels(proficiencies: &[SkillProficiency]) -> HashMap<&str, u8> {
    proficiencies
        .iter()
        .map(|p| (p.skill_id.as_str(), p.proficiency_level))
        .collect()
}

/// Union of required skills across a task set, first occurrence wins.
pub fn requirement_union(tasks: &[Task]) -> Vec<RequiredSkill> {
    let mut seen = HashSet::new();
    let mut union = Vec::new();
    for task in tasks {
        for req in &task.required_skills {
            if seen.insert(req.skill_id.clone()) {
                union.push(req.clone());
            }
        }
    }
    union
}

/// Skill match for one task's own requirement list.
pub fn task_match_score(proficiencies: &[SkillProficiency], task: &Task) -> f64 {
    skill_match_score(proficiencies, &task.required_skills)
}
