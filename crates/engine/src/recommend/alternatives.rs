//! Fallback suggestions: other candidates ranked by skill match.

use crate::skills::{requirement_union, skill_match_score};
use crate::types::{ResourceRef, SkillProficiency, Task};

use super::explainer::{alternative_rationale, alternative_trade_offs};
use super::AlternativeAssignment;

/// Ranks alternative candidates by skill match against the project's
/// required skills, best first.
///
/// The resource currently being scored must already be excluded from
/// `candidates`; this function does not know which resource the parent
/// recommendation is for.
pub fn rank_alternatives(
    project_tasks: &[Task],
    candidates: &[(ResourceRef, Vec<SkillProficiency>)],
    limit: usize,
) -> Vec<AlternativeAssignment> {
    let requirements = requirement_union(project_tasks);

    let mut alternatives: Vec<AlternativeAssignment> = candidates
        .iter()
        .map(|(resource, proficiencies)| {
            let score = skill_match_score(proficiencies, &requirements);
            AlternativeAssignment {
                resource_id: resource.id.clone(),
                resource_name: resource.name.clone(),
                skill_match_score: score,
                rationale: alternative_rationale(&resource.name, score),
                trade_offs: alternative_trade_offs(),
            }
        })
        .collect();

    alternatives.sort_by(|a, b| b.skill_match_score.total_cmp(&a.skill_match_score));
    alternatives.truncate(limit);
    alternatives
}
