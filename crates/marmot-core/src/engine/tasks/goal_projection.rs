use crate::core::models::catalog::Catalog;
use crate::engine::error::EngineError;
use crate::engine::tasks::problem_matrices::ProblemMatrices;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, instrument};

/// The skill space restricted to one career's required skills.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalProjection {
    pub career_key: String,
    /// Resolved skill ids of the career, in the career's listing order.
    pub goal_skill_ids: Vec<usize>,
    /// `GT_ES[i][j]`: number of goal skills granted by both course `i` and course `j`.
    pub overlap: DMatrix<f64>,
    /// `G_ES[i]`: number of goal skills granted by course `i`.
    pub coverage: DVector<f64>,
}

#[instrument(skip_all, name = "goal_projection_task", fields(career = career_key))]
pub fn run(
    catalog: &Catalog,
    matrices: &ProblemMatrices,
    career_key: &str,
) -> Result<GoalProjection, EngineError> {
    let career = catalog
        .career(career_key)
        .ok_or_else(|| EngineError::CareerNotFound {
            key: career_key.to_string(),
        })?;

    let goal_skill_ids = career
        .required_skills
        .iter()
        .map(|skill| {
            catalog
                .skill_id(skill)
                .ok_or_else(|| EngineError::SkillNotFound {
                    career: career.key.clone(),
                    skill: skill.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let goal_grants = matrices.grants.select_columns(goal_skill_ids.iter());
    let overlap = &goal_grants * goal_grants.transpose();
    let coverage = DVector::from_iterator(
        goal_grants.nrows(),
        goal_grants.row_iter().map(|row| row.sum()),
    );

    debug!(
        goal_skills = goal_skill_ids.len(),
        covering_courses = coverage.iter().filter(|&&c| c > 0.0).count(),
        "Goal projection computed."
    );

    Ok(GoalProjection {
        career_key: career.key.clone(),
        goal_skill_ids,
        overlap,
        coverage,
    })
}
