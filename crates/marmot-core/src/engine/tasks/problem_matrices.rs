use crate::core::models::catalog::{Catalog, CatalogError};
use crate::engine::error::EngineError;
use nalgebra::DMatrix;
use tracing::{debug, instrument};

/// Dense relational matrices derived once from a catalog snapshot.
///
/// Rows are course ids; columns are skill ids (`grants`, `prerequisites`) or
/// course ids (`synergy`).
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemMatrices {
    /// `GS[course][skill] = 1` if the course grants the skill.
    pub grants: DMatrix<f64>,
    /// `NS[course][skill] = 1` if the skill is a prerequisite of the course.
    pub prerequisites: DMatrix<f64>,
    /// `B[a][b]` = synergy of the stored pair `(a, b)`; not symmetrized.
    pub synergy: DMatrix<f64>,
}

impl ProblemMatrices {
    pub fn num_courses(&self) -> usize {
        self.grants.nrows()
    }

    pub fn num_skills(&self) -> usize {
        self.grants.ncols()
    }

    /// Non-zero `(course, skill)` entries of the prerequisite matrix, row-major.
    pub fn prerequisite_entries(&self) -> Vec<(usize, usize)> {
        let (rows, cols) = self.prerequisites.shape();
        (0..rows)
            .flat_map(|i| (0..cols).map(move |s| (i, s)))
            .filter(|&(i, s)| self.prerequisites[(i, s)] != 0.0)
            .collect()
    }
}

#[instrument(skip_all, name = "problem_matrices_task")]
pub fn run(catalog: &Catalog) -> Result<ProblemMatrices, EngineError> {
    let num_courses = catalog.num_courses();
    let num_skills = catalog.num_skills();

    let mut grants = DMatrix::zeros(num_courses, num_skills);
    let mut prerequisites = DMatrix::zeros(num_courses, num_skills);
    let mut synergy = DMatrix::zeros(num_courses, num_courses);

    for course in catalog.courses() {
        for skill in &course.prerequisites {
            let skill_id = resolve_skill(catalog, &course.key, skill)?;
            prerequisites[(course.id, skill_id)] = 1.0;
        }
        for skill in &course.skills_acquired {
            let skill_id = resolve_skill(catalog, &course.key, skill)?;
            grants[(course.id, skill_id)] = 1.0;
        }
    }

    for combination in catalog.combinations() {
        for (first, second) in combination.ordered_pairs() {
            let a = resolve_course(catalog, &combination.key, first)?;
            let b = resolve_course(catalog, &combination.key, second)?;
            synergy[(a, b)] = combination.synergy_effect;
        }
    }

    debug!(
        courses = num_courses,
        skills = num_skills,
        prerequisite_links = prerequisites.iter().filter(|&&v| v != 0.0).count(),
        "Relational matrices built."
    );

    Ok(ProblemMatrices {
        grants,
        prerequisites,
        synergy,
    })
}

fn resolve_skill(catalog: &Catalog, course: &str, skill: &str) -> Result<usize, EngineError> {
    catalog.skill_id(skill).ok_or_else(|| {
        CatalogError::UnknownSkill {
            course: course.to_string(),
            skill: skill.to_string(),
        }
        .into()
    })
}

fn resolve_course(catalog: &Catalog, combination: &str, course: &str) -> Result<usize, EngineError> {
    catalog.course_id(course).ok_or_else(|| {
        CatalogError::UnknownCourse {
            combination: combination.to_string(),
            course: course.to_string(),
        }
        .into()
    })
}
