use crate::engine::error::EngineError;
use crate::engine::tasks::qubo_encoding::variable_index;
use serde::Serialize;
use std::collections::HashSet;

/// Courses scheduled in one stage, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub stage_number: usize,
    pub course_keys: Vec<String>,
}

/// A decoded plan: one entry per stage, in stage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagePlan {
    pub stages: Vec<Stage>,
}

impl StagePlan {
    pub fn num_stages(&self) -> usize {
        self.stages.len()
    }

    /// Total number of (course, stage) selections, counting repeats.
    pub fn total_courses(&self) -> usize {
        self.stages.iter().map(|stage| stage.course_keys.len()).sum()
    }

    /// Distinct course keys in order of first appearance across stages.
    pub fn flatten(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.stages
            .iter()
            .flat_map(|stage| stage.course_keys.iter())
            .filter(|key| seen.insert(key.as_str()))
            .cloned()
            .collect()
    }

    /// Re-encodes the plan as a variable assignment over `course_keys`.
    pub fn to_assignment(&self, course_keys: &[&str]) -> Result<Vec<bool>, EngineError> {
        let num_stages = self.num_stages();
        let mut assignment = vec![false; course_keys.len() * num_stages];
        for (t, stage) in self.stages.iter().enumerate() {
            for key in &stage.course_keys {
                let course = course_keys
                    .iter()
                    .position(|candidate| candidate == key)
                    .ok_or_else(|| {
                        EngineError::Internal(format!("plan names unknown course '{key}'"))
                    })?;
                assignment[variable_index(course, t, num_stages)] = true;
            }
        }
        Ok(assignment)
    }
}

/// Decodes a variable assignment into a per-stage course plan.
///
/// Within each stage, courses appear in catalog order; the same course may be
/// selected in several stages.
pub fn run(
    assignment: &[bool],
    course_keys: &[&str],
    num_stages: usize,
) -> Result<StagePlan, EngineError> {
    let expected = course_keys.len() * num_stages;
    if assignment.len() != expected {
        return Err(EngineError::Internal(format!(
            "assignment has {} variables but {} courses x {} stages need {}",
            assignment.len(),
            course_keys.len(),
            num_stages,
            expected
        )));
    }

    let stages = (0..num_stages)
        .map(|t| Stage {
            stage_number: t + 1,
            course_keys: course_keys
                .iter()
                .enumerate()
                .filter(|&(course, _)| assignment[variable_index(course, t, num_stages)])
                .map(|(_, key)| key.to_string())
                .collect(),
        })
        .collect();

    Ok(StagePlan { stages })
}
