use crate::core::objective::qubo::Qubo;
use crate::core::objective::weights::ObjectiveWeights;
use crate::engine::cancel::CancellationToken;
use crate::engine::error::EngineError;
use crate::engine::tasks::goal_projection::GoalProjection;
use crate::engine::tasks::problem_matrices::ProblemMatrices;
use tracing::{debug, instrument};

/// Penalty multiplier applied to the stage-0 variable of every course with a
/// prerequisite, in units of the prerequisite weight.
pub const FIRST_STAGE_PENALTY: f64 = 50.0;

/// Index of the binary variable "course is taken in stage".
#[inline]
pub const fn variable_index(course: usize, stage: usize, num_stages: usize) -> usize {
    course * num_stages + stage
}

/// Encodes the learning-path objective for one career into a QUBO.
///
/// The encoding has two parts:
///
/// 1. A dense term over every pair of variables `(i, t)`, `(j, t2)`:
///    `-λ2·B[i][j] + λ3·GT_ES[i][j]`, plus `λ1 - 3·λ3·G_ES[i]` on the
///    diagonal (`i == j` and `t == t2`). Every key is written, even when the
///    value is zero, and the goal-overlap contribution is applied across
///    stage pairs, not only within a stage.
/// 2. A prerequisite penalty for every non-zero `NS[i][s]`: for each stage
///    `t >= 1`, a squared-difference term pulling `(i, t)` towards courses
///    granting `s` in earlier stages, and a strong linear penalty on `(i, 0)`.
///
/// Contributions are accumulated in a fixed order, so the same inputs always
/// yield bitwise identical coefficients.
#[instrument(skip_all, name = "qubo_encoding_task", fields(career = %projection.career_key, stages = num_stages))]
pub fn run(
    matrices: &ProblemMatrices,
    projection: &GoalProjection,
    weights: &ObjectiveWeights,
    num_stages: usize,
    cancel: Option<&CancellationToken>,
) -> Result<Qubo, EngineError> {
    if num_stages == 0 {
        return Err(EngineError::InvalidInput(
            "the number of stages must be at least 1".to_string(),
        ));
    }

    let num_courses = matrices.num_courses();
    if projection.coverage.len() != num_courses || projection.overlap.nrows() != num_courses {
        return Err(EngineError::Internal(format!(
            "goal projection covers {} courses but the matrices describe {}",
            projection.coverage.len(),
            num_courses
        )));
    }

    let num_variables = num_courses * num_stages;
    let mut qubo = Qubo::with_capacity(num_variables, num_variables * num_variables);

    add_objective_terms(&mut qubo, matrices, projection, weights, num_stages, cancel)?;
    add_prerequisite_terms(&mut qubo, matrices, weights, num_stages, cancel)?;

    debug!(
        variables = num_variables,
        entries = qubo.len(),
        "QUBO encoded."
    );
    Ok(qubo)
}

fn add_objective_terms(
    qubo: &mut Qubo,
    matrices: &ProblemMatrices,
    projection: &GoalProjection,
    weights: &ObjectiveWeights,
    num_stages: usize,
    cancel: Option<&CancellationToken>,
) -> Result<(), EngineError> {
    let num_courses = matrices.num_courses();

    for i in 0..num_courses {
        check_cancelled(cancel)?;
        let reward = weights.goal_reward - 3.0 * weights.goal_overlap * projection.coverage[i];
        for j in 0..num_courses {
            let pair = -weights.synergy * matrices.synergy[(i, j)]
                + weights.goal_overlap * projection.overlap[(i, j)];
            for t in 0..num_stages {
                for t2 in 0..num_stages {
                    let value = if i == j && t == t2 { pair + reward } else { pair };
                    qubo.add(
                        variable_index(i, t, num_stages),
                        variable_index(j, t2, num_stages),
                        value,
                    );
                }
            }
        }
    }
    Ok(())
}

fn add_prerequisite_terms(
    qubo: &mut Qubo,
    matrices: &ProblemMatrices,
    weights: &ObjectiveWeights,
    num_stages: usize,
    cancel: Option<&CancellationToken>,
) -> Result<(), EngineError> {
    let lambda = weights.prerequisite;
    let num_courses = matrices.num_courses();
    let gs = &matrices.grants;

    for (i, s) in matrices.prerequisite_entries() {
        check_cancelled(cancel)?;
        let ns = matrices.prerequisites[(i, s)];

        // Courses with GS[j][s] == 0 only ever contribute zeros to keys the
        // dense pass has already written.
        let grantors: Vec<usize> = (0..num_courses).filter(|&j| gs[(j, s)] != 0.0).collect();

        for t in 1..num_stages {
            for &j in &grantors {
                for &k in &grantors {
                    let value = lambda * gs[(j, s)] * gs[(k, s)];
                    for t2 in 0..t {
                        for t3 in 0..t {
                            qubo.add(
                                variable_index(j, t2, num_stages),
                                variable_index(k, t3, num_stages),
                                value,
                            );
                        }
                    }
                }
                for t2 in 0..t {
                    qubo.add(
                        variable_index(i, t, num_stages),
                        variable_index(j, t2, num_stages),
                        -2.0 * lambda * ns * gs[(j, s)],
                    );
                    qubo.add(
                        variable_index(j, t2, num_stages),
                        variable_index(j, t2, num_stages),
                        -lambda * gs[(j, s)],
                    );
                }
            }
            let own = variable_index(i, t, num_stages);
            qubo.add(own, own, lambda * ns * ns + ns);
        }

        let first = variable_index(i, 0, num_stages);
        qubo.add(first, first, FIRST_STAGE_PENALTY * lambda * ns * ns);
    }
    Ok(())
}

#[inline]
fn check_cancelled(cancel: Option<&CancellationToken>) -> Result<(), EngineError> {
    if cancel.is_some_and(|token| token.is_cancelled()) {
        return Err(EngineError::Cancelled { phase: "QUBO Encoding" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{
        career::Career, catalog::Catalog, combination::Combination, course::Course, skill::Skill,
    };
    use crate::engine::tasks::{goal_projection, problem_matrices};

    const EPS: f64 = 1e-12;

    // A grants s1; B requires s1 and grants s2; the career wants s2.
    fn two_course_catalog() -> Catalog {
        Catalog::new(
            vec![Skill::new(0, "s1"), Skill::new(1, "s2")],
            vec![
                Course::new(0, "A").grants(["s1"]),
                Course::new(1, "B").requires(["s1"]).grants(["s2"]),
            ],
            vec![Career::new(0, "goal", ["s2"])],
            vec![],
        )
        .unwrap()
    }

    fn encode(catalog: &Catalog, career: &str, weights: &ObjectiveWeights, stages: usize) -> Qubo {
        let matrices = problem_matrices::run(catalog).unwrap();
        let projection = goal_projection::run(catalog, &matrices, career).unwrap();
        run(&matrices, &projection, weights, stages, None).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn two_course_scenario_has_expected_coefficients() {
        let w = ObjectiveWeights::default();
        let (l1, l3, l4) = (w.goal_reward, w.goal_overlap, w.prerequisite);
        let qubo = encode(&two_course_catalog(), "goal", &w, 2);
        let (a0, a1, b0, b1) = (0, 1, 2, 3);

        assert_eq!(qubo.num_variables(), 4);
        assert_eq!(qubo.len(), 16);

        assert_close(qubo.get(a0, a0), l1);
        assert_close(qubo.get(a1, a1), l1);
        assert_close(qubo.get(b0, b0), l1 - 2.0 * l3 + FIRST_STAGE_PENALTY * l4);
        assert_close(qubo.get(b1, b1), l1 - 2.0 * l3 + l4 + 1.0);
        assert_close(qubo.get(b0, b1), l3);
        assert_close(qubo.get(b1, b0), l3);
        assert_close(qubo.get(b1, a0), -2.0 * l4);

        for (p, q) in [(a0, a1), (a1, a0), (a0, b0), (a1, b1), (a0, b1), (b0, a1)] {
            assert_close(qubo.get(p, q), 0.0);
        }
    }

    #[test]
    fn two_course_scenario_minimum_takes_a_then_b() {
        let qubo = encode(&two_course_catalog(), "goal", &ObjectiveWeights::default(), 2);

        let mut best: Option<(Vec<bool>, f64)> = None;
        for bits in 0u32..16 {
            let assignment: Vec<bool> = (0..4).map(|v| bits & (1 << v) != 0).collect();
            let energy = qubo.energy(&assignment);
            if best.as_ref().is_none_or(|(_, e)| energy < *e) {
                best = Some((assignment, energy));
            }
        }

        let (assignment, energy) = best.unwrap();
        assert_eq!(assignment, vec![true, false, false, true]);
        assert_close(energy, -1.1);
    }

    #[test]
    fn every_variable_pair_is_present_even_when_zero() {
        let qubo = encode(&two_course_catalog(), "goal", &ObjectiveWeights::default(), 3);
        for p in 0..6 {
            for q in 0..6 {
                assert!(qubo.contains(p, q), "missing key ({p}, {q})");
            }
        }
    }

    #[test]
    fn goal_overlap_is_broadcast_across_stage_pairs() {
        // Two courses granting the same goal skill share GT_ES = 1, and the
        // overlap weight reaches every (stage, stage) pair, not only equal ones.
        let catalog = Catalog::new(
            vec![Skill::new(0, "rust")],
            vec![
                Course::new(0, "intro").grants(["rust"]),
                Course::new(1, "book").grants(["rust"]),
            ],
            vec![Career::new(0, "rustacean", ["rust"])],
            vec![],
        )
        .unwrap();
        let weights = ObjectiveWeights::new(0.0, 0.0, 1.0, 0.0);
        let qubo = encode(&catalog, "rustacean", &weights, 3);

        for t in 0..3 {
            for t2 in 0..3 {
                assert_close(qubo.get(variable_index(0, t, 3), variable_index(1, t2, 3)), 1.0);
                let same_course = qubo.get(variable_index(0, t, 3), variable_index(0, t2, 3));
                let expected = if t == t2 { 1.0 - 3.0 } else { 1.0 };
                assert_close(same_course, expected);
            }
        }
    }

    #[test]
    fn synergy_lowers_only_the_stored_direction() {
        let catalog = Catalog::new(
            vec![Skill::new(0, "x")],
            vec![Course::new(0, "first"), Course::new(1, "second")],
            vec![Career::new(0, "none", Vec::<String>::new())],
            vec![Combination::pair("combo", "first", "second", 2.0)],
        )
        .unwrap();
        let weights = ObjectiveWeights::new(0.0, 0.5, 0.0, 0.0);
        let qubo = encode(&catalog, "none", &weights, 1);

        assert_close(qubo.get(0, 1), -1.0);
        assert_close(qubo.get(1, 0), 0.0);
    }

    #[test]
    fn prerequisite_course_is_deterred_from_first_stage() {
        let qubo = encode(&two_course_catalog(), "goal", &ObjectiveWeights::default(), 5);
        let b_first = qubo.get(variable_index(1, 0, 5), variable_index(1, 0, 5));
        let b_later = qubo.get(variable_index(1, 3, 5), variable_index(1, 3, 5));
        assert!(b_first > 30.0, "stage-0 coefficient too small: {b_first}");
        assert!(b_first > b_later + 30.0);
    }

    #[test]
    fn encoding_is_bitwise_deterministic() {
        let catalog = two_course_catalog();
        let weights = ObjectiveWeights::default();
        let first = encode(&catalog, "goal", &weights, 4);
        let second = encode(&catalog, "goal", &weights, 4);

        assert_eq!(first.len(), second.len());
        for ((p, q), value) in first.iter() {
            assert_eq!(value.to_bits(), second.get(p, q).to_bits());
        }
    }

    #[test]
    fn single_stage_has_no_prerequisite_coupling() {
        let w = ObjectiveWeights::default();
        let qubo = encode(&two_course_catalog(), "goal", &w, 1);
        assert_eq!(qubo.len(), 4);
        assert_close(
            qubo.get(1, 1),
            w.goal_reward - 2.0 * w.goal_overlap + FIRST_STAGE_PENALTY * w.prerequisite,
        );
        assert_close(qubo.get(1, 0), 0.0);
    }

    #[test]
    fn zero_stages_is_invalid() {
        let catalog = two_course_catalog();
        let matrices = problem_matrices::run(&catalog).unwrap();
        let projection = goal_projection::run(&catalog, &matrices, "goal").unwrap();
        let result = run(&matrices, &projection, &ObjectiveWeights::default(), 0, None);
        assert!(matches!(result, Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn cancelled_token_stops_encoding() {
        let catalog = two_course_catalog();
        let matrices = problem_matrices::run(&catalog).unwrap();
        let projection = goal_projection::run(&catalog, &matrices, "goal").unwrap();
        let token = CancellationToken::new();
        token.cancel();

        let result = run(&matrices, &projection, &ObjectiveWeights::default(), 2, Some(&token));

        assert!(matches!(result, Err(EngineError::Cancelled { .. })));
    }

    #[test]
    fn empty_catalog_encodes_to_empty_qubo() {
        let careers = vec![Career::new(0, "any", Vec::<String>::new())];
        let catalog = Catalog::new(vec![], vec![], careers, vec![]).unwrap();
        let qubo = encode(&catalog, "any", &ObjectiveWeights::default(), 5);
        assert!(qubo.is_empty());
        assert_eq!(qubo.num_variables(), 0);
    }
}
