use crate::core::models::catalog::Catalog;
use crate::core::objective::qubo::Qubo;
use crate::engine::annealer::SimulatedAnnealer;
use crate::engine::cancel::CancellationToken;
use crate::engine::config::PlannerConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::sampler::{SampleParams, Sampler};
use crate::engine::state::SampleSet;
use crate::engine::tasks::problem_matrices::ProblemMatrices;
use crate::engine::tasks::schedule_decoding::{Stage, StagePlan};
use crate::engine::tasks::{goal_projection, problem_matrices, qubo_encoding, schedule_decoding};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, instrument};

pub const DEFAULT_NUM_READS: usize = 10;

#[derive(Debug, Clone)]
pub struct OptimizationRequest {
    pub career_key: String,
    pub num_reads: usize,
    pub seed: Option<u64>,
    pub cancel: Option<CancellationToken>,
}

impl OptimizationRequest {
    pub fn new(career_key: impl Into<String>) -> Self {
        Self {
            career_key: career_key.into(),
            num_reads: DEFAULT_NUM_READS,
            seed: None,
            cancel: None,
        }
    }

    pub fn with_num_reads(mut self, num_reads: usize) -> Self {
        self.num_reads = num_reads;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Staged response: every stage with the courses selected in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StagedPlanResponse {
    pub career_key: String,
    pub stages: Vec<Stage>,
    pub total_courses: usize,
    pub energy: f64,
    pub estimated_total_hours: u64,
}

/// Flattened response: distinct courses in order of first appearance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatPlanResponse {
    pub career_key: String,
    pub course_keys: Vec<String>,
    pub total_courses: usize,
    pub energy: f64,
    pub estimated_total_hours: u64,
}

#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub career_key: String,
    pub plan: StagePlan,
    /// Energy of the decoded (best) sample.
    pub energy: f64,
    /// Every read of the sampler, best first.
    pub samples: SampleSet,
    staged_hours: u64,
    flat_hours: u64,
}

impl OptimizationResult {
    pub fn staged(&self) -> StagedPlanResponse {
        StagedPlanResponse {
            career_key: self.career_key.clone(),
            stages: self.plan.stages.clone(),
            total_courses: self.plan.total_courses(),
            energy: self.energy,
            estimated_total_hours: self.staged_hours,
        }
    }

    pub fn flattened(&self) -> FlatPlanResponse {
        let course_keys = self.plan.flatten();
        FlatPlanResponse {
            career_key: self.career_key.clone(),
            total_courses: course_keys.len(),
            course_keys,
            energy: self.energy,
            estimated_total_hours: self.flat_hours,
        }
    }

    /// The master seed the sampler used; rerunning with it reproduces the result.
    pub fn seed(&self) -> u64 {
        self.samples.seed()
    }
}

/// Learning-path planner over one catalog snapshot.
///
/// The relational matrices are built once here and shared read-only by every
/// [`Planner::optimize`] call, so a planner can serve concurrent requests from
/// several threads.
pub struct Planner<'a, S: Sampler = SimulatedAnnealer> {
    catalog: &'a Catalog,
    matrices: ProblemMatrices,
    config: PlannerConfig,
    sampler: S,
}

impl<'a> Planner<'a, SimulatedAnnealer> {
    pub fn new(catalog: &'a Catalog, config: PlannerConfig) -> Result<Self, EngineError> {
        let sampler = SimulatedAnnealer::new(config.annealing.clone())?;
        Self::with_sampler(catalog, config, sampler)
    }
}

impl<'a, S: Sampler> Planner<'a, S> {
    #[instrument(skip_all, name = "planner_setup")]
    pub fn with_sampler(
        catalog: &'a Catalog,
        config: PlannerConfig,
        sampler: S,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let matrices = problem_matrices::run(catalog)?;
        info!(
            courses = catalog.num_courses(),
            skills = catalog.num_skills(),
            careers = catalog.careers().len(),
            stages = config.num_stages,
            "Planner ready."
        );
        Ok(Self {
            catalog,
            matrices,
            config,
            sampler,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    pub fn matrices(&self) -> &ProblemMatrices {
        &self.matrices
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Builds the QUBO for `career_key` without sampling it.
    pub fn encode(
        &self,
        career_key: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<Qubo, EngineError> {
        let projection = goal_projection::run(self.catalog, &self.matrices, career_key)?;
        qubo_encoding::run(
            &self.matrices,
            &projection,
            &self.config.weights,
            self.config.num_stages,
            cancel,
        )
    }

    #[instrument(skip_all, name = "planning_workflow", fields(career = %request.career_key))]
    pub fn optimize(
        &self,
        request: &OptimizationRequest,
        reporter: &ProgressReporter,
    ) -> Result<OptimizationResult, EngineError> {
        if request.num_reads < 1 {
            return Err(EngineError::InvalidInput(format!(
                "num_reads must be at least 1, got {}",
                request.num_reads
            )));
        }
        let cancel = request.cancel.as_ref();

        // === Phase 1: Goal projection and QUBO encoding ===
        reporter.report(Progress::PhaseStart { name: "Encoding" });
        let qubo = self.encode(&request.career_key, cancel)?;
        reporter.report(Progress::QuboEncoded {
            variables: qubo.num_variables(),
            terms: qubo.len(),
        });
        reporter.report(Progress::PhaseFinish);

        // === Phase 2: Sampling ===
        reporter.report(Progress::PhaseStart { name: "Annealing" });
        let params = SampleParams {
            num_reads: request.num_reads,
            seed: request.seed,
            cancel,
        };
        let samples = self.sampler.sample(&qubo, &params, reporter)?;
        reporter.report(Progress::PhaseFinish);

        // === Phase 3: Decoding ===
        reporter.report(Progress::PhaseStart { name: "Decoding" });
        let best = samples
            .best()
            .ok_or_else(|| EngineError::Internal("sampler returned no samples".to_string()))?;
        let course_keys = self.catalog.course_keys();
        let plan = schedule_decoding::run(&best.assignment, &course_keys, self.config.num_stages)?;
        let energy = best.energy;
        reporter.report(Progress::PhaseFinish);

        let staged_hours = self.total_hours(plan.stages.iter().flat_map(|s| &s.course_keys));
        let flat_hours = {
            let distinct: HashSet<&String> =
                plan.stages.iter().flat_map(|s| &s.course_keys).collect();
            self.total_hours(distinct.into_iter())
        };

        info!(
            energy,
            seed = samples.seed(),
            selections = plan.total_courses(),
            "Planning complete."
        );

        Ok(OptimizationResult {
            career_key: request.career_key.clone(),
            plan,
            energy,
            samples,
            staged_hours,
            flat_hours,
        })
    }

    fn total_hours<'k>(&self, keys: impl Iterator<Item = &'k String>) -> u64 {
        keys.filter_map(|key| self.catalog.course(key))
            .map(|course| u64::from(course.estimated_hours))
            .sum()
    }
}

/// One-shot convenience: builds a planner for `catalog` and runs a single request.
pub fn run(
    catalog: &Catalog,
    config: PlannerConfig,
    request: &OptimizationRequest,
    reporter: &ProgressReporter,
) -> Result<OptimizationResult, EngineError> {
    Planner::new(catalog, config)?.optimize(request, reporter)
}
