use super::cancel::CancellationToken;
use super::config::AnnealingConfig;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::sampler::{SampleParams, Sampler};
use super::state::{Sample, SampleSet};
use crate::core::objective::qubo::Qubo;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, thread_rng};
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Classical simulated-annealing sampler over single-bit flips.
///
/// Every read starts from a uniformly random assignment, sweeps all variables
/// at each temperature of the geometric cooling schedule using the Metropolis
/// rule, keeps the lowest-energy state it visits, and finishes with greedy
/// zero-temperature sweeps from that state. Reads use seeds derived from one
/// master seed, so results do not depend on how reads are scheduled across
/// threads.
#[derive(Debug, Clone, Default)]
pub struct SimulatedAnnealer {
    config: AnnealingConfig,
}

impl SimulatedAnnealer {
    /// Rejects schedules that would never cool down, such as a cooling rate of 1.
    pub fn new(config: AnnealingConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnnealingConfig {
        &self.config
    }

    fn anneal_once(
        &self,
        model: &CompiledQubo,
        temperatures: &[f64],
        seed: u64,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<bool>, EngineError> {
        let n = model.num_variables;
        let mut rng = StdRng::seed_from_u64(seed);

        let mut state: Vec<bool> = (0..n).map(|_| rng.r#gen::<bool>()).collect();
        let mut fields = model.local_fields(&state);
        let mut energy = model.energy(&state);

        let mut best_state = state.clone();
        let mut best_energy = energy;

        for &temperature in temperatures {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                return Err(EngineError::Cancelled { phase: "Annealing" });
            }
            for _ in 0..self.config.steps_per_temperature {
                for v in 0..n {
                    let delta_e = model.flip_delta(&state, &fields, v);
                    if delta_e < 0.0 || rng.r#gen::<f64>() < (-delta_e / temperature).exp() {
                        model.flip(&mut state, &mut fields, v);
                        energy += delta_e;
                    }
                }
                if energy < best_energy {
                    best_energy = energy;
                    best_state.clone_from(&state);
                }
            }
        }

        let mut state = best_state;
        let mut fields = model.local_fields(&state);
        for _ in 0..self.config.final_refinement_sweeps {
            let mut changed_in_sweep = false;
            for v in 0..n {
                if model.flip_delta(&state, &fields, v) < -f64::EPSILON {
                    model.flip(&mut state, &mut fields, v);
                    changed_in_sweep = true;
                }
            }
            if !changed_in_sweep {
                break;
            }
        }

        Ok(state)
    }
}

impl Sampler for SimulatedAnnealer {
    #[instrument(skip_all, name = "simulated_annealing", fields(reads = params.num_reads))]
    fn sample(
        &self,
        qubo: &Qubo,
        params: &SampleParams<'_>,
        reporter: &ProgressReporter,
    ) -> Result<SampleSet, EngineError> {
        if params.num_reads < 1 {
            return Err(EngineError::InvalidInput(
                "num_reads must be at least 1".to_string(),
            ));
        }

        let master_seed = params.seed.unwrap_or_else(|| thread_rng().r#gen());
        let mut seeder = StdRng::seed_from_u64(master_seed);
        let read_seeds: Vec<u64> = (0..params.num_reads).map(|_| seeder.r#gen()).collect();

        let model = CompiledQubo::compile(qubo);
        let temperatures = self.config.temperature_levels();
        info!(
            variables = model.num_variables,
            temperature_levels = temperatures.len(),
            seed = master_seed,
            "Starting simulated annealing."
        );

        reporter.report(Progress::TaskStart {
            total: params.num_reads as u64,
        });

        let run_read = |&seed: &u64| -> Result<Sample, EngineError> {
            let assignment = self.anneal_once(&model, &temperatures, seed, params.cancel)?;
            let energy = qubo.energy(&assignment);
            reporter.report(Progress::ReadCompleted { energy });
            Ok(Sample { assignment, energy })
        };

        #[cfg(not(feature = "parallel"))]
        let samples = read_seeds
            .iter()
            .map(run_read)
            .collect::<Result<Vec<_>, _>>()?;

        #[cfg(feature = "parallel")]
        let samples = read_seeds
            .par_iter()
            .map(run_read)
            .collect::<Result<Vec<_>, _>>()?;

        reporter.report(Progress::TaskFinish);

        let sample_set = SampleSet::new(samples, master_seed);
        if let Some(best) = sample_set.best() {
            debug!(best_energy = best.energy, "Annealing finished.");
        }
        Ok(sample_set)
    }
}

/// Dense form of a QUBO for constant-time flip evaluation.
///
/// `linear[v]` holds the diagonal coefficient of `v`, and `couplings[p * n + q]`
/// holds `c(p, q) + c(q, p)` for `p != q`, so the matrix is symmetric with a
/// zero diagonal.
struct CompiledQubo {
    num_variables: usize,
    linear: Vec<f64>,
    couplings: Vec<f64>,
}

impl CompiledQubo {
    fn compile(qubo: &Qubo) -> Self {
        let n = qubo.num_variables();
        let mut linear = vec![0.0; n];
        let mut couplings = vec![0.0; n * n];
        for ((p, q), value) in qubo.iter() {
            if p == q {
                linear[p] += value;
            } else {
                couplings[p * n + q] += value;
                couplings[q * n + p] += value;
            }
        }
        Self {
            num_variables: n,
            linear,
            couplings,
        }
    }

    #[inline]
    fn row(&self, v: usize) -> &[f64] {
        let n = self.num_variables;
        &self.couplings[v * n..(v + 1) * n]
    }

    /// `fields[v] = Σ_u J[v][u]·x[u]`.
    fn local_fields(&self, state: &[bool]) -> Vec<f64> {
        (0..self.num_variables)
            .map(|v| {
                self.row(v)
                    .iter()
                    .zip(state)
                    .filter(|&(_, &on)| on)
                    .map(|(&j, _)| j)
                    .sum()
            })
            .collect()
    }

    fn energy(&self, state: &[bool]) -> f64 {
        let mut energy = 0.0;
        for p in (0..self.num_variables).filter(|&p| state[p]) {
            energy += self.linear[p];
            let row = self.row(p);
            energy += (p + 1..self.num_variables)
                .filter(|&q| state[q])
                .map(|q| row[q])
                .sum::<f64>();
        }
        energy
    }

    #[inline]
    fn flip_delta(&self, state: &[bool], fields: &[f64], v: usize) -> f64 {
        let gain = self.linear[v] + fields[v];
        if state[v] { -gain } else { gain }
    }

    #[inline]
    fn flip(&self, state: &mut [bool], fields: &mut [f64], v: usize) {
        state[v] = !state[v];
        let sign = if state[v] { 1.0 } else { -1.0 };
        for (field, &j) in fields.iter_mut().zip(self.row(v)) {
            *field += sign * j;
        }
    }
}
