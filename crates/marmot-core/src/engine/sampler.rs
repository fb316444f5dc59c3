use super::cancel::CancellationToken;
use super::error::EngineError;
use super::progress::ProgressReporter;
use super::state::SampleSet;
use crate::core::objective::qubo::Qubo;

/// Per-call sampling parameters.
#[derive(Debug, Clone, Copy)]
pub struct SampleParams<'a> {
    /// Number of independent reads; must be at least 1.
    pub num_reads: usize,
    /// Master seed. `None` draws one from the thread RNG; the chosen seed is
    /// reported back in [`SampleSet::seed`].
    pub seed: Option<u64>,
    pub cancel: Option<&'a CancellationToken>,
}

impl<'a> SampleParams<'a> {
    pub fn new(num_reads: usize) -> Self {
        Self {
            num_reads,
            seed: None,
            cancel: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_cancellation(mut self, cancel: &'a CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// A QUBO minimizer.
///
/// Implementations must treat the QUBO as read-only and be callable from
/// several threads at once; each call returns its own [`SampleSet`].
pub trait Sampler: Send + Sync {
    fn sample(
        &self,
        qubo: &Qubo,
        params: &SampleParams<'_>,
        reporter: &ProgressReporter,
    ) -> Result<SampleSet, EngineError>;
}
