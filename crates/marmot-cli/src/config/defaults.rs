use marmotpath::core::objective::weights::ObjectiveWeights;
use marmotpath::engine::config::{AnnealingConfig, DEFAULT_NUM_STAGES};
use marmotpath::workflows::plan::DEFAULT_NUM_READS;

pub struct DefaultsConfig {
    pub num_stages: usize,
    pub num_reads: usize,
    pub weights: ObjectiveWeights,
    pub annealing: AnnealingConfig,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            num_stages: DEFAULT_NUM_STAGES,
            num_reads: DEFAULT_NUM_READS,
            weights: ObjectiveWeights::default(),
            annealing: AnnealingConfig::default(),
        }
    }
}
