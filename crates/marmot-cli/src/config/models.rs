use marmotpath::engine::config::PlannerConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Fully resolved settings for one `optimize` invocation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: Option<PathBuf>,
    pub planner: PlannerConfig,
    pub num_reads: usize,
    pub seed: Option<u64>,
    pub time_limit: Option<Duration>,
}
