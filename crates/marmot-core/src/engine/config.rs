use crate::core::objective::weights::ObjectiveWeights;
use thiserror::Error;

/// Number of learning stages used by the deployed planner.
pub const DEFAULT_NUM_STAGES: usize = 5;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// Parameters of the simulated-annealing sampler.
///
/// The temperature starts at `initial_temperature` and is multiplied by
/// `cooling_rate` after every level until it reaches `final_temperature`. At
/// each level the sampler performs `steps_per_temperature` sweeps, each sweep
/// proposing one flip per variable. After annealing, up to
/// `final_refinement_sweeps` zero-temperature sweeps polish the best state.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingConfig {
    pub initial_temperature: f64,
    pub final_temperature: f64,
    pub cooling_rate: f64,
    pub steps_per_temperature: usize,
    pub final_refinement_sweeps: usize,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 10.0,
            final_temperature: 0.01,
            cooling_rate: 0.9,
            steps_per_temperature: 4,
            final_refinement_sweeps: 8,
        }
    }
}

impl AnnealingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.final_temperature > 0.0 && self.final_temperature.is_finite()) {
            return Err(ConfigError::InvalidValue {
                parameter: "final_temperature",
                reason: format!("must be positive, got {}", self.final_temperature),
            });
        }
        if !(self.initial_temperature >= self.final_temperature
            && self.initial_temperature.is_finite())
        {
            return Err(ConfigError::InvalidValue {
                parameter: "initial_temperature",
                reason: format!(
                    "must be finite and at least final_temperature ({}), got {}",
                    self.final_temperature, self.initial_temperature
                ),
            });
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(ConfigError::InvalidValue {
                parameter: "cooling_rate",
                reason: format!("must lie strictly between 0 and 1, got {}", self.cooling_rate),
            });
        }
        if self.steps_per_temperature == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "steps_per_temperature",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The temperatures visited by the cooling schedule, hottest first.
    pub fn temperature_levels(&self) -> Vec<f64> {
        let mut levels = Vec::new();
        let mut temperature = self.initial_temperature;
        while temperature > self.final_temperature {
            levels.push(temperature);
            temperature *= self.cooling_rate;
        }
        levels.push(self.final_temperature);
        levels
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub num_stages: usize,
    pub weights: ObjectiveWeights,
    pub annealing: AnnealingConfig,
}

impl PlannerConfig {
    /// Checks the stage count, the weights and the annealing schedule.
    /// [`PlannerConfigBuilder::build`] and the planner constructors both call this.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_stages == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "num_stages",
                reason: "a plan needs at least one stage".to_string(),
            });
        }
        if !self.weights.is_finite() {
            return Err(ConfigError::InvalidValue {
                parameter: "weights",
                reason: format!(
                    "all weights must be finite, got {:?}",
                    self.weights.to_array()
                ),
            });
        }
        self.annealing.validate()
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            num_stages: DEFAULT_NUM_STAGES,
            weights: ObjectiveWeights::default(),
            annealing: AnnealingConfig::default(),
        }
    }
}

#[derive(Default)]
pub struct PlannerConfigBuilder {
    num_stages: Option<usize>,
    weights: Option<ObjectiveWeights>,
    annealing: Option<AnnealingConfig>,
}

impl PlannerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_stages(mut self, stages: usize) -> Self {
        self.num_stages = Some(stages);
        self
    }
    pub fn weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = Some(weights);
        self
    }
    pub fn annealing_config(mut self, config: AnnealingConfig) -> Self {
        self.annealing = Some(config);
        self
    }

    pub fn build(self) -> Result<PlannerConfig, ConfigError> {
        let config = PlannerConfig {
            num_stages: self
                .num_stages
                .ok_or(ConfigError::MissingParameter("num_stages"))?,
            weights: self
                .weights
                .ok_or(ConfigError::MissingParameter("weights"))?,
            annealing: self
                .annealing
                .ok_or(ConfigError::MissingParameter("annealing"))?,
        };
        config.validate()?;
        Ok(config)
    }
}
