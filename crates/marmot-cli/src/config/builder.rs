use super::defaults::DefaultsConfig;
use super::file::{FileAnnealingConfig, FileConfig, FileWeightsConfig};
use super::models::AppConfig;
use crate::cli::OptimizeArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use marmotpath::core::objective::weights::ObjectiveWeights;
use marmotpath::engine::config::{AnnealingConfig, PlannerConfigBuilder};
use std::path::Path;
use tracing::debug;

pub fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => FileConfig::from_file(path),
        None => Ok(FileConfig::default()),
    }
}

/// Merges `defaults < config file < CLI flags < -S KEY=VALUE` into the
/// settings of one `optimize` run.
pub fn build_config(file_config: FileConfig, args: &OptimizeArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = apply_cli_flags(file_config, args);
    let mut file_config = apply_set_values(file_config, &args.set_values)?;
    debug!("Merged configuration layers: {:?}", &file_config);

    let planner_file = file_config.planner.take().unwrap_or_default();
    let num_stages = planner_file.num_stages.unwrap_or(defaults.num_stages);
    let num_reads = planner_file.num_reads.unwrap_or(defaults.num_reads);
    if num_reads == 0 {
        return Err(CliError::Config(
            "`planner.num-reads` must be at least 1".to_string(),
        ));
    }
    let time_limit = planner_file
        .time_limit
        .map(parser::parse_seconds)
        .transpose()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let weights = merge_weights(file_config.weights.take(), defaults.weights);
    let annealing = merge_annealing(file_config.annealing.take(), defaults.annealing);

    let planner = PlannerConfigBuilder::new()
        .num_stages(num_stages)
        .weights(weights)
        .annealing_config(annealing)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        data_dir: file_config.data_dir,
        planner,
        num_reads,
        seed: planner_file.seed,
        time_limit,
    })
}

fn merge_weights(
    file_val: Option<FileWeightsConfig>,
    defaults: ObjectiveWeights,
) -> ObjectiveWeights {
    let file_val = file_val.unwrap_or_default();
    ObjectiveWeights {
        goal_reward: file_val.goal_reward.unwrap_or(defaults.goal_reward),
        synergy: file_val.synergy.unwrap_or(defaults.synergy),
        goal_overlap: file_val.goal_overlap.unwrap_or(defaults.goal_overlap),
        prerequisite: file_val.prerequisite.unwrap_or(defaults.prerequisite),
    }
}

fn merge_annealing(
    file_val: Option<FileAnnealingConfig>,
    defaults: AnnealingConfig,
) -> AnnealingConfig {
    let file_val = file_val.unwrap_or_default();
    AnnealingConfig {
        initial_temperature: file_val
            .initial_temperature
            .unwrap_or(defaults.initial_temperature),
        final_temperature: file_val
            .final_temperature
            .unwrap_or(defaults.final_temperature),
        cooling_rate: file_val.cooling_rate.unwrap_or(defaults.cooling_rate),
        steps_per_temperature: file_val
            .steps_per_temperature
            .unwrap_or(defaults.steps_per_temperature),
        final_refinement_sweeps: file_val
            .final_refinement_sweeps
            .unwrap_or(defaults.final_refinement_sweeps),
    }
}

fn apply_cli_flags(mut config: FileConfig, args: &OptimizeArgs) -> FileConfig {
    let planner = config.planner.get_or_insert_with(Default::default);
    if let Some(stages) = args.stages {
        planner.num_stages = Some(stages);
    }
    if let Some(num_reads) = args.num_reads {
        planner.num_reads = Some(num_reads);
    }
    if let Some(seed) = args.seed {
        planner.seed = Some(seed);
    }
    if let Some(time_limit) = args.time_limit {
        planner.time_limit = Some(time_limit);
    }
    config
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
        let float = || -> Result<f64> {
            parser::parse_typed(key, value, "float").map_err(|e| CliError::Config(e.to_string()))
        };
        let integer = || -> Result<usize> {
            parser::parse_typed(key, value, "integer").map_err(|e| CliError::Config(e.to_string()))
        };

        match key {
            "data-dir" => config.data_dir = Some(value.into()),
            "planner.num-stages" => {
                config.planner.get_or_insert_with(Default::default).num_stages = Some(integer()?);
            }
            "planner.num-reads" => {
                config.planner.get_or_insert_with(Default::default).num_reads = Some(integer()?);
            }
            "planner.seed" => {
                config.planner.get_or_insert_with(Default::default).seed = Some(
                    parser::parse_typed(key, value, "unsigned integer")
                        .map_err(|e| CliError::Config(e.to_string()))?,
                );
            }
            "planner.time-limit" => {
                config.planner.get_or_insert_with(Default::default).time_limit = Some(float()?);
            }
            "weights.goal-reward" => {
                config.weights.get_or_insert_with(Default::default).goal_reward = Some(float()?);
            }
            "weights.synergy" => {
                config.weights.get_or_insert_with(Default::default).synergy = Some(float()?);
            }
            "weights.goal-overlap" => {
                config.weights.get_or_insert_with(Default::default).goal_overlap = Some(float()?);
            }
            "weights.prerequisite" => {
                config.weights.get_or_insert_with(Default::default).prerequisite = Some(float()?);
            }
            "annealing.initial-temperature" => {
                config
                    .annealing
                    .get_or_insert_with(Default::default)
                    .initial_temperature = Some(float()?);
            }
            "annealing.final-temperature" => {
                config
                    .annealing
                    .get_or_insert_with(Default::default)
                    .final_temperature = Some(float()?);
            }
            "annealing.cooling-rate" => {
                config.annealing.get_or_insert_with(Default::default).cooling_rate = Some(float()?);
            }
            "annealing.steps-per-temperature" => {
                config
                    .annealing
                    .get_or_insert_with(Default::default)
                    .steps_per_temperature = Some(integer()?);
            }
            "annealing.final-refinement-sweeps" => {
                config
                    .annealing
                    .get_or_insert_with(Default::default)
                    .final_refinement_sweeps = Some(integer()?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
