use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePlannerConfig {
    pub num_stages: Option<usize>,
    pub num_reads: Option<usize>,
    pub seed: Option<u64>,
    /// Seconds.
    pub time_limit: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileWeightsConfig {
    pub goal_reward: Option<f64>,
    pub synergy: Option<f64>,
    pub goal_overlap: Option<f64>,
    pub prerequisite: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileAnnealingConfig {
    pub initial_temperature: Option<f64>,
    pub final_temperature: Option<f64>,
    pub cooling_rate: Option<f64>,
    pub steps_per_temperature: Option<usize>,
    pub final_refinement_sweeps: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub planner: Option<FilePlannerConfig>,
    pub weights: Option<FileWeightsConfig>,
    pub annealing: Option<FileAnnealingConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        // A relative data directory is taken relative to the config file.
        if let Some(dir) = config.data_dir.take() {
            config.data_dir = Some(match path.parent() {
                Some(parent) if dir.is_relative() => parent.join(dir),
                _ => dir,
            });
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn from_file_reads_all_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("marmot.toml");
        fs::write(
            &path,
            r#"
            data-dir = "/srv/catalog"

            [planner]
            num-stages = 4
            num-reads = 25
            seed = 9
            time-limit = 2.5

            [weights]
            synergy = 0.3

            [annealing]
            cooling-rate = 0.95
            final-refinement-sweeps = 2
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/catalog")));
        let planner = config.planner.unwrap();
        assert_eq!(planner.num_stages, Some(4));
        assert_eq!(planner.num_reads, Some(25));
        assert_eq!(planner.seed, Some(9));
        assert_eq!(planner.time_limit, Some(2.5));
        assert_eq!(config.weights.unwrap().synergy, Some(0.3));
        let annealing = config.annealing.unwrap();
        assert_eq!(annealing.cooling_rate, Some(0.95));
        assert_eq!(annealing.final_refinement_sweeps, Some(2));
        assert_eq!(annealing.initial_temperature, None);
    }

    #[test]
    fn relative_data_dir_is_resolved_against_config_location() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("marmot.toml");
        fs::write(&path, "data-dir = \"catalog\"\n").unwrap();

        let config = FileConfig::from_file(&path).unwrap();

        assert_eq!(config.data_dir, Some(dir.path().join("catalog")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[planner]\nnum-stagez = 3\n").unwrap();

        let result = FileConfig::from_file(&path);

        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
