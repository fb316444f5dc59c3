use crate::error::{CliError, Result};
use directories::ProjectDirs;
use marmotpath::core::io::catalog_file::{self, load_catalog_dir};
use marmotpath::core::models::catalog::Catalog;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "marmotpath";
const APPLICATION: &str = "marmot";

/// Environment variable that points the CLI at a catalog directory.
pub const DATA_DIR_ENV: &str = "MARMOT_DATA_DIR";

#[derive(Debug)]
pub struct DataManager {
    base_path: PathBuf,
}

impl DataManager {
    /// Resolves the catalog directory: the `--data-dir` flag, then the config
    /// file's `data-dir`, then `MARMOT_DATA_DIR`, then the per-user data
    /// directory of the platform.
    pub fn new(cli_dir: Option<&Path>, file_dir: Option<&Path>) -> Result<Self> {
        let path = match cli_dir.or(file_dir) {
            Some(path) => path.to_path_buf(),
            None => match std::env::var_os(DATA_DIR_ENV) {
                Some(env_dir) if !env_dir.is_empty() => PathBuf::from(env_dir),
                _ => Self::default_data_path()?,
            },
        };
        debug!("DataManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    pub fn with_custom_path(path: PathBuf) -> Self {
        Self { base_path: path }
    }

    pub fn data_path(&self) -> &Path {
        &self.base_path
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        if !self.base_path.is_dir() {
            return Err(CliError::Data(format!(
                "Catalog directory {:?} does not exist.\nHint: pass --data-dir or set `data-dir` in the config file.",
                self.base_path
            )));
        }
        info!("Loading catalogs from {:?}", &self.base_path);
        Ok(load_catalog_dir(&self.base_path)?)
    }

    /// Catalog documents present in the data directory, by document name.
    pub fn present_documents(&self) -> Vec<(&'static str, Option<PathBuf>)> {
        [
            catalog_file::SKILLS_DOCUMENT,
            catalog_file::COURSES_DOCUMENT,
            catalog_file::CAREERS_DOCUMENT,
            catalog_file::COMBINATIONS_DOCUMENT,
        ]
        .into_iter()
        .map(|document| {
            let found = ["json", "toml"]
                .iter()
                .map(|ext| self.base_path.join(format!("{document}.{ext}")))
                .find(|path| path.is_file());
            (document, found)
        })
        .collect()
    }

    fn default_data_path() -> Result<PathBuf> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn cli_directory_wins_over_config_directory() {
        let manager = DataManager::new(Some(Path::new("/from/cli")), Some(Path::new("/from/file")))
            .unwrap();
        assert_eq!(manager.data_path(), Path::new("/from/cli"));

        let manager = DataManager::new(None, Some(Path::new("/from/file"))).unwrap();
        assert_eq!(manager.data_path(), Path::new("/from/file"));
    }

    #[test]
    fn missing_directory_is_a_data_error() {
        let temp_dir = tempdir().unwrap();
        let manager = DataManager::with_custom_path(temp_dir.path().join("nope"));
        assert!(matches!(manager.load_catalog(), Err(CliError::Data(_))));
    }

    #[test]
    fn present_documents_reports_each_catalog() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("skills.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("careers.toml"), "").unwrap();
        let manager = DataManager::with_custom_path(temp_dir.path().to_path_buf());

        let documents = manager.present_documents();

        assert_eq!(documents.len(), 4);
        assert_eq!(documents[0].0, "skills");
        assert_eq!(documents[0].1, Some(temp_dir.path().join("skills.json")));
        assert_eq!(documents[1].1, None);
        assert_eq!(documents[2].1, Some(temp_dir.path().join("careers.toml")));
        assert_eq!(documents[3].1, None);
    }

    #[test]
    fn load_catalog_surfaces_loader_errors() {
        let temp_dir = tempdir().unwrap();
        let manager = DataManager::with_custom_path(temp_dir.path().to_path_buf());
        assert!(matches!(manager.load_catalog(), Err(CliError::Catalog(_))));
    }
}
