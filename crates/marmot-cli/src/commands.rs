pub mod catalog;
pub mod data;
pub mod optimize;

use std::path::PathBuf;

/// Global options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}
