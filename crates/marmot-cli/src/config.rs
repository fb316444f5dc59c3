mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{build_config, load_file_config};
pub use file::FileConfig;
pub use models::AppConfig;
