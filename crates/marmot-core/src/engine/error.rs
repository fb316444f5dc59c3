use super::config::ConfigError;
use crate::core::models::catalog::CatalogError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Catalog configuration error: {source}")]
    Configuration {
        #[from]
        source: CatalogError,
    },

    #[error("Career not found: '{key}'")]
    CareerNotFound { key: String },

    #[error("Career '{career}' requires unknown skill '{skill}'")]
    SkillNotFound { career: String, skill: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Optimization cancelled during phase '{phase}'")]
    Cancelled { phase: &'static str },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl EngineError {
    /// `true` for errors a boundary layer should report as "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::CareerNotFound { .. } | EngineError::SkillNotFound { .. }
        )
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::InvalidInput(err.to_string())
    }
}
