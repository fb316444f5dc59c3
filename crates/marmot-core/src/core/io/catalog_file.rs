use crate::core::models::{
    career::Career,
    catalog::{Catalog, CatalogError},
    combination::Combination,
    course::Course,
    skill::Skill,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const SKILLS_DOCUMENT: &str = "skills";
pub const COURSES_DOCUMENT: &str = "courses";
pub const CAREERS_DOCUMENT: &str = "careers";
pub const COMBINATIONS_DOCUMENT: &str = "combinations";

const SUPPORTED_EXTENSIONS: [&str; 2] = ["json", "toml"];

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unsupported catalog format for '{path}'. Expected a .json or .toml file")]
    UnsupportedFormat { path: String },
    #[error("No '{document}' catalog (.json or .toml) found in '{dir}'")]
    MissingDocument { dir: String, document: &'static str },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Deserialize)]
struct SkillsDocument {
    skills_master: BTreeMap<String, RawSkill>,
}

#[derive(Debug, Deserialize)]
struct RawSkill {
    id: usize,
    name: Option<String>,
    #[serde(default)]
    category: String,
}

#[derive(Debug, Deserialize)]
struct CoursesDocument {
    courses_master: BTreeMap<String, RawCourse>,
}

#[derive(Debug, Deserialize)]
struct RawCourse {
    id: usize,
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    prerequisites: Vec<String>,
    #[serde(default)]
    skills_acquired: Vec<String>,
    #[serde(default)]
    estimated_hours: u32,
}

#[derive(Debug, Deserialize)]
struct CareersDocument {
    career_goals: BTreeMap<String, RawCareer>,
}

#[derive(Debug, Deserialize)]
struct RawCareer {
    id: usize,
    #[serde(default)]
    description: String,
    required_skills: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct CombinationsDocument {
    #[serde(default)]
    course_combinations: BTreeMap<String, RawCombination>,
}

#[derive(Debug, Deserialize)]
struct RawCombination {
    courses: Vec<String>,
    synergy_effect: f64,
}

/// Loads and validates a catalog snapshot from `dir`.
///
/// The directory must contain `skills`, `courses` and `careers` documents and
/// may contain a `combinations` document, each as `.json` or `.toml`. Entries
/// are keyed by their string key inside the top-level tables `skills_master`,
/// `courses_master`, `career_goals` and `course_combinations`.
pub fn load_catalog_dir(dir: &Path) -> Result<Catalog, CatalogLoadError> {
    info!("Loading catalogs from {:?}", dir);

    let skills: SkillsDocument = read_document(&locate(dir, SKILLS_DOCUMENT)?)?;
    let courses: CoursesDocument = read_document(&locate(dir, COURSES_DOCUMENT)?)?;
    let careers: CareersDocument = read_document(&locate(dir, CAREERS_DOCUMENT)?)?;
    let combinations: CombinationsDocument = match locate(dir, COMBINATIONS_DOCUMENT) {
        Ok(path) => read_document(&path)?,
        Err(CatalogLoadError::MissingDocument { .. }) => {
            debug!("No combinations document found; synergy matrix will be empty.");
            CombinationsDocument::default()
        }
        Err(e) => return Err(e),
    };

    let catalog = Catalog::new(
        skills
            .skills_master
            .into_iter()
            .map(|(key, raw)| Skill {
                id: raw.id,
                name: raw.name.unwrap_or_else(|| key.clone()),
                key,
                category: raw.category,
            })
            .collect(),
        courses
            .courses_master
            .into_iter()
            .map(|(key, raw)| Course {
                id: raw.id,
                name: raw.name.unwrap_or_else(|| key.clone()),
                key,
                description: raw.description,
                prerequisites: raw.prerequisites,
                skills_acquired: raw.skills_acquired,
                estimated_hours: raw.estimated_hours,
            })
            .collect(),
        careers
            .career_goals
            .into_iter()
            .map(|(key, raw)| Career {
                id: raw.id,
                key,
                description: raw.description,
                required_skills: raw.required_skills,
            })
            .collect(),
        combinations
            .course_combinations
            .into_iter()
            .map(|(key, raw)| Combination {
                key,
                courses: raw.courses,
                synergy_effect: raw.synergy_effect,
            })
            .collect(),
    )?;

    info!(
        skills = catalog.num_skills(),
        courses = catalog.num_courses(),
        careers = catalog.careers().len(),
        combinations = catalog.combinations().len(),
        "Catalogs loaded."
    );
    Ok(catalog)
}

fn locate(dir: &Path, document: &'static str) -> Result<PathBuf, CatalogLoadError> {
    SUPPORTED_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{document}.{ext}")))
        .find(|path| path.is_file())
        .ok_or_else(|| CatalogLoadError::MissingDocument {
            dir: dir.to_string_lossy().to_string(),
            document,
        })
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogLoadError> {
    let path_str = path.to_string_lossy().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| CatalogLoadError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| CatalogLoadError::Json {
            path: path_str,
            source: e,
        }),
        Some("toml") => toml::from_str(&content).map_err(|e| CatalogLoadError::Toml {
            path: path_str,
            source: e,
        }),
        _ => Err(CatalogLoadError::UnsupportedFormat { path: path_str }),
    }
}
