use super::GlobalOptions;
use crate::cli::{DataArgs, DataCommands};
use crate::config::load_file_config;
use crate::data::DataManager;
use crate::error::Result;
use std::fmt::Write;
use tracing::info;

pub async fn run(options: GlobalOptions, args: DataArgs) -> Result<()> {
    let file_config = load_file_config(options.config_path.as_deref())?;
    let data_manager = DataManager::new(options.data_dir.as_deref(), file_config.data_dir.as_deref())?;

    match args.command {
        DataCommands::Path => {
            println!("{}", data_manager.data_path().display());
        }
        DataCommands::Check => {
            info!("Checking catalog documents in {:?}", data_manager.data_path());
            println!("{}", check(&data_manager)?);
        }
    }
    Ok(())
}

/// Lists the catalog documents found and validates that they load together.
pub fn check(data_manager: &DataManager) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "Data directory: {}", data_manager.data_path().display());
    for (document, path) in data_manager.present_documents() {
        match path {
            Some(path) => {
                let _ = writeln!(out, "  ✓ {:<13} {}", document, path.display());
            }
            None => {
                let _ = writeln!(out, "  ✗ {:<13} (missing)", document);
            }
        }
    }

    let catalog = data_manager.load_catalog()?;
    let _ = write!(
        out,
        "Catalog OK: {} skills, {} courses, {} careers, {} combinations",
        catalog.num_skills(),
        catalog.num_courses(),
        catalog.careers().len(),
        catalog.combinations().len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use std::fs;
    use tempfile::tempdir;

    fn write_file(dir: &std::path::Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn check_summarizes_a_valid_catalog() {
        let dir = tempdir().unwrap();
        write_file(
            dir.path(),
            "skills.json",
            r#"{"skills_master": {"sql": {"id": 0, "name": "SQL", "category": "data"}}}"#,
        );
        write_file(
            dir.path(),
            "courses.json",
            r#"{"courses_master": {"databases": {"id": 0, "name": "Databases", "description": "",
                "prerequisites": [], "skills_acquired": ["sql"], "estimated_hours": 20}}}"#,
        );
        write_file(
            dir.path(),
            "careers.json",
            r#"{"career_goals": {"analyst": {"id": 0, "description": "", "required_skills": ["sql"]}}}"#,
        );

        let report = check(&DataManager::with_custom_path(dir.path().to_path_buf())).unwrap();

        assert!(report.contains("✓ skills"));
        assert!(report.contains("✗ combinations"));
        assert!(report.ends_with("Catalog OK: 1 skills, 1 courses, 1 careers, 0 combinations"));
    }

    #[test]
    fn check_fails_on_inconsistent_catalog() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "skills.json", r#"{"skills_master": {}}"#);
        write_file(
            dir.path(),
            "courses.json",
            r#"{"courses_master": {"databases": {"id": 0, "skills_acquired": ["sql"]}}}"#,
        );
        write_file(dir.path(), "careers.json", r#"{"career_goals": {}}"#);

        let result = check(&DataManager::with_custom_path(dir.path().to_path_buf()));

        assert!(matches!(result, Err(CliError::Catalog(_))));
    }
}
