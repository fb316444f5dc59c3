use super::GlobalOptions;
use crate::cli::{CatalogArgs, CatalogCommands, OutputFormat};
use crate::config::load_file_config;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::utils::output::{self, CourseDetail};
use marmotpath::core::models::catalog::Catalog;
use tracing::info;

pub async fn run(options: GlobalOptions, args: CatalogArgs) -> Result<()> {
    let file_config = load_file_config(options.config_path.as_deref())?;
    let data_manager = DataManager::new(options.data_dir.as_deref(), file_config.data_dir.as_deref())?;
    let catalog = data_manager.load_catalog()?;

    info!("Rendering catalog listing: {:?}", &args.command);
    println!("{}", render(&catalog, &args.command, args.format)?);
    Ok(())
}

pub fn render(catalog: &Catalog, command: &CatalogCommands, format: OutputFormat) -> Result<String> {
    match (command, format) {
        (CatalogCommands::Careers, OutputFormat::Text) => Ok(output::render_careers(catalog)),
        (CatalogCommands::Careers, OutputFormat::Json) => output::to_json(catalog.careers()),
        (CatalogCommands::Courses, OutputFormat::Text) => Ok(output::render_courses(catalog)),
        (CatalogCommands::Courses, OutputFormat::Json) => output::to_json(catalog.courses()),
        (CatalogCommands::Skills, OutputFormat::Text) => Ok(output::render_skills(catalog)),
        (CatalogCommands::Skills, OutputFormat::Json) => output::to_json(catalog.skills()),
        (CatalogCommands::Course { key }, format) => {
            let course = catalog
                .course(key)
                .ok_or_else(|| CliError::NotFound(format!("Course '{}' is not in the catalog", key)))?;
            let recommended_partners = catalog
                .recommended_partners(key)
                .unwrap_or_default()
                .into_iter()
                .map(|c| c.key.as_str())
                .collect();
            let detail = CourseDetail {
                course,
                recommended_partners,
            };
            match format {
                OutputFormat::Text => Ok(output::render_course_detail(&detail)),
                OutputFormat::Json => output::to_json(&detail),
            }
        }
    }
}
