use super::GlobalOptions;
use crate::cli::{OptimizeArgs, OutputFormat};
use crate::config::{AppConfig, build_config, load_file_config};
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::ui::{self, UiEvent};
use crate::utils::output;
use marmotpath::core::models::catalog::Catalog;
use marmotpath::engine::cancel::CancellationToken;
use marmotpath::engine::progress::ProgressReporter;
use marmotpath::workflows::plan::{OptimizationRequest, OptimizationResult, Planner};
use tokio::sync::mpsc;
use tracing::info;

pub async fn run(
    options: GlobalOptions,
    args: OptimizeArgs,
    ui_sender: mpsc::Sender<UiEvent>,
) -> Result<()> {
    let file_config = load_file_config(options.config_path.as_deref())?;
    info!("Merging configuration from defaults, file and CLI arguments...");
    let app_config = build_config(file_config, &args)?;

    let data_manager = DataManager::new(options.data_dir.as_deref(), app_config.data_dir.as_deref())?;
    let catalog = data_manager.load_catalog()?;

    let reporter = ProgressReporter::with_callback(ui::progress_callback(ui_sender));

    info!("Invoking the planning workflow for career '{}'...", args.career);
    let result =
        tokio::task::block_in_place(|| optimize(&catalog, &app_config, &args.career, &reporter))?;

    println!("{}", render(&result, args.flat, args.format)?);
    Ok(())
}

pub fn optimize(
    catalog: &Catalog,
    config: &AppConfig,
    career: &str,
    reporter: &ProgressReporter,
) -> Result<OptimizationResult> {
    let mut request = OptimizationRequest::new(career).with_num_reads(config.num_reads);
    if let Some(seed) = config.seed {
        request = request.with_seed(seed);
    }
    if let Some(limit) = config.time_limit {
        request = request.with_cancellation(CancellationToken::with_timeout(limit));
    }

    let planner = Planner::new(catalog, config.planner.clone())?;
    planner.optimize(&request, reporter).map_err(|e| {
        if e.is_not_found() {
            CliError::NotFound(e.to_string())
        } else {
            CliError::Engine(e)
        }
    })
}

pub fn render(result: &OptimizationResult, flat: bool, format: OutputFormat) -> Result<String> {
    let seed = result.seed();
    match (flat, format) {
        (false, OutputFormat::Text) => Ok(output::render_staged(&result.staged(), seed)),
        (true, OutputFormat::Text) => Ok(output::render_flat(&result.flattened(), seed)),
        (false, OutputFormat::Json) => output::to_json(&result.staged()),
        (true, OutputFormat::Json) => output::to_json(&result.flattened()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;
    use marmotpath::core::models::{career::Career, course::Course, skill::Skill};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![Skill::new(0, "s1"), Skill::new(1, "s2")],
            vec![
                Course::new(0, "A").grants(["s1"]).with_hours(10),
                Course::new(1, "B").requires(["s1"]).grants(["s2"]).with_hours(20),
            ],
            vec![Career::new(0, "goal", ["s2"])],
            vec![],
        )
        .unwrap()
    }

    fn config(extra: &[&str]) -> AppConfig {
        use crate::cli::{Cli, Commands};
        use clap::Parser;
        let mut argv = vec!["marmot", "optimize", "--career", "goal", "--stages", "2", "--seed", "3"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Optimize(args) => build_config(FileConfig::default(), &args).unwrap(),
            other => panic!("Expected 'optimize' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn optimize_produces_staged_plan() {
        let result = optimize(&catalog(), &config(&[]), "goal", &ProgressReporter::new()).unwrap();

        let text = render(&result, false, OutputFormat::Text).unwrap();
        assert!(text.contains("Stage 1: A\n"));
        assert!(text.contains("Stage 2: B\n"));
        assert!(text.contains("Estimated hours: 30"));
        assert!(text.ends_with("Seed: 3"));
    }

    #[test]
    fn flat_json_output_lists_distinct_courses() {
        let result = optimize(&catalog(), &config(&[]), "goal", &ProgressReporter::new()).unwrap();

        let json = render(&result, true, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["course_keys"], serde_json::json!(["A", "B"]));
        assert_eq!(value["total_courses"], 2);
    }

    #[test]
    fn unknown_career_maps_to_not_found() {
        let result = optimize(&catalog(), &config(&[]), "pilot", &ProgressReporter::new());
        assert!(matches!(result, Err(CliError::NotFound(msg)) if msg.contains("pilot")));
    }
}
