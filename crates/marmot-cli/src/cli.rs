use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "marmot",
    author,
    version,
    about = "MarmotPath CLI - Plan staged learning paths toward a career goal by solving a QUBO with simulated annealing.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used for parallel annealing reads.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the catalog documents (skills, courses, careers, combinations).
    /// Overrides `data-dir` from the config file.
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute a staged learning plan for a career goal.
    Optimize(OptimizeArgs),
    /// Browse the loaded catalogs.
    Catalog(CatalogArgs),
    /// Inspect the local catalog data directory.
    Data(DataArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the `optimize` subcommand.
#[derive(Args, Debug, Default)]
pub struct OptimizeArgs {
    /// Key of the target career (e.g., 'data_scientist').
    #[arg(long, required = true, value_name = "KEY")]
    pub career: String,

    // --- Sampling Overrides ---
    /// Number of independent annealing reads.
    #[arg(short = 'n', long, value_name = "INT")]
    pub num_reads: Option<usize>,

    /// Master seed for reproducible results.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Abort the optimization after this many seconds.
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<f64>,

    // --- Model Overrides ---
    /// Number of learning stages.
    #[arg(long, value_name = "INT")]
    pub stages: Option<usize>,

    // --- Output ---
    /// Print a single deduplicated course list instead of stages.
    #[arg(long)]
    pub flat: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Set a specific configuration value, overriding the config file and flags.
    /// Can be used multiple times. Example: -S weights.synergy=0.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `catalog` subcommand.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List all career goals.
    Careers,
    /// List all courses in catalog order.
    Courses,
    /// List all skills.
    Skills,
    /// Show one course with its recommended partner courses.
    Course {
        /// Key of the course.
        #[arg(required = true)]
        key: String,
    },
}

/// Arguments for the `data` subcommand.
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show the absolute path to the catalog data directory.
    Path,
    /// Load and validate the catalogs, then print a summary.
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn optimize_parses_overrides() {
        let cli = Cli::parse_from([
            "marmot", "-vv", "optimize", "--career", "frontend", "-n", "20", "--seed", "7",
            "--stages", "3", "--flat", "--format", "json", "-S", "weights.synergy=0.5",
        ]);

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Optimize(args) => {
                assert_eq!(args.career, "frontend");
                assert_eq!(args.num_reads, Some(20));
                assert_eq!(args.seed, Some(7));
                assert_eq!(args.stages, Some(3));
                assert!(args.flat);
                assert_eq!(args.format, OutputFormat::Json);
                assert_eq!(args.set_values, vec!["weights.synergy=0.5".to_string()]);
            }
            other => panic!("Expected 'optimize', got {:?}", other),
        }
    }

    #[test]
    fn optimize_requires_career() {
        assert!(Cli::try_parse_from(["marmot", "optimize"]).is_err());
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::parse_from([
            "marmot", "catalog", "careers", "--data-dir", "/tmp/catalog", "-j", "2",
        ]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/catalog")));
        assert_eq!(cli.threads, Some(2));
        assert!(matches!(
            cli.command,
            Commands::Catalog(CatalogArgs {
                command: CatalogCommands::Careers,
                ..
            })
        ));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["marmot", "-q", "-v", "data", "path"]).is_err());
    }
}
