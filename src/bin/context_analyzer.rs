/// Context Analyzer - codebase structure and context-window fitness
///
/// Scans a directory for its projects and reports size, complexity, coupling
/// and organization metrics together with refactoring recommendations.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use log::info;

use skillcheck::config::load_config;
use skillcheck::core::analyzer::ContextAnalyzer;
use skillcheck::utils::logging::{setup_logging, LogArgs};
use skillcheck::utils::output_formatter::{self, OutputFormat};

/// Command line argument structure
#[derive(Parser, Debug)]
#[command(
    name = "context-analyzer",
    version,
    about = "Analyze a codebase for complexity, coupling and organization"
)]
struct Args {
    /// Directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// List every issue found in each project
    #[arg(short, long)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log);

    if !args.path.exists() {
        eprintln!("{}", format!("Warning: Path '{}' does not exist.", args.path.display()).yellow());
    }

    let config = load_config(args.config.as_deref());
    let analyzer = ContextAnalyzer::new(args.path.clone(), config.context);
    let result = analyzer.analyze();
    info!(
        "Analyzed {} projects, {} files",
        result.global_metrics.project_count, result.global_metrics.total_files
    );

    match args.output {
        OutputFormat::Json => println!("{}", output_formatter::to_json(&result)?),
        OutputFormat::Text => print!("{}", output_formatter::format_analysis_report(&result, args.verbose)),
    }

    Ok(())
}
