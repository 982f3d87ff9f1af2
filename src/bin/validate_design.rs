/// Design Validator - web design guideline checks
///
/// Validates stylesheets, components and HTML documents against design-token,
/// spacing, accessibility and internationalization guidelines. Exits with
/// status 1 when any error-severity issue is found.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use skillcheck::config::load_config;
use skillcheck::core::design_validator::DesignValidator;
use skillcheck::utils::logging::{setup_logging, LogArgs};
use skillcheck::utils::output_formatter::{self, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "validate-design",
    version,
    about = "Validate web design implementations against design guidelines"
)]
struct Args {
    /// File or directory to validate
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Echo each issue to stderr as it is found
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

    let config = load_config(args.config.as_deref());
    let mut validator = DesignValidator::new(config.design, config.context.ignore_dirs, args.verbose);

    if let Err(e) = validator.validate_path(&args.path) {
        eprintln!("{}", format!("Error: {}.", e).red());
        process::exit(1);
    }

    let summary = validator.summary();
    match args.format {
        OutputFormat::Json => println!(
            "{}",
            output_formatter::design_report_json(validator.issues(), &summary)?
        ),
        OutputFormat::Text => print!(
            "{}",
            output_formatter::format_design_report(validator.issues(), &summary)
        ),
    }

    if validator.has_errors() {
        process::exit(1);
    }

    Ok(())
}
