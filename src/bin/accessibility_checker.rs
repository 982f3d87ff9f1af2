/// Accessibility Checker - WCAG heuristics for frontend code
///
/// Checks image alt text, button labels, inline colors, focus states and
/// heading order across markup, components and stylesheets.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use skillcheck::config::ContextConfig;
use skillcheck::core::accessibility;
use skillcheck::utils::logging::{setup_logging, LogArgs};
use skillcheck::utils::output_formatter::{self, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "accessibility-checker",
    version,
    about = "Check frontend files for common accessibility problems"
)]
struct Args {
    /// File or directory to check
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log);

    if !args.path.exists() {
        eprintln!("{}", format!("Warning: Path '{}' does not exist.", args.path.display()).yellow());
    }

    let ignore_dirs = ContextConfig::default().ignore_dirs;
    let report = accessibility::run_accessibility_check(&args.path, &ignore_dirs);

    match args.output {
        OutputFormat::Json => println!("{}", output_formatter::accessibility_report_json(&report)?),
        OutputFormat::Text => print!(
            "{}",
            output_formatter::format_accessibility_report(&report, &args.path.display().to_string())
        ),
    }

    Ok(())
}
