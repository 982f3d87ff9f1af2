/// Context Validator - scores a JSON context document
///
/// Validates layers, token budget, relevance, dependencies, naming and
/// structure sizes. Without a document a built-in sample is validated.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use skillcheck::core::context_validator::{self, ContextValidator};
use skillcheck::utils::logging::{setup_logging, LogArgs};
use skillcheck::utils::output_formatter::{self, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "validate-context",
    version,
    about = "Validate a context document against context-engineering guidelines"
)]
struct Args {
    /// JSON context document (a built-in sample is used when omitted)
    file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log);

    let metrics = match &args.file {
        Some(file) => context_validator::validate_context_file(file)?,
        None => ContextValidator::new(&context_validator::sample_context()).validate(),
    };

    match args.output {
        OutputFormat::Json => println!("{}", output_formatter::to_json(&metrics)?),
        OutputFormat::Text => print!("{}", output_formatter::format_validation_report(&metrics)),
    }

    Ok(())
}
