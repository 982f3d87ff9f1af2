/// Creativity Evaluator - code pattern heuristics and creative prompts
///
/// Analyzes a file (or stdin) for long conditional chains, deep nesting,
/// repeated lines and wide signatures, and suggests alternatives. With
/// `--prompt` it renders a creative enhancement prompt around the code instead.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use skillcheck::core::creativity;
use skillcheck::utils::file_utils;
use skillcheck::utils::logging::{setup_logging, LogArgs};
use skillcheck::utils::output_formatter::{self, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "evaluate-creativity",
    version,
    about = "Evaluate and enhance creativity in code generation"
)]
struct Args {
    /// Code file to analyze (stdin when omitted)
    file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Generate a creative prompt instead of analyzing
    #[arg(short, long)]
    prompt: bool,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log);

    let (label, content) = match &args.file {
        Some(file) => {
            if !file.exists() {
                eprintln!("{}", format!("Error: File not found: {}", file.display()).red());
                process::exit(1);
            }
            (file.display().to_string(), file_utils::read_required(file)?)
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read code from stdin")?;
            ("<stdin>".to_string(), buffer)
        }
    };

    if args.prompt {
        println!("{}", creativity::generate_creative_prompt(&content));
        return Ok(());
    }

    let report = creativity::evaluate(&label, &content);
    match args.output {
        OutputFormat::Json => println!("{}", output_formatter::to_json(&report)?),
        OutputFormat::Text => print!("{}", output_formatter::format_creativity_report(&report)),
    }

    Ok(())
}
