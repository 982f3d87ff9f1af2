/// UX Audit - frontend inventory and UX checklist
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use skillcheck::config::ContextConfig;
use skillcheck::core::ux_audit;
use skillcheck::utils::logging::{setup_logging, LogArgs};
use skillcheck::utils::output_formatter;

#[derive(Parser, Debug)]
#[command(
    name = "ux-audit",
    version,
    about = "Audit a frontend project against UX principles"
)]
struct Args {
    /// Project directory to audit
    #[arg(default_value = ".")]
    path: PathBuf,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(&args.log);

    // Nothing to walk: the report below comes out empty
    if !args.path.exists() {
        eprintln!("{}", format!("Warning: Path '{}' does not exist.", args.path.display()).yellow());
    }

    let audit = ux_audit::run_audit(&args.path, &ContextConfig::default().ignore_dirs);
    print!("{}", output_formatter::format_ux_audit(&audit));

    Ok(())
}
