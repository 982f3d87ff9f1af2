/// Logging setup shared by every binary
///
/// Reports go to stdout; log records go to stderr (or to `--log-file`) so a
/// JSON report stays parseable at any log level.

use std::fs::File;
use std::io::Write;

use chrono::Local;
use clap::Args;
use log::LevelFilter;

/// Logging flags flattened into each binary's arguments
#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Set logging level (default: warn)
    #[arg(long = "log-level", default_value = "warn", global = true)]
    pub log_level: LevelFilter,

    /// Write log records to this file instead of stderr
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<String>,
}

/// Set up logging with console or file output
pub fn setup_logging(args: &LogArgs) {
    let mut builder = env_logger::Builder::new();

    builder.filter_level(args.log_level);

    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(path) = &args.log_file {
        match File::create(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Could not open log file {}: {}", path, e),
        }
    }

    // A second init (e.g. from tests) is harmless.
    let _ = builder.try_init();
}
