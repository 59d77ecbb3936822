//! avk CLI - Kotlin data classes from AutoValue declarations
//!
//! Commands:
//! - `avk generate` - Process rounds and write Kotlin sources
//! - `avk check` - Validate rounds without generating anything

use avk_core::{AvkError, LogLevel};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod check;
mod generate;
mod logging;
mod report;
mod rounds;

use report::DiagnosticsFormat;

#[derive(Parser)]
#[command(name = "avk")]
#[command(author, version, about = "Convert AutoValue classes to Kotlin data classes", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error, off); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// How diagnostics are printed
    #[arg(long, global = true, value_enum, default_value_t = DiagnosticsFormat::Text)]
    diagnostics_format: DiagnosticsFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Kotlin sources from one or more rounds
    Generate {
        /// Generator option, javac style (e.g. -A avkSrc=src/main/kotlin)
        #[arg(short = 'A', value_name = "KEY=VALUE", value_parser = generate::parse_define)]
        define: Vec<(String, String)>,

        /// TOML file holding generator options; -A values take precedence
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Round files, processed in order
        #[arg(required = true)]
        rounds: Vec<PathBuf>,
    },

    /// Parse rounds and list the declarations they contain
    Check {
        /// Round files, processed in order
        #[arg(required = true)]
        rounds: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level);

    let result = match cli.command {
        Commands::Generate {
            define,
            config,
            rounds,
        } => generate::run(&define, config.as_deref(), &rounds, cli.diagnostics_format),
        Commands::Check { rounds } => check::run(&rounds, cli.diagnostics_format),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if err.downcast_ref::<AvkError>().is_some_and(AvkError::is_internal) {
                eprintln!("This is a bug in avk; please report it along with the round files.");
            }
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Process exit code for a fatal error
fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<AvkError>()
        .and_then(|e| u8::try_from(e.exit_code()).ok())
        .unwrap_or(1)
}
