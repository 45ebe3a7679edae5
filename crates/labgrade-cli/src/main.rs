//! labgrade CLI — grade a lab results log from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use labgrade_core::GradeError;

mod commands;

#[derive(Parser)]
#[command(
    name = "labgrade",
    version,
    about = "Pass/fail lab grading with improvement tracking"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a lab results log and print or save the report
    Grade {
        /// Path to the lab results log (default: labresults.log)
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Output format: text, json, html
        #[arg(long)]
        format: Option<String>,

        /// Save the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List every parsed log entry with its lab and task
    Events {
        /// Path to the lab results log (default: labresults.log)
        #[arg(long)]
        log_file: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter labgrade.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("labgrade=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grade {
            log_file,
            format,
            output,
            config,
        } => commands::grade::execute(log_file, format, output, config),
        Commands::Events { log_file, config } => commands::events::execute(log_file, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        match e.downcast_ref::<GradeError>() {
            Some(grade_err) if grade_err.is_expected() => eprintln!("Error: {grade_err}"),
            _ => eprintln!("Unexpected error: {e:#}"),
        }
        process::exit(1);
    }
}
