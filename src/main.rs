use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use capnalyx::config::Config;
use capnalyx::output::{self, OutputFormat};
use capnalyx::{BatchResult, Rubric};
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_OUTPUT: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_REJECTED: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score and rank startups from a CSV file and print the result
    Analyze {
        /// CSV file with one startup per row
        input: PathBuf,

        /// Output format (defaults to report.format from config, then table)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Exit with code 3 if any row was rejected
        #[arg(long)]
        strict: bool,
    },
    /// Score and rank startups and write the result to a report file
    Report {
        /// CSV file with one startup per row
        input: PathBuf,

        /// Report format (defaults to report.format from config, then csv)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Report path (defaults to capnalyx_report_<timestamp>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit with code 3 if any row was rejected
        #[arg(long)]
        strict: bool,
    },
    /// Write the default configuration file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "capnalyx")]
#[command(about = "Startup investment scoring: metrics, valuation, score, rank, recommendation", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and per-startup score breakdowns
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/capnalyx/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "capnalyx=debug" } else { "capnalyx=error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    let (result, strict) = match cli.command {
        Commands::Init { force } => {
            match capnalyx::config::write_default_config(config_path, force) {
                Ok(path) => println!("Wrote default config to {}", path.display()),
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Analyze {
            input,
            format,
            strict,
        } => {
            let (config, rubric) = load_setup(config_path);
            let result = score_input(&input, &rubric);
            let format = config.resolve_format(format, OutputFormat::Table);
            if let Err(e) = print_result(&result, format, cli.verbose) {
                eprintln!("Output error: {:#}", e);
                std::process::exit(EXIT_OUTPUT);
            }
            (result, strict)
        }
        Commands::Report {
            input,
            format,
            output: output_path,
            strict,
        } => {
            let (config, rubric) = load_setup(config_path);
            let result = score_input(&input, &rubric);
            let format = config.resolve_format(format, OutputFormat::Csv);
            let dir = config
                .report
                .as_ref()
                .and_then(|r| r.directory.as_deref())
                .unwrap_or(".");
            let path = output_path.unwrap_or_else(|| {
                output::default_report_path(Path::new(dir), format, chrono::Local::now())
            });
            let written = output::render(&result, format, false)
                .and_then(|contents| output::write_report(&path, &contents));
            if let Err(e) = written {
                eprintln!("Output error: {:#}", e);
                std::process::exit(EXIT_OUTPUT);
            }
            println!(
                "Report written to {} ({} startups)",
                path.display(),
                result.scored.len()
            );
            (result, strict)
        }
    };

    if cli.verbose {
        eprintln!();
        eprintln!(
            "Total: {} rows in {:?}",
            result.scored.len() + result.rejected.len(),
            start_time.elapsed()
        );
    }

    if strict && !result.rejected.is_empty() {
        std::process::exit(EXIT_REJECTED);
    }
    std::process::exit(EXIT_SUCCESS);
}

/// Load config and compile the rubric, exiting with EXIT_CONFIG on failure
fn load_setup(config_path: Option<PathBuf>) -> (Config, Rubric) {
    let config = match capnalyx::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    match capnalyx::scoring::compile_rubric(&config.scoring_or_default()) {
        Ok(rubric) => (config, rubric),
        Err(errors) => {
            eprintln!("Scoring config errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    }
}

/// Read and score the input CSV, exiting with EXIT_INPUT if it cannot be read.
/// Rejected rows are listed on stderr.
fn score_input(input: &Path, rubric: &Rubric) -> BatchResult {
    let rows = match capnalyx::ingest::read_rows_from_path(input) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };
    let result = capnalyx::process_ingested(rows, rubric);

    if !result.rejected.is_empty() {
        eprintln!("Rejected {} row(s):", result.rejected.len());
        for line in output::format_rejections(&result.rejected).lines() {
            eprintln!("  {}", line);
        }
    }
    result
}

fn print_result(result: &BatchResult, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let use_colors = format == OutputFormat::Table && output::should_use_colors();

    if format == OutputFormat::Table && verbose && !result.scored.is_empty() {
        // Verbose mode: detailed output with score breakdowns
        for scored in &result.scored {
            println!("{}", output::format_startup_detail(scored, use_colors));
            println!();
        }
    }

    println!("{}", output::render(result, format, use_colors)?);

    if format == OutputFormat::Table {
        println!();
        println!("{}", output::format_summary(&result.summary()));
    }
    Ok(())
}
