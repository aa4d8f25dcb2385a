//! csvjoin CLI
//!
//! Command-line tool for running configuration-driven joins of two CSV files.

mod logging;

use clap::{Parser, Subcommand};
use cj_core::{check_job, discover_config, read_table, run_job, JobConfig, JobPaths, Warning};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "csvjoin")]
#[command(about = "Join, rewrite and deduplicate two CSV files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Directory layout shared by `run` and `check`
#[derive(clap::Args)]
struct DirArgs {
    /// Working directory searched for the config and input files
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Secondary input directory [default: <dir>/input]
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Output directory [default: <dir>/output]
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

impl DirArgs {
    fn paths(&self) -> JobPaths {
        let mut paths = JobPaths::under(&self.dir);
        if let Some(input) = &self.input_dir {
            paths.input_dir = input.clone();
        }
        if let Some(output) = &self.output_dir {
            paths.output_dir = output.clone();
        }
        paths
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a join job and write the result to the output directory
    Run {
        /// Config file (JSON); discovered in --dir when omitted
        config: Option<PathBuf>,

        #[command(flatten)]
        dirs: DirArgs,
    },

    /// Validate a job's inputs without writing any output
    Check {
        /// Config file (JSON); discovered in --dir when omitted
        config: Option<PathBuf>,

        #[command(flatten)]
        dirs: DirArgs,
    },

    /// Parse and display a single CSV file
    Inspect {
        /// Path to CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Maximum number of rows to display
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Create a config file template
    CreateConfig {
        /// Job name
        #[arg(short, long)]
        name: String,

        /// Output path for the config file
        #[arg(short, long)]
        output: PathBuf,

        /// Left input file name
        #[arg(long, default_value = "input_a.csv")]
        file_a: String,

        /// Right input file name
        #[arg(long, default_value = "input_b.csv")]
        file_b: String,
    },
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> cj_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, dirs } => cmd_run(config, &dirs),
        Commands::Check { config, dirs } => cmd_check(config, &dirs),
        Commands::Inspect { file, limit } => cmd_inspect(&file, limit),
        Commands::CreateConfig {
            name,
            output,
            file_a,
            file_b,
        } => cmd_create_config(&name, &output, &file_a, &file_b),
    }
}

fn resolve_config(config: Option<PathBuf>, dir: &Path) -> cj_core::Result<PathBuf> {
    match config {
        Some(path) => Ok(path),
        None => {
            let path = discover_config(dir)?;
            println!("Using config: {}", path.display());
            Ok(path)
        }
    }
}

fn print_warnings(warnings: &[Warning]) {
    if warnings.is_empty() {
        println!("No warnings");
        return;
    }
    println!("Warnings:");
    for warning in warnings {
        println!("  - {}", warning);
    }
}

fn cmd_run(config: Option<PathBuf>, dirs: &DirArgs) -> cj_core::Result<()> {
    let paths = dirs.paths();
    paths.ensure_dirs()?;
    let config_path = resolve_config(config, &dirs.dir)?;

    let report = run_job(&config_path, &paths)?;

    println!("Config: {}", report.config_name);
    println!("Input A: {}", report.input_a.display());
    println!("Input B: {}", report.input_b.display());
    println!();
    print_warnings(&report.warnings);
    if report.converted > 0 {
        println!("Rewrite rules: {} cells converted", report.converted);
    }
    if report.removed > 0 {
        println!("Duplicates: {} rows removed", report.removed);
    }
    if let Some(err) = &report.audit_error {
        println!("Warning: run log not written: {}", err);
    }

    println!();
    println!("Output: {}", report.output_path.display());
    println!("  {} rows, {} columns", report.output_rows, report.output_columns);

    Ok(())
}

fn cmd_check(config: Option<PathBuf>, dirs: &DirArgs) -> cj_core::Result<()> {
    let config_path = resolve_config(config, &dirs.dir)?;
    let warnings = check_job(&config_path, &dirs.paths())?;
    print_warnings(&warnings);
    Ok(())
}

fn cmd_inspect(file: &Path, limit: usize) -> cj_core::Result<()> {
    let table = read_table(file)?;

    println!("File: {}", file.display());
    println!("Columns: {}", table.column_count());
    println!("Rows: {}", table.row_count());
    println!();

    // Print header
    println!("{}", table.header().join("\t"));
    println!("{}", "-".repeat(table.column_count() * 12));

    for row in table.data_rows().iter().take(limit) {
        println!("{}", row.join("\t"));
    }

    if table.row_count() > limit {
        println!("... ({} more rows)", table.row_count() - limit);
    }

    Ok(())
}

fn cmd_create_config(name: &str, output: &Path, file_a: &str, file_b: &str) -> cj_core::Result<()> {
    let config = JobConfig::template(name, file_a, file_b);
    config.save(output)?;

    println!("Created config file: {}", output.display());
    println!();
    println!("Edit the key columns, output columns and rules, then run:");
    println!("  csvjoin run {}", output.display());

    Ok(())
}
