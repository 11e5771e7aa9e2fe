use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use phpdecl::driver::{render_outline, BatchDriver, SourceUnit};
use phpdecl::Token;

#[derive(Parser)]
#[command(name = "phpdecl")]
#[command(author, version, about = "Declaration extractor for PHP source files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Declaration tree as JSON (default)
    #[value(name = "json")]
    Json,
    /// Indented outline of the declarations
    #[value(name = "outline")]
    Outline,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract declarations from source files
    Parse {
        /// The source files to parse
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// How to print the result
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Dump the token stream of a source file
    Tokens {
        /// The source file to tokenize
        input: PathBuf,
    },

    /// Check source files for errors without printing declarations
    Check {
        /// The source files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = match cli.command {
        Commands::Parse { files, format } => parse(files, format),
        Commands::Tokens { input } => tokens(input),
        Commands::Check { files } => check(files),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn run_batch(files: &[PathBuf]) -> BatchDriver {
    let mut driver = BatchDriver::new();
    for file in files {
        log::debug!("Parsing {:?}", file);
        driver.add_file(file);
    }
    driver
}

fn parse(files: Vec<PathBuf>, format: OutputFormat) -> Result<()> {
    let driver = run_batch(&files);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(driver.results())
                .context("Failed to serialize declarations")?;
            println!("{}", json);
        }
        OutputFormat::Outline => {
            for (name, namespaces) in driver.results() {
                println!("{}", format!("=== {} ===", name).blue().bold());
                print!("{}", render_outline(namespaces));
            }
        }
    }

    if driver.has_errors() {
        driver.report_diagnostics()?;
        anyhow::bail!("{} of {} file(s) failed", driver.errors().error_count(), files.len());
    }

    Ok(())
}

fn tokens(input: PathBuf) -> Result<()> {
    let unit = SourceUnit::new(&input)?;
    let tokens = phpdecl::Lexer::new(&unit.source).collect_tokens();

    println!("{}", "=== Tokens ===".blue().bold());
    for (i, token) in tokens.iter().enumerate() {
        let line = format!(
            "{:4}: {:>4}:{:<3} {} {:?}",
            i, token.position.line, token.position.column, token.token, token.text
        );
        if matches!(token.token, Token::Error) {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }

    Ok(())
}

fn check(files: Vec<PathBuf>) -> Result<()> {
    log::info!("Checking {} file(s)", files.len());

    let driver = run_batch(&files);
    let failed = driver.errors().error_count();

    if failed > 0 {
        driver.report_diagnostics()?;
        anyhow::bail!("{} of {} file(s) failed", failed, files.len());
    }

    println!(
        "{}: {} file(s), {} namespace(s), no errors found",
        "success".green().bold(),
        files.len(),
        driver.results().values().map(Vec::len).sum::<usize>()
    );
    Ok(())
}
