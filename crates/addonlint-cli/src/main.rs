//! addonlint CLI - pre-merge validation for vendor-product templates

mod json;

use addonlint_core::{
    config::CONFIG_FILE_NAME, parse_changed_files, validate_changed_files, AssetKind,
    ProductGroup, RealFileSystem, Reporter, RunSummary, ValidatorConfig,
};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: addonlint <changed_files.txt>";

#[derive(Parser)]
#[command(name = "addonlint")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Validate vendor-product templates before merge",
    long_about = "Validate the templates touched by a change.\n\nReads a list of changed paths (one per line) and checks every product directory under the templates root: README, manifest, asset layout, document shape and slug references."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// File listing changed paths, one per line
    changed_files: Option<PathBuf>,

    /// Repository checkout the changed paths are relative to
    #[arg(short = 'C', long, default_value = ".")]
    repo_root: PathBuf,

    /// Config file path (defaults to .addonlint.toml in the repo root)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Output path for config
        #[arg(default_value = CONFIG_FILE_NAME)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match (&cli.command, &cli.changed_files) {
        (Some(Commands::Init { output }), _) => init_command(output),
        (None, Some(changed_files)) => validate_command(changed_files, &cli),
        (None, None) => {
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

/// Logs go to stderr so JSON on stdout stays clean
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn validate_command(changed_files: &Path, cli: &Cli) -> anyhow::Result<()> {
    let config = ValidatorConfig::discover(cli.config.as_ref(), &cli.repo_root)
        .context("Failed to load config")?;

    let listing = std::fs::read_to_string(changed_files)
        .with_context(|| format!("Failed to read {}", changed_files.display()))?;
    let files = parse_changed_files(&listing);

    let fs = RealFileSystem::new(&cli.repo_root).with_max_file_size(config.max_file_size);

    match cli.format {
        OutputFormat::Text => {
            let mut reporter = ConsoleReporter {
                verbose: cli.verbose,
            };
            let summary = validate_changed_files(&files, &fs, &config, &mut reporter)?;
            print_summary(&summary);
            Ok(())
        }
        OutputFormat::Json => {
            let mut reporter = json::JsonReporter::new();
            let result = validate_changed_files(&files, &fs, &config, &mut reporter);
            let output = reporter.finish(result.as_ref().err());
            println!("{}", serde_json::to_string_pretty(&output)?);
            if result.is_err() {
                process::exit(1);
            }
            Ok(())
        }
    }
}

/// Human-readable progress on stdout
struct ConsoleReporter {
    verbose: bool,
}

impl Reporter for ConsoleReporter {
    fn files_found(&mut self, files: &[String]) {
        println!(
            "{} {} changed {}",
            "Found".cyan().bold(),
            files.len(),
            if files.len() == 1 { "file" } else { "files" }
        );
        if self.verbose {
            for file in files {
                println!("  {}", file.dimmed());
            }
        }
    }

    fn product_started(&mut self, group: &ProductGroup) {
        println!();
        println!("{} {}", "Validating".cyan().bold(), group.dir());
    }

    fn product_passed(&mut self, group: &ProductGroup, asset_dirs: &BTreeSet<AssetKind>) {
        if self.verbose && !asset_dirs.is_empty() {
            let dirs: Vec<&str> = asset_dirs.iter().map(|k| k.dir_name()).collect();
            println!("  {} {}", "assets:".dimmed(), dirs.join(", "));
        }
        println!(
            "{} {} passed validation",
            "✓".green().bold(),
            group.dir()
        );
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    if summary.products.is_empty() {
        println!("{}", "No template products changed".yellow());
        return;
    }
    println!(
        "{}",
        format!(
            "✓ {} {} validated",
            summary.products.len(),
            if summary.products.len() == 1 {
                "product"
            } else {
                "products"
            }
        )
        .green()
        .bold()
    );
}

fn init_command(output: &Path) -> anyhow::Result<()> {
    let default_config = ValidatorConfig::default();
    let toml_content = toml::to_string_pretty(&default_config)?;

    std::fs::write(output, toml_content)?;

    println!(
        "{} Created config file: {}",
        "✓".green().bold(),
        output.display()
    );

    Ok(())
}
