//! tabchord - recognize chords in guitar tablature
//!
//! Reads an ASCII tab (or OCRs a scanned one), groups notes played together
//! and names them from a fingering database.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tabchord::{
    build_database, recognize_chords, Config, FingeringTable, Recognition, TabReport, Tesseract,
    TextRecognizer,
};

#[derive(Parser)]
#[command(name = "tabchord")]
#[command(about = "Recognize chords in guitar tablature")]
#[command(version)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a guitar tab image
    Ocr {
        /// Image containing guitar tablature
        image: PathBuf,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recognize chords from an ASCII tab file or a tab image
    Recognize {
        /// ASCII tab file
        #[arg(required_unless_present = "image", conflicts_with = "image")]
        tab_file: Option<PathBuf>,

        /// OCR this image instead of reading a text tab
        #[arg(long)]
        image: Option<PathBuf>,

        /// Fingering store (overrides config)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Print the full report as YAML
        #[arg(long)]
        yaml: bool,
    },

    /// Rebuild the fingering store from the XML chord dictionary
    BuildDb {
        /// XML chord dictionary (overrides config)
        #[arg(long)]
        dictionary: Option<PathBuf>,

        /// Output fingering store (overrides config)
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Filter used when `RUST_LOG` is unset or invalid
fn fallback_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter(verbose))),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Ocr { image, output } => {
            let text = Tesseract::from_config(&config).recognize_text(&image)?;
            match output {
                Some(path) => {
                    fs::write(&path, &text)
                        .with_context(|| format!("Error writing output '{}'", path.display()))?;
                    eprintln!("Output written to {}", path.display());
                }
                None => print!("{}", text),
            }
        }

        Commands::Recognize {
            tab_file,
            image,
            database,
            yaml,
        } => {
            let database = database.unwrap_or(config.database.clone());
            // Load before reading the tab: a bad database aborts the run up front
            let table = FingeringTable::load(&database).context("Error loading chord database")?;

            let (source, origin) = match (tab_file, image) {
                (_, Some(image)) => {
                    let text = Tesseract::from_config(&config).recognize_text(&image)?;
                    (text, image)
                }
                (Some(path), None) => (read_tab(&path)?, path),
                (None, None) => anyhow::bail!("either a tab file or --image is required"),
            };

            let report = recognize_chords(&source, &table)
                .with_context(|| format!("Error loading tab file '{}'", origin.display()))?;

            if yaml {
                print!("{}", serde_yaml::to_string(&report)?);
            } else {
                print_report(&report);
            }
        }

        Commands::BuildDb {
            dictionary,
            database,
        } => {
            let dictionary = dictionary.unwrap_or(config.dictionary.clone());
            let database = database.unwrap_or(config.database.clone());
            let count = build_database(&dictionary, &database)?;
            println!(
                "Successfully extracted {} chords to {}",
                count,
                database.display()
            );
        }
    }

    Ok(())
}

fn read_tab(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Error loading tab file '{}'", path.display()))
}

fn print_report(report: &TabReport) {
    for cluster in &report.clusters {
        match &cluster.outcome {
            Recognition::Recognized(chord) => {
                println!("Chord recognized - {}", chord.name);
                for frets in &chord.alternates {
                    println!("Alternate fingering - {}", frets);
                }
            }
            Recognition::Unrecognized => {
                println!("Unrecognized chord - {}", cluster.key);
            }
        }
    }
}
