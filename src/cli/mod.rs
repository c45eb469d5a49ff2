//! # CLI Module
//!
//! Command-line interface for perceptual image hashing.
//!
//! ## Usage
//! ```bash
//! # Hash every image under a directory
//! imghash hash ~/Photos
//!
//! # Another algorithm and size, JSON output
//! imghash hash ~/Photos --algorithm difference --size 16 --output json
//!
//! # Compare two images, or an image against a stored fingerprint
//! imghash compare a.jpg b.jpg
//! imghash compare a.jpg 0e72c73c608f7c71 --threshold 5
//!
//! # Print all four fingerprints of one image
//! imghash all photo.png
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use image_fingerprint::core::comparator::{compare, MatchResult, ThresholdStrategy};
use image_fingerprint::core::hasher::{FastDecoder, HashAlgorithm, HashAlgorithmKind, HasherConfig};
use image_fingerprint::core::scanner::{ImageScanner, ScanConfig, WalkDirScanner};
use image_fingerprint::core::Fingerprint;
use image_fingerprint::error::{ImageHashError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Perceptual image hashing
#[derive(Parser, Debug)]
#[command(name = "imghash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fingerprint image files and directories
    Hash {
        /// Files or directories to hash
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Hash algorithm to use
        #[arg(short, long, default_value = "perceptual")]
        algorithm: Algorithm,

        /// Fingerprint side length (bits = size * size)
        #[arg(short, long, default_value = "8")]
        size: u32,

        /// pHash oversampling factor
        #[arg(short, long, default_value = "4")]
        factor: u32,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,
    },

    /// Compare two images or hex fingerprints
    Compare {
        /// Image path or hex fingerprint
        a: String,

        /// Image path or hex fingerprint
        b: String,

        /// Hash algorithm used for image arguments
        #[arg(short, long, default_value = "perceptual")]
        algorithm: Algorithm,

        #[arg(short, long, default_value = "8")]
        size: u32,

        #[arg(short, long, default_value = "4")]
        factor: u32,

        /// Maximum distance reported as a duplicate (default: 1/8 of the bits)
        #[arg(short, long)]
        threshold: Option<u32>,
    },

    /// Print every fingerprint of one image
    All {
        path: PathBuf,

        #[arg(short, long, default_value = "8")]
        size: u32,

        #[arg(short, long, default_value = "4")]
        factor: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Average Hash - Fast, good for exact duplicates
    Average,
    /// Perceptual Hash - Most robust to edits (default)
    Perceptual,
    /// Difference Hash - Horizontal gradients
    Difference,
    /// Vertical Difference Hash - Vertical gradients
    DifferenceVertical,
}

impl From<Algorithm> for HashAlgorithmKind {
    fn from(algo: Algorithm) -> Self {
        match algo {
            Algorithm::Average => HashAlgorithmKind::Average,
            Algorithm::Perceptual => HashAlgorithmKind::Perceptual,
            Algorithm::Difference => HashAlgorithmKind::Difference,
            Algorithm::DifferenceVertical => HashAlgorithmKind::DifferenceVertical,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// One line of `hash` output
#[derive(Debug, Serialize)]
struct HashRecord {
    path: PathBuf,
    algorithm: HashAlgorithmKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<Fingerprint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hash {
            paths,
            algorithm,
            size,
            factor,
            output,
            include_hidden,
        } => {
            let hasher = build_hasher(algorithm.into(), size, factor)?;
            run_hash(paths, hasher.as_ref(), output, include_hidden)
        }
        Commands::Compare {
            a,
            b,
            algorithm,
            size,
            factor,
            threshold,
        } => {
            let hasher = build_hasher(algorithm.into(), size, factor)?;
            run_compare(&a, &b, hasher.as_ref(), threshold)
        }
        Commands::All { path, size, factor } => run_all(&path, size, factor),
    }
}

fn build_hasher(
    algorithm: HashAlgorithmKind,
    size: u32,
    factor: u32,
) -> Result<Box<dyn HashAlgorithm>> {
    let hasher = HasherConfig::new()
        .algorithm(algorithm)
        .hash_size(size)
        .high_freq_factor(factor)
        .build()?;
    Ok(hasher)
}

fn run_hash(
    paths: Vec<PathBuf>,
    hasher: &dyn HashAlgorithm,
    output: OutputFormat,
    include_hidden: bool,
) -> Result<()> {
    let scanner = WalkDirScanner::new(ScanConfig {
        include_hidden,
        ..Default::default()
    });
    let scan = scanner.scan(&paths);

    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(scan.images.len() as u64);
        let bar_style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map_err(|e| ImageHashError::Config(e.to_string()))?
            .progress_chars("█▓░");
        pb.set_style(bar_style);
        Some(pb)
    } else {
        None
    };

    let records: Vec<HashRecord> = scan
        .images
        .par_iter()
        .map(|image| {
            let result = hasher.hash_file(&image.path);
            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            match result {
                Ok(fingerprint) => HashRecord {
                    path: image.path.clone(),
                    algorithm: hasher.kind(),
                    fingerprint: Some(fingerprint),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(path = %image.path.display(), error = %e, "failed to hash");
                    HashRecord {
                        path: image.path.clone(),
                        algorithm: hasher.kind(),
                        fingerprint: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    match output {
        OutputFormat::Pretty => {
            print_pretty_hashes(&Term::stdout(), &records);
            for error in &scan.errors {
                Term::stderr()
                    .write_line(&format!("{} {}", style("!").red().bold(), error))
                    .ok();
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&records)
                .map_err(|e| ImageHashError::Config(e.to_string()))?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn print_pretty_hashes(term: &Term, records: &[HashRecord]) {
    for record in records {
        let line = match (&record.fingerprint, &record.error) {
            (Some(fingerprint), _) => format!(
                "{}  {}",
                style(fingerprint.to_hex()).cyan(),
                record.path.display()
            ),
            (None, error) => format!(
                "{}  {} ({})",
                style("error").red().bold(),
                record.path.display(),
                style(error.as_deref().unwrap_or("unknown")).dim()
            ),
        };
        term.write_line(&line).ok();
    }
}

/// An existing path is hashed; anything else must parse as hex.
fn resolve_fingerprint(arg: &str, hasher: &dyn HashAlgorithm) -> Result<Fingerprint> {
    let path = Path::new(arg);
    if path.exists() {
        return Ok(hasher.hash_file(path)?);
    }
    Ok(arg.parse::<Fingerprint>()?)
}

fn strategy_for(threshold: Option<u32>) -> ThresholdStrategy {
    threshold.map_or_else(ThresholdStrategy::scaled, ThresholdStrategy::new)
}

fn run_compare(
    a: &str,
    b: &str,
    hasher: &dyn HashAlgorithm,
    threshold: Option<u32>,
) -> Result<()> {
    let left = resolve_fingerprint(a, hasher)?;
    let right = resolve_fingerprint(b, hasher)?;
    let result = compare(&left, &right, &strategy_for(threshold))?;

    print_match(&Term::stdout(), &left, &right, &result);
    Ok(())
}

fn print_match(term: &Term, left: &Fingerprint, right: &Fingerprint, result: &MatchResult) {
    term.write_line(&format!("  {}  {}", style("a").dim(), left)).ok();
    term.write_line(&format!("  {}  {}", style("b").dim(), right)).ok();
    term.write_line("").ok();
    term.write_line(&format!("  distance    {}", style(result.distance).cyan()))
        .ok();
    term.write_line(&format!(
        "  similarity  {}",
        style(format!("{:.1}%", result.similarity_percent)).cyan()
    ))
    .ok();

    let verdict = if result.is_duplicate {
        style(result.match_type.to_string()).green().bold()
    } else {
        style(result.match_type.to_string()).yellow()
    };
    term.write_line(&format!("  match       {}", verdict)).ok();
}

fn run_all(path: &Path, size: u32, factor: u32) -> Result<()> {
    let image = FastDecoder::decode(path)?;
    let term = Term::stdout();

    term.write_line(&format!("{}", style(path.display()).bold())).ok();
    for kind in HashAlgorithmKind::ALL {
        let hasher = build_hasher(kind, size, factor)?;
        let fingerprint = hasher.hash_image(&image)?;
        term.write_line(&format!(
            "  {:<8} {}",
            kind.to_string(),
            style(fingerprint.to_hex()).cyan()
        ))
        .ok();
    }

    Ok(())
}
