//! hdconvert CLI - Command-line converter for HeroDesigner files.
//!
//! This is the main entry point for the hdconvert command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use hdconvert::prelude::*;

/// hdconvert - convert HeroDesigner templates and characters to and from YAML
#[derive(Parser)]
#[command(name = "hdconvert")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Spaces per indentation level in written HDT files (0 for a single line)
    #[arg(long, default_value_t = 2, global = true)]
    indent: usize,

    /// Start written HDT files with an XML declaration
    #[arg(long, global = true)]
    xml_declaration: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single file and print or save the result
    Convert {
        /// File to convert
        file: PathBuf,

        /// Input format (hdt or yaml); detected from the extension if omitted
        #[arg(short = 'i', long = "input-format", env = "HDCONVERT_FROM")]
        from: Option<Format>,

        /// Output format (hdt or yaml); the other format if omitted
        #[arg(short = 'o', long = "output-format", env = "HDCONVERT_TO")]
        to: Option<Format>,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Convert every file matching a glob pattern into a directory
    Batch {
        /// Glob pattern, e.g. "characters/*.hdc"
        pattern: String,

        /// Output directory
        #[arg(short = 'd', long)]
        output_dir: PathBuf,

        /// Input format; detected per file from the extension if omitted
        #[arg(short = 'i', long = "input-format", env = "HDCONVERT_FROM")]
        from: Option<Format>,

        /// Output format; the other format if omitted
        #[arg(short = 'o', long = "output-format", env = "HDCONVERT_TO")]
        to: Option<Format>,
    },

    /// Check that a file survives conversion in both directions
    Check {
        /// File to check
        file: PathBuf,

        /// Input format; detected from the extension if omitted
        #[arg(short = 'i', long = "input-format", env = "HDCONVERT_FROM")]
        from: Option<Format>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let converter = Converter::new(ConvertOptions {
        write: WriteOptions {
            indent: cli.indent,
            declaration: cli.xml_declaration,
        },
        ..ConvertOptions::default()
    });

    match cli.command {
        Commands::Convert {
            file,
            from,
            to,
            output,
        } => {
            cmd_convert(&converter, &file, from, to, output.as_deref())?;
        }
        Commands::Batch {
            pattern,
            output_dir,
            from,
            to,
        } => {
            cmd_batch(&converter, &pattern, &output_dir, from, to)?;
        }
        Commands::Check { file, from } => {
            cmd_check(&converter, &file, from)?;
        }
    }

    Ok(())
}

/// Log to stderr so stdout only ever carries converted documents.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Explicit format, else the one implied by the extension, else HDT.
fn input_format(path: &Path, explicit: Option<Format>) -> Format {
    explicit
        .or_else(|| Format::from_path(path))
        .unwrap_or(Format::Hdt)
}

fn cmd_convert(
    converter: &Converter,
    file: &Path,
    from: Option<Format>,
    to: Option<Format>,
    output: Option<&Path>,
) -> Result<()> {
    let from = input_format(file, from);
    let to = to.unwrap_or_else(|| from.other());
    info!("Converting {} ({} -> {})", file.display(), from, to);

    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let converted = converter
        .convert(&text, from, to)
        .with_context(|| format!("Failed to convert {}", file.display()))?;

    match output {
        Some(path) => {
            fs::write(path, converted)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", converted),
    }

    Ok(())
}

fn cmd_batch(
    converter: &Converter,
    pattern: &str,
    output_dir: &Path,
    from: Option<Format>,
    to: Option<Format>,
) -> Result<()> {
    let paths = glob::glob(pattern)
        .with_context(|| format!("Invalid glob pattern: {}", pattern))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                eprintln!("Skipping unreadable path: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect::<Vec<_>>();

    if paths.is_empty() {
        bail!("No files match {}", pattern);
    }

    println!("Converting {} files into {}...", paths.len(), output_dir.display());

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut converted = 0;
    let mut errors = 0;

    for path in &paths {
        match convert_into(converter, path, output_dir, from, to) {
            Ok(written) => {
                debug!("{} -> {}", path.display(), written.display());
                converted += 1;
            }
            Err(e) => {
                pb.suspend(|| eprintln!("Error converting {}: {:#}", path.display(), e));
                errors += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!(
        "Converted {} files in {:?} ({} errors)",
        converted,
        start.elapsed(),
        errors
    );

    Ok(())
}

/// Convert one batch file, returning the path written.
fn convert_into(
    converter: &Converter,
    path: &Path,
    output_dir: &Path,
    from: Option<Format>,
    to: Option<Format>,
) -> Result<PathBuf> {
    let from = input_format(path, from);
    let to = to.unwrap_or_else(|| from.other());

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("No usable file name in {}", path.display()))?;
    let output_path = output_dir.join(format!("{}.{}", stem, to.extension()));

    let text = fs::read_to_string(path).context("Failed to read input file")?;
    let converted = converter.convert(&text, from, to)?;
    fs::write(&output_path, converted)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    Ok(output_path)
}

fn cmd_check(converter: &Converter, file: &Path, from: Option<Format>) -> Result<()> {
    let from = input_format(file, from);
    info!("Checking {} as {}", file.display(), from);

    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let document = converter
        .read(from, &text)
        .with_context(|| format!("Failed to read {} as {}", file.display(), from))?;
    let report = converter
        .check(&document)
        .with_context(|| format!("Failed to convert {}", file.display()))?;

    println!("{}: <{}>", file.display(), document.tag);
    println!("  yaml: {}", if report.yaml_stable { "stable" } else { "CHANGED" });
    println!("  hdt:  {}", if report.hdt_stable { "stable" } else { "CHANGED" });

    if !report.is_stable() {
        bail!("{} does not survive a round trip", file.display());
    }

    Ok(())
}
