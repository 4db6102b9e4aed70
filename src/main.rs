//! bfconv CLI - Command-line tool for converting Wii BF containers to PS2.
//!
//! This is the main entry point for the bfconv command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use rayon::prelude::*;

use bfconv::prelude::*;

/// bfconv - Wii to PS2 BF container converter
#[derive(Parser)]
#[command(name = "bfconv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Wii BF file to the PS2 layout
    Convert {
        /// Input Wii BF file
        #[arg(short, long, env = "BF_INPUT")]
        input: PathBuf,

        /// Output PS2 BF file
        #[arg(short, long, env = "BF_OUTPUT")]
        output: PathBuf,

        /// Keep zero padding as-is instead of collapsing it
        #[arg(long)]
        keep_padding: bool,
    },

    /// Convert every matching file in a directory
    Batch {
        /// Directory containing Wii BF files
        #[arg(short, long, env = "BF_INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, env = "BF_OUTPUT")]
        output: PathBuf,

        /// File name pattern (glob-style)
        #[arg(short, long, default_value = "*.bf")]
        pattern: String,

        /// Keep zero padding as-is instead of collapsing it
        #[arg(long)]
        keep_padding: bool,
    },

    /// Show the header of one BF file, or of every BF file in a directory
    Analyze {
        /// BF file to analyze
        input: Option<PathBuf>,

        /// Directory scanned for *.bf files when no file is given
        #[arg(short, long, default_value = "source_files")]
        dir: PathBuf,
    },

    /// Check a converted file against PS2 hardware limits
    Verify {
        /// Converted PS2 BF file
        #[arg(short, long)]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            keep_padding,
        } => {
            cmd_convert(&input, &output, keep_padding)?;
        }
        Commands::Batch {
            input,
            output,
            pattern,
            keep_padding,
        } => {
            cmd_batch(&input, &output, &pattern, keep_padding)?;
        }
        Commands::Analyze { input, dir } => {
            cmd_analyze(input.as_deref(), &dir)?;
        }
        Commands::Verify { input, json } => {
            return cmd_verify(&input, json);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn options(keep_padding: bool) -> ConvertOptions {
    ConvertOptions {
        reduce_padding: !keep_padding,
    }
}

fn cmd_convert(input: &Path, output: &Path, keep_padding: bool) -> Result<()> {
    println!("Converting: {} -> {}", input.display(), output.display());

    let start = Instant::now();
    let summary = convert_file(input, output, &options(keep_padding))
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    println!(
        "Converted in {:?}: {} -> {} bytes, {} textures ({} without flags), {} name tags, {} padding runs",
        start.elapsed(),
        summary.input_len,
        summary.output_len,
        summary.textures,
        summary.flags_skipped,
        summary.name_tags,
        summary.padding_runs
    );

    Ok(())
}

fn cmd_batch(input: &Path, output: &Path, pattern: &str, keep_padding: bool) -> Result<()> {
    let files = find_files(input, pattern)?;
    if files.is_empty() {
        anyhow::bail!("No files matching '{}' in {}", pattern, input.display());
    }

    println!("Converting {} files...", files.len());
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let converter = Converter::new(options(keep_padding));
    let start = Instant::now();

    let errors: usize = files
        .par_iter()
        .map(|path| {
            let result = match path.file_name() {
                Some(name) => converter.convert_file(path, output.join(name)),
                None => Ok(ConversionSummary::default()),
            };
            pb.inc(1);
            match result {
                Ok(_) => 0,
                Err(e) => {
                    error!("Error converting {}: {}", path.display(), e);
                    1
                }
            }
        })
        .sum();

    pb.finish_with_message("Done");
    println!(
        "Converted {} files in {:?} ({} errors)",
        files.len() - errors,
        start.elapsed(),
        errors
    );

    Ok(())
}

fn cmd_analyze(input: Option<&Path>, dir: &Path) -> Result<()> {
    println!("BF File Analyzer");
    println!("================");

    let files = match input {
        Some(path) => vec![path.to_path_buf()],
        None => {
            if !dir.exists() {
                anyhow::bail!("{} directory not found", dir.display());
            }
            let files = find_files(dir, "*.bf")?;
            if files.is_empty() {
                anyhow::bail!("No .bf files found in {}", dir.display());
            }
            files
        }
    };

    for path in &files {
        let report = analyze_file(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        println!("\nAnalysis of {}:", path.display());
        println!("Hex dump: {}...", report.hexdump);

        let name = path.file_name().unwrap_or_default().to_string_lossy();
        match (report.platform, report.magic_str()) {
            (Platform::Unknown, _) | (_, None) => println!("{} - unrecognized format", name),
            (platform, Some(magic)) => {
                println!("{} format detected (Magic: {})", platform, magic);
                if let Some(version) = report.version {
                    println!("Version: {:#06x}", version);
                }
                println!("{} appears to be valid {} format", name, platform);
            }
        }
    }

    Ok(())
}

fn cmd_verify(input: &Path, json: bool) -> Result<ExitCode> {
    if !input.exists() {
        anyhow::bail!("{} not found", input.display());
    }

    let report = verify_file(input, &VerifyConfig::default())
        .with_context(|| format!("Failed to verify {}", input.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let name = input.file_name().unwrap_or_default().to_string_lossy();
        println!("Verifying {} for PS2 compatibility", name);
        if report.passed() {
            println!("Basic checks passed");
        } else {
            println!("Compatibility issues in {}:", name);
            for issue in &report.issues {
                println!(" - {}", issue);
            }
            println!("Failed basic compatibility checks");
        }
    }

    info!("verified {} ({} bytes)", input.display(), report.size);

    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Files in `dir` whose names match the glob `pattern`, sorted by path.
fn find_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = dir.join(pattern);
    let full = full
        .to_str()
        .with_context(|| format!("Non UTF-8 path: {}", full.display()))?;

    let mut files: Vec<PathBuf> = glob::glob(full)
        .context("Invalid file pattern")?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    Ok(files)
}
