//! docsync - copy downloaded documents into the site's assets directory
//!
//! Operator-run, one-off tool: every outcome is printed and the run
//! continues to the next mapping, so a single missing download never
//! blocks the rest.

use clap::Parser;
use sitedev::copier::{self, CopyError, DocumentMapping, Manifest};
use std::path::PathBuf;
use std::process::ExitCode;

/// Copy document files into the assets directory, verifying sizes
#[derive(Parser, Debug)]
#[command(name = "docsync", version, about)]
struct Args {
    /// SOURCE=DEST_NAME mappings (SOURCE relative to --source-dir if set)
    #[arg(value_name = "MAPPING")]
    mappings: Vec<String>,

    /// Directory the source files live in
    #[arg(long, value_name = "DIR")]
    source_dir: Option<PathBuf>,

    /// Directory to copy into
    #[arg(long, value_name = "DIR", default_value = ".")]
    dest_dir: PathBuf,

    /// TOML manifest listing documents to copy
    #[arg(long, value_name = "FILE")]
    manifest: Option<PathBuf>,

    /// Warn when a copied file is smaller than this many bytes
    #[arg(long, value_name = "BYTES", default_value = "10000")]
    min_size: u64,
}

#[derive(Debug, Default)]
struct SyncStats {
    copied: usize,
    missing: usize,
    failed: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let stats = match run(&args) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("docsync: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Done: {} copied, {} missing, {} failed.",
        stats.copied, stats.missing, stats.failed
    );

    // Partial success is normal for this tool; only a run that copied
    // nothing while having work to do signals failure.
    if stats.copied == 0 && (stats.missing > 0 || stats.failed > 0) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(args: &Args) -> Result<SyncStats, CopyError> {
    let mut source_dir = args.source_dir.clone();
    let mut mappings = Vec::new();

    if let Some(path) = &args.manifest {
        let manifest = Manifest::load(path)?;
        // CLI --source-dir wins over the manifest's source_dir.
        if source_dir.is_none() {
            source_dir = manifest.source_dir;
        }
        mappings.extend(manifest.documents);
    }

    for raw in &args.mappings {
        mappings.push(DocumentMapping::parse(raw)?);
    }

    if mappings.is_empty() {
        println!("Nothing to copy (no mappings or manifest given).");
        return Ok(SyncStats::default());
    }

    let mut stats = SyncStats::default();

    for mapping in &mappings {
        let src = match &source_dir {
            Some(dir) if mapping.source.is_relative() => dir.join(&mapping.source),
            _ => mapping.source.clone(),
        };
        let dst = args.dest_dir.join(&mapping.dest);

        match copier::copy_document(&src, &dst) {
            Ok(report) => {
                println!("OK: {} ({} bytes)", mapping.dest, report.dst_size);
                if report.size_mismatch() {
                    println!(
                        "WARNING: sizes differ! source {} bytes, dest {} bytes",
                        report.src_size, report.dst_size
                    );
                } else if report.suspiciously_small(args.min_size) {
                    println!(
                        "WARNING: {} is only {} bytes (maybe placeholder?)",
                        mapping.dest, report.dst_size
                    );
                }
                stats.copied += 1;
            }
            Err(CopyError::SourceNotFound(path)) => {
                println!("NOT FOUND: {}", path.display());
                if let Some(dir) = path.parent() {
                    for hint in copier::similar_files(dir, &path) {
                        println!("  Found: {hint}");
                    }
                }
                stats.missing += 1;
            }
            Err(e) => {
                println!("FAILED: {}: {e}", src.display());
                stats.failed += 1;
            }
        }
    }

    Ok(stats)
}
