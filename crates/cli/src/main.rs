use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use diskscout_core::{
    analyze_by_extension, clean_dirs, find_duplicates, find_large, list_volumes,
    run_volume_monitor, volume_usage, HistoryStore, MonitorOptions, ScanSnapshot,
    DEFAULT_HISTORY_FILE, LARGE_FILE_THRESHOLD,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "diskscout",
    version,
    about = "Analyze disk usage: classify space by extension, find duplicates and oversized files, purge temp files, and monitor capacity over time."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List mounted volumes.
    Drives,
    /// Report capacity usage for a volume and record a history snapshot.
    Usage(UsageArgs),
    /// Break down consumed space by file extension.
    Types(TypesArgs),
    /// Find content-identical files.
    Duplicates(RootArg),
    /// Find files over a size threshold.
    Large(LargeArgs),
    /// Delete every file under the temp directories. Irreversible.
    Clean(CleanArgs),
    /// Sample volume usage on an interval until interrupted.
    Monitor(MonitorArgs),
    /// Show recorded usage snapshots.
    History(HistoryArgs),
}

#[derive(Debug, Args)]
struct UsageArgs {
    /// Mount point of the volume, e.g. `/` or `C:\`.
    mount: String,

    /// History log file snapshots are appended to.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_HISTORY_FILE)]
    history: PathBuf,

    /// Do not append a snapshot to the history log.
    #[arg(long)]
    no_record: bool,
}

#[derive(Debug, Args)]
struct RootArg {
    /// Directory tree to scan.
    root: PathBuf,

    /// Emit the result as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct TypesArgs {
    /// Directory tree to scan.
    root: PathBuf,

    /// Show only the N largest extensions.
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Emit the result as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct LargeArgs {
    /// Directory tree to scan.
    root: PathBuf,

    /// Minimum size in bytes; only strictly larger files are reported.
    #[arg(long, default_value_t = LARGE_FILE_THRESHOLD, value_name = "BYTES")]
    threshold: u64,

    /// Emit the result as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct CleanArgs {
    /// Directories to purge. Defaults to the platform temp directories.
    #[arg(value_name = "DIR")]
    paths: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct MonitorArgs {
    /// Mount point of the volume to watch.
    mount: String,

    /// Seconds between samples.
    #[arg(long, default_value_t = 10)]
    interval: u64,

    /// Warn when usage exceeds this percentage.
    #[arg(long, default_value_t = 90.0, value_name = "PERCENT")]
    threshold: f64,
}

#[derive(Debug, Args)]
struct HistoryArgs {
    /// History log file to read.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_HISTORY_FILE)]
    file: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Drives => run_drives(),
        Commands::Usage(args) => run_usage(args),
        Commands::Types(args) => run_types(args),
        Commands::Duplicates(args) => run_duplicates(args),
        Commands::Large(args) => run_large(args),
        Commands::Clean(args) => run_clean(args),
        Commands::Monitor(args) => run_monitor_command(args),
        Commands::History(args) => run_history(args),
    }
}

fn run_drives() -> Result<()> {
    let volumes = list_volumes();
    if volumes.is_empty() {
        println!("No mounted volumes detected.");
        return Ok(());
    }
    for volume in volumes {
        println!(
            "{} [{}] fs={} kind={:?} removable={} total={} GB free={} GB",
            volume.name,
            volume.mount_point,
            volume.file_system.as_deref().unwrap_or("?"),
            volume.kind,
            volume.is_removable,
            gib_trunc(volume.total_space_bytes),
            gib_trunc(volume.available_space_bytes),
        );
    }
    Ok(())
}

fn run_usage(args: UsageArgs) -> Result<()> {
    let usage = volume_usage(&args.mount)?;
    println!("Volume: {}", args.mount);
    println!("Total space: {} GB", gib_trunc(usage.total_bytes));
    println!("Used space:  {} GB", gib_trunc(usage.used_bytes));
    println!("Free space:  {} GB", gib_trunc(usage.free_bytes));
    println!("Percent used: {:.2}%", usage.percent_used);

    if !args.no_record {
        let store = HistoryStore::new(&args.history);
        let snapshot = ScanSnapshot::now(&args.mount, usage.percent_used);
        // A failed append must not invalidate the usage report above.
        if let Err(err) = store.append(&snapshot) {
            tracing::warn!("could not record history snapshot: {err}");
        } else {
            println!("Snapshot recorded to {}", store.path().display());
        }
    }
    Ok(())
}

fn run_types(args: TypesArgs) -> Result<()> {
    let mut summary = analyze_by_extension(&args.root)
        .with_context(|| format!("extension analysis failed for {}", args.root.display()))?;
    if let Some(top) = args.top {
        summary.truncate(top);
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    if summary.is_empty() {
        println!("No files found under {}.", args.root.display());
        return Ok(());
    }
    println!("{:<12} {:>8} {:>12}", "Extension", "Files", "Size (GB)");
    for usage in summary {
        let label = if usage.extension.is_empty() {
            "(none)"
        } else {
            usage.extension.as_str()
        };
        println!(
            "{:<12} {:>8} {:>12.2}",
            label,
            usage.files,
            gib_f(usage.total_bytes)
        );
    }
    Ok(())
}

fn run_duplicates(args: RootArg) -> Result<()> {
    let pairs = find_duplicates(&args.root)
        .with_context(|| format!("duplicate scan failed for {}", args.root.display()))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&pairs)?);
        return Ok(());
    }
    if pairs.is_empty() {
        println!("No duplicate files found under {}.", args.root.display());
        return Ok(());
    }
    println!("{} duplicate file(s):", pairs.len());
    for pair in pairs {
        println!(
            "{}  (duplicate of {})",
            pair.duplicate.display(),
            pair.original.display()
        );
    }
    Ok(())
}

fn run_large(args: LargeArgs) -> Result<()> {
    let files = find_large(&args.root, args.threshold)
        .with_context(|| format!("large-file scan failed for {}", args.root.display()))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&files)?);
        return Ok(());
    }
    if files.is_empty() {
        println!(
            "No files over {:.2} GB under {}.",
            gib_f(args.threshold),
            args.root.display()
        );
        return Ok(());
    }
    for file in files {
        println!(
            "{:>10.2} GB  {}",
            gib_f(file.size_bytes),
            file.path.display()
        );
    }
    Ok(())
}

fn run_clean(args: CleanArgs) -> Result<()> {
    let targets = if args.paths.is_empty() {
        default_clean_targets()
    } else {
        args.paths
    };
    for target in &targets {
        println!("Cleaning {}", target.display());
    }

    let outcome = clean_dirs(&targets);
    println!(
        "Freed {:.2} GB ({} file(s) removed, {} skipped).",
        gib_f(outcome.bytes_freed),
        outcome.files_removed,
        outcome.files_skipped
    );
    Ok(())
}

fn run_monitor_command(args: MonitorArgs) -> Result<()> {
    // Probe once up front so a bad mount point fails fast instead of
    // warning forever inside the loop.
    volume_usage(&args.mount)?;

    let cancel = Arc::new(AtomicBool::new(false));
    let handler_cancel = Arc::clone(&cancel);
    ctrlc::set_handler(move || handler_cancel.store(true, Ordering::Relaxed))
        .context("failed to install interrupt handler")?;

    let options = MonitorOptions {
        interval: Duration::from_secs(args.interval.max(1)),
        threshold_percent: args.threshold,
    };
    println!(
        "Monitoring {} every {}s (threshold {:.1}%). Press Ctrl+C to stop.",
        args.mount, args.interval, args.threshold
    );

    run_volume_monitor(&args.mount, &options, &cancel, |sample| {
        if sample.threshold_exceeded {
            println!(
                "Used: {:.2}%  WARNING: over {:.1}% threshold",
                sample.percent_used, args.threshold
            );
        } else {
            println!("Used: {:.2}%", sample.percent_used);
        }
    });

    println!("Monitoring stopped.");
    Ok(())
}

fn run_history(args: HistoryArgs) -> Result<()> {
    let store = HistoryStore::new(&args.file);
    let snapshots = store.read_all()?;
    if snapshots.is_empty() {
        println!("No prior scans recorded in {}.", store.path().display());
        return Ok(());
    }
    println!("{:<20} {:<12} {:>12}", "Date", "Volume", "Used (%)");
    for snapshot in snapshots {
        println!(
            "{:<20} {:<12} {:>12.2}",
            snapshot.date, snapshot.drive, snapshot.percent_used
        );
    }
    Ok(())
}

#[cfg(windows)]
fn default_clean_targets() -> Vec<PathBuf> {
    vec![PathBuf::from("C:/Windows/Temp")]
}

#[cfg(not(windows))]
fn default_clean_targets() -> Vec<PathBuf> {
    vec![PathBuf::from("/tmp"), PathBuf::from("/var/tmp")]
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Whole-GB figure for volume totals. Integer division, matching the
/// truncation used in existing history records.
fn gib_trunc(bytes: u64) -> u64 {
    bytes / (1024 * 1024 * 1024)
}

/// Fractional GB for per-file and per-category sizes.
fn gib_f(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0 * 1024.0)
}
