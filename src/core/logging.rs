//! Logging Module
//!
//! File-only structured logging for the terminal front end:
//! - JSON events to a daily rolling file via a non-blocking writer
//! - `log` crate macros redirected into `tracing`
//! - Rolled-over log files gzip-compressed in the background
//!
//! Nothing is written to stdout; ratatui owns the terminal.

use std::fs;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Base name of the rolling log file
pub const LOG_FILE_NAME: &str = "referral-builder.log";

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info,referral_builder=debug";

/// Initialize logging into `log_dir`.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// application so buffered events are flushed on shutdown.
pub fn init(log_dir: &Path) -> WorkerGuard {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(file_layer).init();

    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    let log_dir = log_dir.to_path_buf();
    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_NAME)
    );

    std::thread::spawn(move || {
        compress_old_logs(&log_dir);
    });

    guard
}

/// Whether `name` is a rolled-over log that should be gzipped.
///
/// The appender names files `<base>.YYYY-MM-DD`; today's file is still being
/// written to.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(&format!("{LOG_FILE_NAME}."))
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

/// Date suffix of the file the appender is writing to now.
///
/// `tracing_appender::rolling::daily` rotates on UTC midnight.
fn active_log_suffix() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

fn compress_old_logs(log_dir: &Path) {
    let today_suffix = active_log_suffix();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(gz_path) => log::info!("Compressed old log: {:?}", gz_path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> std::io::Result<PathBuf> {
    let mut gz_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other("No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path = path.with_file_name(gz_name);

    if gz_path.exists() {
        return Ok(gz_path);
    }

    let mut reader = std::io::BufReader::new(fs::File::open(path)?);
    let mut encoder = GzEncoder::new(fs::File::create(&gz_path)?, Compression::default());
    std::io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(gz_path)
}
